use mimalloc::MiMalloc;
use std::fs;
use std::process::ExitCode;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const USAGE: &str = "usage: htmlfuse [--simple] <first.html> <second.html>";

fn main() -> ExitCode {
    env_logger::init();

    let mut simple = false;
    let mut paths: Vec<String> = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--simple" => simple = true,
            "--help" | "-h" => {
                println!("{USAGE}");
                return ExitCode::SUCCESS;
            }
            _ => paths.push(arg),
        }
    }

    let [first, second] = paths.as_slice() else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };

    let first_html = match fs::read_to_string(first) {
        Ok(s) => s,
        Err(err) => {
            eprintln!("htmlfuse: {first}: {err}");
            return ExitCode::FAILURE;
        }
    };
    let second_html = match fs::read_to_string(second) {
        Ok(s) => s,
        Err(err) => {
            eprintln!("htmlfuse: {second}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let merged = if simple {
        merge::merge_html_simple(&first_html, &second_html)
    } else {
        merge::merge_html(&first_html, &second_html)
    };

    match merged {
        Ok(out) => {
            println!("{out}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("htmlfuse: {err}");
            ExitCode::FAILURE
        }
    }
}
