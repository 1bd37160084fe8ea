#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let (first, second) = match input.split_once('\u{0}') {
        Some(pair) => pair,
        None => (input, input),
    };
    let _ = merge::merge_html(first, second);
    let _ = merge::merge_html(second, first);
    let _ = merge::merge_html_simple(first, second);
});
