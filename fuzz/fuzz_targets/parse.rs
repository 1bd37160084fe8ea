#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(doc) = html::parse(input) {
        // a successful parse must serialize and re-parse cleanly
        let rendered = html::outer_html(&doc);
        let _ = html::parse(&rendered);
    }
});
