#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(url) = burst::fuzzing::parse_target_url_input(input) {
            debug_assert!(url.starts_with("http://") || url.starts_with("https://"));
        }
    }
});
