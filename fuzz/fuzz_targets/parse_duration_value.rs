#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let value = burst::fuzzing::parse_duration_value_input(input);
        let arg = burst::fuzzing::parse_duration_arg_input(input);
        debug_assert_eq!(value.is_ok(), arg.is_ok());
    }
});
