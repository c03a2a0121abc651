#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(args) = burst::fuzzing::apply_config_from_json(data) {
        debug_assert!(args.workers.get() >= 1);
        debug_assert!(args.requests.get() >= 1);
        debug_assert!(!args.request_timeout.is_zero());
    }
});
