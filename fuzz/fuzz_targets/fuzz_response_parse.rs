#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Must not panic; decode errors are fine.
    if let Ok(mut response) = versand::response::Response::from_slice(data) {
        response.validate_status_code();
        let _ = response.token();
    }
});
