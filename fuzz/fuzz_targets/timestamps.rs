#![no_main]

use libfuzzer_sys::fuzz_target;
use resv_client::times;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(parsed) = times::parse_request(text) {
            // Minute precision makes the render/parse loop lossless.
            let rendered = times::format_request(parsed);
            assert_eq!(times::parse_request(&rendered).ok(), Some(parsed));
        }
        let _ = times::parse_response(text);
    }
});
