//! Fuzz target for detection JSON parsing.
//!
//! Feeds arbitrary bytes to the detections parser, checking for panics,
//! crashes, or hangs.

#![no_main]

use boxdedup::ir::io_json::fuzz_parse_detections;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = fuzz_parse_detections(data);
});
