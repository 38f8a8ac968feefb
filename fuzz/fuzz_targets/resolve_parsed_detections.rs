//! Fuzz target for duplicate resolution on parsed input.
//!
//! Any file that parses must resolve without panicking, and every
//! successful resolution must cover each box exactly once.

#![no_main]

use boxdedup::dedup::{resolve_duplicates_with, ResolveOptions};
use boxdedup::ir::io_json::from_json_slice;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let Ok(file) = from_json_slice(data) else {
        return;
    };

    for strict in [false, true] {
        let opts = ResolveOptions::default().strict(strict);
        for image in file.images.iter().filter(|i| i.detections.len() <= 2048) {
            let boxes = image.boxes();
            if let Ok(result) = resolve_duplicates_with(&boxes, &image.scores(), &opts) {
                assert!(result.is_partition_of(boxes.len()));
            }
        }
    }
});
