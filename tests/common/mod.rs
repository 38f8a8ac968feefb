#![allow(dead_code)]

use std::fs;
use std::path::Path;

/// A minimal uncompressed 24-bit BMP, enough for header-based size lookup.
pub fn bmp_bytes(width: u32, height: u32) -> Vec<u8> {
    let row_stride = (width * 3).div_ceil(4) * 4;
    let pixel_array_size = row_stride * height;
    let file_size = 54 + pixel_array_size;

    let mut bytes = Vec::with_capacity(file_size as usize);
    bytes.extend_from_slice(b"BM");
    bytes.extend_from_slice(&file_size.to_le_bytes());
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    bytes.extend_from_slice(&54u32.to_le_bytes());

    bytes.extend_from_slice(&40u32.to_le_bytes());
    bytes.extend_from_slice(&(width as i32).to_le_bytes());
    bytes.extend_from_slice(&(height as i32).to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&24u16.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&pixel_array_size.to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());

    bytes.resize(file_size as usize, 0);
    bytes
}

pub fn write_bmp(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, bmp_bytes(width, height)).expect("write bmp file");
}

/// Three boxes: 0 and 1 overlap (1 scores higher), 2 stands alone.
pub const OVERLAPPING_PAIR: &str = r#"{
  "images": [
    {
      "file_name": "cells_001.bmp",
      "width": 100,
      "height": 100,
      "detections": [
        {"bbox": [0, 0, 10, 10], "score": 0.9, "label": "ring"},
        {"bbox": [1, 1, 11, 11], "score": 0.95, "label": "ring"},
        {"bbox": [50, 50, 60, 60], "score": 0.8, "label": "trophozoite"}
      ]
    }
  ]
}"#;

/// Same boxes as [`OVERLAPPING_PAIR`] but without image dimensions.
pub const NO_DIMENSIONS: &str = r#"{
  "images": [
    {
      "file_name": "cells_001.bmp",
      "detections": [
        {"bbox": [0, 0, 10, 10], "score": 0.9},
        {"bbox": [1, 1, 11, 11], "score": 0.95},
        {"bbox": [50, 50, 60, 60], "score": 0.8}
      ]
    }
  ]
}"#;

/// One reversed box, which strict mode rejects.
pub const REVERSED_BOX: &str = r#"{
  "images": [
    {
      "file_name": "cells_002.bmp",
      "detections": [
        {"bbox": [0, 0, 10, 10], "score": 0.9},
        {"bbox": [10, 10, 0, 0], "score": 0.5}
      ]
    }
  ]
}"#;

/// One zero-area box: a warning, or an error under `--strict`.
pub const DEGENERATE_BOX: &str = r#"{
  "images": [
    {
      "file_name": "cells_003.bmp",
      "detections": [
        {"bbox": [3, 3, 3, 8], "score": 0.9}
      ]
    }
  ]
}"#;

pub fn write_fixture(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, content).expect("write fixture");
}
