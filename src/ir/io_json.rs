//! JSON reading and writing for detection files.
//!
//! The on-disk layout is a direct serde rendering of [`DetectionFile`]:
//!
//! ```json
//! {
//!   "images": [
//!     {
//!       "file_name": "cells_001.png",
//!       "width": 1600,
//!       "height": 1200,
//!       "detections": [
//!         { "bbox": { "xmin": 10, "ymin": 20, "xmax": 60, "ymax": 70 }, "score": 0.92, "label": "ring" },
//!         { "bbox": [12, 21, 61, 72], "score": 0.88 }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use super::model::DetectionFile;
use crate::error::DedupError;

const JSON_EXTENSION: &str = "json";

/// Reads a detection file from disk.
pub fn read_detections_json(path: &Path) -> Result<DetectionFile, DedupError> {
    let file = File::open(path).map_err(DedupError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| DedupError::DetectionJsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes a detection file (pixel or normalized) as pretty JSON.
pub fn write_detections_json<TSpace>(
    path: &Path,
    file: &DetectionFile<TSpace>,
) -> Result<(), DedupError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let out = File::create(path).map_err(DedupError::Io)?;
    let writer = BufWriter::new(out);

    serde_json::to_writer_pretty(writer, file).map_err(|source| DedupError::DetectionJsonWrite {
        path: path.to_path_buf(),
        source,
    })
}

pub fn from_json_str(json: &str) -> Result<DetectionFile, serde_json::Error> {
    serde_json::from_str(json)
}

pub fn from_json_slice(bytes: &[u8]) -> Result<DetectionFile, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Fuzz-only entrypoint for detection JSON parsing.
#[cfg(feature = "fuzzing")]
pub fn fuzz_parse_detections(bytes: &[u8]) -> Result<(), DedupError> {
    let _ = from_json_slice(bytes).map_err(|source| DedupError::DetectionJsonParse {
        path: PathBuf::from("<fuzz>"),
        source,
    })?;
    Ok(())
}

pub fn to_json_string<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// Recursively collects `*.json` files under `root`, sorted by path.
pub fn collect_json_files(root: &Path) -> Result<Vec<PathBuf>, DedupError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry.map_err(|source| DedupError::DirectoryWalk {
            path: root.to_path_buf(),
            message: source.to_string(),
        })?;

        if entry.file_type().is_file() && has_json_extension(entry.path()) {
            files.push(entry.path().to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

fn has_json_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(JSON_EXTENSION))
}

/// Reads `(width, height)` from an image file header.
pub fn read_image_dimensions(path: &Path) -> Result<(u32, u32), DedupError> {
    let size = imagesize::size(path).map_err(|source| DedupError::ImageDimensionRead {
        path: path.to_path_buf(),
        source,
    })?;

    let width: u32 = size
        .width
        .try_into()
        .map_err(|_| DedupError::MissingImageDimensions {
            file_name: path.display().to_string(),
            message: format!("image width {} does not fit in u32", size.width),
        })?;
    let height: u32 = size
        .height
        .try_into()
        .map_err(|_| DedupError::MissingImageDimensions {
            file_name: path.display().to_string(),
            message: format!("image height {} does not fit in u32", size.height),
        })?;

    Ok((width, height))
}
