use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationReport;

/// The main error type for boxdedup operations.
#[derive(Debug, Error)]
pub enum DedupError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse detections JSON from {path}: {source}")]
    DetectionJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write detections JSON to {path}: {source}")]
    DetectionJsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to read image dimensions from {path}: {source}")]
    ImageDimensionRead {
        path: PathBuf,
        #[source]
        source: imagesize::ImageError,
    },

    #[error("Failed while traversing {path}: {message}")]
    DirectoryWalk { path: PathBuf, message: String },

    #[error("Empty input: at least one box is required")]
    EmptyInput,

    #[error("Box/score length mismatch: {boxes} box(es) but {scores} score(s)")]
    LengthMismatch { boxes: usize, scores: usize },

    #[error("Invalid overlap threshold {0} (must be in (0, 1])")]
    InvalidThreshold(f64),

    #[error("Malformed box at index {index}: {message}")]
    MalformedBox { index: usize, message: String },

    #[error("Cannot normalize {file_name}: {message}")]
    MissingImageDimensions { file_name: String, message: String },

    #[error("Validation failed with {error_count} error(s) and {warning_count} warning(s)")]
    ValidationFailed {
        error_count: usize,
        warning_count: usize,
        report: ValidationReport,
    },
}
