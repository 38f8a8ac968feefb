//! Summary of a `dedup` run.

use serde::Serialize;
use std::fmt;

use crate::dedup::ResolutionResult;

/// Per-file outcome of duplicate resolution.
#[derive(Clone, Debug, Default, Serialize)]
pub struct DedupReport {
    /// Input path, when the detections came from a file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub threshold: f64,
    pub images: Vec<ImageSummary>,
}

impl DedupReport {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            ..Default::default()
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn input_count(&self) -> usize {
        self.images.iter().map(|i| i.input).sum()
    }

    pub fn kept_count(&self) -> usize {
        self.images.iter().map(|i| i.kept).sum()
    }

    pub fn discarded_count(&self) -> usize {
        self.images.iter().map(|i| i.discarded).sum()
    }
}

/// Counts and kept → discarded groups for one image.
#[derive(Clone, Debug, Serialize)]
pub struct ImageSummary {
    pub file_name: String,
    pub input: usize,
    pub kept: usize,
    pub discarded: usize,
    /// Absent for images with no detections.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<ResolutionResult>,
}

impl ImageSummary {
    pub(crate) fn from_result(file_name: &str, result: ResolutionResult) -> Self {
        Self {
            file_name: file_name.to_string(),
            input: result.len(),
            kept: result.kept_count(),
            discarded: result.discarded_count(),
            groups: Some(result),
        }
    }

    pub(crate) fn empty(file_name: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            input: 0,
            kept: 0,
            discarded: 0,
            groups: None,
        }
    }
}

impl fmt::Display for DedupReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            writeln!(f, "{}:", source)?;
        }
        writeln!(
            f,
            "  {} image(s), {} box(es) in, {} kept, {} discarded (IoU >= {})",
            self.images.len(),
            self.input_count(),
            self.kept_count(),
            self.discarded_count(),
            self.threshold
        )?;

        for image in self.images.iter().filter(|i| i.discarded > 0) {
            write!(
                f,
                "  - {}: {} -> {}",
                image.file_name, image.input, image.kept
            )?;
            if let Some(groups) = &image.groups {
                write!(f, " {}", groups)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
