//! Per-image detection records.
//!
//! A [`DetectionFile`] is what upstream detectors (or dataset loaders) hand
//! to boxdedup: for each image, a list of scored boxes. Resolution works on
//! one [`ImageDetections`] at a time through its parallel
//! [`boxes`](ImageDetections::boxes) / [`scores`](ImageDetections::scores)
//! views, and the kept indices flow back through
//! [`retain_kept`](ImageDetections::retain_kept).

use serde::{Deserialize, Serialize};

use super::bbox::BBoxXYXY;
use super::space::{Normalized, Pixel};
use crate::dedup::ResolutionResult;

/// Detections for any number of images.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct DetectionFile<TSpace = Pixel> {
    pub images: Vec<ImageDetections<TSpace>>,
}

impl<TSpace> Default for DetectionFile<TSpace> {
    fn default() -> Self {
        Self { images: Vec::new() }
    }
}

impl<TSpace> DetectionFile<TSpace> {
    /// Total number of detections across all images.
    pub fn detection_count(&self) -> usize {
        self.images.iter().map(|i| i.detections.len()).sum()
    }
}

/// The candidate boxes for a single image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct ImageDetections<TSpace = Pixel> {
    /// Image file name, used to look up dimensions and to name outputs.
    pub file_name: String,

    /// Image width in pixels, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    /// Image height in pixels, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    #[serde(default)]
    pub detections: Vec<Detection<TSpace>>,
}

impl<TSpace> ImageDetections<TSpace> {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            width: None,
            height: None,
            detections: Vec::new(),
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_detection(mut self, detection: Detection<TSpace>) -> Self {
        self.detections.push(detection);
        self
    }

    /// The BoxSet view, index-aligned with [`scores`](Self::scores).
    pub fn boxes(&self) -> Vec<BBoxXYXY<TSpace>>
    where
        TSpace: Copy,
    {
        self.detections.iter().map(|d| d.bbox).collect()
    }

    /// The ScoreSet view, index-aligned with [`boxes`](Self::boxes).
    pub fn scores(&self) -> Vec<f64> {
        self.detections.iter().map(|d| d.score).collect()
    }

    /// Returns a copy holding only the detections kept by `result`.
    ///
    /// Input order is preserved.
    pub fn retain_kept(&self, result: &ResolutionResult) -> Self
    where
        TSpace: Clone,
    {
        let detections = self
            .detections
            .iter()
            .enumerate()
            .filter(|(idx, _)| result.is_kept(*idx))
            .map(|(_, d)| d.clone())
            .collect();

        Self {
            file_name: self.file_name.clone(),
            width: self.width,
            height: self.height,
            detections,
        }
    }
}

impl ImageDetections<Pixel> {
    /// Divides every box by the given image size.
    pub fn to_normalized(&self, width: u32, height: u32) -> ImageDetections<Normalized> {
        let (w, h) = (width as f64, height as f64);
        ImageDetections {
            file_name: self.file_name.clone(),
            width: Some(width),
            height: Some(height),
            detections: self
                .detections
                .iter()
                .map(|d| Detection {
                    bbox: d.bbox.to_normalized(w, h),
                    score: d.score,
                    label: d.label.clone(),
                })
                .collect(),
        }
    }
}

/// One scored candidate box.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Detection<TSpace = Pixel> {
    pub bbox: BBoxXYXY<TSpace>,

    /// Detector confidence. Only compared relative to other scores.
    pub score: f64,

    /// Optional class label carried through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl<TSpace> Detection<TSpace> {
    pub fn new(bbox: BBoxXYXY<TSpace>, score: f64) -> Self {
        Self {
            bbox,
            score,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}
