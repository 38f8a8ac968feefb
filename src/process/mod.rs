//! Applies duplicate resolution to whole detection files.
//!
//! Each image is resolved on its own. The output is only produced once
//! every image has resolved successfully, so a failure never leaves a
//! partially deduplicated file behind.

mod report;

pub use report::{DedupReport, ImageSummary};

use std::path::Path;

use tracing::{debug, warn};

use crate::config::DedupConfig;
use crate::dedup::resolve_duplicates_with;
use crate::error::DedupError;
use crate::ir::io_json::read_image_dimensions;
use crate::ir::{DetectionFile, ImageDetections, Normalized, Pixel};

/// Deduplicated detections, in pixel or normalized coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum DedupOutput {
    Pixel(DetectionFile<Pixel>),
    Normalized(DetectionFile<Normalized>),
}

impl DedupOutput {
    pub fn detection_count(&self) -> usize {
        match self {
            DedupOutput::Pixel(file) => file.detection_count(),
            DedupOutput::Normalized(file) => file.detection_count(),
        }
    }

    /// Writes the output as pretty JSON.
    pub fn write_json(&self, path: &Path) -> Result<(), DedupError> {
        match self {
            DedupOutput::Pixel(file) => crate::ir::io_json::write_detections_json(path, file),
            DedupOutput::Normalized(file) => crate::ir::io_json::write_detections_json(path, file),
        }
    }
}

/// Resolves duplicates in every image of `file`.
///
/// Images without detections pass through unchanged. With
/// `config.normalize`, kept boxes are divided by the image size taken from
/// the record or, failing that, read from `config.images_dir`. Images
/// with nothing to normalize need no size.
pub fn dedup_detections(
    file: &DetectionFile,
    config: &DedupConfig,
) -> Result<(DedupOutput, DedupReport), DedupError> {
    config.validate()?;
    let opts = config.resolve_options();

    let mut report = DedupReport::new(config.threshold);
    let mut kept_images = Vec::with_capacity(file.images.len());

    for image in &file.images {
        if image.detections.is_empty() {
            debug!(file_name = %image.file_name, "no detections, passing through");
            report.images.push(ImageSummary::empty(&image.file_name));
            kept_images.push(image.clone());
            continue;
        }

        let result = resolve_duplicates_with(&image.boxes(), &image.scores(), &opts)
            .inspect_err(|e| warn!(file_name = %image.file_name, "resolution failed: {e}"))?;

        kept_images.push(image.retain_kept(&result));
        report
            .images
            .push(ImageSummary::from_result(&image.file_name, result));
    }

    let output = if config.normalize {
        let mut normalized = Vec::with_capacity(kept_images.len());
        for image in &kept_images {
            if image.detections.is_empty() {
                normalized.push(ImageDetections {
                    file_name: image.file_name.clone(),
                    width: image.width,
                    height: image.height,
                    detections: Vec::new(),
                });
                continue;
            }
            let (width, height) = image_dimensions(image, config.images_dir.as_deref())?;
            normalized.push(image.to_normalized(width, height));
        }
        DedupOutput::Normalized(DetectionFile { images: normalized })
    } else {
        DedupOutput::Pixel(DetectionFile {
            images: kept_images,
        })
    };

    Ok((output, report))
}

fn image_dimensions(
    image: &ImageDetections,
    images_dir: Option<&Path>,
) -> Result<(u32, u32), DedupError> {
    match (image.width, image.height) {
        (Some(w), Some(h)) if w > 0 && h > 0 => Ok((w, h)),
        _ => {
            let dir = images_dir.ok_or_else(|| DedupError::MissingImageDimensions {
                file_name: image.file_name.clone(),
                message: "no width/height in the record and no images directory given".into(),
            })?;
            read_image_dimensions(&dir.join(&image.file_name))
        }
    }
}
