//! Geometry and record checks ahead of duplicate resolution.
//!
//! Resolution itself is lenient about box shape: reversed corners get a
//! positive area and degenerate boxes simply never overlap anything. The
//! checks here surface those inputs instead, and back the `strict` option
//! of [`crate::dedup::ResolveOptions`]:
//! - non-finite coordinates and reversed corners are errors
//! - zero-area boxes, non-finite scores and naming problems are warnings

mod report;

pub use report::{
    IssueCode, IssueContext, ReportSummary, Severity, ValidationIssue, ValidationReport,
};

use std::collections::HashSet;

use crate::ir::{BBoxXYXY, DetectionFile};

/// Options for validation behavior.
#[derive(Clone, Debug, Default)]
pub struct ValidateOptions {
    /// If true, every warning is reported as an error.
    pub strict: bool,
}

/// Checks every box of a BoxSet.
pub fn validate_boxes<TSpace>(boxes: &[BBoxXYXY<TSpace>]) -> ValidationReport {
    let mut report = ValidationReport::new();
    for (index, bbox) in boxes.iter().enumerate() {
        check_bbox(bbox, IssueContext::Box { index }, &mut report);
    }
    report
}

/// Validates a whole detection file.
///
/// In strict mode, warnings are promoted to errors.
pub fn validate_detection_file<TSpace>(
    file: &DetectionFile<TSpace>,
    opts: &ValidateOptions,
) -> ValidationReport {
    let mut report = ValidationReport::new();
    let mut seen_names: HashSet<&str> = HashSet::new();

    for image in &file.images {
        let name = image.file_name.as_str();
        let image_ctx = || IssueContext::Image {
            file_name: name.to_string(),
        };

        if name.is_empty() {
            report.add(ValidationIssue::warning(
                IssueCode::EmptyFileName,
                "Empty filename",
                image_ctx(),
            ));
        } else if !seen_names.insert(name) {
            report.add(ValidationIssue::warning(
                IssueCode::DuplicateFileName,
                format!("File name '{}' appears more than once", name),
                image_ctx(),
            ));
        }

        if image.width == Some(0) || image.height == Some(0) {
            report.add(ValidationIssue::error(
                IssueCode::InvalidImageDimensions,
                format!(
                    "Invalid dimensions {}x{} (must be positive)",
                    dim(image.width),
                    dim(image.height)
                ),
                image_ctx(),
            ));
        }

        for (index, detection) in image.detections.iter().enumerate() {
            let ctx = IssueContext::Detection {
                file_name: name.to_string(),
                index,
            };

            if !detection.score.is_finite() {
                report.add(ValidationIssue::warning(
                    IssueCode::ScoreNotFinite,
                    format!("Non-finite score {}", detection.score),
                    ctx.clone(),
                ));
            }

            check_bbox(&detection.bbox, ctx, &mut report);
        }
    }

    if opts.strict {
        for issue in &mut report.issues {
            issue.severity = Severity::Error;
        }
    }

    report
}

fn dim(value: Option<u32>) -> String {
    value.map_or_else(|| "?".to_string(), |v| v.to_string())
}

fn check_bbox<TSpace>(bbox: &BBoxXYXY<TSpace>, ctx: IssueContext, report: &mut ValidationReport) {
    let [xmin, ymin, xmax, ymax] = bbox.to_array();

    if !bbox.is_finite() {
        report.add(ValidationIssue::error(
            IssueCode::BBoxNotFinite,
            format!(
                "Non-finite coordinates ({}, {}, {}, {})",
                xmin, ymin, xmax, ymax
            ),
            ctx,
        ));
        return;
    }

    if !bbox.is_ordered() {
        report.add(ValidationIssue::error(
            IssueCode::InvalidBBoxOrdering,
            format!(
                "Invalid ordering: min ({}, {}) should be <= max ({}, {})",
                xmin, ymin, xmax, ymax
            ),
            ctx,
        ));
        return;
    }

    if bbox.is_degenerate() {
        report.add(ValidationIssue::warning(
            IssueCode::DegenerateBBox,
            format!("Zero area box ({}, {}, {}, {})", xmin, ymin, xmax, ymax),
            ctx,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Detection, ImageDetections, Pixel};

    fn bbox(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> BBoxXYXY<Pixel> {
        BBoxXYXY::from_xyxy(xmin, ymin, xmax, ymax)
    }

    #[test]
    fn clean_boxes_pass() {
        let report = validate_boxes(&[bbox(0.0, 0.0, 1.0, 1.0), bbox(2.0, 2.0, 5.0, 9.0)]);
        assert!(report.is_clean());
    }

    #[test]
    fn reversed_box_is_an_error() {
        let report = validate_boxes(&[bbox(0.0, 0.0, 1.0, 1.0), bbox(10.0, 0.0, 0.0, 10.0)]);
        assert_eq!(report.error_count(), 1);
        let issue = report.first_error().unwrap();
        assert_eq!(issue.code, IssueCode::InvalidBBoxOrdering);
        assert_eq!(issue.context.box_index(), Some(1));
    }

    #[test]
    fn non_finite_box_skips_further_checks() {
        let report = validate_boxes(&[bbox(f64::NAN, 0.0, 0.0, 0.0)]);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].code, IssueCode::BBoxNotFinite);
    }

    #[test]
    fn degenerate_box_is_a_warning() {
        let report = validate_boxes(&[bbox(3.0, 3.0, 3.0, 8.0)]);
        assert!(report.is_ok());
        assert_eq!(report.warning_count(), 1);
        assert_eq!(report.issues[0].code, IssueCode::DegenerateBBox);
    }

    #[test]
    fn file_level_checks() {
        let file: DetectionFile = DetectionFile {
            images: vec![
                ImageDetections::new("a.png")
                    .with_size(0, 10)
                    .with_detection(Detection::new(bbox(0.0, 0.0, 1.0, 1.0), f64::NAN)),
                ImageDetections::new("a.png"),
                ImageDetections::new(""),
            ],
        };

        let report = validate_detection_file(&file, &ValidateOptions::default());
        let codes: Vec<IssueCode> = report.issues.iter().map(|i| i.code).collect();

        assert!(codes.contains(&IssueCode::InvalidImageDimensions));
        assert!(codes.contains(&IssueCode::ScoreNotFinite));
        assert!(codes.contains(&IssueCode::DuplicateFileName));
        assert!(codes.contains(&IssueCode::EmptyFileName));
        assert_eq!(report.error_count(), 1);
    }

    #[test]
    fn strict_promotes_warnings_to_errors() {
        let file: DetectionFile = DetectionFile {
            images: vec![ImageDetections::new("a.png")
                .with_detection(Detection::new(bbox(3.0, 3.0, 3.0, 8.0), 0.5))],
        };

        let lenient = validate_detection_file(&file, &ValidateOptions::default());
        assert_eq!(lenient.error_count(), 0);
        assert_eq!(lenient.warning_count(), 1);

        let strict = validate_detection_file(&file, &ValidateOptions { strict: true });
        assert_eq!(strict.error_count(), 1);
        assert_eq!(strict.warning_count(), 0);
        assert_eq!(strict.issues[0].code, IssueCode::DegenerateBBox);
    }

    #[test]
    fn report_display_lists_issues() {
        let report = validate_boxes(&[bbox(5.0, 5.0, 1.0, 1.0)]);
        let text = report.to_string();
        assert!(text.contains("1 error(s)"));
        assert!(text.contains("InvalidBBoxOrdering in box 0"));
    }

    #[test]
    fn summary_serializes_counts() {
        let report = validate_boxes(&[bbox(5.0, 5.0, 1.0, 1.0)]);
        let json = serde_json::to_string(&report.summary()).unwrap();
        assert!(json.contains("\"error_count\":1"));
        assert!(json.contains("\"kind\":\"box\""));
    }
}
