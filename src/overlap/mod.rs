//! Intersection-over-Union between boxes.
//!
//! Areas are taken as `|width * height|`, so a box whose min/max corners
//! are swapped still has a positive area instead of producing an error.
//! Nothing here clamps the ratio; well-formed boxes always land in
//! `[0, 1]`. Two zero-area boxes that do not overlap give `0 / 0`, which is
//! returned as NaN and left for callers to interpret.

use crate::error::DedupError;
use crate::ir::BBoxXYXY;

/// IoU of a single pair of boxes.
///
/// Symmetric in its arguments. Returns NaN when the union area is zero.
#[inline]
pub fn iou<TSpace>(a: &BBoxXYXY<TSpace>, b: &BBoxXYXY<TSpace>) -> f64 {
    let inter = a.intersection_area(b);
    inter / (a.abs_area() + b.abs_area() - inter)
}

/// IoU of `reference` against every box in `candidates`, in input order.
///
/// # Errors
/// Returns [`DedupError::EmptyInput`] when `candidates` is empty.
pub fn compute_iou<TSpace>(
    reference: &BBoxXYXY<TSpace>,
    candidates: &[BBoxXYXY<TSpace>],
) -> Result<Vec<f64>, DedupError> {
    if candidates.is_empty() {
        return Err(DedupError::EmptyInput);
    }

    Ok(candidates.iter().map(|c| iou(reference, c)).collect())
}

/// True when `value` is a real IoU at or above `threshold`.
///
/// NaN and infinite values never qualify.
#[inline]
pub(crate) fn meets_threshold(value: f64, threshold: f64) -> bool {
    value.is_finite() && value >= threshold
}
