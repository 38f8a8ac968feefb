//! Duplicate resolution: collapse boxes that cover the same object.
//!
//! Resolution is worklist-based single-hop clustering:
//!
//! 1. Every index starts on the worklist.
//! 2. The lowest remaining index is drawn as the *pivot*.
//! 3. The pivot's cluster is the pivot plus every not-yet-discarded box
//!    whose IoU against the pivot is at least the threshold.
//! 4. The highest-scoring cluster member is kept (lowest index on ties);
//!    every other member is discarded under it and leaves the worklist.
//!
//! Clusters are built from the pivot's IoU row only. Two boxes that each
//! overlap a third but not each other can land in different clusters
//! depending on which of them is drawn first; this is not a connected
//! components clustering, and pivot order is therefore part of the
//! contract.
//!
//! A kept box stays on the worklist when it was not the pivot, so it can
//! later be drawn and lose to a better-scoring neighbour. When that
//! happens it is demoted and everything it had discarded moves under the
//! new winner, which keeps the result a partition of `0..N`.

mod result;

pub use result::ResolutionResult;

use std::cmp::Ordering;
use std::collections::BTreeSet;

use tracing::debug;

use crate::error::DedupError;
use crate::ir::BBoxXYXY;
use crate::overlap::{compute_iou, meets_threshold};
use crate::validation;

/// Overlap threshold used when none is given.
pub const DEFAULT_IOU_THRESHOLD: f64 = 0.5;

/// Options for [`resolve_duplicates_with`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolveOptions {
    /// Minimum IoU for two boxes to count as duplicates, in `(0, 1]`.
    pub threshold: f64,

    /// Reject reversed or non-finite boxes instead of resolving them
    /// leniently.
    pub strict: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_IOU_THRESHOLD,
            strict: false,
        }
    }
}

impl ResolveOptions {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Checks that `threshold` lies in `(0, 1]`.
pub fn check_threshold(threshold: f64) -> Result<(), DedupError> {
    if threshold > 0.0 && threshold <= 1.0 {
        Ok(())
    } else {
        Err(DedupError::InvalidThreshold(threshold))
    }
}

/// Resolves duplicates with lenient geometry.
///
/// # Errors
/// - [`DedupError::LengthMismatch`] if `boxes` and `scores` differ in length
/// - [`DedupError::EmptyInput`] if there are no boxes
/// - [`DedupError::InvalidThreshold`] if `threshold` is outside `(0, 1]`
///
/// # Example
///
/// ```
/// use boxdedup::dedup::resolve_duplicates;
/// use boxdedup::ir::{BBoxXYXY, Pixel};
///
/// let boxes: Vec<BBoxXYXY<Pixel>> = vec![
///     BBoxXYXY::from_xyxy(0.0, 0.0, 10.0, 10.0),
///     BBoxXYXY::from_xyxy(1.0, 1.0, 11.0, 11.0),
///     BBoxXYXY::from_xyxy(50.0, 50.0, 60.0, 60.0),
/// ];
/// let result = resolve_duplicates(&boxes, &[0.9, 0.95, 0.8], 0.5).unwrap();
///
/// assert_eq!(result.kept_indices(), vec![1, 2]);
/// assert_eq!(result.to_string(), "{1: {0}, 2: {}}");
/// ```
pub fn resolve_duplicates<TSpace>(
    boxes: &[BBoxXYXY<TSpace>],
    scores: &[f64],
    threshold: f64,
) -> Result<ResolutionResult, DedupError> {
    resolve_duplicates_with(
        boxes,
        scores,
        &ResolveOptions::default().with_threshold(threshold),
    )
}

/// Resolves duplicates with explicit options.
///
/// In strict mode the boxes are validated first and the first reversed or
/// non-finite box fails the call with [`DedupError::MalformedBox`].
pub fn resolve_duplicates_with<TSpace>(
    boxes: &[BBoxXYXY<TSpace>],
    scores: &[f64],
    opts: &ResolveOptions,
) -> Result<ResolutionResult, DedupError> {
    check_threshold(opts.threshold)?;

    if boxes.len() != scores.len() {
        return Err(DedupError::LengthMismatch {
            boxes: boxes.len(),
            scores: scores.len(),
        });
    }
    if boxes.is_empty() {
        return Err(DedupError::EmptyInput);
    }

    if opts.strict {
        let report = validation::validate_boxes(boxes);
        if let Some(issue) = report.first_error() {
            return Err(DedupError::MalformedBox {
                index: issue.context.box_index().unwrap_or_default(),
                message: issue.message.clone(),
            });
        }
    }

    let n = boxes.len();
    let mut worklist: BTreeSet<usize> = (0..n).collect();
    let mut discarded = vec![false; n];
    let mut result = ResolutionResult::new();

    while let Some(pivot) = worklist.pop_first() {
        let ious = compute_iou(&boxes[pivot], boxes)?;

        // The pivot belongs to its own cluster even when its self-IoU is
        // NaN (zero-area box).
        let cluster: Vec<usize> = ious
            .iter()
            .enumerate()
            .filter(|&(j, &v)| j == pivot || (!discarded[j] && meets_threshold(v, opts.threshold)))
            .map(|(j, _)| j)
            .collect();

        let winner = highest_scoring(&cluster, scores);
        result.keep(winner);

        for &member in cluster.iter().filter(|&&m| m != winner) {
            discarded[member] = true;
            worklist.remove(&member);
            result.discard(winner, member);
        }

        debug!(pivot, winner, cluster_size = cluster.len(), "resolved cluster");
    }

    Ok(result)
}

/// First index in `cluster` (ascending) with the highest score.
///
/// NaN scores rank below every number.
fn highest_scoring(cluster: &[usize], scores: &[f64]) -> usize {
    let mut best = cluster[0];
    for &idx in &cluster[1..] {
        if compare_scores(scores[idx], scores[best]) == Ordering::Greater {
            best = idx;
        }
    }
    best
}

fn compare_scores(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}
