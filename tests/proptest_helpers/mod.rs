#![allow(dead_code)]

use boxdedup::ir::{BBoxXYXY, Pixel};
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

/// Side of the square canvas boxes are drawn on. Small enough that random
/// boxes overlap often.
pub const CANVAS: u32 = 40;

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(128);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Well-formed box with integer corners and positive area.
pub fn arb_bbox() -> BoxedStrategy<BBoxXYXY<Pixel>> {
    (0..CANVAS - 1, 0..CANVAS - 1, 1..CANVAS / 2, 1..CANVAS / 2)
        .prop_map(|(x, y, w, h)| {
            let xmax = (x + w).min(CANVAS);
            let ymax = (y + h).min(CANVAS);
            BBoxXYXY::from_xyxy(x as f64, y as f64, xmax as f64, ymax as f64)
        })
        .boxed()
}

/// Scores from a small set so that ties are common.
pub fn arb_score() -> BoxedStrategy<f64> {
    (0u8..=10).prop_map(|s| s as f64 / 10.0).boxed()
}

pub fn arb_threshold() -> BoxedStrategy<f64> {
    prop_oneof![
        Just(0.5),
        Just(1.0),
        (1u32..=100).prop_map(|t| t as f64 / 100.0),
    ]
    .boxed()
}

/// One image's worth of boxes with aligned scores.
pub fn arb_scene(max_boxes: usize) -> BoxedStrategy<(Vec<BBoxXYXY<Pixel>>, Vec<f64>)> {
    prop::collection::vec((arb_bbox(), arb_score()), 1..=max_boxes)
        .prop_map(|pairs| pairs.into_iter().unzip())
        .boxed()
}

/// Like [`arb_scene`] but every box has the same score.
pub fn arb_scene_uniform_score(max_boxes: usize) -> BoxedStrategy<(Vec<BBoxXYXY<Pixel>>, Vec<f64>)> {
    prop::collection::vec(arb_bbox(), 1..=max_boxes)
        .prop_map(|boxes| {
            let scores = vec![0.5; boxes.len()];
            (boxes, scores)
        })
        .boxed()
}

/// True when the boxes share no interior point.
pub fn disjoint(a: &BBoxXYXY<Pixel>, b: &BBoxXYXY<Pixel>) -> bool {
    a.xmax() <= b.xmin() || b.xmax() <= a.xmin() || a.ymax() <= b.ymin() || b.ymax() <= a.ymin()
}
