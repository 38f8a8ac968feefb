//! Criterion microbenches for the overlap metric and the resolver.
//!
//! Run with: `cargo bench`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

use boxdedup::dedup::resolve_duplicates;
use boxdedup::ir::{BBoxXYXY, Pixel};
use boxdedup::overlap::compute_iou;

/// Seeded scene of `n` boxes scattered over a 1000x1000 canvas,
/// in clumps so that a fair share of them overlap.
fn scene(n: usize) -> (Vec<BBoxXYXY<Pixel>>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(42);

    let mut boxes = Vec::with_capacity(n);
    let mut scores = Vec::with_capacity(n);
    for i in 0..n {
        let clump = (i / 4) as f64;
        let cx = (clump * 97.0) % 950.0 + rng.random_range(0.0..8.0);
        let cy = (clump * 61.0) % 950.0 + rng.random_range(0.0..8.0);
        let w = rng.random_range(20.0..50.0);
        let h = rng.random_range(20.0..50.0);
        boxes.push(BBoxXYXY::from_xyxy(cx, cy, cx + w, cy + h));
        scores.push(rng.random_range(0.0..1.0));
    }
    (boxes, scores)
}

fn bench_compute_iou(c: &mut Criterion) {
    let (boxes, _) = scene(1024);
    let reference = boxes[0];

    let mut group = c.benchmark_group("compute_iou");
    group.throughput(Throughput::Elements(boxes.len() as u64));
    group.bench_function("row_1024", |b| {
        b.iter(|| black_box(compute_iou(black_box(&reference), black_box(&boxes)).unwrap()))
    });
    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_duplicates");

    for n in [16usize, 128, 512] {
        let (boxes, scores) = scene(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                let result = resolve_duplicates(black_box(&boxes), black_box(&scores), 0.5).unwrap();
                black_box(result)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compute_iou, bench_resolve);
criterion_main!(benches);
