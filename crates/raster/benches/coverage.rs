//! Benchmarks the coverage engine end-to-end (parse -> flatten -> partition
//! -> scanline coverage) on a moderately complex path: a rounded rectangle
//! with a few arcs, large enough to exercise both the AA and non-AA strip
//! paths.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use math::AffineTransform;
use raster::{fill_image, FillRule, Path};

fn rounded_rect_path() -> Path {
    Path::rounded_rect(10., 10., 400., 300., 24., 24., 24., 24.)
}

fn bench_fill(c: &mut Criterion) {
    let path = rounded_rect_path();
    c.bench_function("fill_rounded_rect_into_image", |b| {
        b.iter(|| {
            let image = fill_image(black_box(&path), 512, 512, [255, 128, 0, 255], FillRule::NonZero);
            black_box(image);
        });
    });
}

fn bench_bounds(c: &mut Criterion) {
    let path = rounded_rect_path();
    c.bench_function("compute_bounds_rounded_rect", |b| {
        b.iter(|| {
            let bounds = raster::compute_bounds(black_box(&path), AffineTransform::identity());
            black_box(bounds);
        });
    });
}

criterion_group!(benches, bench_fill, bench_bounds);
criterion_main!(benches);
