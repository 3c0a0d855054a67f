//! Benchmarks for tonekit operations.
//!
//! Run with: `cargo bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use tonekit_core::{PixelBuffer, mean_luma};
use tonekit_lut::ToneLut;
use tonekit_ops::curves::{brightness_lut, color_balance_into, color_balance_lut};
use tonekit_ops::{AdjustmentEngine, HistogramCounts};

const SIZES: [(u32, u32); 3] = [(256, 256), (1024, 768), (1920, 1080)];

fn test_image(width: u32, height: u32) -> PixelBuffer {
    let data = (0..width * height * 4).map(|i| (i.wrapping_mul(2654435761) >> 24) as u8).collect();
    PixelBuffer::from_data(width, height, data).unwrap()
}

/// Benchmark LUT construction and application.
fn bench_lut(c: &mut Criterion) {
    let mut group = c.benchmark_group("lut");

    group.bench_function("build_brightness", |b| b.iter(|| brightness_lut(black_box(37.5))));

    for (w, h) in SIZES {
        let src = test_image(w, h);
        let mut dst = src.clone();
        let lut = ToneLut::invert();

        group.throughput(Throughput::Elements((w * h) as u64));
        group.bench_with_input(BenchmarkId::new("apply_into", format!("{}x{}", w, h)), &src, |b, s| {
            b.iter(|| lut.apply_into(black_box(s), &mut dst))
        });
    }

    group.finish();
}

/// Benchmark histogram counting.
fn bench_histogram(c: &mut Criterion) {
    let mut group = c.benchmark_group("histogram");

    for (w, h) in SIZES {
        let src = test_image(w, h);
        group.throughput(Throughput::Elements((w * h) as u64));
        group.bench_with_input(BenchmarkId::new("compute", format!("{}x{}", w, h)), &src, |b, s| {
            b.iter(|| HistogramCounts::compute(black_box(s)))
        });
        group.bench_with_input(BenchmarkId::new("normalize", format!("{}x{}", w, h)), &src, |b, s| {
            let counts = HistogramCounts::compute(s);
            b.iter(|| counts.normalize(black_box(90.0)))
        });
    }

    group.finish();
}

/// Benchmark the HSL-based color balance and a contrast slider drag.
fn bench_adjust(c: &mut Criterion) {
    let mut group = c.benchmark_group("adjust");

    for (w, h) in SIZES {
        let src = test_image(w, h);
        let label = format!("{}x{}", w, h);
        group.throughput(Throughput::Elements((w * h) as u64));

        group.bench_with_input(BenchmarkId::new("color_balance", &label), &src, |b, s| {
            let lut = color_balance_lut(20.0, -10.0, 5.0);
            let mut dst = s.clone();
            b.iter(|| color_balance_into(&lut, black_box(s), &mut dst))
        });

        group.bench_with_input(BenchmarkId::new("mean_luma", &label), &src, |b, s| {
            b.iter(|| mean_luma(black_box(s)))
        });

        group.bench_with_input(BenchmarkId::new("contrast_drag", &label), &src, |b, s| {
            let mut engine = AdjustmentEngine::new();
            let mut live = s.clone();
            let mut level = 0.0;
            b.iter(|| {
                level = (level + 7.0) % 90.0;
                engine.apply_contrast(&mut live, black_box(level)).unwrap();
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_lut, bench_histogram, bench_adjust);
criterion_main!(benches);
