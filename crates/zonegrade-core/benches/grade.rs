//! Benchmarks for zone grading.
//!
//! Run with: cargo bench -p zonegrade-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use zonegrade_core::grading::curve::{generate_curve, DEFAULT_STEPS};
use zonegrade_core::{Channels, GradeOptions, Grader, PixelBuffer, ZoneId, ZoneSet};

/// Synthetic RGBA image covering the full tonal range.
fn generate_test_image(width: u32, height: u32) -> PixelBuffer {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            data.push((x * 255 / width) as u8);
            data.push((y * 255 / height) as u8);
            data.push(((x + y) * 127 / (width + height)) as u8);
            data.push(255);
        }
    }
    PixelBuffer::new(width, height, Channels::Rgba, data).expect("valid dimensions")
}

fn graded_zones() -> ZoneSet {
    let mut set = ZoneSet::default();
    set.get_mut(ZoneId::Black).exposure = 0.4;
    set.get_mut(ZoneId::Dark).saturation = 1.2;
    set.get_mut(ZoneId::Shadow).exposure = 0.3;
    set.get_mut(ZoneId::Light).saturation = 0.9;
    set.get_mut(ZoneId::Highlight).exposure = -0.5;
    set.get_mut(ZoneId::Specular).exposure = -1.0;
    set
}

fn bench_grade(c: &mut Criterion) {
    let mut group = c.benchmark_group("grade");
    let zones = graded_zones();

    for size in [256u32, 512, 1024, 2048] {
        let image = generate_test_image(size, size);
        group.throughput(Throughput::Elements(size as u64 * size as u64));

        for parallel in [false, true] {
            let grader = Grader::with_options(
                &zones,
                GradeOptions {
                    parallel,
                    ..GradeOptions::default()
                },
            );
            let label = if parallel { "parallel" } else { "sequential" };
            group.bench_with_input(BenchmarkId::new(label, size), &image, |b, image| {
                b.iter(|| grader.grade(black_box(image)))
            });
        }
    }

    group.finish();
}

fn bench_curve(c: &mut Criterion) {
    let zones = graded_zones();
    c.bench_function("generate_curve_200", |b| {
        b.iter(|| generate_curve(black_box(&zones), DEFAULT_STEPS))
    });
}

criterion_group!(benches, bench_grade, bench_curve);
criterion_main!(benches);
