//! Benchmarks for the ambient effect frame path.
//!
//! Performance budgets:
//! - Single-effect frame (960x540): < 4ms
//! - Driver tick including clear + overlay (960x540): < 5ms
//! - Glow-dot primitive: < 2μs per call at radius 6
//!
//! Run with: cargo bench -p ambient-fx --bench effects_bench

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use ambient_fx::context::{SceneContext, ThemeRgb};
use ambient_fx::driver::AmbientCanvas;
use ambient_fx::quality::FxQuality;
use ambient_fx::registry::FxRegistry;
use ambient_render::{PackedRgba, Surface};

/// Common canvas sizes.
const SIZES: &[(u32, u32, &str)] = &[
    (480, 270, "480x270"),
    (960, 540, "960x540"),
    (1920, 1080, "1920x1080"),
];

fn make_ctx(width: u32, height: u32, frame: u64) -> SceneContext {
    SceneContext {
        width,
        height,
        frame,
        time_seconds: frame as f64 * 0.016,
        delta_ms: 16.0,
        quality: FxQuality::Full,
        colors: ThemeRgb::default_dark(),
        glow_intensity: 0.8,
        particle_speed: 1.0,
        particle_count: 60,
    }
}

fn bench_single_effects(c: &mut Criterion) {
    let registry = FxRegistry::standard();
    let mut group = c.benchmark_group("effects/frame");

    for id in ["inkDust", "starfield", "neonRain", "dragonFire", "holoGrid"] {
        for &(w, h, name) in SIZES {
            group.throughput(Throughput::Elements(w as u64 * h as u64));
            group.bench_with_input(BenchmarkId::new(id, name), &(w, h), |b, &(w, h)| {
                let mut fx = registry.create(id);
                fx.init(w, h, PackedRgba::WHITE);
                let mut surface = Surface::new(w, h);
                let mut frame = 0u64;
                b.iter(|| {
                    frame += 1;
                    surface.clear(PackedRgba::TRANSPARENT);
                    fx.render(&make_ctx(w, h, frame), black_box(&mut surface));
                    black_box(surface.pixels());
                });
            });
        }
    }
    group.finish();
}

fn bench_driver_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("driver/tick");

    for &(w, h, name) in SIZES {
        group.throughput(Throughput::Elements(w as u64 * h as u64));
        group.bench_with_input(BenchmarkId::new("starfield_theme", name), &(w, h), |b, &(w, h)| {
            let mut canvas = AmbientCanvas::new();
            canvas.mount("midnightDesk", w, h);
            b.iter(|| {
                black_box(canvas.tick(16.0).pixels());
            });
        });
    }
    group.finish();
}

fn bench_glow_dot(c: &mut Criterion) {
    c.bench_function("primitives/glow_dot_r6", |b| {
        let mut surface = Surface::new(64, 64);
        b.iter(|| {
            surface.glow_dot(32.0, 32.0, 6.0, PackedRgba::rgb(255, 128, 0), 0.8);
            black_box(surface.pixels());
        });
    });
}

criterion_group!(benches, bench_single_effects, bench_driver_tick, bench_glow_dot);
criterion_main!(benches);
