//! End-to-end scenarios across the registry, driver, and effect roster.

use ambient_fx::context::{SceneContext, ThemeRgb};
use ambient_fx::driver::{AmbientCanvas, DriverState};
use ambient_fx::quality::FxQuality;
use ambient_fx::registry::{FALLBACK_ID, FxRegistry};
use ambient_render::{PackedRgba, Surface};
use proptest::prelude::*;

fn frame_ctx(width: u32, height: u32, frame: u64) -> SceneContext {
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
        particle_count: 50,
    }
}

#[test]
fn every_roster_entry_runs_a_short_session() {
    let registry = FxRegistry::standard();
    for id in registry.ids() {
        let mut fx = registry.create(id);
        fx.init(64, 48, PackedRgba::WHITE);
        assert!(fx.is_initialized(), "{id} did not initialize");
        let mut surface = Surface::new(64, 48);
        for frame in 0..120 {
            surface.clear(PackedRgba::TRANSPARENT);
            fx.render(&frame_ctx(64, 48, frame), &mut surface);
        }
    }
}

#[test]
fn every_roster_entry_survives_degenerate_input() {
    let registry = FxRegistry::standard();
    let hostile = SceneContext {
        time_seconds: f64::NAN,
        delta_ms: f64::INFINITY,
        ..frame_ctx(0, 0, 0)
    };
    for id in registry.ids() {
        let mut fx = registry.create(id);
        fx.init(0, 0, PackedRgba::WHITE);
        let mut surface = Surface::new(0, 0);
        fx.render(&hostile, &mut surface);
        fx.render(&hostile, &mut surface);
    }
}

#[test]
fn every_roster_entry_init_is_idempotent() {
    let registry = FxRegistry::standard();
    for id in registry.ids() {
        let mut fx = registry.create(id);
        fx.init(32, 32, PackedRgba::WHITE);
        fx.init(32, 32, PackedRgba::WHITE);
        assert!(fx.is_initialized(), "{id}");
        fx.reset();
        assert!(!fx.is_initialized(), "{id} did not reset");
        fx.init(32, 32, PackedRgba::WHITE);
        assert!(fx.is_initialized(), "{id} did not re-init");
    }
}

#[test]
fn off_quality_renders_nothing_for_any_entry() {
    let registry = FxRegistry::standard();
    let ctx = SceneContext {
        quality: FxQuality::Off,
        ..frame_ctx(32, 32, 5)
    };
    for id in registry.ids() {
        let mut fx = registry.create(id);
        fx.init(32, 32, PackedRgba::WHITE);
        let mut surface = Surface::new(32, 32);
        fx.render(&ctx, &mut surface);
        assert!(
            surface.pixels().iter().all(|p| *p == PackedRgba::TRANSPARENT),
            "{id} painted while Off"
        );
    }
}

#[test]
fn unknown_and_empty_ids_fall_back() {
    let registry = FxRegistry::standard();
    let fallback = registry.create(FALLBACK_ID).name();
    for bogus in ["", "   ", "nope", "InkDust", "starfield "] {
        assert_eq!(registry.create(bogus).name(), fallback, "{bogus:?}");
    }
}

#[test]
fn starfield_session_twinkles_but_stays_stable() {
    let mut canvas = AmbientCanvas::new();
    canvas.mount("midnightDesk", 120, 80);
    assert_eq!(canvas.theme().effects.renderer, "starfield");

    let mut snapshots: Vec<Vec<PackedRgba>> = Vec::new();
    for _ in 0..120 {
        let surface = canvas.tick(16.0);
        snapshots.push(surface.pixels().to_vec());
    }
    assert_eq!(canvas.frame(), 120);

    // Something was painted on every frame.
    for (i, snap) in snapshots.iter().enumerate() {
        assert!(
            snap.iter().any(|p| *p != PackedRgba::TRANSPARENT),
            "frame {i} is blank"
        );
    }
    // Twinkle means consecutive frames are not identical.
    assert_ne!(snapshots[0], snapshots[60]);
}

#[test]
fn theme_switch_mid_session_changes_palette() {
    let mut canvas = AmbientCanvas::new();
    canvas.mount("neonSprawl", 80, 60);
    for _ in 0..30 {
        canvas.tick(16.0);
    }
    canvas.set_theme("crimsonManor");
    assert_eq!(canvas.theme().id, "crimsonManor");
    assert_eq!(canvas.state(), DriverState::Running);
    let surface = canvas.tick(16.0);
    assert!(surface.pixels().iter().any(|p| *p != PackedRgba::TRANSPARENT));
}

#[test]
fn reduced_motion_mid_session_blanks_and_recovers() {
    let mut canvas = AmbientCanvas::new();
    canvas.mount("summerDusk", 60, 40);
    for _ in 0..10 {
        canvas.tick(16.0);
    }
    canvas.set_reduced_motion(true);
    let blank = canvas.tick(16.0);
    assert!(blank.pixels().iter().all(|p| *p == PackedRgba::TRANSPARENT));

    canvas.set_reduced_motion(false);
    let painted = canvas.tick(16.0);
    assert!(painted.pixels().iter().any(|p| *p != PackedRgba::TRANSPARENT));
}

#[test]
fn identical_sessions_render_identical_pixels() {
    let run = || {
        let mut canvas = AmbientCanvas::new();
        canvas.mount("hearthside", 64, 48);
        let mut last = Vec::new();
        for _ in 0..90 {
            last = canvas.tick(16.0).pixels().to_vec();
        }
        last
    };
    assert_eq!(run(), run());
}

proptest! {
    #[test]
    fn driver_never_panics_on_hostile_sequences(
        w in 0u32..200,
        h in 0u32..200,
        deltas in proptest::collection::vec(-100.0f64..10_000.0, 1..40),
        resize_w in 0u32..200,
        resize_h in 0u32..200,
    ) {
        let mut canvas = AmbientCanvas::new();
        canvas.mount("mistHollow", w, h);
        for (i, d) in deltas.iter().enumerate() {
            canvas.tick(*d);
            if i == deltas.len() / 2 {
                canvas.resize(resize_w, resize_h);
            }
        }
        canvas.teardown();
        canvas.tick(16.0);
        prop_assert_eq!(canvas.state(), DriverState::Uninitialized);
    }

    #[test]
    fn any_identifier_resolves_to_a_renderer(id in ".{0,24}") {
        let registry = FxRegistry::standard();
        let fx = registry.create(&id);
        prop_assert!(!fx.name().is_empty());
    }
}
