//! Dystopia family: ash, smog, klaxons, geiger pulses, and searchlights.

use ambient_render::{PackedRgba, Surface};

use crate::context::SceneContext;
use crate::contract::SceneFx;
use crate::ease::{ease_out, flash01, pulse01};
use crate::effects::wrap_coord;
use crate::rng::XorShift32;

// ---------------------------------------------------------------------------
// AshFallFx — grey flakes sinking with lateral drift
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Flake {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    wobble: f32,
    size: f32,
}

const FLAKE_COUNT: usize = 90;

/// Desaturated flakes drifting down-left, wrapping on both axes.
#[derive(Debug, Clone)]
pub struct AshFallFx {
    flakes: Vec<Flake>,
    rng: XorShift32,
    ready: bool,
}

impl AshFallFx {
    pub fn new() -> Self {
        Self {
            flakes: Vec::new(),
            rng: XorShift32::new(0xA5BF_A115),
            ready: false,
        }
    }
}

impl Default for AshFallFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for AshFallFx {
    fn name(&self) -> &'static str {
        "Ash Fall"
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn init(&mut self, width: u32, height: u32, _primary: PackedRgba) {
        if self.ready {
            return;
        }
        let (w, h) = (width.max(1) as f32, height.max(1) as f32);
        self.flakes.clear();
        for _ in 0..FLAKE_COUNT {
            self.flakes.push(Flake {
                x: self.rng.range_f32(0.0, w),
                y: self.rng.range_f32(0.0, h),
                vx: self.rng.range_f32(-0.3, -0.05),
                vy: self.rng.range_f32(0.2, 0.6),
                wobble: self.rng.range_f32(0.0, std::f32::consts::TAU),
                size: self.rng.range_f32(0.8, 2.0),
            });
        }
        self.ready = true;
    }

    fn render(&mut self, ctx: &SceneContext, surface: &mut Surface) {
        if ctx.is_empty() || !ctx.quality.is_enabled() {
            return;
        }
        let (w, h) = (ctx.width as f32, ctx.height as f32);
        let dt = ctx.dt();

        for f in &mut self.flakes {
            f.wobble += 0.03 * dt;
            f.x = wrap_coord(f.x + (f.vx + f.wobble.sin() * 0.15) * dt, w);
            f.y = wrap_coord(f.y + f.vy * dt, h);

            // Ash reads grey: halfway between the secondary color and white.
            let grey = ctx.colors.secondary.lerp(PackedRgba::WHITE, 0.5);
            surface.fill_circle(f.x, f.y, f.size, grey.with_opacity(0.35));
        }
    }

    fn reset(&mut self) {
        self.ready = false;
    }
}

// ---------------------------------------------------------------------------
// SmogBandsFx — layered haze bands swaying across the sky
// ---------------------------------------------------------------------------

const SMOG_BAND_COUNT: usize = 5;

/// Full-width haze bands whose vertical center follows a slow sine. Purely
/// field-driven: no per-frame state beyond the clock.
#[derive(Debug, Clone)]
pub struct SmogBandsFx {
    ready: bool,
}

impl SmogBandsFx {
    pub fn new() -> Self {
        Self { ready: false }
    }
}

impl Default for SmogBandsFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for SmogBandsFx {
    fn name(&self) -> &'static str {
        "Smog Bands"
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn init(&mut self, _width: u32, _height: u32, _primary: PackedRgba) {
        self.ready = true;
    }

    fn render(&mut self, ctx: &SceneContext, surface: &mut Surface) {
        if ctx.is_empty() || !ctx.quality.is_enabled() {
            return;
        }
        let (w, h) = (ctx.width as f32, ctx.height as f32);
        let t = ctx.time() as f32;

        for i in 0..SMOG_BAND_COUNT {
            let k = i as f32;
            let cy = h * (0.15 + k * 0.18) + (t * (0.1 + k * 0.03) + k * 1.7).sin() * h * 0.03;
            let half = h * 0.05 + k * 1.5;
            let alpha = 0.05 + k * 0.015;
            let y0 = (cy - half) as i32;
            let y1 = (cy + half) as i32;
            for y in y0..=y1 {
                let v = 1.0 - ((y as f32 - cy).abs() / half).clamp(0.0, 1.0);
                surface.hline(
                    y,
                    0,
                    w as i32 - 1,
                    ctx.colors.secondary.with_opacity(alpha * v),
                );
            }
        }
    }

    fn reset(&mut self) {
        self.ready = false;
    }
}

// ---------------------------------------------------------------------------
// AlarmPulseFx — hard klaxon flash washing the frame edges
// ---------------------------------------------------------------------------

/// Binary alarm: the wash snaps on above the pulse threshold and snaps off
/// below it. A fading alarm reads as ambience; a klaxon must cut.
#[derive(Debug, Clone)]
pub struct AlarmPulseFx {
    ready: bool,
}

impl AlarmPulseFx {
    pub fn new() -> Self {
        Self { ready: false }
    }
}

impl Default for AlarmPulseFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for AlarmPulseFx {
    fn name(&self) -> &'static str {
        "Alarm Pulse"
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn init(&mut self, _width: u32, _height: u32, _primary: PackedRgba) {
        self.ready = true;
    }

    fn render(&mut self, ctx: &SceneContext, surface: &mut Surface) {
        if ctx.is_empty() || !ctx.quality.is_enabled() {
            return;
        }
        let on = flash01(ctx.time(), 0.8, 0.7);
        if on <= 0.0 {
            return;
        }

        let (w, h) = (ctx.width, ctx.height);
        // Vignette-style wash: strongest at the frame edges.
        let border = (w.min(h) / 6).max(1);
        for d in 0..border {
            let a = ctx
                .colors
                .primary
                .with_opacity(0.12 * (1.0 - d as f32 / border as f32));
            surface.hline(d as i32, 0, w as i32 - 1, a);
            surface.hline(h as i32 - 1 - d as i32, 0, w as i32 - 1, a);
            surface.vline(d as i32, 0, h as i32 - 1, a);
            surface.vline(w as i32 - 1 - d as i32, 0, h as i32 - 1, a);
        }
    }

    fn reset(&mut self) {
        self.ready = false;
    }
}

// ---------------------------------------------------------------------------
// RadiationPulseFx — rings expanding from a hot center
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Ring {
    radius: f32,
    alpha: f32,
}

pub const RING_CAP: usize = 10;

/// Concentric rings born at the center on a timer, easing outward and
/// thinning until they retire.
#[derive(Debug, Clone)]
pub struct RadiationPulseFx {
    rings: Vec<Ring>,
    spawn_clock: f32,
    ready: bool,
}

impl RadiationPulseFx {
    pub fn new() -> Self {
        Self {
            rings: Vec::new(),
            spawn_clock: 0.0,
            ready: false,
        }
    }

    /// Live ring count; never exceeds [`RING_CAP`].
    pub fn population(&self) -> usize {
        self.rings.len()
    }
}

impl Default for RadiationPulseFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for RadiationPulseFx {
    fn name(&self) -> &'static str {
        "Radiation Pulse"
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn init(&mut self, _width: u32, _height: u32, _primary: PackedRgba) {
        if self.ready {
            return;
        }
        self.rings.clear();
        self.spawn_clock = 0.0;
        self.ready = true;
    }

    fn render(&mut self, ctx: &SceneContext, surface: &mut Surface) {
        if ctx.is_empty() || !ctx.quality.is_enabled() {
            return;
        }
        let (w, h) = (ctx.width as f32, ctx.height as f32);
        let (cx, cy) = (w * 0.5, h * 0.5);
        let max_r = w.hypot(h) * 0.5;
        let dt = ctx.dt();

        self.spawn_clock += dt;
        // A new ring roughly every 75 frames at 60 fps.
        if self.spawn_clock >= 75.0 && self.rings.len() < RING_CAP {
            self.spawn_clock = 0.0;
            self.rings.push(Ring {
                radius: 2.0,
                alpha: 0.5,
            });
        }

        for ring in &mut self.rings {
            let progress = (ring.radius / max_r).clamp(0.0, 1.0);
            ring.radius += (0.8 + ease_out(progress) * 1.8) * dt;
            ring.alpha = 0.5 * (1.0 - progress);

            // Stroke the ring as a circle outline sampled around the arc.
            let steps = (ring.radius * std::f32::consts::TAU).clamp(16.0, 720.0) as u32;
            let color = ctx.colors.accent.with_opacity(ring.alpha);
            for i in 0..steps {
                let a = i as f32 / steps as f32 * std::f32::consts::TAU;
                let (sin, cos) = a.sin_cos();
                surface.blend(
                    (cx + cos * ring.radius) as i32,
                    (cy + sin * ring.radius) as i32,
                    color,
                );
            }
        }
        self.rings.retain(|r| r.radius < max_r);

        // Hot core.
        let breathe = pulse01(ctx.time(), 0.5);
        surface.glow_dot(cx, cy, 8.0, ctx.colors.primary, 0.3 + breathe * 0.2);
    }

    fn reset(&mut self) {
        self.ready = false;
    }
}

// ---------------------------------------------------------------------------
// SearchlightsFx — beams sweeping from below the horizon
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Beam {
    base_frac: f32,
    angle: f32,
    rate: f32,
    span: f32,
    width: f32,
}

const BEAM_COUNT: usize = 3;

/// Rotating assembly: each beam pivots around a base point on the bottom
/// edge, sweeping back and forth through its arc.
#[derive(Debug, Clone)]
pub struct SearchlightsFx {
    beams: Vec<Beam>,
    rng: XorShift32,
    ready: bool,
}

impl SearchlightsFx {
    pub fn new() -> Self {
        Self {
            beams: Vec::new(),
            rng: XorShift32::new(0x5EA2_C411),
            ready: false,
        }
    }
}

impl Default for SearchlightsFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for SearchlightsFx {
    fn name(&self) -> &'static str {
        "Searchlights"
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn init(&mut self, _width: u32, _height: u32, _primary: PackedRgba) {
        if self.ready {
            return;
        }
        self.beams.clear();
        for i in 0..BEAM_COUNT {
            self.beams.push(Beam {
                base_frac: 0.2 + i as f32 * 0.3,
                angle: self.rng.range_f32(0.0, std::f32::consts::TAU),
                rate: self.rng.range_f32(0.15, 0.35),
                span: self.rng.range_f32(0.5, 0.9),
                width: self.rng.range_f32(0.04, 0.09),
            });
        }
        self.ready = true;
    }

    fn render(&mut self, ctx: &SceneContext, surface: &mut Surface) {
        if ctx.is_empty() || !ctx.quality.is_enabled() {
            return;
        }
        let (w, h) = (ctx.width as f32, ctx.height as f32);
        let t = ctx.time() as f32;

        for beam in &self.beams {
            // Back-and-forth sweep centered on straight up.
            let sweep = (t * beam.rate + beam.angle).sin() * beam.span;
            let dir = -std::f32::consts::FRAC_PI_2 + sweep;
            let base = (beam.base_frac * w, h);
            let reach = h * 1.4;

            let (sin_l, cos_l) = (dir - beam.width).sin_cos();
            let (sin_r, cos_r) = (dir + beam.width).sin_cos();
            let tip_l = (base.0 + cos_l * reach, base.1 + sin_l * reach);
            let tip_r = (base.0 + cos_r * reach, base.1 + sin_r * reach);

            // Fill the wedge with interpolated rays.
            const RAYS: usize = 10;
            for i in 0..=RAYS {
                let f = i as f32 / RAYS as f32;
                let tx = tip_l.0 + (tip_r.0 - tip_l.0) * f;
                let ty = tip_l.1 + (tip_r.1 - tip_l.1) * f;
                let edge = 1.0 - (f - 0.5).abs() * 2.0;
                surface.line(
                    base.0,
                    base.1,
                    tx,
                    ty,
                    ctx.colors.accent.with_opacity(0.05 + edge * 0.07),
                );
            }
            surface.glow_dot(base.0, base.1, 6.0, ctx.colors.accent, 0.35);
        }
    }

    fn reset(&mut self) {
        self.ready = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::testutil::{ctx, degenerate_ctx};

    #[test]
    fn alarm_pulse_is_binary() {
        let mut fx = AlarmPulseFx::new();
        fx.init(40, 40, PackedRgba::WHITE);
        let mut on_frames = 0;
        let mut off_frames = 0;
        for frame in 0..240 {
            let mut surface = Surface::new(40, 40);
            fx.render(&ctx(40, 40, frame), &mut surface);
            let painted = surface
                .pixels()
                .iter()
                .any(|p| *p != PackedRgba::TRANSPARENT);
            if painted {
                on_frames += 1;
            } else {
                off_frames += 1;
            }
        }
        // The klaxon must both fire and rest inside a four-second window.
        assert!(on_frames > 0);
        assert!(off_frames > 0);
    }

    #[test]
    fn radiation_rings_bounded() {
        let mut fx = RadiationPulseFx::new();
        fx.init(80, 60, PackedRgba::WHITE);
        let mut surface = Surface::new(80, 60);
        for frame in 0..5000 {
            fx.render(&ctx(80, 60, frame), &mut surface);
            assert!(fx.population() <= RING_CAP);
        }
    }

    #[test]
    fn ash_fall_wraps_both_axes() {
        let mut fx = AshFallFx::new();
        fx.init(50, 50, PackedRgba::WHITE);
        let mut surface = Surface::new(50, 50);
        for frame in 0..800 {
            fx.render(&ctx(50, 50, frame), &mut surface);
        }
        for f in &fx.flakes {
            assert!(f.x >= -24.0 && f.x <= 74.0);
            assert!(f.y >= -24.0 && f.y <= 74.0);
        }
    }

    #[test]
    fn searchlights_sweep_moves() {
        let mut fx = SearchlightsFx::new();
        fx.init(60, 60, PackedRgba::WHITE);
        let mut a = Surface::new(60, 60);
        let mut b = Surface::new(60, 60);
        fx.render(&ctx(60, 60, 0), &mut a);
        fx.render(&ctx(60, 60, 120), &mut b);
        assert_ne!(a.pixels(), b.pixels());
    }

    #[test]
    fn family_survives_degenerate_input() {
        let fxs: Vec<Box<dyn SceneFx>> = vec![
            Box::new(AshFallFx::new()),
            Box::new(SmogBandsFx::new()),
            Box::new(AlarmPulseFx::new()),
            Box::new(RadiationPulseFx::new()),
            Box::new(SearchlightsFx::new()),
        ];
        for mut fx in fxs {
            fx.init(0, 0, PackedRgba::WHITE);
            let mut surface = Surface::new(0, 0);
            fx.render(&degenerate_ctx(0, 0), &mut surface);
        }
    }
}
