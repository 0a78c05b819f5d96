//! Fantasy family: forests, fae, runes, dragonfire, and potions.

use ambient_render::{PackedRgba, Surface};

use crate::context::SceneContext;
use crate::contract::SceneFx;
use crate::effects::wrap_coord;
use crate::rng::XorShift32;

// ---------------------------------------------------------------------------
// SporeDriftFx — luminous spores under a forest canopy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Spore {
    x: f32,
    y: f32,
    vy: f32,
    sway_phase: f32,
    sway_amp: f32,
    size: f32,
}

const SPORE_COUNT: usize = 70;

/// Spores sinking slowly with a pronounced sideways sway.
#[derive(Debug, Clone)]
pub struct SporeDriftFx {
    spores: Vec<Spore>,
    rng: XorShift32,
    ready: bool,
}

impl SporeDriftFx {
    pub fn new() -> Self {
        Self {
            spores: Vec::new(),
            rng: XorShift32::new(0x5906_ED21),
            ready: false,
        }
    }
}

impl Default for SporeDriftFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for SporeDriftFx {
    fn name(&self) -> &'static str {
        "Spore Drift"
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn init(&mut self, width: u32, height: u32, _primary: PackedRgba) {
        if self.ready {
            return;
        }
        let (w, h) = (width.max(1) as f32, height.max(1) as f32);
        self.spores.clear();
        for _ in 0..SPORE_COUNT {
            self.spores.push(Spore {
                x: self.rng.range_f32(0.0, w),
                y: self.rng.range_f32(0.0, h),
                vy: self.rng.range_f32(0.08, 0.3),
                sway_phase: self.rng.range_f32(0.0, std::f32::consts::TAU),
                sway_amp: self.rng.range_f32(0.2, 0.7),
                size: self.rng.range_f32(1.0, 2.2),
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

        for s in &mut self.spores {
            s.sway_phase += 0.02 * dt;
            s.x = wrap_coord(s.x + s.sway_phase.sin() * s.sway_amp * dt, w);
            s.y = wrap_coord(s.y + s.vy * dt, h);

            surface.glow_dot(s.x, s.y, s.size * 3.5, ctx.colors.accent, 0.3);
            surface.fill_circle(s.x, s.y, s.size * 0.6, ctx.colors.accent.with_opacity(0.6));
        }
    }

    fn reset(&mut self) {
        self.ready = false;
    }
}

// ---------------------------------------------------------------------------
// FaerieLightsFx — darting lights tracing looping paths
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Faerie {
    cx: f32,
    cy: f32,
    orbit_a: f32,
    orbit_b: f32,
    angle: f32,
    rate: f32,
    shimmer: f32,
}

const FAERIE_COUNT: usize = 16;

/// Lights looping along elliptical paths, shimmering between the accent and
/// secondary colors.
#[derive(Debug, Clone)]
pub struct FaerieLightsFx {
    faeries: Vec<Faerie>,
    rng: XorShift32,
    ready: bool,
}

impl FaerieLightsFx {
    pub fn new() -> Self {
        Self {
            faeries: Vec::new(),
            rng: XorShift32::new(0xFAE2_1E55),
            ready: false,
        }
    }
}

impl Default for FaerieLightsFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for FaerieLightsFx {
    fn name(&self) -> &'static str {
        "Faerie Lights"
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn init(&mut self, width: u32, height: u32, _primary: PackedRgba) {
        if self.ready {
            return;
        }
        let (w, h) = (width.max(1) as f32, height.max(1) as f32);
        self.faeries.clear();
        for _ in 0..FAERIE_COUNT {
            self.faeries.push(Faerie {
                cx: self.rng.range_f32(0.0, w),
                cy: self.rng.range_f32(0.0, h),
                orbit_a: self.rng.range_f32(10.0, 50.0),
                orbit_b: self.rng.range_f32(6.0, 30.0),
                angle: self.rng.range_f32(0.0, std::f32::consts::TAU),
                rate: self.rng.range_f32(0.01, 0.04),
                shimmer: self.rng.range_f32(0.0, std::f32::consts::TAU),
            });
        }
        self.ready = true;
    }

    fn render(&mut self, ctx: &SceneContext, surface: &mut Surface) {
        if ctx.is_empty() || !ctx.quality.is_enabled() {
            return;
        }
        let dt = ctx.dt();
        let t = ctx.time() as f32;

        for f in &mut self.faeries {
            f.angle += f.rate * dt;
            let x = f.cx + f.angle.cos() * f.orbit_a;
            let y = f.cy + (f.angle * 1.3).sin() * f.orbit_b;

            let mix = ((t * 0.9 + f.shimmer).sin() * 0.5 + 0.5).clamp(0.0, 1.0);
            let color = ctx.colors.accent.lerp(ctx.colors.secondary, mix);
            surface.glow_dot(x, y, 6.0, color, 0.7);
            surface.fill_circle(x, y, 1.2, color.with_opacity(0.9));
        }
    }

    fn reset(&mut self) {
        self.ready = false;
    }
}

// ---------------------------------------------------------------------------
// RuneRiseFx — glowing glyph shapes floating upward
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Rune {
    x: f32,
    y: f32,
    vy: f32,
    spin_phase: f32,
    size: f32,
}

const RUNE_COUNT: usize = 24;

/// Angular rune shapes drifting upward, rotating slowly. Runes are drawn as
/// crossed strokes rather than glyph bitmaps; at background opacity they
/// read as sigils.
#[derive(Debug, Clone)]
pub struct RuneRiseFx {
    runes: Vec<Rune>,
    rng: XorShift32,
    ready: bool,
}

impl RuneRiseFx {
    pub fn new() -> Self {
        Self {
            runes: Vec::new(),
            rng: XorShift32::new(0x6106_E521),
            ready: false,
        }
    }
}

impl Default for RuneRiseFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for RuneRiseFx {
    fn name(&self) -> &'static str {
        "Rune Rise"
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn init(&mut self, width: u32, height: u32, _primary: PackedRgba) {
        if self.ready {
            return;
        }
        let (w, h) = (width.max(1) as f32, height.max(1) as f32);
        self.runes.clear();
        for _ in 0..RUNE_COUNT {
            self.runes.push(Rune {
                x: self.rng.range_f32(0.0, w),
                y: self.rng.range_f32(0.0, h),
                vy: self.rng.range_f32(0.15, 0.5),
                spin_phase: self.rng.range_f32(0.0, std::f32::consts::TAU),
                size: self.rng.range_f32(3.0, 8.0),
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

        for r in &mut self.runes {
            r.spin_phase += 0.015 * dt;
            r.x = wrap_coord(r.x, w);
            r.y = wrap_coord(r.y - r.vy * dt, h);

            let color = ctx.colors.accent.with_opacity(0.45);
            let (sin, cos) = r.spin_phase.sin_cos();
            let dx = cos * r.size;
            let dy = sin * r.size;
            surface.line(r.x - dx, r.y - dy, r.x + dx, r.y + dy, color);
            surface.line(r.x + dy, r.y - dx, r.x - dy, r.y + dx, color);
            surface.glow_dot(r.x, r.y, r.size * 1.6, ctx.colors.accent, 0.2);
        }
    }

    fn reset(&mut self) {
        self.ready = false;
    }
}

// ---------------------------------------------------------------------------
// DragonFireFx — oscillating fire silhouette along the bottom edge
// ---------------------------------------------------------------------------

/// A fire silhouette built from three sine terms swept across the width,
/// filled with a vertical heat gradient. Phase accumulates for continuous
/// motion.
#[derive(Debug, Clone)]
pub struct DragonFireFx {
    phase: f32,
    ready: bool,
}

impl DragonFireFx {
    pub fn new() -> Self {
        Self {
            phase: 0.0,
            ready: false,
        }
    }
}

impl Default for DragonFireFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for DragonFireFx {
    fn name(&self) -> &'static str {
        "Dragon Fire"
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn init(&mut self, _width: u32, _height: u32, _primary: PackedRgba) {
        if self.ready {
            return;
        }
        self.phase = 0.0;
        self.ready = true;
    }

    fn render(&mut self, ctx: &SceneContext, surface: &mut Surface) {
        if ctx.is_empty() || !ctx.quality.is_enabled() {
            return;
        }
        let (w, h) = (ctx.width as f32, ctx.height as f32);
        self.phase += 0.045 * ctx.dt();

        let base = h * 0.82;
        for px in 0..ctx.width {
            let x = px as f32;
            let n = x / w.max(1.0);
            let crest = (n * 9.0 + self.phase).sin() * 0.35
                + (n * 23.0 - self.phase * 1.7).sin() * 0.2
                + (n * 4.0 + self.phase * 0.6).sin() * 0.45;
            let top = base - (crest * 0.5 + 0.5) * h * 0.22;

            let y0 = top.max(0.0) as i32;
            let y1 = (h - 1.0) as i32;
            for y in y0..=y1 {
                let depth = ((y as f32 - top) / (h - top).max(1.0)).clamp(0.0, 1.0);
                let color = ctx
                    .colors
                    .accent
                    .lerp(ctx.colors.primary, depth)
                    .with_opacity(0.12 + depth * 0.35);
                surface.blend(px as i32, y, color);
            }
        }
    }

    fn reset(&mut self) {
        self.ready = false;
    }
}

// ---------------------------------------------------------------------------
// PotionBrewFx — hue-drifting smoke over a cauldron
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct SmokePuff {
    x: f32,
    y: f32,
    vy: f32,
    radius: f32,
    alpha: f32,
    hue: f32,
}

/// Hard cap and age ceiling. The brew spawns nearly every frame; without the
/// cap a long writing session would grow this array without bound.
pub const PUFF_CAP: usize = 64;
const PUFF_DECAY: f32 = 0.985;
const PUFF_MIN_ALPHA: f32 = 0.02;

/// Smoke rising off a brew, cycling hue as it climbs. The one effect family
/// that does its own hue math: each puff carries a drifting hue rather than
/// sampling the theme palette.
#[derive(Debug, Clone)]
pub struct PotionBrewFx {
    puffs: Vec<SmokePuff>,
    rng: XorShift32,
    hue_cursor: f32,
    ready: bool,
}

impl PotionBrewFx {
    pub fn new() -> Self {
        Self {
            puffs: Vec::new(),
            rng: XorShift32::new(0x9071_0B2E),
            hue_cursor: 120.0,
            ready: false,
        }
    }

    /// Live puff count; never exceeds [`PUFF_CAP`].
    pub fn population(&self) -> usize {
        self.puffs.len()
    }
}

impl Default for PotionBrewFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for PotionBrewFx {
    fn name(&self) -> &'static str {
        "Potion Brew"
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn init(&mut self, _width: u32, _height: u32, _primary: PackedRgba) {
        if self.ready {
            return;
        }
        self.puffs.clear();
        self.hue_cursor = 120.0;
        self.ready = true;
    }

    fn render(&mut self, ctx: &SceneContext, surface: &mut Surface) {
        if ctx.is_empty() || !ctx.quality.is_enabled() {
            return;
        }
        let (w, h) = (ctx.width as f32, ctx.height as f32);
        let dt = ctx.dt();

        self.hue_cursor = (self.hue_cursor + 0.6 * dt).rem_euclid(360.0);
        if self.puffs.len() < PUFF_CAP && self.rng.chance(0.8) {
            self.puffs.push(SmokePuff {
                x: w * 0.5 + self.rng.range_f32(-w * 0.12, w * 0.12),
                y: h * 0.9,
                vy: self.rng.range_f32(0.4, 1.0),
                radius: self.rng.range_f32(4.0, 10.0),
                alpha: self.rng.range_f32(0.25, 0.45),
                hue: self.hue_cursor,
            });
        }

        for p in &mut self.puffs {
            p.y -= p.vy * dt;
            p.radius += 0.12 * dt;
            p.alpha *= PUFF_DECAY;
            p.hue = (p.hue + 0.3 * dt).rem_euclid(360.0);

            let (r, g, b) = ambient_style::hsl_to_rgb(p.hue, 70.0, 60.0);
            surface.glow_dot(p.x, p.y, p.radius, PackedRgba::rgb(r, g, b), p.alpha);
        }

        self.puffs.retain(|p| p.alpha > PUFF_MIN_ALPHA && p.y > -20.0);
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
    fn potion_brew_respects_cap() {
        let mut fx = PotionBrewFx::new();
        fx.init(80, 60, PackedRgba::WHITE);
        let mut surface = Surface::new(80, 60);
        for frame in 0..3000 {
            fx.render(&ctx(80, 60, frame), &mut surface);
            assert!(fx.population() <= PUFF_CAP);
        }
    }

    #[test]
    fn potion_brew_retires_faded_puffs() {
        let mut fx = PotionBrewFx::new();
        fx.init(80, 60, PackedRgba::WHITE);
        let mut surface = Surface::new(80, 60);
        for frame in 0..600 {
            fx.render(&ctx(80, 60, frame), &mut surface);
        }
        for p in &fx.puffs {
            assert!(p.alpha > PUFF_MIN_ALPHA);
        }
    }

    #[test]
    fn spore_drift_init_idempotent() {
        let mut fx = SporeDriftFx::new();
        fx.init(100, 100, PackedRgba::WHITE);
        let n = fx.spores.len();
        fx.init(100, 100, PackedRgba::WHITE);
        assert_eq!(fx.spores.len(), n);
        fx.reset();
        assert!(!fx.is_initialized());
    }

    #[test]
    fn dragon_fire_only_burns_lower_band() {
        let mut fx = DragonFireFx::new();
        fx.init(60, 100, PackedRgba::WHITE);
        let mut surface = Surface::new(60, 100);
        fx.render(&ctx(60, 100, 0), &mut surface);
        // Top third stays untouched.
        for y in 0..20 {
            for x in 0..60 {
                assert_eq!(surface.get(x, y), PackedRgba::TRANSPARENT);
            }
        }
    }

    #[test]
    fn family_survives_degenerate_input() {
        let fxs: Vec<Box<dyn SceneFx>> = vec![
            Box::new(SporeDriftFx::new()),
            Box::new(FaerieLightsFx::new()),
            Box::new(RuneRiseFx::new()),
            Box::new(DragonFireFx::new()),
            Box::new(PotionBrewFx::new()),
        ];
        for mut fx in fxs {
            fx.init(0, 0, PackedRgba::WHITE);
            let mut surface = Surface::new(0, 0);
            fx.render(&degenerate_ctx(0, 0), &mut surface);
        }
    }

    #[test]
    fn faerie_lights_deterministic() {
        let mut a = FaerieLightsFx::new();
        let mut b = FaerieLightsFx::new();
        a.init(50, 50, PackedRgba::WHITE);
        b.init(50, 50, PackedRgba::WHITE);
        let mut sa = Surface::new(50, 50);
        let mut sb = Surface::new(50, 50);
        for frame in 0..20 {
            sa.clear(PackedRgba::BLACK);
            sb.clear(PackedRgba::BLACK);
            a.render(&ctx(50, 50, frame), &mut sa);
            b.render(&ctx(50, 50, frame), &mut sb);
            assert_eq!(sa.pixels(), sb.pixels());
        }
    }
}
