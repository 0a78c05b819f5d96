//! Historical family: parchment, ink, candle smoke, star charts, and autumn.

use ambient_render::{PackedRgba, Surface};

use crate::context::SceneContext;
use crate::contract::SceneFx;
use crate::ease::ease_out;
use crate::effects::wrap_coord;
use crate::rng::XorShift32;

// ---------------------------------------------------------------------------
// ParchmentDustFx — fine dust hanging in lamplight
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct DustSpeck {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    shimmer_phase: f32,
}

const SPECK_COUNT: usize = 80;

/// Near-stationary specks with a faint brownian wander and a slow shimmer.
/// The stillness is the point; motion should only register peripherally.
#[derive(Debug, Clone)]
pub struct ParchmentDustFx {
    specks: Vec<DustSpeck>,
    rng: XorShift32,
    ready: bool,
}

impl ParchmentDustFx {
    pub fn new() -> Self {
        Self {
            specks: Vec::new(),
            rng: XorShift32::new(0x9A2C_4D05),
            ready: false,
        }
    }
}

impl Default for ParchmentDustFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for ParchmentDustFx {
    fn name(&self) -> &'static str {
        "Parchment Dust"
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn init(&mut self, width: u32, height: u32, _primary: PackedRgba) {
        if self.ready {
            return;
        }
        let (w, h) = (width.max(1) as f32, height.max(1) as f32);
        self.specks.clear();
        for _ in 0..SPECK_COUNT {
            self.specks.push(DustSpeck {
                x: self.rng.range_f32(0.0, w),
                y: self.rng.range_f32(0.0, h),
                vx: self.rng.range_f32(-0.04, 0.04),
                vy: self.rng.range_f32(-0.03, 0.05),
                shimmer_phase: self.rng.range_f32(0.0, std::f32::consts::TAU),
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
        let t = ctx.time() as f32;

        for s in &mut self.specks {
            // Occasional nudge keeps the wander from ever settling.
            if self.rng.chance(0.01) {
                s.vx = self.rng.range_f32(-0.04, 0.04);
                s.vy = self.rng.range_f32(-0.03, 0.05);
            }
            s.x = wrap_coord(s.x + s.vx * dt, w);
            s.y = wrap_coord(s.y + s.vy * dt, h);

            let shimmer = (t * 0.3 + s.shimmer_phase).sin() * 0.5 + 0.5;
            surface.blend(
                s.x as i32,
                s.y as i32,
                ctx.colors.accent.with_opacity(0.12 + shimmer * 0.2),
            );
        }
    }

    fn reset(&mut self) {
        self.ready = false;
    }
}

// ---------------------------------------------------------------------------
// InkRipplesFx — rings spreading from unseen pen touches
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Ripple {
    x: f32,
    y: f32,
    radius: f32,
    max_radius: f32,
}

pub const RIPPLE_CAP: usize = 8;

/// Rings born at random touch points, easing outward and fading. Retires at
/// full spread.
#[derive(Debug, Clone)]
pub struct InkRipplesFx {
    ripples: Vec<Ripple>,
    rng: XorShift32,
    ready: bool,
}

impl InkRipplesFx {
    pub fn new() -> Self {
        Self {
            ripples: Vec::new(),
            rng: XorShift32::new(0x14B2_19F1),
            ready: false,
        }
    }

    /// Live ripple count; never exceeds [`RIPPLE_CAP`].
    pub fn population(&self) -> usize {
        self.ripples.len()
    }
}

impl Default for InkRipplesFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for InkRipplesFx {
    fn name(&self) -> &'static str {
        "Ink Ripples"
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn init(&mut self, _width: u32, _height: u32, _primary: PackedRgba) {
        if self.ready {
            return;
        }
        self.ripples.clear();
        self.ready = true;
    }

    fn render(&mut self, ctx: &SceneContext, surface: &mut Surface) {
        if ctx.is_empty() || !ctx.quality.is_enabled() {
            return;
        }
        let (w, h) = (ctx.width as f32, ctx.height as f32);
        let dt = ctx.dt();

        if self.ripples.len() < RIPPLE_CAP && self.rng.chance(0.012) {
            self.ripples.push(Ripple {
                x: self.rng.range_f32(0.1, 0.9) * w,
                y: self.rng.range_f32(0.1, 0.9) * h,
                radius: 1.0,
                max_radius: self.rng.range_f32(15.0, 45.0),
            });
        }

        for r in &mut self.ripples {
            let progress = (r.radius / r.max_radius).clamp(0.0, 1.0);
            // Ripples start quick and coast out.
            r.radius += (1.2 - ease_out(progress)) * 0.4 * dt;
            let alpha = 0.3 * (1.0 - progress);

            let steps = (r.radius * std::f32::consts::TAU).clamp(8.0, 360.0) as u32;
            let ink = ctx.colors.primary.with_opacity(alpha);
            for i in 0..steps {
                let a = i as f32 / steps as f32 * std::f32::consts::TAU;
                let (sin, cos) = a.sin_cos();
                surface.blend(
                    (r.x + cos * r.radius) as i32,
                    (r.y + sin * r.radius) as i32,
                    ink,
                );
            }
        }

        self.ripples.retain(|r| r.radius < r.max_radius);
    }

    fn reset(&mut self) {
        self.ready = false;
    }
}

// ---------------------------------------------------------------------------
// CandleSmokeFx — a thin wisp from a just-snuffed wick
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Wisp {
    y: f32,
    sway_seed: f32,
    alpha: f32,
}

pub const WISP_CAP: usize = 36;

/// Spawn-and-retire wisps rising from a fixed wick with a drunken sway that
/// widens with altitude.
#[derive(Debug, Clone)]
pub struct CandleSmokeFx {
    wisps: Vec<Wisp>,
    rng: XorShift32,
    ready: bool,
}

impl CandleSmokeFx {
    pub fn new() -> Self {
        Self {
            wisps: Vec::new(),
            rng: XorShift32::new(0xCA4D_5A0C),
            ready: false,
        }
    }

    /// Live wisp count; never exceeds [`WISP_CAP`].
    pub fn population(&self) -> usize {
        self.wisps.len()
    }
}

impl Default for CandleSmokeFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for CandleSmokeFx {
    fn name(&self) -> &'static str {
        "Candle Smoke"
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn init(&mut self, _width: u32, _height: u32, _primary: PackedRgba) {
        if self.ready {
            return;
        }
        self.wisps.clear();
        self.ready = true;
    }

    fn render(&mut self, ctx: &SceneContext, surface: &mut Surface) {
        if ctx.is_empty() || !ctx.quality.is_enabled() {
            return;
        }
        let (w, h) = (ctx.width as f32, ctx.height as f32);
        let dt = ctx.dt();
        let t = ctx.time() as f32;

        if self.wisps.len() < WISP_CAP && self.rng.chance(0.4) {
            self.wisps.push(Wisp {
                y: h * 0.8,
                sway_seed: self.rng.range_f32(0.0, std::f32::consts::TAU),
                alpha: self.rng.range_f32(0.12, 0.25),
            });
        }

        let wick_x = w * 0.5;
        for wisp in &mut self.wisps {
            wisp.y -= 0.5 * dt;
            wisp.alpha *= 0.99;

            let climb = (h * 0.8 - wisp.y).max(0.0);
            let sway = (climb * 0.08 + t * 0.5 + wisp.sway_seed).sin() * (1.0 + climb * 0.1);
            surface.glow_dot(
                wick_x + sway,
                wisp.y,
                1.0 + climb * 0.03,
                ctx.colors.secondary,
                wisp.alpha,
            );
        }

        self.wisps.retain(|wisp| wisp.alpha > 0.02 && wisp.y > -10.0);

        // The cooling wick itself.
        surface.glow_dot(wick_x, h * 0.8, 2.0, ctx.colors.accent, 0.2);
    }

    fn reset(&mut self) {
        self.ready = false;
    }
}

// ---------------------------------------------------------------------------
// ConstellationsFx — a star chart wheeling around a pole
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct ChartStar {
    angle: f32,
    dist_frac: f32,
    brightness: f32,
    linked: bool,
}

const CHART_STAR_COUNT: usize = 36;

/// Rotating assembly: fixed stars on a wheel turning about an off-center
/// pole. Stars marked `linked` get a constellation line to the previous
/// linked star.
#[derive(Debug, Clone)]
pub struct ConstellationsFx {
    stars: Vec<ChartStar>,
    rotation: f32,
    rng: XorShift32,
    ready: bool,
}

impl ConstellationsFx {
    pub fn new() -> Self {
        Self {
            stars: Vec::new(),
            rotation: 0.0,
            rng: XorShift32::new(0xC045_7E11),
            ready: false,
        }
    }
}

impl Default for ConstellationsFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for ConstellationsFx {
    fn name(&self) -> &'static str {
        "Constellations"
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn init(&mut self, _width: u32, _height: u32, _primary: PackedRgba) {
        if self.ready {
            return;
        }
        self.stars.clear();
        self.rotation = 0.0;
        for _ in 0..CHART_STAR_COUNT {
            self.stars.push(ChartStar {
                angle: self.rng.range_f32(0.0, std::f32::consts::TAU),
                dist_frac: self.rng.range_f32(0.1, 1.0),
                brightness: self.rng.range_f32(0.2, 0.7),
                linked: self.rng.chance(0.3),
            });
        }
        self.ready = true;
    }

    fn render(&mut self, ctx: &SceneContext, surface: &mut Surface) {
        if ctx.is_empty() || !ctx.quality.is_enabled() {
            return;
        }
        let (w, h) = (ctx.width as f32, ctx.height as f32);
        self.rotation += 0.0008 * ctx.dt();

        let (px, py) = (w * 0.35, h * 0.3);
        let reach = w.hypot(h) * 0.5;
        let mut prev_linked: Option<(f32, f32)> = None;

        for s in &self.stars {
            let a = s.angle + self.rotation;
            let (sin, cos) = a.sin_cos();
            let x = px + cos * s.dist_frac * reach;
            let y = py + sin * s.dist_frac * reach;

            surface.glow_dot(x, y, 2.5, ctx.colors.accent, s.brightness * 0.5);
            surface.set(x as i32, y as i32, ctx.colors.accent.with_opacity(s.brightness));

            if s.linked {
                if let Some((lx, ly)) = prev_linked {
                    surface.line(lx, ly, x, y, ctx.colors.secondary.with_opacity(0.1));
                }
                prev_linked = Some((x, y));
            }
        }

        // Pole star.
        surface.glow_dot(px, py, 3.0, PackedRgba::WHITE, 0.4);
    }

    fn reset(&mut self) {
        self.ready = false;
    }
}

// ---------------------------------------------------------------------------
// LeafFallFx — autumn leaves rocking down
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Leaf {
    x: f32,
    y: f32,
    vy: f32,
    rock_phase: f32,
    rock_rate: f32,
    size: f32,
    tint: f32,
}

const LEAF_COUNT: usize = 30;

/// Leaves descending on a pendulum rock: lateral velocity follows the cosine
/// of the rock phase, so each leaf traces the familiar falling zigzag.
#[derive(Debug, Clone)]
pub struct LeafFallFx {
    leaves: Vec<Leaf>,
    rng: XorShift32,
    ready: bool,
}

impl LeafFallFx {
    pub fn new() -> Self {
        Self {
            leaves: Vec::new(),
            rng: XorShift32::new(0x1EAF_FA11),
            ready: false,
        }
    }
}

impl Default for LeafFallFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for LeafFallFx {
    fn name(&self) -> &'static str {
        "Leaf Fall"
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn init(&mut self, width: u32, height: u32, _primary: PackedRgba) {
        if self.ready {
            return;
        }
        let (w, h) = (width.max(1) as f32, height.max(1) as f32);
        self.leaves.clear();
        for _ in 0..LEAF_COUNT {
            self.leaves.push(Leaf {
                x: self.rng.range_f32(0.0, w),
                y: self.rng.range_f32(0.0, h),
                vy: self.rng.range_f32(0.2, 0.5),
                rock_phase: self.rng.range_f32(0.0, std::f32::consts::TAU),
                rock_rate: self.rng.range_f32(0.02, 0.05),
                size: self.rng.range_f32(1.5, 3.2),
                tint: self.rng.range_f32(0.0, 1.0),
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

        for leaf in &mut self.leaves {
            leaf.rock_phase += leaf.rock_rate * dt;
            leaf.x = wrap_coord(leaf.x + leaf.rock_phase.cos() * 0.6 * dt, w);
            // Falling slows at the end of each rock.
            let fall = leaf.vy * (0.7 + leaf.rock_phase.sin().abs() * 0.3);
            leaf.y = wrap_coord(leaf.y + fall * dt, h);

            let color = ctx.colors.accent.lerp(ctx.colors.primary, leaf.tint);
            let squash = (leaf.rock_phase.cos().abs() * 0.6 + 0.4) * leaf.size;
            surface.fill_circle(leaf.x, leaf.y, squash, color.with_opacity(0.45));
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
    fn ink_ripples_respect_cap_and_retire() {
        let mut fx = InkRipplesFx::new();
        fx.init(80, 80, PackedRgba::WHITE);
        let mut surface = Surface::new(80, 80);
        for frame in 0..5000 {
            fx.render(&ctx(80, 80, frame), &mut surface);
            assert!(fx.population() <= RIPPLE_CAP);
        }
        for r in &fx.ripples {
            assert!(r.radius < r.max_radius);
        }
    }

    #[test]
    fn candle_smoke_respects_cap() {
        let mut fx = CandleSmokeFx::new();
        fx.init(60, 80, PackedRgba::WHITE);
        let mut surface = Surface::new(60, 80);
        for frame in 0..2500 {
            fx.render(&ctx(60, 80, frame), &mut surface);
            assert!(fx.population() <= WISP_CAP);
        }
    }

    #[test]
    fn constellations_wheel_turns() {
        let mut fx = ConstellationsFx::new();
        fx.init(60, 60, PackedRgba::WHITE);
        let mut surface = Surface::new(60, 60);
        for frame in 0..100 {
            fx.render(&ctx(60, 60, frame), &mut surface);
        }
        assert!(fx.rotation > 0.0);
        assert_eq!(fx.stars.len(), CHART_STAR_COUNT);
    }

    #[test]
    fn leaf_fall_stays_in_wrap_band() {
        let mut fx = LeafFallFx::new();
        fx.init(50, 50, PackedRgba::WHITE);
        let mut surface = Surface::new(50, 50);
        for frame in 0..600 {
            fx.render(&ctx(50, 50, frame), &mut surface);
        }
        for leaf in &fx.leaves {
            assert!(leaf.x >= -24.0 && leaf.x <= 74.0);
            assert!(leaf.y >= -24.0 && leaf.y <= 74.0);
        }
    }

    #[test]
    fn parchment_dust_is_calm() {
        let mut fx = ParchmentDustFx::new();
        fx.init(50, 50, PackedRgba::WHITE);
        for s in &fx.specks {
            assert!(s.vx.abs() <= 0.04 && s.vy.abs() <= 0.05);
        }
    }

    #[test]
    fn family_survives_degenerate_input() {
        let fxs: Vec<Box<dyn SceneFx>> = vec![
            Box::new(ParchmentDustFx::new()),
            Box::new(InkRipplesFx::new()),
            Box::new(CandleSmokeFx::new()),
            Box::new(ConstellationsFx::new()),
            Box::new(LeafFallFx::new()),
        ];
        for mut fx in fxs {
            fx.init(0, 0, PackedRgba::WHITE);
            let mut surface = Surface::new(0, 0);
            fx.render(&degenerate_ctx(0, 0), &mut surface);
        }
    }
}
