//! Horror family: fog banks, drips, guttering flames, and things that writhe.

use ambient_render::{PackedRgba, Surface};

use crate::context::SceneContext;
use crate::contract::SceneFx;
use crate::ease::pulse01;
use crate::effects::wrap_coord;
use crate::rng::XorShift32;

// ---------------------------------------------------------------------------
// CreepingFogFx — horizontal fog banks crawling across the lower half
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct FogBank {
    y_frac: f32,
    x: f32,
    vx: f32,
    half_height: f32,
    alpha: f32,
    span: f32,
}

const FOG_BANK_COUNT: usize = 6;

/// Wide translucent bands easing sideways at different rates. Banks wrap
/// horizontally; vertical position is a fixed fraction of the height so
/// resizes keep the composition.
#[derive(Debug, Clone)]
pub struct CreepingFogFx {
    banks: Vec<FogBank>,
    rng: XorShift32,
    ready: bool,
}

impl CreepingFogFx {
    pub fn new() -> Self {
        Self {
            banks: Vec::new(),
            rng: XorShift32::new(0xF06B_A275),
            ready: false,
        }
    }
}

impl Default for CreepingFogFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for CreepingFogFx {
    fn name(&self) -> &'static str {
        "Creeping Fog"
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn init(&mut self, width: u32, _height: u32, _primary: PackedRgba) {
        if self.ready {
            return;
        }
        let w = width.max(1) as f32;
        self.banks.clear();
        for i in 0..FOG_BANK_COUNT {
            self.banks.push(FogBank {
                y_frac: 0.45 + (i as f32 / FOG_BANK_COUNT as f32) * 0.5,
                x: self.rng.range_f32(0.0, w),
                vx: self.rng.range_f32(0.05, 0.25) * if i % 2 == 0 { 1.0 } else { -1.0 },
                half_height: self.rng.range_f32(4.0, 12.0),
                alpha: self.rng.range_f32(0.06, 0.14),
                span: self.rng.range_f32(0.5, 0.9),
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

        for bank in &mut self.banks {
            bank.x = wrap_coord(bank.x + bank.vx * dt, w);
            let cy = bank.y_frac * h;
            let half_span = bank.span * w * 0.5;
            let color = ctx.colors.secondary;

            let y0 = (cy - bank.half_height) as i32;
            let y1 = (cy + bank.half_height) as i32;
            for y in y0..=y1 {
                let vertical = 1.0 - ((y as f32 - cy).abs() / bank.half_height).clamp(0.0, 1.0);
                let x0 = (bank.x - half_span) as i32;
                let x1 = (bank.x + half_span) as i32;
                for x in x0..=x1 {
                    let lateral =
                        1.0 - ((x as f32 - bank.x).abs() / half_span.max(1.0)).clamp(0.0, 1.0);
                    let a = bank.alpha * vertical * lateral;
                    surface.blend(x, y, color.with_opacity(a));
                }
            }
        }
    }

    fn reset(&mut self) {
        self.ready = false;
    }
}

// ---------------------------------------------------------------------------
// BloodDripsFx — slow drips tracing down from the top edge
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Drip {
    x: f32,
    head: f32,
    speed: f32,
    length: f32,
    alive: bool,
}

/// Frequent spawner; capped so abandoned tabs don't accumulate trails.
pub const DRIP_CAP: usize = 18;

/// Drips start at the top, accelerate subtly as the trail lengthens, and
/// retire once the head clears the bottom edge.
#[derive(Debug, Clone)]
pub struct BloodDripsFx {
    drips: Vec<Drip>,
    rng: XorShift32,
    ready: bool,
}

impl BloodDripsFx {
    pub fn new() -> Self {
        Self {
            drips: Vec::new(),
            rng: XorShift32::new(0xB100_DD12),
            ready: false,
        }
    }

    /// Live drip count; never exceeds [`DRIP_CAP`].
    pub fn population(&self) -> usize {
        self.drips.len()
    }
}

impl Default for BloodDripsFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for BloodDripsFx {
    fn name(&self) -> &'static str {
        "Blood Drips"
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn init(&mut self, _width: u32, _height: u32, _primary: PackedRgba) {
        if self.ready {
            return;
        }
        self.drips.clear();
        self.ready = true;
    }

    fn render(&mut self, ctx: &SceneContext, surface: &mut Surface) {
        if ctx.is_empty() || !ctx.quality.is_enabled() {
            return;
        }
        let (w, h) = (ctx.width as f32, ctx.height as f32);
        let dt = ctx.dt();

        if self.drips.len() < DRIP_CAP && self.rng.chance(0.02) {
            self.drips.push(Drip {
                x: self.rng.range_f32(0.0, w),
                head: 0.0,
                speed: self.rng.range_f32(0.1, 0.35),
                length: self.rng.range_f32(6.0, 28.0),
                alive: true,
            });
        }

        for d in &mut self.drips {
            // The trail drags: heavier drips run faster.
            d.head += d.speed * (1.0 + d.head / h.max(1.0) * 0.6) * dt;
            if d.head - d.length > h {
                d.alive = false;
                continue;
            }
            let tail = (d.head - d.length).max(0.0);
            let x = d.x as i32;
            let y0 = tail as i32;
            let y1 = (d.head.min(h - 1.0)) as i32;
            for y in y0..=y1 {
                let along = if d.length > 0.0 {
                    ((y as f32 - tail) / d.length).clamp(0.0, 1.0)
                } else {
                    1.0
                };
                surface.blend(x, y, ctx.colors.primary.with_opacity(0.15 + along * 0.45));
            }
            // Bead at the head.
            surface.fill_circle(d.x, d.head, 1.4, ctx.colors.primary.with_opacity(0.8));
        }

        self.drips.retain(|d| d.alive);
    }

    fn reset(&mut self) {
        self.ready = false;
    }
}

// ---------------------------------------------------------------------------
// CandleFlickerFx — guttering candle pools with noisy brightness
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Candle {
    x: f32,
    y: f32,
    base_radius: f32,
    flicker_phase: f32,
    flicker_rate: f32,
}

const CANDLE_COUNT: usize = 7;

/// Fixed candle positions with per-candle flicker. Brightness stacks two
/// incommensurate sines plus an RNG jitter term so the gutter never loops
/// visibly.
#[derive(Debug, Clone)]
pub struct CandleFlickerFx {
    candles: Vec<Candle>,
    rng: XorShift32,
    ready: bool,
}

impl CandleFlickerFx {
    pub fn new() -> Self {
        Self {
            candles: Vec::new(),
            rng: XorShift32::new(0xCA4D_1EF1),
            ready: false,
        }
    }
}

impl Default for CandleFlickerFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for CandleFlickerFx {
    fn name(&self) -> &'static str {
        "Candle Flicker"
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn init(&mut self, width: u32, height: u32, _primary: PackedRgba) {
        if self.ready {
            return;
        }
        let (w, h) = (width.max(1) as f32, height.max(1) as f32);
        self.candles.clear();
        for _ in 0..CANDLE_COUNT {
            self.candles.push(Candle {
                x: self.rng.range_f32(0.05, 0.95) * w,
                y: self.rng.range_f32(0.3, 0.95) * h,
                base_radius: self.rng.range_f32(8.0, 22.0),
                flicker_phase: self.rng.range_f32(0.0, std::f32::consts::TAU),
                flicker_rate: self.rng.range_f32(0.9, 1.6),
            });
        }
        self.ready = true;
    }

    fn render(&mut self, ctx: &SceneContext, surface: &mut Surface) {
        if ctx.is_empty() || !ctx.quality.is_enabled() {
            return;
        }
        let t = ctx.time() as f32;

        for c in &self.candles {
            let s1 = (t * 7.3 * c.flicker_rate + c.flicker_phase).sin();
            let s2 = (t * 13.1 * c.flicker_rate + c.flicker_phase * 2.0).sin();
            let jitter = self.rng.range_f32(-0.05, 0.05);
            let gutter = (0.7 + s1 * 0.18 + s2 * 0.08 + jitter).clamp(0.0, 1.0);

            let radius = c.base_radius * (0.85 + gutter * 0.3);
            surface.glow_dot(c.x, c.y, radius, ctx.colors.accent, gutter * 0.5);
            surface.glow_dot(c.x, c.y, radius * 0.35, ctx.colors.primary, gutter * 0.6);
        }
    }

    fn reset(&mut self) {
        self.ready = false;
    }
}

// ---------------------------------------------------------------------------
// TentacleWritheFx — sinuous arcs undulating up from the bottom corners
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Tentacle {
    root_frac: f32,
    length: f32,
    phase: f32,
    rate: f32,
    amp: f32,
}

const TENTACLE_COUNT: usize = 5;

/// Polyline tentacles whose joints follow phase-offset sines, rooted along
/// the bottom edge.
#[derive(Debug, Clone)]
pub struct TentacleWritheFx {
    tentacles: Vec<Tentacle>,
    rng: XorShift32,
    ready: bool,
}

impl TentacleWritheFx {
    pub fn new() -> Self {
        Self {
            tentacles: Vec::new(),
            rng: XorShift32::new(0x7E47_AC1E),
            ready: false,
        }
    }
}

impl Default for TentacleWritheFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for TentacleWritheFx {
    fn name(&self) -> &'static str {
        "Tentacle Writhe"
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn init(&mut self, _width: u32, _height: u32, _primary: PackedRgba) {
        if self.ready {
            return;
        }
        self.tentacles.clear();
        for _ in 0..TENTACLE_COUNT {
            self.tentacles.push(Tentacle {
                root_frac: self.rng.range_f32(0.0, 1.0),
                length: self.rng.range_f32(0.25, 0.55),
                phase: self.rng.range_f32(0.0, std::f32::consts::TAU),
                rate: self.rng.range_f32(0.4, 0.9),
                amp: self.rng.range_f32(6.0, 18.0),
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

        const SEGMENTS: usize = 14;
        for tent in &self.tentacles {
            let root_x = tent.root_frac * w;
            let reach = tent.length * h;
            let mut prev = (root_x, h);
            for seg in 1..=SEGMENTS {
                let frac = seg as f32 / SEGMENTS as f32;
                let y = h - frac * reach;
                // Sway grows toward the tip.
                let sway = (t * tent.rate + tent.phase + frac * 4.0).sin() * tent.amp * frac;
                let x = root_x + sway;
                let alpha = 0.35 * (1.0 - frac * 0.6);
                surface.line(prev.0, prev.1, x, y, ctx.colors.primary.with_opacity(alpha));
                prev = (x, y);
            }
            surface.glow_dot(prev.0, prev.1, 3.0, ctx.colors.accent, 0.3);
        }
    }

    fn reset(&mut self) {
        self.ready = false;
    }
}

// ---------------------------------------------------------------------------
// GhostOrbsFx — pale orbs that fade in, wander, and dissolve
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Orb {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    age: f32,
    life: f32,
}

pub const ORB_CAP: usize = 12;

/// Slow apparitions with a fade-in / fade-out alpha envelope over a finite
/// lifetime.
#[derive(Debug, Clone)]
pub struct GhostOrbsFx {
    orbs: Vec<Orb>,
    rng: XorShift32,
    ready: bool,
}

impl GhostOrbsFx {
    pub fn new() -> Self {
        Self {
            orbs: Vec::new(),
            rng: XorShift32::new(0x6805_7042),
            ready: false,
        }
    }

    /// Live orb count; never exceeds [`ORB_CAP`].
    pub fn population(&self) -> usize {
        self.orbs.len()
    }
}

impl Default for GhostOrbsFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for GhostOrbsFx {
    fn name(&self) -> &'static str {
        "Ghost Orbs"
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn init(&mut self, _width: u32, _height: u32, _primary: PackedRgba) {
        if self.ready {
            return;
        }
        self.orbs.clear();
        self.ready = true;
    }

    fn render(&mut self, ctx: &SceneContext, surface: &mut Surface) {
        if ctx.is_empty() || !ctx.quality.is_enabled() {
            return;
        }
        let (w, h) = (ctx.width as f32, ctx.height as f32);
        let dt = ctx.dt();

        if self.orbs.len() < ORB_CAP && self.rng.chance(0.015) {
            self.orbs.push(Orb {
                x: self.rng.range_f32(0.1, 0.9) * w,
                y: self.rng.range_f32(0.1, 0.9) * h,
                vx: self.rng.range_f32(-0.15, 0.15),
                vy: self.rng.range_f32(-0.1, 0.05),
                age: 0.0,
                life: self.rng.range_f32(180.0, 420.0),
            });
        }

        let t = ctx.time();
        for o in &mut self.orbs {
            o.age += dt;
            o.x += o.vx * dt;
            o.y += o.vy * dt;

            let frac = (o.age / o.life).clamp(0.0, 1.0);
            // Triangle envelope: in over the first 25%, out over the last 35%.
            let envelope = if frac < 0.25 {
                frac / 0.25
            } else if frac > 0.65 {
                (1.0 - frac) / 0.35
            } else {
                1.0
            };
            let breathe = 0.85 + pulse01(t, 0.4) * 0.15;
            surface.glow_dot(
                o.x,
                o.y,
                9.0,
                ctx.colors.secondary,
                envelope * breathe * 0.4,
            );
        }

        self.orbs.retain(|o| o.age < o.life);
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
    fn blood_drips_respects_cap() {
        let mut fx = BloodDripsFx::new();
        fx.init(60, 80, PackedRgba::WHITE);
        let mut surface = Surface::new(60, 80);
        for frame in 0..4000 {
            fx.render(&ctx(60, 80, frame), &mut surface);
            assert!(fx.population() <= DRIP_CAP);
        }
    }

    #[test]
    fn ghost_orbs_retire_on_schedule() {
        let mut fx = GhostOrbsFx::new();
        fx.init(60, 60, PackedRgba::WHITE);
        let mut surface = Surface::new(60, 60);
        for frame in 0..2000 {
            fx.render(&ctx(60, 60, frame), &mut surface);
            assert!(fx.population() <= ORB_CAP);
        }
        for o in &fx.orbs {
            assert!(o.age < o.life);
        }
    }

    #[test]
    fn creeping_fog_stays_in_lower_half() {
        let mut fx = CreepingFogFx::new();
        fx.init(60, 100, PackedRgba::WHITE);
        let mut surface = Surface::new(60, 100);
        for frame in 0..30 {
            fx.render(&ctx(60, 100, frame), &mut surface);
        }
        for y in 0..25 {
            for x in 0..60 {
                assert_eq!(surface.get(x, y), PackedRgba::TRANSPARENT, "fog at {x},{y}");
            }
        }
    }

    #[test]
    fn candle_flicker_varies_over_time() {
        let mut fx = CandleFlickerFx::new();
        fx.init(60, 60, PackedRgba::WHITE);
        let mut a = Surface::new(60, 60);
        let mut b = Surface::new(60, 60);
        fx.render(&ctx(60, 60, 0), &mut a);
        fx.render(&ctx(60, 60, 40), &mut b);
        assert_ne!(a.pixels(), b.pixels());
    }

    #[test]
    fn family_survives_degenerate_input() {
        let fxs: Vec<Box<dyn SceneFx>> = vec![
            Box::new(CreepingFogFx::new()),
            Box::new(BloodDripsFx::new()),
            Box::new(CandleFlickerFx::new()),
            Box::new(TentacleWritheFx::new()),
            Box::new(GhostOrbsFx::new()),
        ];
        for mut fx in fxs {
            fx.init(0, 0, PackedRgba::WHITE);
            let mut surface = Surface::new(0, 0);
            fx.render(&degenerate_ctx(0, 0), &mut surface);
        }
    }

    #[test]
    fn tentacles_init_idempotent() {
        let mut fx = TentacleWritheFx::new();
        fx.init(40, 40, PackedRgba::WHITE);
        let n = fx.tentacles.len();
        fx.init(40, 40, PackedRgba::WHITE);
        assert_eq!(fx.tentacles.len(), n);
    }
}
