//! Thriller family: rain on glass, flashlights, smoke, compasses, and storms.

use ambient_render::{PackedRgba, Surface};

use crate::context::SceneContext;
use crate::contract::SceneFx;
use crate::rng::XorShift32;

// ---------------------------------------------------------------------------
// RainOnGlassFx — droplets that stick, swell, and slide
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Droplet {
    x: f32,
    y: f32,
    mass: f32,
    sliding: bool,
}

pub const DROPLET_CAP: usize = 70;
const SLIDE_MASS: f32 = 2.2;

/// Droplets condense at random, gain mass from ambient spray, and break into
/// a slide once heavy enough. Sliding drops retire past the bottom edge.
#[derive(Debug, Clone)]
pub struct RainOnGlassFx {
    droplets: Vec<Droplet>,
    rng: XorShift32,
    ready: bool,
}

impl RainOnGlassFx {
    pub fn new() -> Self {
        Self {
            droplets: Vec::new(),
            rng: XorShift32::new(0x2A14_61A5),
            ready: false,
        }
    }

    /// Live droplet count; never exceeds [`DROPLET_CAP`].
    pub fn population(&self) -> usize {
        self.droplets.len()
    }
}

impl Default for RainOnGlassFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for RainOnGlassFx {
    fn name(&self) -> &'static str {
        "Rain on Glass"
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn init(&mut self, _width: u32, _height: u32, _primary: PackedRgba) {
        if self.ready {
            return;
        }
        self.droplets.clear();
        self.ready = true;
    }

    fn render(&mut self, ctx: &SceneContext, surface: &mut Surface) {
        if ctx.is_empty() || !ctx.quality.is_enabled() {
            return;
        }
        let (w, h) = (ctx.width as f32, ctx.height as f32);
        let dt = ctx.dt();

        if self.droplets.len() < DROPLET_CAP && self.rng.chance(0.3) {
            self.droplets.push(Droplet {
                x: self.rng.range_f32(0.0, w),
                y: self.rng.range_f32(0.0, h),
                mass: self.rng.range_f32(0.3, 1.2),
                sliding: false,
            });
        }

        for d in &mut self.droplets {
            if d.sliding {
                d.y += d.mass * 0.8 * dt;
                // A sliding drop sheds a faint wet trail.
                surface.vline(
                    d.x as i32,
                    (d.y - 6.0) as i32,
                    d.y as i32,
                    ctx.colors.secondary.with_opacity(0.08),
                );
            } else {
                d.mass += self.rng.range_f32(0.0, 0.01) * dt;
                if d.mass >= SLIDE_MASS {
                    d.sliding = true;
                }
            }
            surface.fill_circle(d.x, d.y, d.mass, ctx.colors.secondary.with_opacity(0.3));
            // Highlight glint offset up-left.
            surface.set(
                (d.x - d.mass * 0.3) as i32,
                (d.y - d.mass * 0.3) as i32,
                PackedRgba::WHITE.with_opacity(0.25),
            );
        }

        self.droplets.retain(|d| d.y < h + 10.0);
    }

    fn reset(&mut self) {
        self.ready = false;
    }
}

// ---------------------------------------------------------------------------
// FlashlightSweepFx — a cone of light probing the dark
// ---------------------------------------------------------------------------

/// Rotating assembly with a single member: the beam pivots around a corner
/// anchor, sweeping through a watchful arc with a pause at each end.
#[derive(Debug, Clone)]
pub struct FlashlightSweepFx {
    ready: bool,
}

impl FlashlightSweepFx {
    pub fn new() -> Self {
        Self { ready: false }
    }
}

impl Default for FlashlightSweepFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for FlashlightSweepFx {
    fn name(&self) -> &'static str {
        "Flashlight Sweep"
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

        // Cubed sine dwells near the extremes of the arc.
        let s = (t * 0.3).sin();
        let sweep = s * s * s;
        let dir = std::f32::consts::FRAC_PI_4 + sweep * 0.6;
        let reach = w.hypot(h);
        let half_width = 0.12;

        const RAYS: usize = 14;
        for i in 0..=RAYS {
            let f = i as f32 / RAYS as f32;
            let a = dir + (f - 0.5) * 2.0 * half_width;
            let (sin, cos) = a.sin_cos();
            let edge = 1.0 - (f - 0.5).abs() * 2.0;
            surface.line(
                0.0,
                0.0,
                cos * reach,
                sin * reach,
                ctx.colors.accent.with_opacity(0.04 + edge * 0.08),
            );
        }
        surface.glow_dot(0.0, 0.0, 10.0, ctx.colors.accent, 0.4);
    }

    fn reset(&mut self) {
        self.ready = false;
    }
}

// ---------------------------------------------------------------------------
// SmokeCurlFx — a cigarette curl rising from the lower third
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Curl {
    y: f32,
    drift: f32,
    alpha: f32,
}

pub const CURL_CAP: usize = 40;

/// Smoke segments rising from a fixed point, each taking its lateral offset
/// from a sine of its own height so the column curls as one body.
#[derive(Debug, Clone)]
pub struct SmokeCurlFx {
    curls: Vec<Curl>,
    rng: XorShift32,
    ready: bool,
}

impl SmokeCurlFx {
    pub fn new() -> Self {
        Self {
            curls: Vec::new(),
            rng: XorShift32::new(0x5C02_1C41),
            ready: false,
        }
    }

    /// Live segment count; never exceeds [`CURL_CAP`].
    pub fn population(&self) -> usize {
        self.curls.len()
    }
}

impl Default for SmokeCurlFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for SmokeCurlFx {
    fn name(&self) -> &'static str {
        "Smoke Curl"
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn init(&mut self, _width: u32, _height: u32, _primary: PackedRgba) {
        if self.ready {
            return;
        }
        self.curls.clear();
        self.ready = true;
    }

    fn render(&mut self, ctx: &SceneContext, surface: &mut Surface) {
        if ctx.is_empty() || !ctx.quality.is_enabled() {
            return;
        }
        let (w, h) = (ctx.width as f32, ctx.height as f32);
        let dt = ctx.dt();
        let t = ctx.time() as f32;

        if self.curls.len() < CURL_CAP && self.rng.chance(0.5) {
            self.curls.push(Curl {
                y: h * 0.75,
                drift: self.rng.range_f32(-0.5, 0.5),
                alpha: self.rng.range_f32(0.15, 0.3),
            });
        }

        let base_x = w * 0.3;
        for c in &mut self.curls {
            c.y -= 0.6 * dt;
            c.alpha *= 0.992;

            let climb = (h * 0.75 - c.y).max(0.0);
            // Curl tightens with altitude; the whole column shares the clock.
            let lateral = (climb * 0.06 + t * 0.8).sin() * (4.0 + climb * 0.12) + c.drift * climb * 0.05;
            let radius = 1.5 + climb * 0.04;
            surface.glow_dot(
                base_x + lateral,
                c.y,
                radius,
                ctx.colors.secondary,
                c.alpha,
            );
        }

        self.curls.retain(|c| c.alpha > 0.02 && c.y > -10.0);
    }

    fn reset(&mut self) {
        self.ready = false;
    }
}

// ---------------------------------------------------------------------------
// CompassRoseFx — a faint rose wheeling slowly off-center
// ---------------------------------------------------------------------------

/// Rotating assembly: eight spokes and two stroked rings turning at a
/// near-imperceptible rate, anchored off-center like a watermark.
#[derive(Debug, Clone)]
pub struct CompassRoseFx {
    angle: f32,
    ready: bool,
}

impl CompassRoseFx {
    pub fn new() -> Self {
        Self {
            angle: 0.0,
            ready: false,
        }
    }
}

impl Default for CompassRoseFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for CompassRoseFx {
    fn name(&self) -> &'static str {
        "Compass Rose"
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn init(&mut self, _width: u32, _height: u32, _primary: PackedRgba) {
        if self.ready {
            return;
        }
        self.angle = 0.0;
        self.ready = true;
    }

    fn render(&mut self, ctx: &SceneContext, surface: &mut Surface) {
        if ctx.is_empty() || !ctx.quality.is_enabled() {
            return;
        }
        let (w, h) = (ctx.width as f32, ctx.height as f32);
        self.angle += 0.0015 * ctx.dt();

        let (cx, cy) = (w * 0.7, h * 0.4);
        let radius = w.min(h) * 0.28;
        let ink = ctx.colors.secondary.with_opacity(0.18);

        for ring_frac in [1.0, 0.72] {
            let r = radius * ring_frac;
            let steps = (r * std::f32::consts::TAU).clamp(12.0, 360.0) as u32;
            for i in 0..steps {
                let a = i as f32 / steps as f32 * std::f32::consts::TAU;
                let (sin, cos) = a.sin_cos();
                surface.blend((cx + cos * r) as i32, (cy + sin * r) as i32, ink);
            }
        }

        for spoke in 0..8 {
            let a = self.angle + spoke as f32 / 8.0 * std::f32::consts::TAU;
            let (sin, cos) = a.sin_cos();
            // Cardinal spokes reach the rim; ordinals stop short.
            let len = if spoke % 2 == 0 { radius } else { radius * 0.55 };
            surface.line(cx, cy, cx + cos * len, cy + sin * len, ink);
        }
        surface.glow_dot(cx, cy, 3.0, ctx.colors.accent, 0.25);
    }

    fn reset(&mut self) {
        self.ready = false;
    }
}

// ---------------------------------------------------------------------------
// LightningStormFx — rain sheets with sudden sky-wide flashes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct RainDrop {
    x: f32,
    y: f32,
    speed: f32,
}

const STORM_DROP_COUNT: usize = 80;

/// Reactive pulse: steady diagonal rain, and an RNG-scheduled flash that
/// whites the upper sky for a couple of frames with one afterglow frame.
#[derive(Debug, Clone)]
pub struct LightningStormFx {
    drops: Vec<RainDrop>,
    rng: XorShift32,
    flash_frames: u32,
    ready: bool,
}

impl LightningStormFx {
    pub fn new() -> Self {
        Self {
            drops: Vec::new(),
            rng: XorShift32::new(0x1164_7401),
            flash_frames: 0,
            ready: false,
        }
    }
}

impl Default for LightningStormFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for LightningStormFx {
    fn name(&self) -> &'static str {
        "Lightning Storm"
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn init(&mut self, width: u32, height: u32, _primary: PackedRgba) {
        if self.ready {
            return;
        }
        let (w, h) = (width.max(1) as f32, height.max(1) as f32);
        self.drops.clear();
        for _ in 0..STORM_DROP_COUNT {
            self.drops.push(RainDrop {
                x: self.rng.range_f32(0.0, w),
                y: self.rng.range_f32(0.0, h),
                speed: self.rng.range_f32(2.0, 5.0),
            });
        }
        self.flash_frames = 0;
        self.ready = true;
    }

    fn render(&mut self, ctx: &SceneContext, surface: &mut Surface) {
        if ctx.is_empty() || !ctx.quality.is_enabled() {
            return;
        }
        let (w, h) = (ctx.width as f32, ctx.height as f32);
        let dt = ctx.dt();

        for d in &mut self.drops {
            d.x += d.speed * 0.3 * dt;
            d.y += d.speed * dt;
            if d.y > h {
                d.y = -4.0;
                d.x = self.rng.range_f32(0.0, w);
            }
            if d.x > w {
                d.x -= w;
            }
            surface.line(
                d.x,
                d.y,
                d.x - d.speed * 0.3 * 2.0,
                d.y - d.speed * 2.0,
                ctx.colors.secondary.with_opacity(0.25),
            );
        }

        if self.flash_frames > 0 {
            self.flash_frames -= 1;
            let strength = if self.flash_frames > 1 { 0.35 } else { 0.12 };
            let sky = (h * 0.4) as u32;
            surface.fill_rect(
                0,
                0,
                ctx.width,
                sky,
                PackedRgba::WHITE.with_opacity(strength),
            );
        } else if self.rng.chance(0.006) {
            self.flash_frames = 3;
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
    fn rain_on_glass_respects_cap() {
        let mut fx = RainOnGlassFx::new();
        fx.init(80, 80, PackedRgba::WHITE);
        let mut surface = Surface::new(80, 80);
        for frame in 0..3000 {
            fx.render(&ctx(80, 80, frame), &mut surface);
            assert!(fx.population() <= DROPLET_CAP);
        }
    }

    #[test]
    fn heavy_droplets_slide() {
        let mut fx = RainOnGlassFx::new();
        fx.init(40, 40, PackedRgba::WHITE);
        let mut surface = Surface::new(40, 40);
        for frame in 0..20_000 {
            fx.render(&ctx(40, 40, frame), &mut surface);
        }
        // After this long somebody must have slid off; the pool cannot be
        // all stuck at max mass.
        assert!(fx.droplets.iter().all(|d| d.mass < SLIDE_MASS || d.sliding));
    }

    #[test]
    fn smoke_curl_respects_cap() {
        let mut fx = SmokeCurlFx::new();
        fx.init(60, 80, PackedRgba::WHITE);
        let mut surface = Surface::new(60, 80);
        for frame in 0..2000 {
            fx.render(&ctx(60, 80, frame), &mut surface);
            assert!(fx.population() <= CURL_CAP);
        }
    }

    #[test]
    fn lightning_flash_fires_and_clears() {
        let mut fx = LightningStormFx::new();
        fx.init(60, 60, PackedRgba::WHITE);
        let mut surface = Surface::new(60, 60);
        let mut saw_flash = false;
        for frame in 0..4000 {
            fx.render(&ctx(60, 60, frame), &mut surface);
            if fx.flash_frames > 0 {
                saw_flash = true;
            }
        }
        assert!(saw_flash);
        assert!(fx.flash_frames <= 3);
    }

    #[test]
    fn compass_rotates() {
        let mut fx = CompassRoseFx::new();
        fx.init(60, 60, PackedRgba::WHITE);
        let mut surface = Surface::new(60, 60);
        for frame in 0..100 {
            fx.render(&ctx(60, 60, frame), &mut surface);
        }
        assert!(fx.angle > 0.0);
    }

    #[test]
    fn family_survives_degenerate_input() {
        let fxs: Vec<Box<dyn SceneFx>> = vec![
            Box::new(RainOnGlassFx::new()),
            Box::new(FlashlightSweepFx::new()),
            Box::new(SmokeCurlFx::new()),
            Box::new(CompassRoseFx::new()),
            Box::new(LightningStormFx::new()),
        ];
        for mut fx in fxs {
            fx.init(0, 0, PackedRgba::WHITE);
            let mut surface = Surface::new(0, 0);
            fx.render(&degenerate_ctx(0, 0), &mut surface);
        }
    }
}
