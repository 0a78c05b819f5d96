//! Utopia family: brass, steam, gears, and sunlit atmospheres.

use ambient_render::{PackedRgba, Surface};

use crate::context::SceneContext;
use crate::contract::SceneFx;
use crate::ease::pulse01;
use crate::effects::wrap_coord;
use crate::rng::XorShift32;

// ---------------------------------------------------------------------------
// GearWorksFx — interlocking gears turning at linked rates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Gear {
    x_frac: f32,
    y_frac: f32,
    radius_frac: f32,
    teeth: u32,
    rate: f32,
    direction: f32,
    angle: f32,
}

const GEAR_COUNT: usize = 5;

/// Rotating assembly: gear outlines with radial teeth, alternating spin
/// direction so neighbors read as meshed.
#[derive(Debug, Clone)]
pub struct GearWorksFx {
    gears: Vec<Gear>,
    rng: XorShift32,
    ready: bool,
}

impl GearWorksFx {
    pub fn new() -> Self {
        Self {
            gears: Vec::new(),
            rng: XorShift32::new(0x6EA2_3021),
            ready: false,
        }
    }
}

impl Default for GearWorksFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for GearWorksFx {
    fn name(&self) -> &'static str {
        "Gear Works"
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn init(&mut self, _width: u32, _height: u32, _primary: PackedRgba) {
        if self.ready {
            return;
        }
        self.gears.clear();
        for i in 0..GEAR_COUNT {
            self.gears.push(Gear {
                x_frac: self.rng.range_f32(0.1, 0.9),
                y_frac: self.rng.range_f32(0.1, 0.9),
                radius_frac: self.rng.range_f32(0.06, 0.16),
                teeth: 6 + self.rng.below(7),
                rate: self.rng.range_f32(0.08, 0.25),
                direction: if i % 2 == 0 { 1.0 } else { -1.0 },
                angle: self.rng.range_f32(0.0, std::f32::consts::TAU),
            });
        }
        self.ready = true;
    }

    fn render(&mut self, ctx: &SceneContext, surface: &mut Surface) {
        if ctx.is_empty() || !ctx.quality.is_enabled() {
            return;
        }
        let (w, h) = (ctx.width as f32, ctx.height as f32);
        let min_side = w.min(h);
        let dt = ctx.dt();

        for gear in &mut self.gears {
            gear.angle += gear.rate * gear.direction * 0.02 * dt;
            let (cx, cy) = (gear.x_frac * w, gear.y_frac * h);
            let radius = gear.radius_frac * min_side;
            let rim = ctx.colors.secondary.with_opacity(0.3);

            // Rim circle, stroked.
            let steps = (radius * std::f32::consts::TAU).clamp(12.0, 360.0) as u32;
            for i in 0..steps {
                let a = i as f32 / steps as f32 * std::f32::consts::TAU;
                let (sin, cos) = a.sin_cos();
                surface.blend((cx + cos * radius) as i32, (cy + sin * radius) as i32, rim);
            }

            // Teeth.
            for tooth in 0..gear.teeth {
                let a = gear.angle + tooth as f32 / gear.teeth as f32 * std::f32::consts::TAU;
                let (sin, cos) = a.sin_cos();
                surface.line(
                    cx + cos * radius,
                    cy + sin * radius,
                    cx + cos * (radius * 1.25),
                    cy + sin * (radius * 1.25),
                    rim,
                );
            }

            // Hub.
            surface.fill_circle(cx, cy, radius * 0.15, rim);
        }
    }

    fn reset(&mut self) {
        self.ready = false;
    }
}

// ---------------------------------------------------------------------------
// SteamVentsFx — puffs jetting from fixed vents along the bottom
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Puff {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    radius: f32,
    alpha: f32,
}

pub const STEAM_CAP: usize = 48;
const VENT_COUNT: usize = 3;

/// Spawn-and-retire: vents emit puffs that rise, spread, and fade. The cap
/// keeps a vent that never stops emitting from hoarding memory.
#[derive(Debug, Clone)]
pub struct SteamVentsFx {
    puffs: Vec<Puff>,
    rng: XorShift32,
    ready: bool,
}

impl SteamVentsFx {
    pub fn new() -> Self {
        Self {
            puffs: Vec::new(),
            rng: XorShift32::new(0x57EA_4321),
            ready: false,
        }
    }

    /// Live puff count; never exceeds [`STEAM_CAP`].
    pub fn population(&self) -> usize {
        self.puffs.len()
    }
}

impl Default for SteamVentsFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for SteamVentsFx {
    fn name(&self) -> &'static str {
        "Steam Vents"
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn init(&mut self, _width: u32, _height: u32, _primary: PackedRgba) {
        if self.ready {
            return;
        }
        self.puffs.clear();
        self.ready = true;
    }

    fn render(&mut self, ctx: &SceneContext, surface: &mut Surface) {
        if ctx.is_empty() || !ctx.quality.is_enabled() {
            return;
        }
        let (w, h) = (ctx.width as f32, ctx.height as f32);
        let dt = ctx.dt();

        if self.puffs.len() < STEAM_CAP && self.rng.chance(0.45) {
            let vent = self.rng.below(VENT_COUNT as u32) as f32;
            let vent_x = (vent + 0.5) / VENT_COUNT as f32 * w;
            self.puffs.push(Puff {
                x: vent_x + self.rng.range_f32(-3.0, 3.0),
                y: h - 2.0,
                vx: self.rng.range_f32(-0.15, 0.15),
                vy: self.rng.range_f32(-1.4, -0.6),
                radius: self.rng.range_f32(2.0, 5.0),
                alpha: self.rng.range_f32(0.2, 0.4),
            });
        }

        for p in &mut self.puffs {
            p.x += p.vx * dt;
            p.y += p.vy * dt;
            p.vy *= 0.995;
            p.radius += 0.1 * dt;
            p.alpha *= 0.985;
            surface.glow_dot(p.x, p.y, p.radius, PackedRgba::WHITE, p.alpha * 0.6);
        }

        self.puffs.retain(|p| p.alpha > 0.02 && p.y > -20.0);
    }

    fn reset(&mut self) {
        self.ready = false;
    }
}

// ---------------------------------------------------------------------------
// BrassMotesFx — warm metallic sparkles drifting upward
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct BrassMote {
    x: f32,
    y: f32,
    vy: f32,
    glint_phase: f32,
    glint_rate: f32,
}

const BRASS_MOTE_COUNT: usize = 50;

/// Rising motes with a sharp sinusoidal glint (squared twice so the sparkle
/// spends most of its cycle dark).
#[derive(Debug, Clone)]
pub struct BrassMotesFx {
    motes: Vec<BrassMote>,
    rng: XorShift32,
    ready: bool,
}

impl BrassMotesFx {
    pub fn new() -> Self {
        Self {
            motes: Vec::new(),
            rng: XorShift32::new(0xB2A5_5170),
            ready: false,
        }
    }
}

impl Default for BrassMotesFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for BrassMotesFx {
    fn name(&self) -> &'static str {
        "Brass Motes"
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn init(&mut self, width: u32, height: u32, _primary: PackedRgba) {
        if self.ready {
            return;
        }
        let (w, h) = (width.max(1) as f32, height.max(1) as f32);
        self.motes.clear();
        for _ in 0..BRASS_MOTE_COUNT {
            self.motes.push(BrassMote {
                x: self.rng.range_f32(0.0, w),
                y: self.rng.range_f32(0.0, h),
                vy: self.rng.range_f32(-0.25, -0.05),
                glint_phase: self.rng.range_f32(0.0, std::f32::consts::TAU),
                glint_rate: self.rng.range_f32(0.5, 1.5),
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

        for m in &mut self.motes {
            m.x = wrap_coord(m.x, w);
            m.y = wrap_coord(m.y + m.vy * dt, h);

            let s = (t * m.glint_rate + m.glint_phase).sin() * 0.5 + 0.5;
            let glint = s * s * s * s;
            surface.fill_circle(m.x, m.y, 0.9, ctx.colors.accent.with_opacity(0.25));
            if glint > 0.5 {
                surface.glow_dot(m.x, m.y, 3.5, ctx.colors.accent, glint * 0.6);
            }
        }
    }

    fn reset(&mut self) {
        self.ready = false;
    }
}

// ---------------------------------------------------------------------------
// LightShaftsFx — diagonal god-rays breathing slowly
// ---------------------------------------------------------------------------

const SHAFT_COUNT: usize = 4;

/// Oscillating field: diagonal translucent shafts from the top edge whose
/// intensity breathes on independent pulse rates.
#[derive(Debug, Clone)]
pub struct LightShaftsFx {
    ready: bool,
}

impl LightShaftsFx {
    pub fn new() -> Self {
        Self { ready: false }
    }
}

impl Default for LightShaftsFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for LightShaftsFx {
    fn name(&self) -> &'static str {
        "Light Shafts"
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
        let t = ctx.time();

        for i in 0..SHAFT_COUNT {
            let k = i as f32;
            let breathe = pulse01(t + k as f64 * 1.9, 0.07 + k as f64 * 0.013);
            let top_x = w * (0.1 + k * 0.25);
            let slant = w * 0.18;
            let width = w * 0.05;
            let alpha = 0.04 + breathe * 0.08;

            const RAYS: usize = 6;
            for r in 0..=RAYS {
                let off = (r as f32 / RAYS as f32 - 0.5) * width;
                surface.line(
                    top_x + off,
                    0.0,
                    top_x + off + slant,
                    h,
                    ctx.colors.accent.with_opacity(alpha),
                );
            }
        }
    }

    fn reset(&mut self) {
        self.ready = false;
    }
}

// ---------------------------------------------------------------------------
// DriftCloudsFx — soft cloud clusters crossing the sky
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Cloud {
    x: f32,
    y_frac: f32,
    vx: f32,
    scale: f32,
    alpha: f32,
}

const CLOUD_COUNT: usize = 6;

/// Clusters of overlapping glow discs wrapping horizontally across the upper
/// half.
#[derive(Debug, Clone)]
pub struct DriftCloudsFx {
    clouds: Vec<Cloud>,
    rng: XorShift32,
    ready: bool,
}

impl DriftCloudsFx {
    pub fn new() -> Self {
        Self {
            clouds: Vec::new(),
            rng: XorShift32::new(0xD21F_7C1D),
            ready: false,
        }
    }
}

impl Default for DriftCloudsFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for DriftCloudsFx {
    fn name(&self) -> &'static str {
        "Drift Clouds"
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn init(&mut self, width: u32, _height: u32, _primary: PackedRgba) {
        if self.ready {
            return;
        }
        let w = width.max(1) as f32;
        self.clouds.clear();
        for _ in 0..CLOUD_COUNT {
            self.clouds.push(Cloud {
                x: self.rng.range_f32(0.0, w),
                y_frac: self.rng.range_f32(0.05, 0.45),
                vx: self.rng.range_f32(0.04, 0.18),
                scale: self.rng.range_f32(8.0, 22.0),
                alpha: self.rng.range_f32(0.08, 0.18),
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

        for c in &mut self.clouds {
            c.x = wrap_coord(c.x + c.vx * dt, w);
            let cy = c.y_frac * h;
            let color = ctx.colors.secondary.lerp(PackedRgba::WHITE, 0.6);
            // Three lobes make a cloud.
            surface.glow_dot(c.x, cy, c.scale, color, c.alpha);
            surface.glow_dot(c.x - c.scale * 0.7, cy + c.scale * 0.2, c.scale * 0.7, color, c.alpha);
            surface.glow_dot(c.x + c.scale * 0.7, cy + c.scale * 0.15, c.scale * 0.75, color, c.alpha);
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
    fn steam_vents_respect_cap() {
        let mut fx = SteamVentsFx::new();
        fx.init(60, 60, PackedRgba::WHITE);
        let mut surface = Surface::new(60, 60);
        for frame in 0..3000 {
            fx.render(&ctx(60, 60, frame), &mut surface);
            assert!(fx.population() <= STEAM_CAP);
        }
    }

    #[test]
    fn gears_keep_turning() {
        let mut fx = GearWorksFx::new();
        fx.init(80, 80, PackedRgba::WHITE);
        let before: Vec<f32> = fx.gears.iter().map(|g| g.angle).collect();
        let mut surface = Surface::new(80, 80);
        for frame in 0..60 {
            fx.render(&ctx(80, 80, frame), &mut surface);
        }
        for (g, b) in fx.gears.iter().zip(&before) {
            assert_ne!(g.angle, *b);
        }
    }

    #[test]
    fn gears_alternate_direction() {
        let mut fx = GearWorksFx::new();
        fx.init(80, 80, PackedRgba::WHITE);
        assert!(fx.gears[0].direction * fx.gears[1].direction < 0.0);
    }

    #[test]
    fn drift_clouds_stay_in_upper_half() {
        let mut fx = DriftCloudsFx::new();
        fx.init(60, 100, PackedRgba::WHITE);
        let mut surface = Surface::new(60, 100);
        for frame in 0..200 {
            fx.render(&ctx(60, 100, frame), &mut surface);
        }
        for c in &fx.clouds {
            assert!(c.y_frac <= 0.45);
        }
    }

    #[test]
    fn light_shafts_breathe() {
        let mut fx = LightShaftsFx::new();
        fx.init(60, 60, PackedRgba::WHITE);
        let mut a = Surface::new(60, 60);
        let mut b = Surface::new(60, 60);
        fx.render(&ctx(60, 60, 0), &mut a);
        fx.render(&ctx(60, 60, 300), &mut b);
        assert_ne!(a.pixels(), b.pixels());
    }

    #[test]
    fn family_survives_degenerate_input() {
        let fxs: Vec<Box<dyn SceneFx>> = vec![
            Box::new(GearWorksFx::new()),
            Box::new(SteamVentsFx::new()),
            Box::new(BrassMotesFx::new()),
            Box::new(LightShaftsFx::new()),
            Box::new(DriftCloudsFx::new()),
        ];
        for mut fx in fxs {
            fx.init(0, 0, PackedRgba::WHITE);
            let mut surface = Surface::new(0, 0);
            fx.render(&degenerate_ctx(0, 0), &mut surface);
        }
    }
}
