//! Romance family: petals, hearts, candlelight, ribbons, and sealing wax.

use ambient_render::{PackedRgba, Surface};

use crate::context::SceneContext;
use crate::contract::SceneFx;
use crate::ease::pulse01;
use crate::effects::wrap_coord;
use crate::rng::XorShift32;

// ---------------------------------------------------------------------------
// PetalDriftFx — petals tumbling diagonally
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Petal {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    tumble: f32,
    tumble_rate: f32,
    size: f32,
}

const PETAL_COUNT: usize = 40;

/// Petals falling down-right with a tumble that narrows and widens each one
/// as it turns. Honors the theme's speed and glow knobs.
#[derive(Debug, Clone)]
pub struct PetalDriftFx {
    petals: Vec<Petal>,
    rng: XorShift32,
    ready: bool,
}

impl PetalDriftFx {
    pub fn new() -> Self {
        Self {
            petals: Vec::new(),
            rng: XorShift32::new(0x9E7A_1D21),
            ready: false,
        }
    }
}

impl Default for PetalDriftFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for PetalDriftFx {
    fn name(&self) -> &'static str {
        "Petal Drift"
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn init(&mut self, width: u32, height: u32, _primary: PackedRgba) {
        if self.ready {
            return;
        }
        let (w, h) = (width.max(1) as f32, height.max(1) as f32);
        self.petals.clear();
        for _ in 0..PETAL_COUNT {
            self.petals.push(Petal {
                x: self.rng.range_f32(0.0, w),
                y: self.rng.range_f32(0.0, h),
                vx: self.rng.range_f32(0.1, 0.4),
                vy: self.rng.range_f32(0.25, 0.6),
                tumble: self.rng.range_f32(0.0, std::f32::consts::TAU),
                tumble_rate: self.rng.range_f32(0.02, 0.06),
                size: self.rng.range_f32(1.5, 3.0),
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
        let speed = if ctx.particle_speed.is_finite() && ctx.particle_speed > 0.0 {
            ctx.particle_speed
        } else {
            1.0
        };
        let glow = ctx.glow_intensity.clamp(0.0, 1.0);

        for p in &mut self.petals {
            p.tumble += p.tumble_rate * dt;
            p.x = wrap_coord(p.x + (p.vx + p.tumble.sin() * 0.2) * speed * dt, w);
            p.y = wrap_coord(p.y + p.vy * speed * dt, h);

            // A petal narrows edge-on: scale one radius by the tumble.
            let squash = (p.tumble.cos().abs() * 0.7 + 0.3) * p.size;
            surface.fill_circle(p.x, p.y, squash, ctx.colors.accent.with_opacity(0.5));
            surface.glow_dot(p.x, p.y, p.size * 2.5, ctx.colors.accent, 0.15 * glow);
        }
    }

    fn reset(&mut self) {
        self.ready = false;
    }
}

// ---------------------------------------------------------------------------
// HeartMotesFx — tiny hearts floating up and fading
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct HeartMote {
    x: f32,
    y: f32,
    vy: f32,
    sway_phase: f32,
    age: f32,
    life: f32,
    size: f32,
}

pub const HEART_CAP: usize = 24;

/// Spawn-and-retire: hearts rise from the lower third, sway, and dissolve at
/// end of life. A heart is two discs and a triangle-ish fill; at mote scale
/// the silhouette is enough.
#[derive(Debug, Clone)]
pub struct HeartMotesFx {
    motes: Vec<HeartMote>,
    rng: XorShift32,
    ready: bool,
}

impl HeartMotesFx {
    pub fn new() -> Self {
        Self {
            motes: Vec::new(),
            rng: XorShift32::new(0x8EA2_7307),
            ready: false,
        }
    }

    /// Live heart count; never exceeds [`HEART_CAP`].
    pub fn population(&self) -> usize {
        self.motes.len()
    }
}

impl Default for HeartMotesFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for HeartMotesFx {
    fn name(&self) -> &'static str {
        "Heart Motes"
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn init(&mut self, _width: u32, _height: u32, _primary: PackedRgba) {
        if self.ready {
            return;
        }
        self.motes.clear();
        self.ready = true;
    }

    fn render(&mut self, ctx: &SceneContext, surface: &mut Surface) {
        if ctx.is_empty() || !ctx.quality.is_enabled() {
            return;
        }
        let (w, h) = (ctx.width as f32, ctx.height as f32);
        let dt = ctx.dt();

        if self.motes.len() < HEART_CAP && self.rng.chance(0.04) {
            self.motes.push(HeartMote {
                x: self.rng.range_f32(0.1, 0.9) * w,
                y: self.rng.range_f32(0.65, 0.95) * h,
                vy: self.rng.range_f32(-0.5, -0.2),
                sway_phase: self.rng.range_f32(0.0, std::f32::consts::TAU),
                age: 0.0,
                life: self.rng.range_f32(150.0, 320.0),
                size: self.rng.range_f32(1.2, 2.4),
            });
        }

        for m in &mut self.motes {
            m.age += dt;
            m.sway_phase += 0.04 * dt;
            m.x += m.sway_phase.sin() * 0.25 * dt;
            m.y += m.vy * dt;

            let frac = (m.age / m.life).clamp(0.0, 1.0);
            let alpha = (1.0 - frac) * 0.6;
            let s = m.size;
            let color = ctx.colors.accent.with_opacity(alpha);
            // Two lobes and a point.
            surface.fill_circle(m.x - s * 0.5, m.y - s * 0.3, s * 0.6, color);
            surface.fill_circle(m.x + s * 0.5, m.y - s * 0.3, s * 0.6, color);
            surface.fill_circle(m.x, m.y + s * 0.3, s * 0.55, color);
        }

        self.motes.retain(|m| m.age < m.life && m.y > -10.0);
    }

    fn reset(&mut self) {
        self.ready = false;
    }
}

// ---------------------------------------------------------------------------
// CandleGlowFx — one warm hearth glow breathing at the frame's heart
// ---------------------------------------------------------------------------

/// A single dominant glow low in the frame plus two faint companions,
/// breathing slowly. Steadier than the horror flicker; this one comforts.
#[derive(Debug, Clone)]
pub struct CandleGlowFx {
    ready: bool,
}

impl CandleGlowFx {
    pub fn new() -> Self {
        Self { ready: false }
    }
}

impl Default for CandleGlowFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for CandleGlowFx {
    fn name(&self) -> &'static str {
        "Candle Glow"
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

        let breathe = pulse01(t, 0.15);
        let flicker = pulse01(t * 3.7, 1.1) * 0.1;
        let strength = 0.35 + breathe * 0.15 + flicker;

        let (cx, cy) = (w * 0.5, h * 0.72);
        let radius = w.min(h) * 0.38;
        surface.glow_dot(cx, cy, radius, ctx.colors.primary, strength);
        surface.glow_dot(cx, cy, radius * 0.4, ctx.colors.accent, strength * 0.8);

        surface.glow_dot(w * 0.15, h * 0.85, radius * 0.3, ctx.colors.primary, strength * 0.4);
        surface.glow_dot(w * 0.85, h * 0.82, radius * 0.25, ctx.colors.primary, strength * 0.35);
    }

    fn reset(&mut self) {
        self.ready = false;
    }
}

// ---------------------------------------------------------------------------
// SilkRibbonsFx — ribbon curves flowing across the frame
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Ribbon {
    y_frac: f32,
    phase: f32,
    rate: f32,
    amp_frac: f32,
    wavelength: f32,
}

const RIBBON_COUNT: usize = 4;

/// Oscillating field: each ribbon is a sine traced across the width as a
/// band of parallel strands, scrolling by phase.
#[derive(Debug, Clone)]
pub struct SilkRibbonsFx {
    ribbons: Vec<Ribbon>,
    rng: XorShift32,
    ready: bool,
}

impl SilkRibbonsFx {
    pub fn new() -> Self {
        Self {
            ribbons: Vec::new(),
            rng: XorShift32::new(0x511B_B045),
            ready: false,
        }
    }
}

impl Default for SilkRibbonsFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for SilkRibbonsFx {
    fn name(&self) -> &'static str {
        "Silk Ribbons"
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn init(&mut self, _width: u32, _height: u32, _primary: PackedRgba) {
        if self.ready {
            return;
        }
        self.ribbons.clear();
        for i in 0..RIBBON_COUNT {
            self.ribbons.push(Ribbon {
                y_frac: 0.2 + i as f32 * 0.2,
                phase: self.rng.range_f32(0.0, std::f32::consts::TAU),
                rate: self.rng.range_f32(0.2, 0.5),
                amp_frac: self.rng.range_f32(0.04, 0.1),
                wavelength: self.rng.range_f32(5.0, 11.0),
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

        for (ri, r) in self.ribbons.iter().enumerate() {
            let color = if ri % 2 == 0 {
                ctx.colors.accent
            } else {
                ctx.colors.secondary
            };
            let cy = r.y_frac * h;
            let amp = r.amp_frac * h;

            const STRANDS: i32 = 3;
            for strand in -STRANDS / 2..=STRANDS / 2 {
                let offset = strand as f32 * 1.5;
                let mut prev: Option<(f32, f32)> = None;
                let mut x = 0.0;
                while x < w {
                    let y = cy + offset + ((x / w) * r.wavelength + t * r.rate + r.phase).sin() * amp;
                    if let Some((px, py)) = prev {
                        surface.line(px, py, x, y, color.with_opacity(0.15));
                    }
                    prev = Some((x, y));
                    x += 6.0;
                }
            }
        }
    }

    fn reset(&mut self) {
        self.ready = false;
    }
}

// ---------------------------------------------------------------------------
// WaxDripsFx — sealing wax beads creeping down from the top
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct WaxBead {
    x: f32,
    y: f32,
    speed: f32,
    width: f32,
    settled_at: f32,
}

pub const WAX_CAP: usize = 14;

/// Beads crawl down slowly and settle at a random depth, where they cool and
/// hold. Settled beads retire after the pool saturates.
#[derive(Debug, Clone)]
pub struct WaxDripsFx {
    beads: Vec<WaxBead>,
    rng: XorShift32,
    ready: bool,
}

impl WaxDripsFx {
    pub fn new() -> Self {
        Self {
            beads: Vec::new(),
            rng: XorShift32::new(0x3A4D_2195),
            ready: false,
        }
    }

    /// Live bead count; never exceeds [`WAX_CAP`].
    pub fn population(&self) -> usize {
        self.beads.len()
    }
}

impl Default for WaxDripsFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for WaxDripsFx {
    fn name(&self) -> &'static str {
        "Wax Drips"
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn init(&mut self, _width: u32, _height: u32, _primary: PackedRgba) {
        if self.ready {
            return;
        }
        self.beads.clear();
        self.ready = true;
    }

    fn render(&mut self, ctx: &SceneContext, surface: &mut Surface) {
        if ctx.is_empty() || !ctx.quality.is_enabled() {
            return;
        }
        let (w, h) = (ctx.width as f32, ctx.height as f32);
        let dt = ctx.dt();

        if self.beads.len() < WAX_CAP && self.rng.chance(0.008) {
            self.beads.push(WaxBead {
                x: self.rng.range_f32(0.05, 0.95) * w,
                y: 0.0,
                speed: self.rng.range_f32(0.05, 0.18),
                width: self.rng.range_f32(1.5, 3.5),
                settled_at: self.rng.range_f32(0.1, 0.4) * h,
            });
        }

        for b in &mut self.beads {
            if b.y < b.settled_at {
                b.y += b.speed * dt;
            }
            // Trail from origin to the bead, thickest at the bead.
            let x = b.x as i32;
            let y1 = b.y as i32;
            for y in 0..=y1 {
                let along = if b.y > 0.0 {
                    (y as f32 / b.y).clamp(0.0, 1.0)
                } else {
                    1.0
                };
                surface.blend(x, y, ctx.colors.primary.with_opacity(0.2 + along * 0.3));
            }
            surface.fill_circle(b.x, b.y, b.width, ctx.colors.primary.with_opacity(0.7));
        }

        // The oldest settled bead gives way once the pool is full.
        if self.beads.len() == WAX_CAP
            && let Some(idx) = self
                .beads
                .iter()
                .position(|b| b.y >= b.settled_at)
        {
            self.beads.remove(idx);
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
    fn petal_drift_honors_speed_knob() {
        let mut slow = PetalDriftFx::new();
        let mut fast = PetalDriftFx::new();
        slow.init(100, 100, PackedRgba::WHITE);
        fast.init(100, 100, PackedRgba::WHITE);
        let mut surface = Surface::new(100, 100);
        let mut c = ctx(100, 100, 1);
        c.particle_speed = 0.25;
        slow.render(&c, &mut surface);
        c.particle_speed = 3.0;
        fast.render(&c, &mut surface);
        for (a, b) in slow.petals.iter().zip(&fast.petals) {
            assert!(b.y >= a.y);
        }
    }

    #[test]
    fn heart_motes_respect_cap() {
        let mut fx = HeartMotesFx::new();
        fx.init(60, 80, PackedRgba::WHITE);
        let mut surface = Surface::new(60, 80);
        for frame in 0..4000 {
            fx.render(&ctx(60, 80, frame), &mut surface);
            assert!(fx.population() <= HEART_CAP);
        }
    }

    #[test]
    fn wax_drips_settle_and_bound() {
        let mut fx = WaxDripsFx::new();
        fx.init(60, 100, PackedRgba::WHITE);
        let mut surface = Surface::new(60, 100);
        for frame in 0..8000 {
            fx.render(&ctx(60, 100, frame), &mut surface);
            assert!(fx.population() <= WAX_CAP);
        }
        for b in &fx.beads {
            assert!(b.y <= b.settled_at + b.speed * 4.0);
        }
    }

    #[test]
    fn candle_glow_breathes() {
        let mut fx = CandleGlowFx::new();
        fx.init(60, 60, PackedRgba::WHITE);
        let mut a = Surface::new(60, 60);
        let mut b = Surface::new(60, 60);
        fx.render(&ctx(60, 60, 0), &mut a);
        fx.render(&ctx(60, 60, 150), &mut b);
        assert_ne!(a.pixels(), b.pixels());
    }

    #[test]
    fn family_survives_degenerate_input() {
        let fxs: Vec<Box<dyn SceneFx>> = vec![
            Box::new(PetalDriftFx::new()),
            Box::new(HeartMotesFx::new()),
            Box::new(CandleGlowFx::new()),
            Box::new(SilkRibbonsFx::new()),
            Box::new(WaxDripsFx::new()),
        ];
        for mut fx in fxs {
            fx.init(0, 0, PackedRgba::WHITE);
            let mut surface = Surface::new(0, 0);
            fx.render(&degenerate_ctx(0, 0), &mut surface);
        }
    }
}
