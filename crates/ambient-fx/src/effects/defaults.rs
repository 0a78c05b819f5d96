//! Default family: the styles every story starts with.

use ambient_render::{PackedRgba, Surface};

use crate::context::SceneContext;
use crate::contract::SceneFx;
use crate::effects::wrap_coord;
use crate::rng::XorShift32;

// ---------------------------------------------------------------------------
// InkDustFx — drifting dust motes; the designated fallback renderer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Mote {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    phase: f32,
    size: f32,
}

/// Slow dust motes catching lamplight. The registry's fallback: it must look
/// acceptable under any palette.
///
/// Reads the sub-theme's `particle_count`, `particle_speed`, and
/// `glow_intensity` knobs.
#[derive(Debug, Clone)]
pub struct InkDustFx {
    motes: Vec<Mote>,
    rng: XorShift32,
    ready: bool,
}

impl InkDustFx {
    pub fn new() -> Self {
        Self {
            motes: Vec::new(),
            rng: XorShift32::new(0x1D05_71A3),
            ready: false,
        }
    }

    fn spawn(&mut self, width: f32, height: f32) -> Mote {
        Mote {
            x: self.rng.range_f32(0.0, width.max(1.0)),
            y: self.rng.range_f32(0.0, height.max(1.0)),
            vx: self.rng.range_f32(-0.15, 0.15),
            vy: self.rng.range_f32(-0.1, 0.05),
            phase: self.rng.range_f32(0.0, std::f32::consts::TAU),
            size: self.rng.range_f32(0.8, 2.4),
        }
    }
}

impl Default for InkDustFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for InkDustFx {
    fn name(&self) -> &'static str {
        "Ink Dust"
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn init(&mut self, width: u32, height: u32, _primary: PackedRgba) {
        if self.ready {
            return;
        }
        let (w, h) = (width as f32, height as f32);
        self.motes.clear();
        for _ in 0..48 {
            let m = self.spawn(w, h);
            self.motes.push(m);
        }
        self.ready = true;
    }

    fn render(&mut self, ctx: &SceneContext, surface: &mut Surface) {
        if ctx.is_empty() || !ctx.quality.is_enabled() {
            return;
        }
        let (w, h) = (ctx.width as f32, ctx.height as f32);
        let dt = ctx.dt();
        let speed = ctx.particle_speed.clamp(0.0, 4.0);

        // Grow or shrink toward the themed population.
        let target = ctx.particle_count.clamp(8, 400) as usize;
        while self.motes.len() < target {
            let m = self.spawn(w, h);
            self.motes.push(m);
        }
        self.motes.truncate(target);

        let glow = ctx.glow_intensity.clamp(0.0, 1.0);
        for m in &mut self.motes {
            m.phase += 0.013 * dt;
            m.x = wrap_coord(m.x + (m.vx + m.phase.sin() * 0.08) * speed * dt, w);
            m.y = wrap_coord(m.y + (m.vy + (m.phase * 0.7).cos() * 0.05) * speed * dt, h);

            surface.glow_dot(m.x, m.y, m.size * 3.0, ctx.colors.primary, 0.25 * glow);
            surface.fill_circle(m.x, m.y, m.size * 0.5, ctx.colors.primary.with_opacity(0.5));
        }
    }

    fn reset(&mut self) {
        self.ready = false;
    }
}

// ---------------------------------------------------------------------------
// StarfieldFx — twinkling fixed stars
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Star {
    x: f32,
    y: f32,
    depth: f32,
    twinkle_phase: f32,
    twinkle_rate: f32,
}

const STAR_COUNT: usize = 140;

/// A fixed star map that twinkles. Stars drift very slowly along x to keep
/// the sky alive; brightness comes from a per-star sine.
///
/// Reads `particle_speed` and `glow_intensity`.
#[derive(Debug, Clone)]
pub struct StarfieldFx {
    stars: Vec<Star>,
    rng: XorShift32,
    ready: bool,
}

impl StarfieldFx {
    pub fn new() -> Self {
        Self {
            stars: Vec::new(),
            rng: XorShift32::new(0x57A2_F1E1),
            ready: false,
        }
    }

    /// Number of stars currently alive. Stable after `init`.
    pub fn star_count(&self) -> usize {
        self.stars.len()
    }
}

impl Default for StarfieldFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for StarfieldFx {
    fn name(&self) -> &'static str {
        "Starfield"
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn init(&mut self, width: u32, height: u32, _primary: PackedRgba) {
        if self.ready {
            return;
        }
        let (w, h) = (width.max(1) as f32, height.max(1) as f32);
        self.stars.clear();
        for _ in 0..STAR_COUNT {
            self.stars.push(Star {
                x: self.rng.range_f32(0.0, w),
                y: self.rng.range_f32(0.0, h),
                depth: self.rng.range_f32(0.2, 1.0),
                twinkle_phase: self.rng.range_f32(0.0, std::f32::consts::TAU),
                twinkle_rate: self.rng.range_f32(0.4, 1.6),
            });
        }
        self.ready = true;
    }

    fn render(&mut self, ctx: &SceneContext, surface: &mut Surface) {
        if ctx.is_empty() || !ctx.quality.is_enabled() {
            return;
        }
        let w = ctx.width as f32;
        let dt = ctx.dt();
        let speed = ctx.particle_speed.clamp(0.0, 4.0);
        let glow = ctx.glow_intensity.clamp(0.0, 1.0);
        let t = ctx.time() as f32;

        for s in &mut self.stars {
            s.x = wrap_coord(s.x - 0.02 * s.depth * speed * dt, w);
            let tw = (t * s.twinkle_rate + s.twinkle_phase).sin() * 0.5 + 0.5;
            let alpha = (0.25 + 0.75 * tw) * s.depth;

            let core = ctx.colors.primary.lerp(PackedRgba::WHITE, 0.6 * s.depth);
            surface.glow_dot(s.x, s.y, 1.5 + 2.5 * s.depth, core, alpha * 0.5 * glow);
            surface.fill_circle(s.x, s.y, 0.7 * s.depth, core.with_opacity(alpha));
        }
    }

    fn reset(&mut self) {
        self.ready = false;
    }
}

// ---------------------------------------------------------------------------
// FirefliesFx — wandering pulsing lights
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Firefly {
    x: f32,
    y: f32,
    heading: f32,
    pulse_phase: f32,
}

const FIREFLY_COUNT: usize = 22;

/// Fireflies wandering on random-walk headings, each pulsing on its own
/// phase.
#[derive(Debug, Clone)]
pub struct FirefliesFx {
    flies: Vec<Firefly>,
    rng: XorShift32,
    ready: bool,
}

impl FirefliesFx {
    pub fn new() -> Self {
        Self {
            flies: Vec::new(),
            rng: XorShift32::new(0xF12E_F1E5),
            ready: false,
        }
    }
}

impl Default for FirefliesFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for FirefliesFx {
    fn name(&self) -> &'static str {
        "Fireflies"
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn init(&mut self, width: u32, height: u32, _primary: PackedRgba) {
        if self.ready {
            return;
        }
        let (w, h) = (width.max(1) as f32, height.max(1) as f32);
        self.flies.clear();
        for _ in 0..FIREFLY_COUNT {
            self.flies.push(Firefly {
                x: self.rng.range_f32(0.0, w),
                y: self.rng.range_f32(0.0, h),
                heading: self.rng.range_f32(0.0, std::f32::consts::TAU),
                pulse_phase: self.rng.range_f32(0.0, std::f32::consts::TAU),
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

        for f in &mut self.flies {
            f.heading += self.rng.range_f32(-0.12, 0.12) * dt;
            f.x = wrap_coord(f.x + f.heading.cos() * 0.45 * dt, w);
            f.y = wrap_coord(f.y + f.heading.sin() * 0.45 * dt, h);

            let pulse = ((t * 1.8 + f.pulse_phase).sin() * 0.5 + 0.5).powi(2);
            if pulse > 0.05 {
                surface.glow_dot(f.x, f.y, 5.0, ctx.colors.accent, pulse * 0.8);
                surface.fill_circle(f.x, f.y, 1.0, ctx.colors.accent.with_opacity(pulse));
            }
        }
    }

    fn reset(&mut self) {
        self.ready = false;
    }
}

// ---------------------------------------------------------------------------
// BokehDriftFx — large soft out-of-focus discs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct BokehDisc {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    radius: f32,
    alpha: f32,
    use_accent: bool,
}

const BOKEH_COUNT: usize = 14;

/// Out-of-focus light discs drifting very slowly.
#[derive(Debug, Clone)]
pub struct BokehDriftFx {
    discs: Vec<BokehDisc>,
    rng: XorShift32,
    ready: bool,
}

impl BokehDriftFx {
    pub fn new() -> Self {
        Self {
            discs: Vec::new(),
            rng: XorShift32::new(0xB0CE_4D1F),
            ready: false,
        }
    }
}

impl Default for BokehDriftFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for BokehDriftFx {
    fn name(&self) -> &'static str {
        "Bokeh Drift"
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn init(&mut self, width: u32, height: u32, _primary: PackedRgba) {
        if self.ready {
            return;
        }
        let (w, h) = (width.max(1) as f32, height.max(1) as f32);
        self.discs.clear();
        for i in 0..BOKEH_COUNT {
            self.discs.push(BokehDisc {
                x: self.rng.range_f32(0.0, w),
                y: self.rng.range_f32(0.0, h),
                vx: self.rng.range_f32(-0.12, 0.12),
                vy: self.rng.range_f32(-0.08, 0.08),
                radius: self.rng.range_f32(10.0, 36.0),
                alpha: self.rng.range_f32(0.04, 0.12),
                use_accent: i % 3 == 0,
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

        for d in &mut self.discs {
            d.x = wrap_coord(d.x + d.vx * dt, w);
            d.y = wrap_coord(d.y + d.vy * dt, h);
            let color = if d.use_accent {
                ctx.colors.accent
            } else {
                ctx.colors.primary
            };
            surface.glow_dot(d.x, d.y, d.radius, color, d.alpha * 2.0);
        }
    }

    fn reset(&mut self) {
        self.ready = false;
    }
}

// ---------------------------------------------------------------------------
// EmberRiseFx — spawn-and-retire rising embers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Ember {
    x: f32,
    y: f32,
    vy: f32,
    sway_phase: f32,
    life: u32,
}

/// Hard population cap; frequent spawners must bound their arrays or a long
/// session grows the heap without limit.
pub const EMBER_CAP: usize = 90;
const EMBER_MAX_LIFE: u32 = 240;

/// Embers rising from the bottom edge, swaying as they cool and fade.
#[derive(Debug, Clone)]
pub struct EmberRiseFx {
    embers: Vec<Ember>,
    rng: XorShift32,
    ready: bool,
}

impl EmberRiseFx {
    pub fn new() -> Self {
        Self {
            embers: Vec::new(),
            rng: XorShift32::new(0xE3BE_6A11),
            ready: false,
        }
    }

    /// Live ember count; never exceeds [`EMBER_CAP`].
    pub fn population(&self) -> usize {
        self.embers.len()
    }
}

impl Default for EmberRiseFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for EmberRiseFx {
    fn name(&self) -> &'static str {
        "Ember Rise"
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn init(&mut self, _width: u32, _height: u32, _primary: PackedRgba) {
        if self.ready {
            return;
        }
        self.embers.clear();
        self.ready = true;
    }

    fn render(&mut self, ctx: &SceneContext, surface: &mut Surface) {
        if ctx.is_empty() || !ctx.quality.is_enabled() {
            return;
        }
        let (w, h) = (ctx.width as f32, ctx.height as f32);
        let dt = ctx.dt();

        if self.embers.len() < EMBER_CAP && self.rng.chance(0.35) {
            self.embers.push(Ember {
                x: self.rng.range_f32(0.0, w),
                y: h + 2.0,
                vy: self.rng.range_f32(0.5, 1.4),
                sway_phase: self.rng.range_f32(0.0, std::f32::consts::TAU),
                life: 0,
            });
        }

        let accent = ctx.colors.accent;
        let primary = ctx.colors.primary;
        for e in &mut self.embers {
            e.life += 1;
            e.sway_phase += 0.05 * dt;
            e.x += e.sway_phase.sin() * 0.4 * dt;
            e.y -= e.vy * dt;

            let age = e.life as f32 / EMBER_MAX_LIFE as f32;
            let alpha = (1.0 - age).clamp(0.0, 1.0);
            let color = accent.lerp(primary, age);
            surface.glow_dot(e.x, e.y, 3.0, color, alpha * 0.7);
            surface.fill_circle(e.x, e.y, 0.9, color.with_opacity(alpha));
        }

        self.embers
            .retain(|e| e.life < EMBER_MAX_LIFE && e.y > -8.0);
    }

    fn reset(&mut self) {
        self.ready = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::WRAP_BUFFER;
    use crate::effects::testutil::{ctx, degenerate_ctx};

    #[test]
    fn ink_dust_init_is_idempotent() {
        let mut fx = InkDustFx::new();
        fx.init(100, 80, PackedRgba::WHITE);
        let n = fx.motes.len();
        fx.init(100, 80, PackedRgba::WHITE);
        assert_eq!(fx.motes.len(), n);
    }

    #[test]
    fn ink_dust_tracks_theme_population() {
        let mut fx = InkDustFx::new();
        fx.init(100, 80, PackedRgba::WHITE);
        let mut surface = Surface::new(100, 80);
        let mut c = ctx(100, 80, 0);
        c.particle_count = 120;
        fx.render(&c, &mut surface);
        assert_eq!(fx.motes.len(), 120);
        c.particle_count = 30;
        fx.render(&c, &mut surface);
        assert_eq!(fx.motes.len(), 30);
    }

    #[test]
    fn ink_dust_motes_stay_in_wrap_band() {
        let mut fx = InkDustFx::new();
        fx.init(120, 90, PackedRgba::WHITE);
        let mut surface = Surface::new(120, 90);
        for frame in 0..500 {
            fx.render(&ctx(120, 90, frame), &mut surface);
        }
        for m in &fx.motes {
            assert!((-WRAP_BUFFER..=120.0 + WRAP_BUFFER).contains(&m.x));
            assert!((-WRAP_BUFFER..=90.0 + WRAP_BUFFER).contains(&m.y));
        }
    }

    #[test]
    fn starfield_population_stable_across_frames() {
        let mut fx = StarfieldFx::new();
        fx.init(200, 120, PackedRgba::WHITE);
        let n = fx.star_count();
        let mut surface = Surface::new(200, 120);
        for frame in 0..120 {
            fx.render(&ctx(200, 120, frame), &mut surface);
        }
        assert_eq!(fx.star_count(), n);
    }

    #[test]
    fn starfield_twinkles() {
        let mut fx = StarfieldFx::new();
        fx.init(64, 48, PackedRgba::WHITE);
        let mut first = Surface::new(64, 48);
        let mut later = Surface::new(64, 48);
        fx.render(&ctx(64, 48, 0), &mut first);
        for frame in 1..40 {
            let mut scratch = Surface::new(64, 48);
            fx.render(&ctx(64, 48, frame), &mut scratch);
        }
        fx.render(&ctx(64, 48, 40), &mut later);
        assert_ne!(first.pixels(), later.pixels());
    }

    #[test]
    fn embers_never_exceed_cap() {
        let mut fx = EmberRiseFx::new();
        fx.init(80, 60, PackedRgba::WHITE);
        let mut surface = Surface::new(80, 60);
        for frame in 0..2000 {
            fx.render(&ctx(80, 60, frame), &mut surface);
            assert!(fx.population() <= EMBER_CAP);
        }
    }

    #[test]
    fn all_defaults_survive_degenerate_input() {
        let fxs: Vec<Box<dyn SceneFx>> = vec![
            Box::new(InkDustFx::new()),
            Box::new(StarfieldFx::new()),
            Box::new(FirefliesFx::new()),
            Box::new(BokehDriftFx::new()),
            Box::new(EmberRiseFx::new()),
        ];
        for mut fx in fxs {
            fx.init(0, 0, PackedRgba::WHITE);
            let mut surface = Surface::new(0, 0);
            fx.render(&degenerate_ctx(0, 0), &mut surface);
        }
    }

    #[test]
    fn fireflies_deterministic() {
        let mut a = FirefliesFx::new();
        let mut b = FirefliesFx::new();
        a.init(60, 40, PackedRgba::WHITE);
        b.init(60, 40, PackedRgba::WHITE);
        let mut sa = Surface::new(60, 40);
        let mut sb = Surface::new(60, 40);
        for frame in 0..30 {
            sa.clear(PackedRgba::BLACK);
            sb.clear(PackedRgba::BLACK);
            a.render(&ctx(60, 40, frame), &mut sa);
            b.render(&ctx(60, 40, frame), &mut sb);
            assert_eq!(sa.pixels(), sb.pixels());
        }
    }
}
