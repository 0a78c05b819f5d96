//! Sci-fi family: neon rain, glyph cascades, warp fields, and holograms.

use ambient_render::{PackedRgba, Surface};

use crate::context::SceneContext;
use crate::contract::SceneFx;
use crate::ease::pulse01;
use crate::effects::wrap_coord;
use crate::rng::{XorShift32, hash_noise};

// ---------------------------------------------------------------------------
// NeonRainFx — vertical neon streaks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Streak {
    x: f32,
    y: f32,
    speed: f32,
    length: f32,
}

const STREAK_COUNT: usize = 60;

/// Fast vertical streaks wrapping top-to-bottom. One of the few effects that
/// honors the theme's speed and glow knobs.
#[derive(Debug, Clone)]
pub struct NeonRainFx {
    streaks: Vec<Streak>,
    rng: XorShift32,
    ready: bool,
}

impl NeonRainFx {
    pub fn new() -> Self {
        Self {
            streaks: Vec::new(),
            rng: XorShift32::new(0x4E04_2A14),
            ready: false,
        }
    }
}

impl Default for NeonRainFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for NeonRainFx {
    fn name(&self) -> &'static str {
        "Neon Rain"
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn init(&mut self, width: u32, height: u32, _primary: PackedRgba) {
        if self.ready {
            return;
        }
        let (w, h) = (width.max(1) as f32, height.max(1) as f32);
        self.streaks.clear();
        for _ in 0..STREAK_COUNT {
            self.streaks.push(Streak {
                x: self.rng.range_f32(0.0, w),
                y: self.rng.range_f32(0.0, h),
                speed: self.rng.range_f32(1.5, 4.5),
                length: self.rng.range_f32(6.0, 24.0),
            });
        }
        self.ready = true;
    }

    fn render(&mut self, ctx: &SceneContext, surface: &mut Surface) {
        if ctx.is_empty() || !ctx.quality.is_enabled() {
            return;
        }
        let h = ctx.height as f32;
        let dt = ctx.dt();
        let speed_knob = if ctx.particle_speed.is_finite() && ctx.particle_speed > 0.0 {
            ctx.particle_speed
        } else {
            1.0
        };
        let glow = ctx.glow_intensity.clamp(0.0, 1.0);

        for s in &mut self.streaks {
            s.y = wrap_coord(s.y + s.speed * speed_knob * dt, h);

            let x = s.x as i32;
            let head = s.y;
            let tail = s.y - s.length;
            let y0 = tail as i32;
            let y1 = head as i32;
            for y in y0..=y1 {
                let along = ((y as f32 - tail) / s.length).clamp(0.0, 1.0);
                surface.blend(
                    x,
                    y,
                    ctx.colors.primary.with_opacity(0.1 + along * 0.5 * glow),
                );
            }
            surface.glow_dot(s.x, head, 2.5, ctx.colors.accent, 0.5 * glow);
        }
    }

    fn reset(&mut self) {
        self.ready = false;
    }
}

// ---------------------------------------------------------------------------
// CodeFallFx — columns of flickering glyph blocks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct CodeColumn {
    x: f32,
    head: f32,
    speed: f32,
    trail: f32,
}

/// Columns of small square "glyphs" falling at independent rates, each cell
/// flickering by hashed noise rather than stored per-cell state.
#[derive(Debug, Clone)]
pub struct CodeFallFx {
    columns: Vec<CodeColumn>,
    rng: XorShift32,
    ready: bool,
}

const CELL: f32 = 4.0;

impl CodeFallFx {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            rng: XorShift32::new(0xC0DE_FA11),
            ready: false,
        }
    }
}

impl Default for CodeFallFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for CodeFallFx {
    fn name(&self) -> &'static str {
        "Code Fall"
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn init(&mut self, width: u32, height: u32, _primary: PackedRgba) {
        if self.ready {
            return;
        }
        let h = height.max(1) as f32;
        let cols = ((width.max(1) as f32 / (CELL * 2.0)) as usize).clamp(1, 120);
        self.columns.clear();
        for i in 0..cols {
            self.columns.push(CodeColumn {
                x: i as f32 * CELL * 2.0,
                head: self.rng.range_f32(-h, h),
                speed: self.rng.range_f32(0.8, 2.4),
                trail: self.rng.range_f32(20.0, 80.0),
            });
        }
        self.ready = true;
    }

    fn render(&mut self, ctx: &SceneContext, surface: &mut Surface) {
        if ctx.is_empty() || !ctx.quality.is_enabled() {
            return;
        }
        let h = ctx.height as f32;
        let dt = ctx.dt();

        for col in &mut self.columns {
            col.head += col.speed * dt;
            if col.head - col.trail > h {
                col.head = 0.0;
            }

            let cell_x = (col.x / CELL) as i32;
            let head_cell = (col.head / CELL) as i32;
            let trail_cells = (col.trail / CELL) as i32;
            for i in 0..trail_cells {
                let cell_y = head_cell - i;
                if cell_y < 0 {
                    break;
                }
                let fade = 1.0 - i as f32 / trail_cells as f32;
                // Hash gives each cell an independent flicker without state.
                let n = (hash_noise(cell_x as u32, cell_y as u32, ctx.frame / 6) & 0xFFFF) as f32
                    / 65536.0;
                let alpha = fade * (0.2 + n * 0.5);
                let color = if i == 0 {
                    ctx.colors.accent
                } else {
                    ctx.colors.primary
                };
                surface.fill_rect(
                    col.x as i32,
                    cell_y * CELL as i32,
                    CELL as u32 - 1,
                    CELL as u32 - 1,
                    color.with_opacity(alpha),
                );
            }
        }
    }

    fn reset(&mut self) {
        self.ready = false;
    }
}

// ---------------------------------------------------------------------------
// WarpStarsFx — stars streaking radially from center
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct WarpStar {
    angle: f32,
    dist: f32,
    speed: f32,
}

const WARP_STAR_COUNT: usize = 110;

/// Starfield in polar coordinates: each star rides its ray outward,
/// accelerating with distance, and respawns near the center after leaving
/// the frame.
#[derive(Debug, Clone)]
pub struct WarpStarsFx {
    stars: Vec<WarpStar>,
    rng: XorShift32,
    ready: bool,
}

impl WarpStarsFx {
    pub fn new() -> Self {
        Self {
            stars: Vec::new(),
            rng: XorShift32::new(0x3A49_57A5),
            ready: false,
        }
    }
}

impl Default for WarpStarsFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for WarpStarsFx {
    fn name(&self) -> &'static str {
        "Warp Stars"
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn init(&mut self, width: u32, height: u32, _primary: PackedRgba) {
        if self.ready {
            return;
        }
        let max_r = (width.max(1) as f32).hypot(height.max(1) as f32) * 0.5;
        self.stars.clear();
        for _ in 0..WARP_STAR_COUNT {
            self.stars.push(WarpStar {
                angle: self.rng.range_f32(0.0, std::f32::consts::TAU),
                dist: self.rng.range_f32(2.0, max_r),
                speed: self.rng.range_f32(0.2, 0.9),
            });
        }
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

        for s in &mut self.stars {
            s.dist += s.speed * (1.0 + s.dist / max_r * 3.0) * dt;
            if s.dist > max_r {
                s.dist = self.rng.range_f32(2.0, 12.0);
                s.angle = self.rng.range_f32(0.0, std::f32::consts::TAU);
            }

            let (sin, cos) = s.angle.sin_cos();
            let x1 = cx + cos * s.dist;
            let y1 = cy + sin * s.dist;
            let streak = (s.dist / max_r * 10.0).min(8.0);
            let x0 = cx + cos * (s.dist - streak).max(0.0);
            let y0 = cy + sin * (s.dist - streak).max(0.0);
            let alpha = (s.dist / max_r).clamp(0.1, 0.9);
            surface.line(x0, y0, x1, y1, ctx.colors.secondary.with_opacity(alpha));
        }
    }

    fn reset(&mut self) {
        self.ready = false;
    }
}

// ---------------------------------------------------------------------------
// NebulaPulseFx — breathing nebula blobs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct NebulaBlob {
    x_frac: f32,
    y_frac: f32,
    radius_frac: f32,
    phase: f32,
    rate: f64,
}

const BLOB_COUNT: usize = 5;

/// Large soft glows breathing at incommensurate rates. Positions are
/// fractional so resizes rescale the composition instead of stranding it.
#[derive(Debug, Clone)]
pub struct NebulaPulseFx {
    blobs: Vec<NebulaBlob>,
    rng: XorShift32,
    ready: bool,
}

impl NebulaPulseFx {
    pub fn new() -> Self {
        Self {
            blobs: Vec::new(),
            rng: XorShift32::new(0x4EB0_1A93),
            ready: false,
        }
    }
}

impl Default for NebulaPulseFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for NebulaPulseFx {
    fn name(&self) -> &'static str {
        "Nebula Pulse"
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn init(&mut self, _width: u32, _height: u32, _primary: PackedRgba) {
        if self.ready {
            return;
        }
        self.blobs.clear();
        for _ in 0..BLOB_COUNT {
            self.blobs.push(NebulaBlob {
                x_frac: self.rng.range_f32(0.1, 0.9),
                y_frac: self.rng.range_f32(0.1, 0.9),
                radius_frac: self.rng.range_f32(0.12, 0.3),
                phase: self.rng.range_f32(0.0, std::f32::consts::TAU),
                rate: self.rng.range_f32(0.05, 0.18) as f64,
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
        let t = ctx.time();

        for (i, blob) in self.blobs.iter().enumerate() {
            let breathe = pulse01(t + blob.phase as f64, blob.rate);
            let radius = blob.radius_frac * min_side * (0.8 + breathe * 0.4);
            let color = if i % 2 == 0 {
                ctx.colors.primary
            } else {
                ctx.colors.accent
            };
            surface.glow_dot(
                blob.x_frac * w,
                blob.y_frac * h,
                radius,
                color,
                0.15 + breathe * 0.15,
            );
        }
    }

    fn reset(&mut self) {
        self.ready = false;
    }
}

// ---------------------------------------------------------------------------
// HoloGridFx — scrolling perspective grid with a scanline
// ---------------------------------------------------------------------------

/// Floor-grid hologram: verticals converge toward a horizon, horizontals
/// scroll downward, and a scanline sweeps the full height.
#[derive(Debug, Clone)]
pub struct HoloGridFx {
    scroll: f32,
    ready: bool,
}

impl HoloGridFx {
    pub fn new() -> Self {
        Self {
            scroll: 0.0,
            ready: false,
        }
    }
}

impl Default for HoloGridFx {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneFx for HoloGridFx {
    fn name(&self) -> &'static str {
        "Holo Grid"
    }

    fn is_initialized(&self) -> bool {
        self.ready
    }

    fn init(&mut self, _width: u32, _height: u32, _primary: PackedRgba) {
        if self.ready {
            return;
        }
        self.scroll = 0.0;
        self.ready = true;
    }

    fn render(&mut self, ctx: &SceneContext, surface: &mut Surface) {
        if ctx.is_empty() || !ctx.quality.is_enabled() {
            return;
        }
        let (w, h) = (ctx.width as f32, ctx.height as f32);
        self.scroll = (self.scroll + 0.01 * ctx.dt()).rem_euclid(1.0);

        let horizon = h * 0.55;
        let grid = ctx.colors.primary.with_opacity(0.2);

        // Converging verticals.
        const RAYS: i32 = 12;
        for i in -RAYS..=RAYS {
            let spread = i as f32 / RAYS as f32;
            surface.line(
                w * 0.5,
                horizon,
                w * 0.5 + spread * w * 1.2,
                h,
                grid,
            );
        }

        // Scrolling horizontals, bunched toward the horizon.
        const ROWS: i32 = 10;
        for i in 0..ROWS {
            let u = ((i as f32 + self.scroll) / ROWS as f32).clamp(0.0, 1.0);
            let y = horizon + u * u * (h - horizon);
            surface.hline(
                y as i32,
                0,
                w as i32 - 1,
                grid.with_opacity(0.1 + u * 0.2),
            );
        }

        // Scanline sweep.
        let sweep = ((ctx.time() * 0.12).fract() as f32) * h;
        surface.hline(
            sweep as i32,
            0,
            w as i32 - 1,
            ctx.colors.accent.with_opacity(0.18),
        );
    }

    fn reset(&mut self) {
        self.ready = false;
    }
}
