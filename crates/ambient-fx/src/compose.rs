//! Composition: effect stacks and the finishing overlay.

use ambient_render::{PackedRgba, Surface};

use crate::context::SceneContext;
use crate::contract::SceneFx;
use crate::rng::hash_noise;

/// Finishing pass applied after the effect stack: a flat wash, a corner
/// vignette, and animated grain. All three default to off.
#[derive(Debug, Clone, Copy)]
pub struct Overlay {
    /// Flat color blended over everything (alpha carries the strength).
    pub wash: PackedRgba,
    /// Corner darkening strength in `[0, 1]`.
    pub vignette: f32,
    /// Per-pixel noise strength in `[0, 1]`. Costs a full-surface pass.
    pub grain: f32,
}

impl Overlay {
    pub const NONE: Self = Self {
        wash: PackedRgba::TRANSPARENT,
        vignette: 0.0,
        grain: 0.0,
    };

    /// Apply the overlay to a rendered surface.
    pub fn apply(&self, ctx: &SceneContext, surface: &mut Surface) {
        if ctx.is_empty() {
            return;
        }
        let (w, h) = (surface.width(), surface.height());

        if self.wash.a() > 0 {
            surface.fill_rect(0, 0, w, h, self.wash);
        }

        let vignette = self.vignette.clamp(0.0, 1.0);
        if vignette > 0.0 {
            let (cx, cy) = (w as f32 * 0.5, h as f32 * 0.5);
            let max_d = cx.hypot(cy).max(1.0);
            for y in 0..h {
                for x in 0..w {
                    let dx = x as f32 + 0.5 - cx;
                    let dy = y as f32 + 0.5 - cy;
                    let d = (dx.hypot(dy) / max_d).clamp(0.0, 1.0);
                    let a = d * d * vignette * 0.8;
                    if a > 0.003 {
                        surface.blend(x as i32, y as i32, PackedRgba::BLACK.with_opacity(a));
                    }
                }
            }
        }

        let grain = self.grain.clamp(0.0, 1.0);
        if grain > 0.0 {
            for y in 0..h {
                for x in 0..w {
                    let n = hash_noise(x, y, ctx.frame);
                    // Top byte as a signed offset keeps the grain centered.
                    let v = ((n >> 24) as i32 - 128) as f32 / 128.0;
                    let a = v.abs() * grain * 0.12;
                    let c = if v >= 0.0 {
                        PackedRgba::WHITE
                    } else {
                        PackedRgba::BLACK
                    };
                    surface.blend(x as i32, y as i32, c.with_opacity(a));
                }
            }
        }
    }
}

impl Default for Overlay {
    fn default() -> Self {
        Self::NONE
    }
}

/// Ordered stack of effects rendered back-to-front, finished by an overlay.
///
/// The driver owns one of these. Most themes run a single effect; the stack
/// exists so a layered composition (for example fog under fireflies) costs
/// nothing extra in the driver.
pub struct AmbientLayers {
    layers: Vec<Box<dyn SceneFx>>,
    pub overlay: Overlay,
}

impl AmbientLayers {
    #[must_use]
    pub fn new() -> Self {
        Self {
            layers: Vec::new(),
            overlay: Overlay::NONE,
        }
    }

    /// Append an effect above the current layers.
    pub fn push(&mut self, fx: Box<dyn SceneFx>) {
        self.layers.push(fx);
    }

    /// Remove every layer. The overlay is untouched.
    pub fn clear(&mut self) {
        self.layers.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Layer views, bottom first.
    pub fn iter(&self) -> impl Iterator<Item = &dyn SceneFx> {
        self.layers.iter().map(|b| b.as_ref())
    }

    /// Initialize every layer that is not already initialized.
    pub fn init_all(&mut self, width: u32, height: u32, primary: PackedRgba) {
        for fx in &mut self.layers {
            fx.init(width, height, primary);
        }
    }

    /// Reset every layer.
    pub fn reset_all(&mut self) {
        for fx in &mut self.layers {
            fx.reset();
        }
    }

    /// Render all layers bottom-to-top, then apply the overlay.
    pub fn render(&mut self, ctx: &SceneContext, surface: &mut Surface) {
        for fx in &mut self.layers {
            fx.render(ctx, surface);
        }
        self.overlay.apply(ctx, surface);
    }
}

impl Default for AmbientLayers {
    fn default() -> Self {
        Self::new()
    }
}
