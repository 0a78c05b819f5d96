//! Per-frame render context.

use ambient_render::PackedRgba;
use ambient_style::{EffectTuning, SubTheme, parse_triplet};

use crate::quality::FxQuality;

/// The active sub-theme's three colors, pre-converted to additive RGB.
///
/// Renderers never see raw HSL; the driver converts once per frame. The only
/// hue math inside an effect is an effect that deliberately builds its own
/// hue (drifting smoke).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeRgb {
    pub primary: PackedRgba,
    pub accent: PackedRgba,
    pub secondary: PackedRgba,
}

impl ThemeRgb {
    /// Resolve a sub-theme's palette to RGB.
    #[must_use]
    pub fn from_sub_theme(theme: &SubTheme) -> Self {
        Self {
            primary: parse_triplet(theme.primary).to_rgb(),
            accent: parse_triplet(theme.accent).to_rgb(),
            secondary: parse_triplet(theme.secondary).to_rgb(),
        }
    }

    /// Neutral fallback palette for tests and cold starts.
    #[must_use]
    pub const fn default_dark() -> Self {
        Self {
            primary: PackedRgba::rgb(0, 170, 255),
            accent: PackedRgba::rgb(255, 0, 255),
            secondary: PackedRgba::rgb(57, 255, 180),
        }
    }
}

/// Per-frame value object handed to [`crate::SceneFx::render`].
///
/// Created fresh every frame by the driver; never persisted. Effects read it
/// and must not rely on identity across frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneContext {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Monotonic frame counter since loop start.
    pub frame: u64,
    /// Seconds since loop start.
    pub time_seconds: f64,
    /// Milliseconds since the previous frame.
    pub delta_ms: f64,
    /// Quality tier after area clamping.
    pub quality: FxQuality,
    /// Resolved theme colors.
    pub colors: ThemeRgb,
    /// Glow strength knob from the sub-theme (most effects ignore it).
    pub glow_intensity: f32,
    /// Speed knob from the sub-theme (most effects ignore it).
    pub particle_speed: f32,
    /// Population knob from the sub-theme (most effects ignore it).
    pub particle_count: u32,
}

impl SceneContext {
    /// True if either dimension is zero.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Delta time normalized against a 60 fps frame, clamped so a hitched
    /// frame cannot teleport particles. NaN deltas normalize to one frame.
    #[inline]
    #[must_use]
    pub fn dt(&self) -> f32 {
        let dt = (self.delta_ms / (1000.0 / 60.0)) as f32;
        if dt.is_finite() { dt.clamp(0.0, 4.0) } else { 1.0 }
    }

    /// Time in seconds, with NaN flattened to zero so trig stays finite.
    #[inline]
    #[must_use]
    pub fn time(&self) -> f64 {
        if self.time_seconds.is_finite() {
            self.time_seconds
        } else {
            0.0
        }
    }

    /// Copy tuning knobs out of a sub-theme's effect config.
    pub fn apply_tuning(&mut self, tuning: &EffectTuning) {
        self.glow_intensity = tuning.glow_intensity;
        self.particle_speed = tuning.particle_speed;
        self.particle_count = tuning.particle_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dt_is_one_at_sixty_fps() {
        let ctx = SceneContext {
            width: 10,
            height: 10,
            frame: 0,
            time_seconds: 0.0,
            delta_ms: 1000.0 / 60.0,
            quality: FxQuality::Full,
            colors: ThemeRgb::default_dark(),
            glow_intensity: 1.0,
            particle_speed: 1.0,
            particle_count: 0,
        };
        assert!((ctx.dt() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn dt_clamps_hitches_and_nan() {
        let mut ctx = SceneContext {
            width: 1,
            height: 1,
            frame: 0,
            time_seconds: 0.0,
            delta_ms: 5000.0,
            quality: FxQuality::Full,
            colors: ThemeRgb::default_dark(),
            glow_intensity: 1.0,
            particle_speed: 1.0,
            particle_count: 0,
        };
        assert_eq!(ctx.dt(), 4.0);
        ctx.delta_ms = f64::NAN;
        assert_eq!(ctx.dt(), 1.0);
    }

    #[test]
    fn nan_time_flattens() {
        let ctx = SceneContext {
            width: 1,
            height: 1,
            frame: 0,
            time_seconds: f64::NAN,
            delta_ms: 16.0,
            quality: FxQuality::Full,
            colors: ThemeRgb::default_dark(),
            glow_intensity: 1.0,
            particle_speed: 1.0,
            particle_count: 0,
        };
        assert_eq!(ctx.time(), 0.0);
    }

    #[test]
    fn theme_rgb_resolves_palette() {
        let theme = ambient_style::sub_theme("quietLibrary");
        let rgb = ThemeRgb::from_sub_theme(theme);
        assert_ne!(rgb.primary, PackedRgba::TRANSPARENT);
    }
}
