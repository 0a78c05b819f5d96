//! Quality tiers for graceful degradation.

/// Area threshold (in pixels) above which `Full` is clamped to `Reduced`.
pub const FX_AREA_THRESHOLD_FULL_TO_REDUCED: usize = 1_000_000;

/// Area threshold (in pixels) above which `Reduced` is clamped to `Minimal`.
pub const FX_AREA_THRESHOLD_REDUCED_TO_MINIMAL: usize = 4_000_000;

/// Quality hint for effect implementations.
///
/// A stable "dial" so effects can degrade gracefully. Decorative backgrounds
/// are non-essential: `Off` means render nothing, and the driver maps the
/// user's reduced-motion preference onto it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FxQuality {
    /// Render nothing.
    Off,
    /// Very cheap fallback: minimal trig, near-static.
    Minimal,
    /// Fewer iterations, simplified math.
    Reduced,
    /// Normal detail, full quality.
    #[default]
    Full,
}

impl FxQuality {
    /// Clamp quality based on surface area.
    ///
    /// Large surfaces automatically reduce quality even when the caller asks
    /// for `Full`, so per-pixel work cannot blow the frame budget.
    #[inline]
    pub fn clamp_for_area(self, area_pixels: usize) -> Self {
        match self {
            Self::Full if area_pixels >= FX_AREA_THRESHOLD_FULL_TO_REDUCED => {
                if area_pixels >= FX_AREA_THRESHOLD_REDUCED_TO_MINIMAL {
                    Self::Minimal
                } else {
                    Self::Reduced
                }
            }
            Self::Reduced if area_pixels >= FX_AREA_THRESHOLD_REDUCED_TO_MINIMAL => Self::Minimal,
            other => other,
        }
    }

    /// Returns `true` if effects should render (not `Off`).
    #[inline]
    pub fn is_enabled(self) -> bool {
        self != Self::Off
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_area_keeps_full() {
        assert_eq!(FxQuality::Full.clamp_for_area(800 * 600), FxQuality::Full);
    }

    #[test]
    fn large_area_reduces() {
        assert_eq!(
            FxQuality::Full.clamp_for_area(1_600_000),
            FxQuality::Reduced
        );
        assert_eq!(
            FxQuality::Full.clamp_for_area(5_000_000),
            FxQuality::Minimal
        );
    }

    #[test]
    fn off_stays_off() {
        assert_eq!(FxQuality::Off.clamp_for_area(10_000_000), FxQuality::Off);
        assert!(!FxQuality::Off.is_enabled());
    }
}
