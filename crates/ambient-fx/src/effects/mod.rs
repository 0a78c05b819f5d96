//! Effect implementations, grouped by genre family.
//!
//! Grouping is source organization only: every effect is a peer of the
//! [`crate::SceneFx`] contract and owns its own particle/object arrays.
//! Simulation archetypes shared across families:
//!
//! - **drifting particle field**: velocity + sinusoidal sway, wrap at edges
//! - **spawn-and-retire**: probabilistic spawn, aging, filtered retirement,
//!   with a hard population cap on frequent spawners
//! - **oscillating field**: summed sine terms swept across the width
//! - **rotating assembly**: per-object angular rate and direction
//! - **reactive pulse**: thresholded flash overlays

pub mod defaults;
pub mod dystopia;
pub mod fantasy;
pub mod historical;
pub mod horror;
pub mod romance;
pub mod scifi;
pub mod thriller;
pub mod utopia;

/// Margin (in pixels) outside the surface within which particles may roam
/// before wrapping to the opposite edge. Exact boundary hits respawn rather
/// than clip.
pub(crate) const WRAP_BUFFER: f32 = 24.0;

/// Wrap a coordinate into `[-WRAP_BUFFER, extent + WRAP_BUFFER]`.
#[inline]
pub(crate) fn wrap_coord(v: f32, extent: f32) -> f32 {
    if !v.is_finite() {
        return 0.0;
    }
    if v < -WRAP_BUFFER {
        extent + WRAP_BUFFER
    } else if v >= extent + WRAP_BUFFER {
        -WRAP_BUFFER
    } else {
        v
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use crate::context::{SceneContext, ThemeRgb};
    use crate::quality::FxQuality;

    /// Fixed-step context for determinism tests: frame N at 16ms per frame.
    pub(crate) fn ctx(width: u32, height: u32, frame: u64) -> SceneContext {
        SceneContext {
            width,
            height,
            frame,
            time_seconds: frame as f64 * 0.016,
            delta_ms: 16.0,
            quality: FxQuality::Full,
            colors: ThemeRgb::default_dark(),
            glow_intensity: 0.8,
            particle_speed: 1.0,
            particle_count: 40,
        }
    }

    /// Context with hostile timing values.
    pub(crate) fn degenerate_ctx(width: u32, height: u32) -> SceneContext {
        SceneContext {
            time_seconds: f64::NAN,
            delta_ms: f64::NAN,
            ..ctx(width, height, 0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_coord_holds_bounds() {
        let extent = 100.0;
        for v in [-500.0, -24.0, -24.01, 0.0, 50.0, 123.99, 124.0, 9000.0] {
            let w = wrap_coord(v, extent);
            assert!((-WRAP_BUFFER..=extent + WRAP_BUFFER).contains(&w), "{v} -> {w}");
        }
    }

    #[test]
    fn wrap_coord_flattens_nan() {
        assert_eq!(wrap_coord(f32::NAN, 50.0), 0.0);
    }
}
