//! The renderer contract every visual effect implements.

use ambient_render::{PackedRgba, Surface};

use crate::context::SceneContext;

/// A self-contained animated-effect simulation.
///
/// All simulation state lives inside the implementation; the driver is
/// renderer-agnostic after construction. Invariants:
///
/// - `init` seeds simulation state for the given surface size and must be
///   **idempotent**: calling it twice without [`SceneFx::reset`] in between
///   must not double-allocate. Implementations track an internal
///   "already initialized" flag.
/// - `render` advances state by one frame and paints onto `surface`. It must
///   not clear the surface (the driver does that), must tolerate degenerate
///   input (zero dimensions, NaN time) by drawing nothing rather than
///   panicking, and performs no I/O.
/// - `reset` clears the initialized flag so the next `init` reallocates from
///   scratch.
pub trait SceneFx {
    /// Human-readable name (used for debugging / logs).
    fn name(&self) -> &'static str;

    /// Whether `init` has run since construction or the last `reset`.
    fn is_initialized(&self) -> bool;

    /// Allocate and seed simulation state for a surface of the given size.
    fn init(&mut self, width: u32, height: u32, primary: PackedRgba);

    /// Advance one frame and paint.
    fn render(&mut self, ctx: &SceneContext, surface: &mut Surface);

    /// Clear the initialized flag; the next `init` starts from scratch.
    fn reset(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ThemeRgb;
    use crate::quality::FxQuality;

    struct CountingFx {
        ready: bool,
        init_calls: u32,
    }

    impl SceneFx for CountingFx {
        fn name(&self) -> &'static str {
            "counting"
        }
        fn is_initialized(&self) -> bool {
            self.ready
        }
        fn init(&mut self, _width: u32, _height: u32, _primary: PackedRgba) {
            if self.ready {
                return;
            }
            self.init_calls += 1;
            self.ready = true;
        }
        fn render(&mut self, _ctx: &SceneContext, _surface: &mut Surface) {}
        fn reset(&mut self) {
            self.ready = false;
        }
    }

    #[test]
    fn init_reset_cycle() {
        let mut fx = CountingFx {
            ready: false,
            init_calls: 0,
        };
        fx.init(4, 4, PackedRgba::WHITE);
        fx.init(4, 4, PackedRgba::WHITE);
        assert_eq!(fx.init_calls, 1);
        fx.reset();
        assert!(!fx.is_initialized());
        fx.init(4, 4, PackedRgba::WHITE);
        assert_eq!(fx.init_calls, 2);
    }

    #[test]
    fn trait_objects_are_usable() {
        let mut fx: Box<dyn SceneFx> = Box::new(CountingFx {
            ready: false,
            init_calls: 0,
        });
        let mut surface = Surface::new(2, 2);
        let ctx = SceneContext {
            width: 2,
            height: 2,
            frame: 0,
            time_seconds: 0.0,
            delta_ms: 16.0,
            quality: FxQuality::Full,
            colors: ThemeRgb::default_dark(),
            glow_intensity: 1.0,
            particle_speed: 1.0,
            particle_count: 0,
        };
        fx.init(2, 2, PackedRgba::WHITE);
        fx.render(&ctx, &mut surface);
    }
}
