//! Canvas driver: owns the surface, the clock, and the active effect.

use ambient_render::Surface;
use ambient_style::{SubTheme, sub_theme};
use tracing::debug;

use crate::compose::{AmbientLayers, Overlay};
use crate::context::{SceneContext, ThemeRgb};
use crate::quality::FxQuality;
use crate::registry::FxRegistry;

/// Driver lifecycle.
///
/// ```text
/// Uninitialized -> Sizing -> Running -> TearingDown -> Uninitialized
///                     ^         |
///                     +---------+  (resize)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// No surface, no effect.
    Uninitialized,
    /// Surface dimensions are being applied.
    Sizing,
    /// Frames advance on every tick.
    Running,
    /// Teardown requested; the next tick finishes it.
    TearingDown,
}

/// Owns the render surface and drives the active effect stack frame by
/// frame. The host calls [`AmbientCanvas::tick`] once per display frame with
/// the elapsed milliseconds; everything else is state transitions.
///
/// Theme switches that keep the same renderer keep the running simulation;
/// only the palette and tuning knobs change. Resizes also keep simulation
/// state: particles beyond the new extent wrap back in on their own.
pub struct AmbientCanvas {
    registry: FxRegistry,
    layers: AmbientLayers,
    surface: Surface,
    state: DriverState,
    theme: &'static SubTheme,
    renderer_id: String,
    quality: FxQuality,
    reduced_motion: bool,
    frame: u64,
    time_seconds: f64,
}

impl AmbientCanvas {
    /// A driver with the standard effect roster.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(FxRegistry::standard())
    }

    /// A driver backed by a caller-supplied registry.
    #[must_use]
    pub fn with_registry(registry: FxRegistry) -> Self {
        Self {
            registry,
            layers: AmbientLayers::new(),
            surface: Surface::new(0, 0),
            state: DriverState::Uninitialized,
            theme: sub_theme(""),
            renderer_id: String::new(),
            quality: FxQuality::Full,
            reduced_motion: false,
            frame: 0,
            time_seconds: 0.0,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Frames rendered since mount.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// The rendered surface from the most recent tick.
    #[must_use]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Active sub-theme.
    #[must_use]
    pub fn theme(&self) -> &'static SubTheme {
        self.theme
    }

    /// The finishing overlay (wash, vignette, grain) applied after the
    /// effect stack on every tick. Defaults to [`Overlay::NONE`].
    #[must_use]
    pub fn overlay(&self) -> &Overlay {
        &self.layers.overlay
    }

    /// Mutable handle on the finishing overlay. Host configuration, like
    /// quality and reduced motion; theme switches leave it alone.
    pub fn overlay_mut(&mut self) -> &mut Overlay {
        &mut self.layers.overlay
    }

    /// Mount the canvas: size the surface, resolve the theme, and start.
    pub fn mount(&mut self, theme_id: &str, width: u32, height: u32) {
        self.transition(DriverState::Sizing);
        self.surface.resize(width, height);
        self.frame = 0;
        self.time_seconds = 0.0;
        self.apply_theme(theme_id);
        self.transition(DriverState::Running);
    }

    /// Switch sub-themes. If the new theme names the renderer already
    /// running, the simulation carries over and only palette and tuning
    /// change; otherwise the old effect is dropped and the new one starts
    /// fresh.
    pub fn set_theme(&mut self, theme_id: &str) {
        if self.state == DriverState::Uninitialized || self.state == DriverState::TearingDown {
            return;
        }
        self.apply_theme(theme_id);
    }

    fn apply_theme(&mut self, theme_id: &str) {
        let theme = sub_theme(theme_id);
        let renderer = theme.effects.renderer;
        self.theme = theme;

        if renderer != self.renderer_id {
            debug!(from = %self.renderer_id, to = renderer, "switching renderer");
            let primary = ThemeRgb::from_sub_theme(theme).primary;
            self.layers.clear();
            self.layers.push(self.registry.create(renderer));
            self.renderer_id = renderer.to_owned();
            self.layers
                .init_all(self.surface.width(), self.surface.height(), primary);
        }
    }

    /// Resize the surface. Simulation state is kept; pixels are redrawn on
    /// the next tick.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.state == DriverState::Uninitialized {
            return;
        }
        let prev = self.state;
        self.transition(DriverState::Sizing);
        self.surface.resize(width, height);
        self.transition(prev);
    }

    /// Honor an OS-level reduced-motion preference: while set, ticks clear
    /// the surface and draw nothing.
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        if self.reduced_motion != reduced {
            debug!(reduced, "reduced motion changed");
        }
        self.reduced_motion = reduced;
    }

    /// Cap the quality tier (area clamping may lower it further).
    pub fn set_quality(&mut self, quality: FxQuality) {
        self.quality = quality;
    }

    /// Quality after the reduced-motion override and area clamp.
    #[must_use]
    pub fn effective_quality(&self) -> FxQuality {
        if self.reduced_motion {
            return FxQuality::Off;
        }
        self.quality
            .clamp_for_area(self.surface.width() as usize * self.surface.height() as usize)
    }

    /// Advance one frame. Returns the freshly rendered surface.
    ///
    /// A tick in `TearingDown` completes the teardown and returns the
    /// cleared surface; ticks in `Uninitialized` are no-ops.
    pub fn tick(&mut self, delta_ms: f64) -> &Surface {
        match self.state {
            DriverState::Uninitialized => return &self.surface,
            DriverState::TearingDown => {
                self.finish_teardown();
                return &self.surface;
            }
            DriverState::Sizing | DriverState::Running => {}
        }

        let delta = if delta_ms.is_finite() && delta_ms >= 0.0 {
            delta_ms
        } else {
            0.0
        };
        self.time_seconds += delta / 1000.0;
        self.frame += 1;

        self.surface.clear(ambient_render::PackedRgba::TRANSPARENT);

        let quality = self.effective_quality();
        if !quality.is_enabled() {
            return &self.surface;
        }

        let mut ctx = SceneContext {
            width: self.surface.width(),
            height: self.surface.height(),
            frame: self.frame,
            time_seconds: self.time_seconds,
            delta_ms: delta,
            quality,
            colors: ThemeRgb::from_sub_theme(self.theme),
            glow_intensity: 0.0,
            particle_speed: 0.0,
            particle_count: 0,
        };
        ctx.apply_tuning(&self.theme.effects);

        self.layers.render(&ctx, &mut self.surface);
        &self.surface
    }

    /// Request teardown; the next tick (or an immediate call with no host
    /// loop) finalizes it. Idempotent.
    pub fn teardown(&mut self) {
        if self.state == DriverState::Uninitialized {
            return;
        }
        self.transition(DriverState::TearingDown);
    }

    fn finish_teardown(&mut self) {
        self.layers.reset_all();
        self.layers.clear();
        self.renderer_id.clear();
        self.surface.resize(0, 0);
        self.frame = 0;
        self.time_seconds = 0.0;
        self.transition(DriverState::Uninitialized);
    }

    fn transition(&mut self, next: DriverState) {
        if self.state != next {
            debug!(from = ?self.state, to = ?next, "driver state");
        }
        self.state = next;
    }
}

impl Default for AmbientCanvas {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_round_trip() {
        let mut canvas = AmbientCanvas::new();
        assert_eq!(canvas.state(), DriverState::Uninitialized);

        canvas.mount("midnightDesk", 40, 30);
        assert_eq!(canvas.state(), DriverState::Running);
        canvas.tick(16.0);
        assert_eq!(canvas.frame(), 1);

        canvas.teardown();
        assert_eq!(canvas.state(), DriverState::TearingDown);
        canvas.tick(16.0);
        assert_eq!(canvas.state(), DriverState::Uninitialized);
        assert!(canvas.surface().is_empty());
    }

    #[test]
    fn tick_before_mount_is_noop() {
        let mut canvas = AmbientCanvas::new();
        canvas.tick(16.0);
        assert_eq!(canvas.frame(), 0);
        assert_eq!(canvas.state(), DriverState::Uninitialized);
    }

    #[test]
    fn same_renderer_theme_switch_keeps_simulation() {
        let mut canvas = AmbientCanvas::new();
        canvas.mount("midnightDesk", 40, 30);
        for _ in 0..10 {
            canvas.tick(16.0);
        }
        // Re-applying the theme keeps the renderer, so the stack survives.
        canvas.set_theme("midnightDesk");
        assert_eq!(canvas.layers.len(), 1);
        assert!(canvas.layers.iter().all(|fx| fx.is_initialized()));
        assert_eq!(canvas.frame(), 10);
    }

    #[test]
    fn renderer_change_swaps_effect() {
        let mut canvas = AmbientCanvas::new();
        canvas.mount("midnightDesk", 40, 30);
        let before = canvas.layers.iter().next().map(|fx| fx.name()).unwrap();
        canvas.set_theme("hearthside");
        let after = canvas.layers.iter().next().map(|fx| fx.name()).unwrap();
        assert_ne!(before, after);
    }

    #[test]
    fn resize_keeps_simulation_state() {
        let mut canvas = AmbientCanvas::new();
        canvas.mount("midnightDesk", 40, 30);
        canvas.tick(16.0);
        canvas.resize(80, 60);
        assert_eq!(canvas.state(), DriverState::Running);
        assert!(canvas.layers.iter().all(|fx| fx.is_initialized()));
        canvas.tick(16.0);
        assert_eq!(canvas.surface().width(), 80);
        assert_eq!(canvas.frame(), 2);
    }

    #[test]
    fn reduced_motion_stops_painting() {
        let mut canvas = AmbientCanvas::new();
        canvas.mount("midnightDesk", 40, 30);
        canvas.set_reduced_motion(true);
        assert_eq!(canvas.effective_quality(), FxQuality::Off);
        let surface = canvas.tick(16.0);
        assert!(
            surface
                .pixels()
                .iter()
                .all(|p| *p == ambient_render::PackedRgba::TRANSPARENT)
        );
    }

    #[test]
    fn unknown_theme_mounts_fallback() {
        let mut canvas = AmbientCanvas::new();
        canvas.mount("notARealTheme", 20, 20);
        assert_eq!(canvas.state(), DriverState::Running);
        canvas.tick(16.0);
        assert_eq!(canvas.frame(), 1);
    }

    #[test]
    fn nan_delta_does_not_poison_clock() {
        let mut canvas = AmbientCanvas::new();
        canvas.mount("midnightDesk", 20, 20);
        canvas.tick(f64::NAN);
        canvas.tick(16.0);
        assert!(canvas.frame() == 2);
    }

    #[test]
    fn overlay_vignette_darkens_session_corners() {
        let run = |vignette: f32| {
            let mut canvas = AmbientCanvas::new();
            canvas.mount("midnightDesk", 40, 30);
            canvas.overlay_mut().vignette = vignette;
            for _ in 0..4 {
                canvas.tick(16.0);
            }
            canvas.surface().get(0, 0)
        };
        let plain = run(0.0);
        let shaded = run(1.0);
        assert_ne!(shaded, plain);
        assert!(shaded.a() >= plain.a());
    }

    #[test]
    fn overlay_grain_reaches_the_frame() {
        let mut canvas = AmbientCanvas::new();
        canvas.mount("midnightDesk", 24, 24);
        canvas.overlay_mut().grain = 1.0;
        let frame = canvas.tick(16.0);
        // Grain touches (almost) every pixel; the stars alone cover far
        // fewer than half of them.
        let painted = frame
            .pixels()
            .iter()
            .filter(|p| **p != ambient_render::PackedRgba::TRANSPARENT)
            .count();
        assert!(painted > frame.pixels().len() / 2, "painted {painted}");
    }

    #[test]
    fn teardown_is_idempotent() {
        let mut canvas = AmbientCanvas::new();
        canvas.mount("midnightDesk", 20, 20);
        canvas.teardown();
        canvas.teardown();
        canvas.tick(16.0);
        canvas.teardown();
        assert_eq!(canvas.state(), DriverState::Uninitialized);
    }
}
