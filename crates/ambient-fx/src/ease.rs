//! Easing and pulse helpers for the reactive effects.

/// Quadratic ease-out (slow end).
#[inline]
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Sine pulse in `[0, 1]` at `frequency` Hz. NaN time yields 0.
#[inline]
pub fn pulse01(time_seconds: f64, frequency: f64) -> f32 {
    let v = ((time_seconds * frequency * std::f64::consts::TAU).sin() * 0.5 + 0.5) as f32;
    if v.is_finite() { v } else { 0.0 }
}

/// Binary threshold pulse: 1.0 while the sine pulse exceeds `threshold`,
/// else 0.0. The alert effects want a hard flash, not a fade.
#[inline]
pub fn flash01(time_seconds: f64, frequency: f64, threshold: f32) -> f32 {
    if pulse01(time_seconds, frequency) > threshold {
        1.0
    } else {
        0.0
    }
}
