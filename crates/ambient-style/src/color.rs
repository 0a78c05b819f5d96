//! HSL triplet parsing and conversion.
//!
//! The palette format is a string of three space-separated numbers: hue in
//! degrees, saturation and lightness in percent (`"38 85% 55%"`). The parser
//! is deliberately lenient: missing or unparsable components default to 0
//! and nothing here ever errors. A bad color renders as black, not a crash.

use ambient_render::PackedRgba;

/// A semantic color as hue (degrees), saturation and lightness (percent).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HslTriplet {
    /// Hue in degrees, nominally 0–360.
    pub h: f32,
    /// Saturation in percent, nominally 0–100.
    pub s: f32,
    /// Lightness in percent, nominally 0–100.
    pub l: f32,
}

impl HslTriplet {
    /// Create a triplet from raw components.
    #[must_use]
    pub const fn new(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l }
    }

    /// Convert to an additive RGB triplet ready for compositing.
    #[must_use]
    pub fn to_rgb(self) -> PackedRgba {
        let (r, g, b) = hsl_to_rgb(self.h, self.s, self.l);
        PackedRgba::rgb(r, g, b)
    }
}

/// Parse one numeric component, stripping `%` and `deg` suffixes.
fn parse_component(part: Option<&str>) -> f32 {
    part.map(|p| p.trim_end_matches('%').trim_end_matches("deg"))
        .and_then(|p| p.parse::<f32>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Parse a themed color string into an [`HslTriplet`].
///
/// `"38 85% 55%"` yields `{h: 38, s: 85, l: 55}`. Missing or malformed
/// components default to 0; this function never fails.
#[must_use]
pub fn parse_triplet(s: &str) -> HslTriplet {
    let mut parts = s.split_whitespace();
    HslTriplet {
        h: parse_component(parts.next()),
        s: parse_component(parts.next()),
        l: parse_component(parts.next()),
    }
}

/// Convert HSL (degrees, percent, percent) to RGB integers in `[0, 255]`.
///
/// Uses the canonical `a = s · min(l, 1 − l)` formulation so the output is
/// bit-for-bit reproducible. Effects composite additively over many
/// translucent layers, so small conversion deviations compound visibly.
#[must_use]
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (u8, u8, u8) {
    if !h.is_finite() || !s.is_finite() || !l.is_finite() {
        return (0, 0, 0);
    }
    let s = (s / 100.0).clamp(0.0, 1.0);
    let l = (l / 100.0).clamp(0.0, 1.0);
    let a = s * l.min(1.0 - l);

    let f = |n: f32| -> u8 {
        let k = (n + h / 30.0).rem_euclid(12.0);
        let v = l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0);
        (v * 255.0).round().clamp(0.0, 255.0) as u8
    };

    (f(0.0), f(8.0), f(4.0))
}
