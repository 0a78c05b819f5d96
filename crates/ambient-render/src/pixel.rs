//! Packed RGBA color and blending.

/// Packed 32-bit RGBA color: `0xRRGGBBAA`.
///
/// Notes
/// -----
/// This is **straight alpha** storage (RGB channels are not pre-multiplied).
/// Compositing uses Porter-Duff **SourceOver** (`src over dst`); additive and
/// screen blends are provided for glow-heavy effects that composite light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(transparent)]
pub struct PackedRgba(pub u32);

impl PackedRgba {
    /// Fully transparent (alpha = 0).
    pub const TRANSPARENT: Self = Self(0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create an opaque RGB color (alpha = 255).
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Create an RGBA color with explicit alpha.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32))
    }

    /// Red channel.
    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Green channel.
    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Blue channel.
    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Alpha channel.
    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    #[inline]
    const fn div_round_u8(numer: u64, denom: u64) -> u8 {
        debug_assert!(denom != 0);
        let v = (numer + (denom / 2)) / denom;
        if v > 255 { 255 } else { v as u8 }
    }

    /// Porter-Duff SourceOver: `src over dst`.
    ///
    /// Stored as straight alpha, so we compute the exact rational form and
    /// round at the end (avoids accumulating rounding error across
    /// intermediate steps).
    #[inline]
    pub fn over(self, dst: Self) -> Self {
        let s_a = self.a() as u64;
        if s_a == 255 {
            return self;
        }
        if s_a == 0 {
            return dst;
        }

        let d_a = dst.a() as u64;
        let inv_s_a = 255 - s_a;

        // numer_a = 255*s_a + d_a*(255 - s_a), in the 255^2 domain.
        let numer_a = 255 * s_a + d_a * inv_s_a;
        if numer_a == 0 {
            return Self::TRANSPARENT;
        }

        let out_a = Self::div_round_u8(numer_a, 255);

        let r = Self::div_round_u8(
            (self.r() as u64) * s_a * 255 + (dst.r() as u64) * d_a * inv_s_a,
            numer_a,
        );
        let g = Self::div_round_u8(
            (self.g() as u64) * s_a * 255 + (dst.g() as u64) * d_a * inv_s_a,
            numer_a,
        );
        let b = Self::div_round_u8(
            (self.b() as u64) * s_a * 255 + (dst.b() as u64) * d_a * inv_s_a,
            numer_a,
        );

        Self::rgba(r, g, b, out_a)
    }

    /// Additive blend: channels of `self` (scaled by its alpha) are added to
    /// `dst` with saturation. Result alpha is the max of both.
    #[inline]
    pub fn add_to(self, dst: Self) -> Self {
        let ta = self.a() as u32;
        if ta == 0 {
            return dst;
        }
        let r = (dst.r() as u32 + self.r() as u32 * ta / 255).min(255) as u8;
        let g = (dst.g() as u32 + self.g() as u32 * ta / 255).min(255) as u8;
        let b = (dst.b() as u32 + self.b() as u32 * ta / 255).min(255) as u8;
        Self::rgba(r, g, b, dst.a().max(self.a()))
    }

    /// Screen blend: inverse multiply, lightens without clipping as hard as
    /// additive. Lerped toward `dst` by source alpha.
    #[inline]
    pub fn screen_onto(self, dst: Self) -> Self {
        let ta = self.a() as f32 / 255.0;
        if ta <= 0.0 {
            return dst;
        }
        let sr = 255 - ((255 - self.r()) as u16 * (255 - dst.r()) as u16 / 255) as u8;
        let sg = 255 - ((255 - self.g()) as u16 * (255 - dst.g()) as u16 / 255) as u8;
        let sb = 255 - ((255 - self.b()) as u16 * (255 - dst.b()) as u16 / 255) as u8;
        let r = (dst.r() as f32 * (1.0 - ta) + sr as f32 * ta) as u8;
        let g = (dst.g() as f32 * (1.0 - ta) + sg as f32 * ta) as u8;
        let b = (dst.b() as f32 * (1.0 - ta) + sb as f32 * ta) as u8;
        Self::rgba(r, g, b, dst.a().max(self.a()))
    }

    /// Apply uniform opacity in `[0.0, 1.0]` by scaling alpha.
    #[inline]
    pub fn with_opacity(self, opacity: f32) -> Self {
        let opacity = opacity.clamp(0.0, 1.0);
        let a = ((self.a() as f32) * opacity).round().clamp(0.0, 255.0) as u8;
        Self::rgba(self.r(), self.g(), self.b(), a)
    }

    /// Linear interpolation between two colors (all four channels).
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let ch = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self::rgba(
            ch(self.r(), other.r()),
            ch(self.g(), other.g()),
            ch(self.b(), other.b()),
            ch(self.a(), other.a()),
        )
    }
}

/// Blend mode used by the drawing primitives and the compositor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    /// Standard alpha-over blending (paint on top).
    #[default]
    Over,
    /// Additive blending (composite light).
    Additive,
    /// Screen blending (inverse multiply for lightening).
    Screen,
}

impl BlendMode {
    /// Blend `top` onto `bottom` using this mode.
    #[inline]
    pub fn blend(self, top: PackedRgba, bottom: PackedRgba) -> PackedRgba {
        match self {
            Self::Over => top.over(bottom),
            Self::Additive => top.add_to(bottom),
            Self::Screen => top.screen_onto(bottom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn over_opaque_src_wins() {
        let src = PackedRgba::rgb(10, 20, 30);
        let dst = PackedRgba::rgb(200, 200, 200);
        assert_eq!(src.over(dst), src);
    }

    #[test]
    fn over_transparent_src_is_noop() {
        let dst = PackedRgba::rgb(200, 100, 50);
        assert_eq!(PackedRgba::TRANSPARENT.over(dst), dst);
    }

    #[test]
    fn over_half_alpha_mixes() {
        let src = PackedRgba::rgba(255, 0, 0, 128);
        let dst = PackedRgba::rgb(0, 0, 0);
        let out = src.over(dst);
        assert!(out.r() > 120 && out.r() < 136);
        assert_eq!(out.a(), 255);
    }

    #[test]
    fn additive_saturates() {
        let a = PackedRgba::rgb(200, 200, 200);
        let b = PackedRgba::rgb(200, 200, 200);
        let out = a.add_to(b);
        assert_eq!((out.r(), out.g(), out.b()), (255, 255, 255));
    }

    #[test]
    fn additive_respects_alpha() {
        let glow = PackedRgba::rgba(100, 100, 100, 0);
        let dst = PackedRgba::rgb(10, 10, 10);
        assert_eq!(glow.add_to(dst), dst);
    }

    #[test]
    fn with_opacity_scales_alpha_only() {
        let c = PackedRgba::rgba(1, 2, 3, 200);
        let out = c.with_opacity(0.5);
        assert_eq!((out.r(), out.g(), out.b()), (1, 2, 3));
        assert_eq!(out.a(), 100);
    }

    #[test]
    fn with_opacity_clamps_out_of_range() {
        let c = PackedRgba::rgb(9, 9, 9);
        assert_eq!(c.with_opacity(-3.0).a(), 0);
        assert_eq!(c.with_opacity(7.5).a(), 255);
    }

    #[test]
    fn lerp_endpoints() {
        let a = PackedRgba::rgb(0, 0, 0);
        let b = PackedRgba::rgb(255, 255, 255);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn screen_lightens() {
        let top = PackedRgba::rgb(128, 128, 128);
        let bottom = PackedRgba::rgb(128, 128, 128);
        let out = top.screen_onto(bottom);
        assert!(out.r() > 128);
    }
}
