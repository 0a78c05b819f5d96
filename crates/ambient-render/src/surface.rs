//! Software drawing surface.
//!
//! Row-major pixel buffer with bounds-safe primitives. All drawing clips at
//! the edges: out-of-bounds writes are dropped, never panic. A zero-sized
//! surface accepts every call and draws nothing.

use crate::pixel::{BlendMode, PackedRgba};

/// Row-major pixel buffer: `pixels[y * width + x]`.
#[derive(Debug, Clone)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<PackedRgba>,
}

impl Surface {
    /// Create a surface filled with transparent pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![PackedRgba::TRANSPARENT; (width as usize) * (height as usize)],
        }
    }

    /// Surface width in pixels.
    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Surface height in pixels.
    #[inline]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// True if either dimension is zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Read-only pixel slice.
    #[inline]
    pub fn pixels(&self) -> &[PackedRgba] {
        &self.pixels
    }

    /// Resize the backing buffer. Contents are cleared to transparent, the
    /// same way a canvas resize clears the drawing surface.
    pub fn resize(&mut self, width: u32, height: u32) {
        let len = (width as usize) * (height as usize);
        self.pixels.clear();
        self.pixels.resize(len, PackedRgba::TRANSPARENT);
        self.width = width;
        self.height = height;
    }

    /// Fill the whole surface with one color.
    pub fn clear(&mut self, color: PackedRgba) {
        self.pixels.fill(color);
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Read a pixel; out-of-bounds reads return transparent.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> PackedRgba {
        self.index(x, y)
            .map_or(PackedRgba::TRANSPARENT, |i| self.pixels[i])
    }

    /// Write a pixel without blending. Out-of-bounds writes are dropped.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, color: PackedRgba) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Alpha-over blend a pixel onto the surface.
    #[inline]
    pub fn blend(&mut self, x: i32, y: i32, color: PackedRgba) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color.over(self.pixels[i]);
        }
    }

    /// Additively blend a pixel onto the surface.
    #[inline]
    pub fn add(&mut self, x: i32, y: i32, color: PackedRgba) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color.add_to(self.pixels[i]);
        }
    }

    /// Blend a pixel with an explicit mode.
    #[inline]
    pub fn blend_mode(&mut self, x: i32, y: i32, color: PackedRgba, mode: BlendMode) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = mode.blend(color, self.pixels[i]);
        }
    }

    /// Alpha-over blend a filled rectangle. Clips at the edges.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: PackedRgba) {
        if self.is_empty() || color.a() == 0 {
            return;
        }
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x.saturating_add(w as i32)).min(self.width as i32);
        let y1 = (y.saturating_add(h as i32)).min(self.height as i32);
        for py in y0..y1 {
            let row = py as usize * self.width as usize;
            for px in x0..x1 {
                let i = row + px as usize;
                self.pixels[i] = color.over(self.pixels[i]);
            }
        }
    }

    /// Vertical line from `y_top` to `y_bottom` inclusive, alpha-over.
    pub fn vline(&mut self, x: i32, y_top: i32, y_bottom: i32, color: PackedRgba) {
        if x < 0 || x >= self.width as i32 || y_bottom < y_top {
            return;
        }
        let y0 = y_top.max(0);
        let y1 = y_bottom.min(self.height as i32 - 1);
        for y in y0..=y1 {
            let i = y as usize * self.width as usize + x as usize;
            self.pixels[i] = color.over(self.pixels[i]);
        }
    }

    /// Horizontal line from `x_left` to `x_right` inclusive, alpha-over.
    pub fn hline(&mut self, y: i32, x_left: i32, x_right: i32, color: PackedRgba) {
        if y < 0 || y >= self.height as i32 || x_right < x_left {
            return;
        }
        let x0 = x_left.max(0);
        let x1 = x_right.min(self.width as i32 - 1);
        let row = y as usize * self.width as usize;
        for x in x0..=x1 {
            let i = row + x as usize;
            self.pixels[i] = color.over(self.pixels[i]);
        }
    }

    /// Blend a line between two points (DDA). Endpoints may lie off-surface.
    pub fn line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: PackedRgba) {
        if self.is_empty() || !x0.is_finite() || !y0.is_finite() || !x1.is_finite() || !y1.is_finite()
        {
            return;
        }
        let dx = x1 - x0;
        let dy = y1 - y0;
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0);
        // Bound the walk so degenerate inputs can't spin.
        let steps = steps.min(4096.0) as i32;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = (x0 + dx * t).round() as i32;
            let y = (y0 + dy * t).round() as i32;
            self.blend(x, y, color);
        }
    }

    /// Alpha-over blend a filled circle.
    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: PackedRgba) {
        if self.is_empty() || !cx.is_finite() || !cy.is_finite() || !(radius > 0.0) {
            return;
        }
        let r2 = radius * radius;
        let x0 = (cx - radius).floor() as i32;
        let x1 = (cx + radius).ceil() as i32;
        let y0 = (cy - radius).floor() as i32;
        let y1 = (cy + radius).ceil() as i32;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.blend(x, y, color);
                }
            }
        }
    }

    /// Additively blend a radial-gradient glow: full intensity at the center
    /// falling off quadratically to zero at `radius`. This is the workhorse
    /// for particle glows (gradient dot plus solid core reads as a mote).
    pub fn glow_dot(&mut self, cx: f32, cy: f32, radius: f32, color: PackedRgba, intensity: f32) {
        if self.is_empty() || !cx.is_finite() || !cy.is_finite() || !(radius > 0.0) {
            return;
        }
        let intensity = intensity.clamp(0.0, 1.0);
        if intensity <= 0.0 {
            return;
        }
        let x0 = (cx - radius).floor() as i32;
        let x1 = (cx + radius).ceil() as i32;
        let y0 = (cy - radius).floor() as i32;
        let y1 = (cy + radius).ceil() as i32;
        let inv_r = 1.0 / radius;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                let d = (dx * dx + dy * dy).sqrt() * inv_r;
                if d >= 1.0 {
                    continue;
                }
                let falloff = (1.0 - d) * (1.0 - d);
                self.add(x, y, color.with_opacity(falloff * intensity));
            }
        }
    }

    /// Alpha-over blend a vertical gradient across the full surface.
    pub fn vertical_gradient(&mut self, top: PackedRgba, bottom: PackedRgba) {
        if self.is_empty() {
            return;
        }
        let h = self.height;
        for y in 0..h {
            let t = if h <= 1 {
                1.0
            } else {
                y as f32 / (h - 1) as f32
            };
            let color = top.lerp(bottom, t);
            self.hline(y as i32, 0, self.width as i32 - 1, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_surface_is_transparent() {
        let s = Surface::new(4, 3);
        assert!(s.pixels().iter().all(|p| *p == PackedRgba::TRANSPARENT));
    }

    #[test]
    fn out_of_bounds_is_safe() {
        let mut s = Surface::new(4, 4);
        s.set(-1, 0, PackedRgba::WHITE);
        s.set(0, -1, PackedRgba::WHITE);
        s.set(4, 0, PackedRgba::WHITE);
        s.set(0, 4, PackedRgba::WHITE);
        s.blend(100, 100, PackedRgba::WHITE);
        s.add(-100, -100, PackedRgba::WHITE);
        assert!(s.pixels().iter().all(|p| *p == PackedRgba::TRANSPARENT));
    }

    #[test]
    fn zero_sized_surface_accepts_everything() {
        let mut s = Surface::new(0, 0);
        s.clear(PackedRgba::BLACK);
        s.fill_rect(0, 0, 10, 10, PackedRgba::WHITE);
        s.line(0.0, 0.0, 50.0, 50.0, PackedRgba::WHITE);
        s.fill_circle(2.0, 2.0, 5.0, PackedRgba::WHITE);
        s.glow_dot(2.0, 2.0, 5.0, PackedRgba::WHITE, 1.0);
        s.vertical_gradient(PackedRgba::BLACK, PackedRgba::WHITE);
        assert!(s.is_empty());
    }

    #[test]
    fn resize_clears_contents() {
        let mut s = Surface::new(2, 2);
        s.clear(PackedRgba::WHITE);
        s.resize(3, 3);
        assert_eq!(s.width(), 3);
        assert_eq!(s.height(), 3);
        assert!(s.pixels().iter().all(|p| *p == PackedRgba::TRANSPARENT));
    }

    #[test]
    fn fill_rect_clips() {
        let mut s = Surface::new(4, 4);
        s.fill_rect(-2, -2, 4, 4, PackedRgba::WHITE);
        assert_eq!(s.get(0, 0), PackedRgba::WHITE);
        assert_eq!(s.get(1, 1), PackedRgba::WHITE);
        assert_eq!(s.get(2, 2), PackedRgba::TRANSPARENT);
    }

    #[test]
    fn glow_dot_brightest_at_center() {
        let mut s = Surface::new(9, 9);
        s.clear(PackedRgba::BLACK);
        s.glow_dot(4.5, 4.5, 4.0, PackedRgba::rgb(255, 255, 255), 1.0);
        let center = s.get(4, 4);
        let edge = s.get(1, 4);
        assert!(center.r() > edge.r());
    }

    #[test]
    fn glow_dot_nan_center_draws_nothing() {
        let mut s = Surface::new(4, 4);
        s.glow_dot(f32::NAN, 2.0, 3.0, PackedRgba::WHITE, 1.0);
        assert!(s.pixels().iter().all(|p| *p == PackedRgba::TRANSPARENT));
    }

    #[test]
    fn line_nan_endpoint_draws_nothing() {
        let mut s = Surface::new(4, 4);
        s.line(f32::NAN, 0.0, 3.0, 3.0, PackedRgba::WHITE);
        assert!(s.pixels().iter().all(|p| *p == PackedRgba::TRANSPARENT));
    }

    #[test]
    fn vline_inverted_range_draws_nothing() {
        let mut s = Surface::new(4, 4);
        s.vline(1, 3, 0, PackedRgba::WHITE);
        assert!(s.pixels().iter().all(|p| *p == PackedRgba::TRANSPARENT));
    }

    #[test]
    fn vertical_gradient_endpoints() {
        let mut s = Surface::new(2, 4);
        s.vertical_gradient(PackedRgba::rgb(0, 0, 0), PackedRgba::rgb(255, 255, 255));
        assert_eq!(s.get(0, 0), PackedRgba::rgb(0, 0, 0));
        assert_eq!(s.get(0, 3), PackedRgba::rgb(255, 255, 255));
    }
}
