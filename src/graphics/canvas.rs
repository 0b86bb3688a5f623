//! RGB pixel canvas with clipped fills and alpha blending.

use image::{Rgb, RgbImage};

use crate::request::{Color, Rect};

/// Drawing surface backed by an [`RgbImage`].
///
/// All drawing calls clip to the canvas; coordinates outside it are ignored.
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    /// A black canvas of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self { image: RgbImage::new(width, height) }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgb<u8> {
        *self.image.get_pixel(x, y)
    }

    pub fn fill(&mut self, color: Color) {
        let px = color.to_rgb();
        for p in self.image.pixels_mut() {
            *p = px;
        }
    }

    /// Fill row `y` edge to edge.
    pub fn fill_row(&mut self, y: u32, color: Color) {
        if y >= self.height() {
            return;
        }
        let px = color.to_rgb();
        for x in 0..self.width() {
            self.image.put_pixel(x, y, px);
        }
    }

    /// Fill an inclusive rectangle, blending with weight `alpha / 255`.
    pub fn fill_rect(&mut self, rect: Rect, color: Color, alpha: u8) {
        let Some((x0, y0, x1, y1)) = self.clip(rect) else {
            return;
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                self.blend_pixel(x, y, color, alpha);
            }
        }
    }

    /// Blend `color` over every pixel.
    pub fn composite(&mut self, color: Color, alpha: u8) {
        for p in self.image.pixels_mut() {
            *p = blend(*p, color, alpha);
        }
    }

    /// Blend one pixel given signed coordinates; out-of-bounds is a no-op.
    pub fn blend_at(&mut self, x: i32, y: i32, color: Color, alpha: u8) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x < self.width() && y < self.height() {
            self.blend_pixel(x, y, color, alpha);
        }
    }

    fn blend_pixel(&mut self, x: u32, y: u32, color: Color, alpha: u8) {
        let dst = self.image.get_pixel_mut(x, y);
        *dst = blend(*dst, color, alpha);
    }

    fn clip(&self, rect: Rect) -> Option<(u32, u32, u32, u32)> {
        let max_x = self.width() as i32 - 1;
        let max_y = self.height() as i32 - 1;
        let x0 = rect.x0.max(0);
        let y0 = rect.y0.max(0);
        let x1 = rect.x1.min(max_x);
        let y1 = rect.y1.min(max_y);
        if x0 > x1 || y0 > y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }
}

/// Integer source-over blend, rounded to nearest.
pub fn blend(dst: Rgb<u8>, src: Color, alpha: u8) -> Rgb<u8> {
    let a = alpha as u32;
    let mut out = dst;
    for (o, s) in out.0.iter_mut().zip(src.0) {
        *o = ((s as u32 * a + *o as u32 * (255 - a) + 127) / 255) as u8;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_extremes() {
        let dst = Rgb([10, 20, 30]);
        assert_eq!(blend(dst, Color::WHITE, 0), dst);
        assert_eq!(blend(dst, Color::WHITE, 255), Rgb([255, 255, 255]));
    }

    #[test]
    fn blend_overlay_darkens() {
        // Alpha 100 black over pure red.
        assert_eq!(blend(Rgb([255, 0, 0]), Color::BLACK, 100), Rgb([155, 0, 0]));
    }

    #[test]
    fn fill_rect_is_inclusive_and_clipped() {
        let mut canvas = Canvas::new(10, 10);
        canvas.fill_rect(Rect::new(-5, 8, 2, 20), Color::WHITE, 255);
        assert_eq!(canvas.pixel(0, 8), Rgb([255, 255, 255]));
        assert_eq!(canvas.pixel(2, 9), Rgb([255, 255, 255]));
        assert_eq!(canvas.pixel(3, 9), Rgb([0, 0, 0]));
        assert_eq!(canvas.pixel(2, 7), Rgb([0, 0, 0]));
    }

    #[test]
    fn fill_rect_outside_canvas_is_noop() {
        let mut canvas = Canvas::new(4, 4);
        canvas.fill_rect(Rect::new(10, 10, 20, 20), Color::WHITE, 255);
        canvas.blend_at(-1, 2, Color::WHITE, 255);
        assert!(canvas.into_image().pixels().all(|p| *p == Rgb([0, 0, 0])));
    }

    #[test]
    fn fill_row_covers_whole_width() {
        let mut canvas = Canvas::new(5, 3);
        canvas.fill_row(1, Color::rgb(1, 2, 3));
        for x in 0..5 {
            assert_eq!(canvas.pixel(x, 1), Rgb([1, 2, 3]));
            assert_eq!(canvas.pixel(x, 0), Rgb([0, 0, 0]));
        }
    }
}
