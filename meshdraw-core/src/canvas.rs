/// Pixel canvases that the renderers draw line segments into
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// An opaque RGBA8 colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const OPAQUE_BLACK: Rgba = Rgba([0, 0, 0, 255]);
    pub const GREEN: Rgba = Rgba([0, 255, 0, 255]);
    pub const BLUE: Rgba = Rgba([0, 0, 255, 255]);

    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    pub fn r(&self) -> u8 {
        self.0[0]
    }

    pub fn g(&self) -> u8 {
        self.0[1]
    }

    pub fn b(&self) -> u8 {
        self.0[2]
    }

    pub fn a(&self) -> u8 {
        self.0[3]
    }
}

/// A 2D surface that can draw straight line segments.
///
/// Endpoints are in pixel coordinates with the origin at the top-left
/// corner. Implementations must tolerate endpoints outside the surface,
/// including infinite or NaN ones.
pub trait Canvas {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn draw_line(&mut self, from: Point2<f32>, to: Point2<f32>, colour: Rgba);
}

/// Owned, row-major RGBA8 pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaCanvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RgbaCanvas {
    pub fn new(width: u32, height: u32, background: Rgba) -> Self {
        let pixels = background
            .0
            .repeat(width as usize * height as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn from_size((width, height): (u32, u32), background: Rgba) -> Self {
        Self::new(width, height, background)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let idx = self.index(x, y)?;
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.pixels[idx..idx + 4]);
        Some(Rgba(px))
    }

    /// Set a pixel; coordinates outside the canvas are ignored
    pub fn put_pixel(&mut self, x: u32, y: u32, colour: Rgba) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx..idx + 4].copy_from_slice(&colour.0);
        }
    }

    pub fn fill(&mut self, colour: Rgba) {
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&colour.0);
        }
    }

    /// Raw RGBA bytes, row-major
    pub fn as_raw(&self) -> &[u8] {
        &self.pixels
    }

    /// Number of pixels equal to `colour`
    pub fn count_pixels(&self, colour: Rgba) -> usize {
        self.pixels
            .chunks_exact(4)
            .filter(|px| *px == colour.0.as_slice())
            .count()
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y as usize * self.width as usize + x as usize) * 4)
        } else {
            None
        }
    }
}

impl Canvas for RgbaCanvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    /// Endpoints are rounded to the nearest pixel after clipping, then the
    /// segment is drawn with Bresenham's algorithm, both ends inclusive.
    fn draw_line(&mut self, from: Point2<f32>, to: Point2<f32>, colour: Rgba) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let Some((a, b)) = clip_segment(from, to, self.width, self.height) else {
            log::trace!("segment {:?} -> {:?} lies outside the canvas", from, to);
            return;
        };

        let (mut x0, mut y0) = (a.0.round() as i64, a.1.round() as i64);
        let (x1, y1) = (b.0.round() as i64, b.1.round() as i64);

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            if x0 >= 0 && y0 >= 0 {
                self.put_pixel(x0 as u32, y0 as u32, colour);
            }

            if x0 == x1 && y0 == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }
}

/// Liang-Barsky clip of a segment against the pixel rectangle
/// `[-0.5, width - 0.5] x [-0.5, height - 0.5]`, so that rounding a clipped
/// endpoint always lands on a pixel. Works in f64 to keep far-away
/// endpoints from collapsing.
fn clip_segment(
    from: Point2<f32>,
    to: Point2<f32>,
    width: u32,
    height: u32,
) -> Option<((f64, f64), (f64, f64))> {
    let (x0, y0) = (from.x as f64, from.y as f64);
    let (x1, y1) = (to.x as f64, to.y as f64);
    if ![x0, y0, x1, y1].iter().all(|c| c.is_finite()) {
        return None;
    }

    let (xmin, ymin) = (-0.5, -0.5);
    let (xmax, ymax) = (width as f64 - 0.5, height as f64 - 0.5);
    let (dx, dy) = (x1 - x0, y1 - y0);

    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;
    for (p, q) in [
        (-dx, x0 - xmin),
        (dx, xmax - x0),
        (-dy, y0 - ymin),
        (dy, ymax - y0),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    // Clamp to pixel centres so rounding stays on the canvas.
    let clamp = |x: f64, y: f64| (x.clamp(0.0, xmax - 0.5), y.clamp(0.0, ymax - 0.5));
    Some((
        clamp(x0 + t0 * dx, y0 + t0 * dy),
        clamp(x0 + t1 * dx, y0 + t1 * dy),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = Rgba([255, 0, 0, 255]);

    #[test]
    fn test_new_canvas_is_filled() {
        let canvas = RgbaCanvas::new(4, 3, Rgba::OPAQUE_BLACK);
        assert_eq!(canvas.width(), 4);
        assert_eq!(canvas.height(), 3);
        assert_eq!(canvas.as_raw().len(), 4 * 3 * 4);
        assert_eq!(canvas.count_pixels(Rgba::OPAQUE_BLACK), 12);
    }

    #[test]
    fn test_put_pixel_out_of_bounds_is_ignored() {
        let mut canvas = RgbaCanvas::new(2, 2, Rgba::OPAQUE_BLACK);
        canvas.put_pixel(5, 0, RED);
        canvas.put_pixel(1, 1, RED);
        assert_eq!(canvas.pixel(1, 1), Some(RED));
        assert_eq!(canvas.pixel(5, 0), None);
        assert_eq!(canvas.count_pixels(RED), 1);
    }

    #[test]
    fn test_horizontal_line_is_inclusive() {
        let mut canvas = RgbaCanvas::new(10, 10, Rgba::OPAQUE_BLACK);
        canvas.draw_line(Point2::new(2.0, 5.0), Point2::new(6.0, 5.0), RED);
        assert_eq!(canvas.count_pixels(RED), 5);
        for x in 2..=6 {
            assert_eq!(canvas.pixel(x, 5), Some(RED));
        }
    }

    #[test]
    fn test_diagonal_line() {
        let mut canvas = RgbaCanvas::new(8, 8, Rgba::OPAQUE_BLACK);
        canvas.draw_line(Point2::new(0.0, 0.0), Point2::new(7.0, 7.0), RED);
        for i in 0..8 {
            assert_eq!(canvas.pixel(i, i), Some(RED));
        }
        assert_eq!(canvas.count_pixels(RED), 8);
    }

    #[test]
    fn test_line_is_clipped_to_canvas() {
        let mut canvas = RgbaCanvas::new(10, 10, Rgba::OPAQUE_BLACK);
        canvas.draw_line(Point2::new(-100.0, 3.0), Point2::new(1e9, 3.0), RED);
        assert_eq!(canvas.count_pixels(RED), 10);
    }

    #[test]
    fn test_line_outside_canvas_draws_nothing() {
        let mut canvas = RgbaCanvas::new(10, 10, Rgba::OPAQUE_BLACK);
        canvas.draw_line(Point2::new(-5.0, -5.0), Point2::new(-1.0, 20.0), RED);
        canvas.draw_line(Point2::new(20.0, 0.0), Point2::new(30.0, 9.0), RED);
        assert_eq!(canvas.count_pixels(RED), 0);
    }

    #[test]
    fn test_non_finite_endpoints_draw_nothing() {
        let mut canvas = RgbaCanvas::new(10, 10, Rgba::OPAQUE_BLACK);
        canvas.draw_line(Point2::new(f32::NAN, 0.0), Point2::new(5.0, 5.0), RED);
        canvas.draw_line(Point2::new(0.0, 0.0), Point2::new(f32::INFINITY, 5.0), RED);
        assert_eq!(canvas.count_pixels(RED), 0);
    }

    #[test]
    fn test_endpoint_on_far_edge_stays_in_bounds() {
        let mut canvas = RgbaCanvas::new(10, 10, Rgba::OPAQUE_BLACK);
        canvas.draw_line(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0), RED);
        assert_eq!(canvas.pixel(9, 0), Some(RED));
        assert_eq!(canvas.count_pixels(RED), 10);
    }

    #[test]
    fn test_fill() {
        let mut canvas = RgbaCanvas::new(3, 3, Rgba::OPAQUE_BLACK);
        canvas.fill(Rgba::BLUE);
        assert_eq!(canvas.count_pixels(Rgba::BLUE), 9);
    }
}
