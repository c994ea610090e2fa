/// Presents an RGBA canvas in the terminal using half-block characters
use crossterm::{
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use meshdraw_core::{Canvas, Rgba, RgbaCanvas};
use std::io::Write;

/// Upper half block: foreground paints the top pixel, background the bottom one
const HALF_BLOCK: char = '\u{2580}';

/// Terminal surface backed by a canvas with two pixel rows per text row
pub struct TerminalCanvas {
    columns: u16,
    rows: u16,
    canvas: RgbaCanvas,
    background: Rgba,
}

impl TerminalCanvas {
    pub fn new(columns: u16, rows: u16, background: Rgba) -> Self {
        Self {
            columns,
            rows,
            canvas: RgbaCanvas::new(columns as u32, rows as u32 * 2, background),
            background,
        }
    }

    pub fn clear(&mut self) {
        self.canvas.fill(self.background);
    }

    pub fn canvas(&self) -> &RgbaCanvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut RgbaCanvas {
        &mut self.canvas
    }

    /// Move the backing canvas out, leaving an empty one until [`set_canvas`](Self::set_canvas)
    pub fn take_canvas(&mut self) -> RgbaCanvas {
        std::mem::replace(&mut self.canvas, RgbaCanvas::new(0, 0, self.background))
    }

    /// Replace the backing canvas, e.g. with one returned by `draw_texcoords`
    pub fn set_canvas(&mut self, canvas: RgbaCanvas) {
        self.columns = canvas.width().min(u16::MAX as u32) as u16;
        self.rows = (canvas.height() / 2).min(u16::MAX as u32) as u16;
        self.canvas = canvas;
    }

    pub fn size(&self) -> (u16, u16) {
        (self.columns, self.rows)
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for row in 0..self.rows as u32 {
            for x in 0..self.columns as u32 {
                let top = self.canvas.pixel(x, row * 2).unwrap_or(self.background);
                let bottom = self.canvas.pixel(x, row * 2 + 1).unwrap_or(self.background);

                writer.queue(SetForegroundColor(to_color(top)))?;
                writer.queue(SetBackgroundColor(to_color(bottom)))?;
                writer.queue(Print(HALF_BLOCK))?;
            }
            writer.queue(ResetColor)?;
            writer.queue(Print("\r\n"))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

fn to_color(colour: Rgba) -> Color {
    Color::Rgb {
        r: colour.r(),
        g: colour.g(),
        b: colour.b(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;

    #[test]
    fn test_two_pixel_rows_per_text_row() {
        let surface = TerminalCanvas::new(10, 4, Rgba::OPAQUE_BLACK);
        assert_eq!(surface.canvas().width(), 10);
        assert_eq!(surface.canvas().height(), 8);
        assert_eq!(surface.size(), (10, 4));
    }

    #[test]
    fn test_clear_restores_background() {
        let mut surface = TerminalCanvas::new(4, 2, Rgba::OPAQUE_BLACK);
        surface
            .canvas_mut()
            .draw_line(Point2::new(0.0, 0.0), Point2::new(3.0, 3.0), Rgba::GREEN);
        assert!(surface.canvas().count_pixels(Rgba::GREEN) > 0);
        surface.clear();
        assert_eq!(surface.canvas().count_pixels(Rgba::GREEN), 0);
    }

    #[test]
    fn test_draw_writes_one_cell_per_column() {
        let surface = TerminalCanvas::new(3, 2, Rgba::OPAQUE_BLACK);
        let mut out = Vec::new();
        surface.draw(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches(HALF_BLOCK).count(), 6);
        assert_eq!(text.matches("\r\n").count(), 2);
    }

    #[test]
    fn test_take_canvas_moves_pixels_out() {
        let mut surface = TerminalCanvas::new(4, 2, Rgba::BLUE);
        let canvas = surface.take_canvas();
        assert_eq!(canvas.count_pixels(Rgba::BLUE), 16);
        assert_eq!(surface.canvas().as_raw().len(), 0);
        surface.set_canvas(canvas);
        assert_eq!(surface.size(), (4, 2));
    }

    #[test]
    fn test_set_canvas_resizes() {
        let mut surface = TerminalCanvas::new(3, 2, Rgba::OPAQUE_BLACK);
        surface.set_canvas(RgbaCanvas::new(8, 6, Rgba::BLUE));
        assert_eq!(surface.size(), (8, 3));
    }
}
