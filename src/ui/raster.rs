//! Grayscale raster drawn with half blocks.
//!
//! Every terminal cell shows two vertically stacked pixels: the upper one as
//! the foreground of `▀`, the lower one as the background.

use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

const HALF_BLOCK: &str = "▀";
const MARKER: Color = Color::Rgb(255, 0, 0);

/// A `width x height` grid of gray levels, row-major.
pub struct GrayRaster<'a> {
    pixels: &'a [u8],
    width: usize,
    height: usize,
    cross: bool,
}

impl<'a> GrayRaster<'a> {
    /// # Panics
    /// If `pixels.len() != width * height`.
    pub fn new(pixels: &'a [u8], width: usize, height: usize) -> Self {
        assert_eq!(pixels.len(), width * height, "raster size mismatch");
        Self {
            pixels,
            width,
            height,
            cross: false,
        }
    }

    /// Marks the center row and column in red.
    pub fn center_cross(mut self, cross: bool) -> Self {
        self.cross = cross;
        self
    }

    fn color_at(&self, x: usize, y: usize) -> Color {
        if self.cross && (x == self.width / 2 || y == self.height / 2) {
            return MARKER;
        }
        let level = self.pixels[y * self.width + x];
        Color::Rgb(level, level, level)
    }
}

impl Widget for GrayRaster<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() || self.width == 0 || self.height == 0 {
            return;
        }
        let columns = area.width as usize;
        let rows = area.height as usize * 2;

        for cy in 0..area.height {
            let top = (cy as usize * 2) * self.height / rows;
            let bottom = (cy as usize * 2 + 1) * self.height / rows;
            for cx in 0..area.width {
                let x = cx as usize * self.width / columns;
                if let Some(cell) = buf.cell_mut((area.x + cx, area.y + cy)) {
                    cell.set_symbol(HALF_BLOCK)
                        .set_fg(self.color_at(x, top))
                        .set_bg(self.color_at(x, bottom));
                }
            }
        }
    }
}

/// Largest area inside `area` that shows a square image with half blocks
/// (twice as many columns as rows), centered.
pub fn fit_square(area: Rect) -> Rect {
    let side = area.width.min(area.height.saturating_mul(2)) & !1;
    let height = side / 2;
    Rect {
        x: area.x + (area.width - side) / 2,
        y: area.y + (area.height - height) / 2,
        width: side,
        height,
    }
}

/// Converts a terminal cell inside `area` to image pixel coordinates for an
/// image `width x height` pixels drawn there. The cell's center is used.
///
/// `None` when the cell lies outside `area`.
pub fn cell_to_pixel(area: Rect, column: u16, row: u16, width: usize, height: usize) -> Option<(f64, f64)> {
    if area.is_empty()
        || column < area.x
        || row < area.y
        || column >= area.x + area.width
        || row >= area.y + area.height
    {
        return None;
    }
    let px = (f64::from(column - area.x) + 0.5) * width as f64 / f64::from(area.width);
    let py = (f64::from(row - area.y) + 0.5) * height as f64 / f64::from(area.height);
    Some((px, py))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_to_pixel_maps_center_of_cell() {
        let area = Rect::new(10, 5, 64, 32);
        assert_eq!(cell_to_pixel(area, 10, 5, 256, 256), Some((2.0, 4.0)));
        assert_eq!(cell_to_pixel(area, 42, 21, 256, 256), Some((130.0, 132.0)));
        assert_eq!(cell_to_pixel(area, 9, 5, 256, 256), None);
        assert_eq!(cell_to_pixel(area, 74, 5, 256, 256), None);
        assert_eq!(cell_to_pixel(area, 10, 37, 256, 256), None);
    }

    #[test]
    fn test_fit_square() {
        let square = fit_square(Rect::new(0, 0, 100, 20));
        assert_eq!(square, Rect::new(30, 0, 40, 20));

        let square = fit_square(Rect::new(2, 1, 30, 40));
        assert_eq!(square.width, 30 & !1);
        assert_eq!(square.height, 15);
        assert_eq!(square.y, 1 + (40 - 15) / 2);
    }

    #[test]
    fn test_render_half_blocks() {
        let pixels = [0u8, 50, 100, 150, 200, 250, 10, 20];
        let raster = GrayRaster::new(&pixels, 2, 4);
        let area = Rect::new(0, 0, 2, 2);
        let mut buf = Buffer::empty(area);
        raster.render(area, &mut buf);

        let cell = &buf[(1, 0)];
        assert_eq!(cell.symbol(), HALF_BLOCK);
        assert_eq!(cell.fg, Color::Rgb(50, 50, 50));
        assert_eq!(cell.bg, Color::Rgb(150, 150, 150));
        let cell = &buf[(0, 1)];
        assert_eq!(cell.fg, Color::Rgb(200, 200, 200));
        assert_eq!(cell.bg, Color::Rgb(10, 10, 10));
    }

    #[test]
    fn test_center_cross() {
        let pixels = [0u8; 16];
        let raster = GrayRaster::new(&pixels, 4, 4).center_cross(true);
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        raster.render(area, &mut buf);

        assert_eq!(buf[(2, 0)].fg, MARKER);
        assert_eq!(buf[(0, 1)].fg, MARKER);
        assert_eq!(buf[(0, 0)].fg, Color::Rgb(0, 0, 0));
    }
}
