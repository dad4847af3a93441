//! Draw an RGBA image with half-block cells.
//!
//! Each cell shows two vertically stacked pixels. Pixels with low alpha are
//! not drawn, so whatever is underneath shows through.

use image::RgbaImage;
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

const ALPHA_CUTOFF: u8 = 128;

/// Largest centered rect inside `area` that keeps the image's aspect ratio
pub fn fit_rect(image_size: (u32, u32), area: Rect) -> Rect {
    let (w, h) = image_size;
    if w == 0 || h == 0 || area.width == 0 || area.height == 0 {
        return Rect::new(area.x, area.y, 0, 0);
    }
    // A cell is one pixel wide and two pixels tall
    let scale = (f64::from(area.width) / f64::from(w))
        .min(f64::from(area.height) * 2.0 / f64::from(h));
    let width = ((f64::from(w) * scale).floor() as u16).clamp(1, area.width);
    let height = ((f64::from(h) * scale / 2.0).floor() as u16).clamp(1, area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

pub struct Picture<'a> {
    image: &'a RgbaImage,
}

impl<'a> Picture<'a> {
    pub fn new(image: &'a RgbaImage) -> Self {
        Self { image }
    }
}

fn sample(image: &RgbaImage, x: u32, y: u32) -> Option<Color> {
    let px = image.get_pixel(x, y);
    (px[3] >= ALPHA_CUTOFF).then(|| Color::Rgb(px[0], px[1], px[2]))
}

impl Widget for Picture<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (w, h) = self.image.dimensions();
        let target = fit_rect((w, h), area);
        if target.width == 0 || target.height == 0 {
            return;
        }

        let rows = u32::from(target.height) * 2;
        for cy in 0..target.height {
            for cx in 0..target.width {
                let sx = (u32::from(cx) * w / u32::from(target.width)).min(w - 1);
                let top_y = (u32::from(cy) * 2 * h / rows).min(h - 1);
                let bottom_y = ((u32::from(cy) * 2 + 1) * h / rows).min(h - 1);

                let top = sample(self.image, sx, top_y);
                let bottom = sample(self.image, sx, bottom_y);
                let Some(cell) = buf.cell_mut((target.x + cx, target.y + cy)) else {
                    continue;
                };
                match (top, bottom) {
                    (Some(t), Some(b)) => {
                        cell.set_symbol("▀").set_fg(t).set_bg(b);
                    }
                    (Some(t), None) => {
                        cell.set_symbol("▀").set_fg(t);
                    }
                    (None, Some(b)) => {
                        cell.set_symbol("▄").set_fg(b);
                    }
                    (None, None) => {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_fit_rect_keeps_aspect() {
        let rect = fit_rect((100, 100), Rect::new(0, 0, 40, 40));
        // 40 cols wide means 40 px; 20 rows hold 40 px
        assert_eq!(rect, Rect::new(0, 10, 40, 20));
    }

    #[test]
    fn test_fit_rect_empty_image() {
        assert_eq!(fit_rect((0, 10), Rect::new(3, 4, 10, 10)).width, 0);
    }

    #[test]
    fn test_transparent_pixels_leave_cells_alone() {
        let mut image = RgbaImage::from_pixel(2, 2, Rgba([0, 255, 0, 0]));
        image.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        image.put_pixel(0, 1, Rgba([0, 0, 255, 255]));

        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        Picture::new(&image).render(area, &mut buf);

        let left = &buf[(0, 0)];
        assert_eq!(left.symbol(), "▀");
        assert_eq!(left.fg, Color::Rgb(255, 0, 0));
        assert_eq!(left.bg, Color::Rgb(0, 0, 255));
        assert_eq!(buf[(1, 0)].symbol(), " ");
    }
}
