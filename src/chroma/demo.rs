use image::{Rgba, RgbaImage};

const WIDTH: u32 = 96;
const HEIGHT: u32 = 80;
const FRAMES: usize = 24;

const BACKDROP: Rgba<u8> = Rgba([40, 200, 60, 255]);
const HEART: Rgba<u8> = Rgba([255, 90, 130, 255]);
const SHINE: Rgba<u8> = Rgba([255, 220, 230, 255]);

/// A pulsing heart shot against a green backdrop.
///
/// Stands in for the celebration video when none is configured.
pub fn demo_frames() -> Vec<RgbaImage> {
    (0..FRAMES)
        .map(|i| {
            let phase = i as f32 / FRAMES as f32 * std::f32::consts::TAU;
            heart_frame(0.75 + 0.12 * phase.sin())
        })
        .collect()
}

fn heart_frame(scale: f32) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(WIDTH, HEIGHT, BACKDROP);
    let half = WIDTH.min(HEIGHT) as f32 / 2.0;
    for (px, py, pixel) in img.enumerate_pixels_mut() {
        let x = (px as f32 - WIDTH as f32 / 2.0) / (half * scale) * 1.3;
        let y = -(py as f32 - HEIGHT as f32 / 2.0) / (half * scale) * 1.3 + 0.2;
        let a = x * x + y * y - 1.0;
        if a * a * a - x * x * y * y * y <= 0.0 {
            let near_shine = (x + 0.45).powi(2) + (y - 0.55).powi(2) < 0.04;
            *pixel = if near_shine { SHINE } else { HEART };
        }
    }
    img
}
