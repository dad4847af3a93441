//! Green-screen removal for the celebration video.
//!
//! Pixels whose green channel clearly dominates red and blue are made fully
//! transparent. The test is multiplicative, so it follows the backdrop
//! through brightness changes without catching skin tones or warm colors.

mod compositor;
mod demo;
mod error;
mod ffmpeg;
mod raster;
mod source;

use std::path::Path;

pub use compositor::{
    frame_period, spawn_compositor, Compositor, CompositorHandle, FrameStep, DEFAULT_FRAME_RATE,
};
pub use demo::demo_frames;
pub use error::ChromaError;
pub use ffmpeg::{probe_video, FfmpegVideo, VideoInfo};
pub use raster::Raster;
pub use source::{LoopingFrames, Playback, PlaybackControl, VideoSource};

/// Green must exceed this before a pixel can be keyed
pub const GREEN_FLOOR: f64 = 100.0;
/// Green must exceed red and blue by this factor
pub const GREEN_DOMINANCE: f64 = 1.4;

/// Whether a pixel belongs to the green backdrop
#[inline]
pub fn is_key_green(r: u8, g: u8, b: u8) -> bool {
    let (r, g, b) = (f64::from(r), f64::from(g), f64::from(b));
    g > GREEN_FLOOR && g > r * GREEN_DOMINANCE && g > b * GREEN_DOMINANCE
}

/// Zero the alpha of every backdrop pixel in an RGBA buffer.
///
/// Color channels and foreground pixels are left as they are. A trailing
/// partial pixel is ignored. Returns the number of pixels keyed.
pub fn key_out_green(rgba: &mut [u8]) -> usize {
    let mut keyed = 0;
    for px in rgba.chunks_exact_mut(4) {
        if is_key_green(px[0], px[1], px[2]) {
            px[3] = 0;
            keyed += 1;
        }
    }
    keyed
}

/// Key a still image and write the result as PNG. Returns the keyed pixel count.
pub fn key_image_file(input: &Path, output: &Path) -> Result<usize, ChromaError> {
    let mut image = image::open(input)?.to_rgba8();
    let keyed = key_out_green(&mut image);
    image.save_with_format(output, image::ImageFormat::Png)?;
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        keyed,
        "Keyed still image"
    );
    Ok(keyed)
}
