use image::imageops::{self, FilterType};
use image::RgbaImage;

/// The output surface the compositor paints into.
///
/// Sized to the source's decoded dimensions; resized only when those change.
#[derive(Debug, Clone)]
pub struct Raster {
    image: RgbaImage,
    resizes: u32,
}

impl Default for Raster {
    fn default() -> Self {
        Self::new()
    }
}

impl Raster {
    /// An empty 0x0 raster
    pub fn new() -> Self {
        Self {
            image: RgbaImage::new(0, 0),
            resizes: 0,
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Times the raster has been resized
    pub fn resize_count(&self) -> u32 {
        self.resizes
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub(crate) fn image_mut(&mut self) -> &mut RgbaImage {
        &mut self.image
    }

    /// Match the given size. Returns true if a resize happened.
    pub fn ensure_size(&mut self, width: u32, height: u32) -> bool {
        if self.image.dimensions() == (width, height) {
            return false;
        }
        tracing::debug!(width, height, "Resizing raster");
        self.image = RgbaImage::new(width, height);
        self.resizes += 1;
        true
    }

    /// Copy a frame in, scaling it to the raster when sizes differ
    pub fn draw(&mut self, frame: &RgbaImage) {
        if frame.dimensions() == self.image.dimensions() {
            self.image.copy_from_slice(frame.as_raw());
        } else {
            let (w, h) = self.image.dimensions();
            self.image = imageops::resize(frame, w, h, FilterType::Nearest);
        }
    }
}
