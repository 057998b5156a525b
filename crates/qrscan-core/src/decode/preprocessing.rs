//! Image preparation for QR detection.

use image::{DynamicImage, GenericImageView, GrayImage};
use tracing::debug;

/// Downscale so the longer side is at most `max_size`, keeping aspect ratio.
pub fn fit_within(image: DynamicImage, max_size: u32) -> DynamicImage {
    let (width, height) = image.dimensions();
    if max_size == 0 || width.max(height) <= max_size {
        return image;
    }

    debug!("Downscaling {}x{} image to fit {}px", width, height, max_size);
    image.resize(max_size, max_size, image::imageops::FilterType::Triangle)
}

/// Hard threshold: pixels below `threshold` become black, the rest white.
pub fn binarize(image: &GrayImage, threshold: u8) -> GrayImage {
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        pixel.0[0] = if pixel.0[0] < threshold { 0 } else { 255 };
    }
    out
}
