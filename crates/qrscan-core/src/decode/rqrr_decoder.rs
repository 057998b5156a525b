//! Pure-Rust QR decoder backed by `rqrr`.

use image::GrayImage;
use tracing::{debug, warn};

use super::preprocessing::{binarize, fit_within};
use super::{QrDecoder, RawDecode};
use crate::error::DecodeError;
use crate::models::config::DecoderConfig;

/// QR decoder using `rqrr` grid detection on a greyscale copy of the image.
///
/// When the first pass yields nothing and `threshold_fallback` is set, a
/// second pass runs on a binarized copy.
pub struct RqrrDecoder {
    config: DecoderConfig,
}

impl RqrrDecoder {
    /// Create a decoder with default settings.
    pub fn new() -> Self {
        Self {
            config: DecoderConfig::default(),
        }
    }

    /// Create a decoder from configuration.
    pub fn with_config(config: DecoderConfig) -> Self {
        Self { config }
    }

    /// Set the binarization threshold.
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.config.threshold = threshold;
        self
    }

    /// Set whether to retry on a binarized copy.
    pub fn with_threshold_fallback(mut self, enabled: bool) -> Self {
        self.config.threshold_fallback = enabled;
        self
    }

    /// Decode every grid found in a greyscale image.
    ///
    /// Returns the decoded contents and the last per-grid error, if any.
    fn scan(gray: &GrayImage) -> (Vec<RawDecode>, Option<String>) {
        let (width, height) = gray.dimensions();
        let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
            width as usize,
            height as usize,
            |x, y| gray.get_pixel(x as u32, y as u32).0[0],
        );

        let grids = prepared.detect_grids();
        debug!("Detected {} candidate grids", grids.len());

        let mut found = Vec::new();
        let mut last_error = None;
        for grid in grids {
            match grid.decode() {
                Ok((_meta, content)) => found.push(RawDecode::Scalar(content)),
                Err(e) => {
                    // Byte-mode payloads in ISO-8859-1 fail the UTF-8 check.
                    let mut bytes = Vec::new();
                    match grid.decode_to(&mut bytes) {
                        Ok(_meta) if !bytes.is_empty() => {
                            debug!("Grid is not UTF-8, keeping {} raw bytes", bytes.len());
                            found.push(RawDecode::Bytes(bytes));
                        }
                        _ => {
                            debug!("Grid decode failed: {}", e);
                            last_error = Some(e.to_string());
                        }
                    }
                }
            }
        }

        (found, last_error)
    }
}

impl Default for RqrrDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl QrDecoder for RqrrDecoder {
    fn decode(&self, image_bytes: &[u8]) -> Result<RawDecode, DecodeError> {
        let image = image::load_from_memory(image_bytes)?;
        if image.width() == 0 || image.height() == 0 {
            return Err(DecodeError::EmptyImage);
        }

        let gray = fit_within(image, self.config.max_image_size).to_luma8();

        let (found, mut last_error) = Self::scan(&gray);
        if !found.is_empty() {
            return Ok(RawDecode::Sequence(found));
        }

        if self.config.threshold_fallback {
            debug!("No symbol found, retrying on binarized image (threshold {})", self.config.threshold);
            let (found, error) = Self::scan(&binarize(&gray, self.config.threshold));
            if !found.is_empty() {
                return Ok(RawDecode::Sequence(found));
            }
            last_error = error.or(last_error);
        }

        match last_error {
            Some(reason) => {
                warn!("QR grid found but could not be decoded: {}", reason);
                Err(DecodeError::Symbol(reason))
            }
            None => Ok(RawDecode::Sequence(Vec::new())),
        }
    }
}
