//! Error types for the qrscan-core library.

use thiserror::Error;

/// Main error type for the qrscan library.
///
/// Decoding problems never surface here: a scan that cannot read a symbol
/// is a [`ScanOutcome::NotDetected`](crate::ScanOutcome::NotDetected).
#[derive(Error, Debug)]
pub enum QrscanError {
    /// Enrichment backend could not be set up.
    #[error("enrichment error: {0}")]
    Enrichment(#[from] EnrichmentError),
}

/// Errors related to QR decoding.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The bytes could not be read as an image.
    #[error("invalid image: {0}")]
    InvalidImage(#[from] image::ImageError),

    /// A symbol grid was found but its content could not be decoded.
    #[error("failed to decode symbol: {0}")]
    Symbol(String),

    /// The image is empty (zero width or height).
    #[error("image has no pixels")]
    EmptyImage,
}

/// Errors raised by enrichment backends.
///
/// These never cross the [`EnrichmentGateway`](crate::enrich::EnrichmentGateway)
/// boundary; the gateway logs them and falls back.
#[derive(Error, Debug)]
pub enum EnrichmentError {
    /// HTTP transport or status error.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service did not answer within the configured timeout.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// The response did not have the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// No API key configured.
    #[error("enrichment service is not configured")]
    NotConfigured,
}

/// Result type for the qrscan library.
pub type Result<T> = std::result::Result<T, QrscanError>;
