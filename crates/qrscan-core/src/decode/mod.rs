//! QR decoding boundary and payload normalization.

mod preprocessing;
mod rqrr_decoder;

pub use preprocessing::{binarize, fit_within};
pub use rqrr_decoder::RqrrDecoder;

use crate::error::DecodeError;

/// Whatever a decoder hands back.
///
/// Decoders report one entry per detected symbol and some wrap that list
/// again, so the shape is a tree rather than a plain string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawDecode {
    /// Decoded text.
    Scalar(String),
    /// Raw symbol bytes that are not valid UTF-8.
    Bytes(Vec<u8>),
    /// One entry per detected symbol.
    Sequence(Vec<RawDecode>),
}

impl From<String> for RawDecode {
    fn from(value: String) -> Self {
        RawDecode::Scalar(value)
    }
}

impl From<&str> for RawDecode {
    fn from(value: &str) -> Self {
        RawDecode::Scalar(value.to_string())
    }
}

impl From<Vec<RawDecode>> for RawDecode {
    fn from(values: Vec<RawDecode>) -> Self {
        RawDecode::Sequence(values)
    }
}

/// Trait for QR decoders.
///
/// Implementations must not panic on arbitrary bytes; an image without a
/// symbol is `Ok` with an empty sequence.
pub trait QrDecoder: Send + Sync {
    /// Decode every QR symbol found in the encoded image bytes.
    fn decode(&self, image_bytes: &[u8]) -> Result<RawDecode, DecodeError>;
}

/// Flatten a decoder result into a single payload string.
///
/// Always follows the first element of a sequence, recursively. Empty
/// sequences and empty strings yield `None`. Bytes are read as UTF-8 when
/// valid and as ISO-8859-1 otherwise, the QR byte-mode default.
pub fn normalize(raw: RawDecode) -> Option<String> {
    match raw {
        RawDecode::Scalar(text) => Some(text).filter(|t| !t.is_empty()),
        RawDecode::Bytes(bytes) => {
            let text = match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(e) => e.as_bytes().iter().map(|&b| b as char).collect(),
            };
            Some(text).filter(|t| !t.is_empty())
        }
        RawDecode::Sequence(items) => items.into_iter().next().and_then(normalize),
    }
}
