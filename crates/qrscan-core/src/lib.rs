//! Core library for QR payment payload processing.
//!
//! This crate provides:
//! - QR decoding behind a swappable [`QrDecoder`] (pure-Rust `rqrr` by default)
//! - Payload normalization for nested decoder output
//! - Heuristic field extraction (name, address, city, mobile number)
//! - Content-type classification for payloads without structured fields
//! - Optional LLM enrichment that never fails the pipeline

pub mod error;
pub mod models;
pub mod decode;
pub mod payload;
pub mod enrich;

pub use error::{QrscanError, Result};
pub use models::config::QrscanConfig;
pub use models::result::{ContentType, ExtractionResult, ScanOutcome};
pub use decode::{normalize, QrDecoder, RawDecode, RqrrDecoder};
pub use payload::{QrProcessor, FieldExtractor, ExtractionMatch, Strategy};
pub use enrich::{EnrichmentGateway, GeminiModel, LanguageModel};
