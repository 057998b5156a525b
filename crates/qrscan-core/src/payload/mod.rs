//! Payload interpretation: field extraction, classification and assembly.

mod assembler;
pub mod rules;

pub use assembler::{FieldMatches, QrProcessor};
pub use rules::{ExtractionMatch, Field, FieldExtractor, Strategy};
