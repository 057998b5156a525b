//! Rule-based field extractors for payment QR payloads.

pub mod name;
pub mod address;
pub mod city;
pub mod phone;
pub mod content;
pub mod patterns;

pub use name::{extract_name, NameExtractor};
pub use address::{extract_address, AddressExtractor};
pub use city::{extract_city, CityExtractor};
pub use phone::{extract_phone, PhoneExtractor};
pub use content::{classify, ContentClassifier};

use std::fmt;

/// A structured field recovered from a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Address,
    City,
    Phone,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Name => "name",
            Field::Address => "address",
            Field::City => "city",
            Field::Phone => "phone",
        };
        f.pad(name)
    }
}

/// Which rule produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Fixed tag sequence of the tag-length-value payload convention.
    Tagged,
    /// General shape pattern (street address, prefixed name).
    Pattern,
    /// Text after a label such as `CIUDAD:`.
    Labeled,
    /// Known place name.
    Gazetteer,
    /// Literal substring check.
    Literal,
    /// Anywhere-in-text fallback scan.
    Scan,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Tagged => "tagged",
            Strategy::Pattern => "pattern",
            Strategy::Labeled => "labeled",
            Strategy::Gazetteer => "gazetteer",
            Strategy::Literal => "literal",
            Strategy::Scan => "scan",
        };
        f.pad(name)
    }
}

/// Trait for field extractors.
pub trait FieldExtractor: Send + Sync {
    /// The field this extractor recovers.
    fn field(&self) -> Field;

    /// Extract the field from payload text.
    fn extract(&self, text: &str) -> Option<ExtractionMatch>;
}

/// An extracted value with the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch {
    /// Extracted value.
    pub value: String,
    /// Rule that matched.
    pub strategy: Strategy,
    /// Byte span in the source text, when the value is a slice of it.
    pub position: Option<(usize, usize)>,
}

impl ExtractionMatch {
    pub fn new(value: impl Into<String>, strategy: Strategy) -> Self {
        Self {
            value: value.into(),
            strategy,
            position: None,
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
