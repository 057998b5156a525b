//! Name extraction from length-prefixed free-text fields.
//!
//! Payment payloads encode a numeric length prefix before the holder's
//! name, e.g. `5923JUAN CARLOS PEREZ ROJAS6007...`. The extractor looks for
//! a run of at least three digits followed by uppercase letters and spaces
//! that end at the next digit or the end of the text.

use super::patterns::{LEADING_DIGIT, NAME_CANDIDATE};
use super::{ExtractionMatch, Field, FieldExtractor, Strategy};

/// Name field extractor.
pub struct NameExtractor {
    min_length: usize,
}

impl NameExtractor {
    /// Create a new name extractor; candidates need more than 5 characters.
    pub fn new() -> Self {
        Self { min_length: 6 }
    }

    /// Set the minimum candidate length in characters.
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// All candidates that survive the length filter, in text order.
    pub fn extract_all(&self, text: &str) -> Vec<ExtractionMatch> {
        let mut results = Vec::new();

        for caps in NAME_CANDIDATE.captures_iter(text) {
            let full = caps.get(0).unwrap();
            let rest = &text[full.end()..];
            let terminated = rest.is_empty() || LEADING_DIGIT.is_match(rest);
            if !terminated {
                continue;
            }

            let span = caps.get(2).unwrap();
            let raw = span.as_str();
            let name = raw.trim();
            if name.chars().count() < self.min_length {
                continue;
            }

            let start = span.start() + (raw.len() - raw.trim_start().len());
            results.push(
                ExtractionMatch::new(name, Strategy::Pattern).with_position(start, start + name.len()),
            );
        }

        results
    }
}

impl Default for NameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for NameExtractor {
    fn field(&self) -> Field {
        Field::Name
    }

    /// The longest candidate; the first one wins a tie.
    fn extract(&self, text: &str) -> Option<ExtractionMatch> {
        let mut best: Option<ExtractionMatch> = None;

        for candidate in self.extract_all(text) {
            let longer = best
                .as_ref()
                .is_none_or(|b| candidate.value.chars().count() > b.value.chars().count());
            if longer {
                best = Some(candidate);
            }
        }

        best
    }
}

/// Extract a name from payload text.
pub fn extract_name(text: &str) -> Option<String> {
    NameExtractor::new().extract(text).map(|m| m.value)
}
