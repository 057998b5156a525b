//! Content-type classification for payloads without structured fields.

use super::patterns::{EMAIL, PHONE_LIKE, RECEIPT_MARKERS, URL, URL_AUTHORITY};
use crate::models::result::ContentType;

/// Fallback classifier. Checks run in a fixed priority order and the
/// first hit wins.
pub struct ContentClassifier {
    short_text_limit: usize,
}

impl ContentClassifier {
    pub fn new() -> Self {
        Self { short_text_limit: 50 }
    }

    /// Payloads with fewer characters than `limit` are short text.
    pub fn with_short_text_limit(mut self, limit: usize) -> Self {
        self.short_text_limit = limit;
        self
    }

    pub fn classify(&self, text: &str) -> ContentType {
        if let Some(caps) = URL.captures(text) {
            let host = URL_AUTHORITY
                .captures(text)
                .map(|c| c[1].to_string())
                .filter(|host| !host.is_empty());
            return ContentType::Url {
                scheme: caps[1].to_lowercase(),
                host,
            };
        }

        if EMAIL.is_match(text) {
            return ContentType::Email;
        }

        if PHONE_LIKE.is_match(text) {
            return ContentType::PhoneNumber;
        }

        if text.starts_with("WIFI:") {
            return ContentType::WifiConfig;
        }

        if text.starts_with("BEGIN:VCARD") || text.starts_with("MECARD:") {
            return ContentType::Contact;
        }

        if text.starts_with("BEGIN:VEVENT") {
            return ContentType::CalendarEvent;
        }

        if RECEIPT_MARKERS.iter().any(|m| text.contains(m)) {
            return ContentType::PaymentReceipt;
        }

        if text.chars().count() < self.short_text_limit {
            ContentType::ShortText
        } else {
            ContentType::LongText
        }
    }
}

impl Default for ContentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify payload text with default settings.
pub fn classify(text: &str) -> ContentType {
    ContentClassifier::new().classify(text)
}
