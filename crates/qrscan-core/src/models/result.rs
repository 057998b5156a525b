//! Scan result models.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Message carried by a scan that found no QR payload.
pub const NOT_DETECTED_MESSAGE: &str = "no QR code detected in the image";

/// Coarse classification of a payload with no structured fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentType {
    /// A URL; `host` is the authority exactly as written, absent when empty.
    Url { scheme: String, host: Option<String> },
    /// An email address.
    Email,
    /// A bare phone number.
    PhoneNumber,
    /// A `WIFI:` network configuration.
    WifiConfig,
    /// A vCard or MECARD contact.
    Contact,
    /// A vEvent calendar entry.
    CalendarEvent,
    /// Merchant invoice or payment receipt.
    PaymentReceipt,
    /// Free text shorter than the short-text limit.
    ShortText,
    /// Any other free text.
    LongText,
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentType::Url { host: Some(host), .. } => write!(f, "URL: {}", host),
            ContentType::Url { host: None, .. } => write!(f, "URL"),
            ContentType::Email => write!(f, "email address"),
            ContentType::PhoneNumber => write!(f, "phone number"),
            ContentType::WifiConfig => write!(f, "Wi-Fi configuration"),
            ContentType::Contact => write!(f, "contact card"),
            ContentType::CalendarEvent => write!(f, "calendar event"),
            ContentType::PaymentReceipt => write!(f, "invoice or payment receipt"),
            ContentType::ShortText => write!(f, "short text"),
            ContentType::LongText => write!(f, "long text"),
        }
    }
}

impl Serialize for ContentType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Structured fields recovered from one QR payload.
///
/// `content_type` is set only when all four structured fields are absent;
/// [`ExtractionResult::new`] enforces this.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionResult {
    /// Normalized payload text.
    pub payload: String,

    /// Person or merchant name.
    pub name: Option<String>,

    /// Street address.
    pub address: Option<String>,

    /// City or municipality.
    pub city: Option<String>,

    /// Colombian mobile number (10 digits starting with 3).
    pub phone: Option<String>,

    /// Fallback classification.
    pub content_type: Option<ContentType>,
}

/// Structured fields before assembly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
}

impl Fields {
    /// True when no structured field was recovered.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.address.is_none() && self.city.is_none() && self.phone.is_none()
    }
}

impl ExtractionResult {
    /// Assemble a result, running `classify` only when `fields` is empty.
    pub fn new(
        payload: impl Into<String>,
        fields: Fields,
        classify: impl FnOnce(&str) -> ContentType,
    ) -> Self {
        let payload = payload.into();
        let content_type = if fields.is_empty() {
            Some(classify(&payload))
        } else {
            None
        };

        Self {
            payload,
            name: fields.name,
            address: fields.address,
            city: fields.city,
            phone: fields.phone,
            content_type,
        }
    }

    /// True when at least one structured field is present.
    pub fn has_structured_fields(&self) -> bool {
        self.name.is_some() || self.address.is_some() || self.city.is_some() || self.phone.is_some()
    }
}

/// Outcome of processing one image.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    /// A payload was decoded and interpreted.
    Detected(ExtractionResult),
    /// No QR payload could be obtained.
    NotDetected,
}

impl ScanOutcome {
    /// The extraction result, if a payload was detected.
    pub fn result(&self) -> Option<&ExtractionResult> {
        match self {
            ScanOutcome::Detected(result) => Some(result),
            ScanOutcome::NotDetected => None,
        }
    }

    pub fn is_detected(&self) -> bool {
        matches!(self, ScanOutcome::Detected(_))
    }
}

impl Serialize for ScanOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ScanOutcome::Detected(result) => result.serialize(serializer),
            ScanOutcome::NotDetected => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", NOT_DETECTED_MESSAGE)?;
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_content_type_only_for_empty_fields() {
        let fields = Fields {
            phone: Some("3001234567".to_string()),
            ..Default::default()
        };
        let result = ExtractionResult::new("x", fields, |_| panic!("classifier must not run"));
        assert_eq!(result.content_type, None);
        assert!(result.has_structured_fields());

        let result = ExtractionResult::new("hello", Fields::default(), |_| ContentType::ShortText);
        assert_eq!(result.content_type, Some(ContentType::ShortText));
        assert!(!result.has_structured_fields());
    }

    #[test]
    fn test_serialize_detected() {
        let result = ExtractionResult::new("https://example.com", Fields::default(), |_| {
            ContentType::Url {
                scheme: "https".to_string(),
                host: Some("example.com".to_string()),
            }
        });
        let json = serde_json::to_value(ScanOutcome::Detected(result)).unwrap();

        assert_eq!(json["payload"], "https://example.com");
        assert_eq!(json["content_type"], "URL: example.com");
        assert!(json["name"].is_null());
    }

    #[test]
    fn test_serialize_not_detected() {
        let json = serde_json::to_string(&ScanOutcome::NotDetected).unwrap();
        assert_eq!(json, r#"{"error":"no QR code detected in the image"}"#);
    }
}
