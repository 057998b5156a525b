//! Colombian mobile number extraction.

use super::patterns::{MOBILE_NUMBER, PHONE_LABELS, PHONE_TAGGED, TEN_DIGITS};
use super::{ExtractionMatch, Field, FieldExtractor, Strategy};

/// Characters after a phone label that are searched for the number.
const LABEL_WINDOW: usize = 20;

/// Phone field extractor.
pub struct PhoneExtractor;

impl PhoneExtractor {
    pub fn new() -> Self {
        Self
    }

    fn tagged(text: &str) -> Option<ExtractionMatch> {
        let caps = PHONE_TAGGED.captures(text)?;
        let number = caps.get(1).unwrap();
        is_mobile(number.as_str()).then(|| {
            ExtractionMatch::new(number.as_str(), Strategy::Tagged).with_position(number.start(), number.end())
        })
    }

    fn labeled(text: &str) -> Option<ExtractionMatch> {
        for label in PHONE_LABELS.iter() {
            let Some(m) = label.find(text) else {
                continue;
            };

            let after = &text[m.end()..];
            let window = after
                .char_indices()
                .nth(LABEL_WINDOW)
                .map_or(after, |(i, _)| &after[..i]);

            if let Some(number) = TEN_DIGITS.find(window) {
                if is_mobile(number.as_str()) {
                    let start = m.end() + number.start();
                    return Some(
                        ExtractionMatch::new(number.as_str(), Strategy::Labeled)
                            .with_position(start, start + number.len()),
                    );
                }
            }
        }

        None
    }
}

impl Default for PhoneExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for PhoneExtractor {
    fn field(&self) -> Field {
        Field::Phone
    }

    fn extract(&self, text: &str) -> Option<ExtractionMatch> {
        Self::tagged(text)
            .or_else(|| Self::labeled(text))
            .or_else(|| {
                MOBILE_NUMBER.find(text).map(|m| {
                    ExtractionMatch::new(m.as_str(), Strategy::Scan).with_position(m.start(), m.end())
                })
            })
    }
}

fn is_mobile(number: &str) -> bool {
    number.len() == 10 && number.starts_with('3')
}

/// Extract a mobile number from payload text.
pub fn extract_phone(text: &str) -> Option<String> {
    PhoneExtractor::new().extract(text).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_phone() {
        let text = format!("{}{}{}", "62210210", "3175687761", "0703CEL");
        let m = PhoneExtractor::new().extract(&text).unwrap();
        assert_eq!(m.value, "3175687761");
        assert_eq!(m.strategy, Strategy::Tagged);
    }

    #[test]
    fn test_tagged_phone_requires_mobile_prefix() {
        // Tag rule rejects the landline; the scan rule finds nothing either.
        assert_eq!(extract_phone("6221021060122456780703CEL"), None);
    }

    #[test]
    fn test_labeled_phone() {
        let m = PhoneExtractor::new().extract("Nombre: Ana\nCel: 310 -> 3104567890").unwrap();
        assert_eq!(m.value, "3104567890");
        assert_eq!(m.strategy, Strategy::Labeled);

        assert_eq!(extract_phone("MÓVIL: 3201112233"), Some("3201112233".to_string()));
    }

    #[test]
    fn test_labeled_phone_tries_next_marker() {
        // CEL: holds a landline, so TEL: is tried next.
        let m = PhoneExtractor::new()
            .extract("CEL: 6012345678\nTEL: 3109876543")
            .unwrap();
        assert_eq!(m.value, "3109876543");
        assert_eq!(m.strategy, Strategy::Labeled);
    }

    #[test]
    fn test_labeled_phone_outside_window() {
        // Beyond the label window the number is still found by the scan rule.
        let m = PhoneExtractor::new()
            .extract("TEL: llamar en horario de oficina 3001234567")
            .unwrap();
        assert_eq!(m.value, "3001234567");
        assert_eq!(m.strategy, Strategy::Scan);
    }

    #[test]
    fn test_scan_phone() {
        assert_eq!(
            extract_phone("contacto 3001234567 o 3119876543"),
            Some("3001234567".to_string())
        );
    }

    #[test]
    fn test_no_phone() {
        assert_eq!(extract_phone("PHONE: 6012345678"), None);
        assert_eq!(extract_phone("sin datos"), None);
    }
}
