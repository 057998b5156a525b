//! Colombian street address extraction.

use super::patterns::{labeled_value, ADDRESS_FULL, ADDRESS_LABELS, ADDRESS_SHORT, ADDRESS_TAGGED};
use super::{ExtractionMatch, Field, FieldExtractor, Strategy};

/// Address field extractor.
///
/// Rules, first match wins: full street form (`Calle 45 # 12-30`), short
/// street form (`Cra 7 8A`), labeled value (`DIRECCION: ...`), and the
/// tag-length-value form of QR payment payloads.
pub struct AddressExtractor;

impl AddressExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AddressExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AddressExtractor {
    fn field(&self) -> Field {
        Field::Address
    }

    fn extract(&self, text: &str) -> Option<ExtractionMatch> {
        for pattern in [&*ADDRESS_FULL, &*ADDRESS_SHORT] {
            if let Some(m) = pattern.find(text) {
                return Some(
                    ExtractionMatch::new(m.as_str(), Strategy::Pattern).with_position(m.start(), m.end()),
                );
            }
        }

        if let Some((value, (start, end))) = labeled_value(text, &ADDRESS_LABELS) {
            return Some(ExtractionMatch::new(value, Strategy::Labeled).with_position(start, end));
        }

        if let Some(caps) = ADDRESS_TAGGED.captures(text) {
            let street = caps.get(2).unwrap();
            return Some(
                ExtractionMatch::new(street.as_str(), Strategy::Tagged)
                    .with_position(street.start(), street.end()),
            );
        }

        None
    }
}

/// Extract an address from payload text.
pub fn extract_address(text: &str) -> Option<String> {
    AddressExtractor::new().extract(text).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_street_form() {
        assert_eq!(
            extract_address("Enviar a Calle 45 # 12-30, apto 301"),
            Some("Calle 45 # 12-30".to_string())
        );
        assert_eq!(
            extract_address("CARRERA 7B No. 8A - 21 Bogota"),
            Some("CARRERA 7B No. 8A - 21".to_string())
        );
        assert_eq!(
            extract_address("0014Cl 1c # 19b-35 5802CO"),
            Some("Cl 1c # 19b-35".to_string())
        );
    }

    #[test]
    fn test_street_token_case_insensitive() {
        assert_eq!(
            extract_address("diagonal 23 n° 4-5"),
            Some("diagonal 23 n° 4-5".to_string())
        );
    }

    #[test]
    fn test_short_street_form() {
        assert_eq!(
            extract_address("Tienda en Av 68 # 13 local 2"),
            Some("Av 68 # 13".to_string())
        );
    }

    #[test]
    fn test_labeled_address() {
        assert_eq!(
            extract_address("Nombre: Ana\nDirección: Vereda El Carmen, finca 3\nTel: 1"),
            Some("Vereda El Carmen, finca 3".to_string())
        );
        assert_eq!(
            extract_address("domicilio: Manzana 4 casa 7"),
            Some("Manzana 4 casa 7".to_string())
        );
    }

    #[test]
    fn test_tagged_address() {
        // "Kr" is not a street token, so only the tag form recovers it.
        let text = "00020101021126180014Kr 45 # 12-30";
        let m = AddressExtractor::new().extract(text).unwrap();
        assert_eq!(m.value, "Kr 45 # 12-30");
        assert_eq!(m.strategy, Strategy::Tagged);
    }

    #[test]
    fn test_no_address() {
        assert_eq!(extract_address("hola mundo"), None);
        assert_eq!(extract_address("Calle sin numero"), None);
    }
}
