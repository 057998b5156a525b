//! City extraction.
//!
//! The payload is uppercased once; gazetteer and literal checks run on that
//! copy, tag patterns run case-sensitively on the original text.

use super::patterns::{labeled_value, CITY_CAPITAL_DISTRICT, CITY_GAZETTEER, CITY_LABELS, CITY_TAGGED};
use super::{ExtractionMatch, Field, FieldExtractor, Strategy};

const CAPITAL: &str = "BOGOTA";

/// City field extractor.
pub struct CityExtractor {
    gazetteer: Vec<String>,
}

impl CityExtractor {
    /// Create a city extractor with the built-in Colombian gazetteer.
    pub fn new() -> Self {
        Self {
            gazetteer: CITY_GAZETTEER.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Replace the gazetteer. Entries are matched against the uppercased payload.
    pub fn with_gazetteer<I, S>(mut self, cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.gazetteer = cities.into_iter().map(|c| c.into().to_uppercase()).collect();
        self
    }
}

impl Default for CityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for CityExtractor {
    fn field(&self) -> Field {
        Field::City
    }

    fn extract(&self, text: &str) -> Option<ExtractionMatch> {
        let upper = text.to_uppercase();

        if let Some(city) = self.gazetteer.iter().find(|c| upper.contains(c.as_str())) {
            return Some(ExtractionMatch::new(city.as_str(), Strategy::Gazetteer));
        }

        if let Some((value, (start, end))) = labeled_value(text, &CITY_LABELS) {
            return Some(ExtractionMatch::new(value, Strategy::Labeled).with_position(start, end));
        }

        if let Some(caps) = CITY_TAGGED.captures(text) {
            let city = caps.get(1).unwrap();
            return Some(
                ExtractionMatch::new(city.as_str(), Strategy::Tagged).with_position(city.start(), city.end()),
            );
        }

        if let Some(m) = CITY_CAPITAL_DISTRICT.find(text) {
            return Some(ExtractionMatch::new(m.as_str(), Strategy::Pattern).with_position(m.start(), m.end()));
        }

        // Reached only with a custom gazetteer.
        if upper.contains(CAPITAL) {
            return Some(ExtractionMatch::new(CAPITAL, Strategy::Literal));
        }

        None
    }
}

/// Extract a city from payload text.
pub fn extract_city(text: &str) -> Option<String> {
    CityExtractor::new().extract(text).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gazetteer_tag_payload() {
        assert_eq!(
            extract_city("5802CO6007MALAMBO62210210"),
            Some("MALAMBO".to_string())
        );
    }

    #[test]
    fn test_gazetteer_case_insensitive() {
        let m = CityExtractor::new().extract("pago en bogota centro").unwrap();
        assert_eq!(m.value, "BOGOTA");
        assert_eq!(m.strategy, Strategy::Gazetteer);

        assert_eq!(extract_city("Envío a Medellín"), Some("MEDELLÍN".to_string()));
    }

    #[test]
    fn test_gazetteer_order() {
        // BOGOTA is listed before CALI.
        assert_eq!(extract_city("CALI - BOGOTA"), Some("BOGOTA".to_string()));
    }

    #[test]
    fn test_labeled_city() {
        assert_eq!(
            extract_city("Ciudad: Villa de Leyva\nDepto: Boyaca"),
            Some("Villa de Leyva".to_string())
        );
    }

    #[test]
    fn test_tagged_city() {
        assert_eq!(extract_city("5802CO6005GUACA6221"), Some("GUACA".to_string()));
        assert_eq!(
            extract_city("6008TOCANCIPA, CUND.6221"),
            Some("TOCANCIPA, CUND.".to_string())
        );
    }

    #[test]
    fn test_capital_district() {
        let m = CityExtractor::new().extract("Sede SUBA, D.C. norte").unwrap();
        assert_eq!(m.value, "SUBA, D.C.");
        assert_eq!(m.strategy, Strategy::Pattern);
    }

    #[test]
    fn test_literal_capital_with_custom_gazetteer() {
        let extractor = CityExtractor::new().with_gazetteer(["tunja"]);
        let m = extractor.extract("pago bogota").unwrap();
        assert_eq!(m.value, "BOGOTA");
        assert_eq!(m.strategy, Strategy::Literal);

        assert_eq!(extractor.extract("pago en Tunja").unwrap().value, "TUNJA");
    }

    #[test]
    fn test_no_city() {
        assert_eq!(extract_city("hola mundo"), None);
    }
}
