//! Regex patterns and lookup tables for payment QR payloads.

use lazy_static::lazy_static;
use regex::Regex;

/// Labels that precede a free-text address.
pub const ADDRESS_MARKERS: &[&str] = &["DIRECCION:", "DIRECCIÓN:", "DIR:", "ADDRESS:", "DOMICILIO:"];

/// Labels that precede a city name.
pub const CITY_MARKERS: &[&str] = &["CIUDAD:", "CITY:", "MUNICIPIO:", "LOCALIDAD:"];

/// Labels that precede a phone number.
pub const PHONE_MARKERS: &[&str] = &["CELULAR:", "CEL:", "MÓVIL:", "MOVIL:", "PHONE:", "TEL:"];

/// Colombian cities and municipalities, checked in this order.
pub const CITY_GAZETTEER: &[&str] = &[
    "BOGOTA", "BOGOTÁ", "MEDELLIN", "MEDELLÍN", "CALI", "BARRANQUILLA", "CARTAGENA",
    "CUCUTA", "CÚCUTA", "BUCARAMANGA", "PEREIRA", "SANTA MARTA", "MANIZALES",
    "VILLAVICENCIO", "PASTO", "MONTERIA", "MONTERÍA", "NEIVA", "ARMENIA", "POPAYAN",
    "POPAYÁN", "SINCELEJO", "VALLEDUPAR", "IBAGUE", "IBAGUÉ", "TUNJA", "YOPAL",
    "FLORENCIA", "QUIBDO", "QUIBDÓ", "RIOHACHA", "MOCOA", "ARAUCA", "LETICIA",
    "INIRIDA", "INÍRIDA", "MITU", "MITÚ", "PUERTO CARREÑO", "SAN ANDRES", "SAN ANDRÉS",
    "MALAMBO", "SOLEDAD", "SOACHA", "BELLO", "ENVIGADO", "ITAGUI", "ITAGÜÍ", "JAMUNDI",
    "JAMUNDÍ", "DOSQUEBRADAS", "FLORIDABLANCA", "GIRÓN", "PIEDECUESTA", "ZIPAQUIRA",
    "ZIPAQUIRÁ", "FACATATIVA", "FACATATIVÁ", "FUSAGASUGA", "FUSAGASUGÁ", "CHIA", "CHÍA",
];

/// Truncated merchant names seen in payloads, with their full form.
pub const KNOWN_MERCHANTS: &[(&str, &str)] = &[("SUPERMERCADO EL IMPERI", "SUPERMERCADO EL IMPERIO")];

/// Substrings marking a merchant invoice or receipt.
pub const RECEIPT_MARKERS: &[&str] = &["SUPERMERCADO", "RBM"];

lazy_static! {
    // Name: numeric length prefix followed by an uppercase free-text field.
    // The match must be followed by a digit or the end of the text.
    pub static ref NAME_CANDIDATE: Regex = Regex::new(
        r"(\d{3,})\s*([A-Z\s]+)"
    ).unwrap();

    // Colombian street addresses (Calle 45 # 12-30, Cra 7 No. 8A - 21, ...)
    pub static ref ADDRESS_FULL: Regex = Regex::new(
        r"(?i)(?:Cl|Calle|Cr|Carrera|Av|Avenida|Dg|Diagonal|Tv|Transversal)\s+\d+[A-Za-z]?\s*(?:#|No\.?|número|N°)?\s*\d+[A-Za-z]?\s*-\s*\d+"
    ).unwrap();

    pub static ref ADDRESS_SHORT: Regex = Regex::new(
        r"(?i)(?:Cl|Calle|Cr|Carrera|Av|Avenida|Dg|Diagonal|Tv|Transversal)\s+\d+[A-Za-z]?\s*(?:#|No\.?|número|N°)?\s*\d+[A-Za-z]?"
    ).unwrap();

    // Tag-length-value payloads: 00020101021126180014Cl 1c # 19b-35
    pub static ref ADDRESS_TAGGED: Regex = Regex::new(
        r"0+\d{6,}(\d{4})([A-Za-z]{2}\s+\d+[A-Za-z]?\s*#\s*\d+[A-Za-z]?-\d+)"
    ).unwrap();

    // City tag: ...6007MALAMBO6221...
    pub static ref CITY_TAGGED: Regex = Regex::new(
        r"600[0-9]([A-Z]+(?:,\s*[A-Z\.]+)?)"
    ).unwrap();

    // Capital district: BOGOTA, D.C.
    pub static ref CITY_CAPITAL_DISTRICT: Regex = Regex::new(
        r"([A-Z]+),\s*D\.?C\.?"
    ).unwrap();

    // Mobile number tag: ...6221021031756877610703CEL...
    pub static ref PHONE_TAGGED: Regex = Regex::new(
        r"62210210(\d{10})0703CEL"
    ).unwrap();

    // Same digit class as the name pattern, for its end-of-match check.
    pub static ref LEADING_DIGIT: Regex = Regex::new(
        r"^\d"
    ).unwrap();

    pub static ref TEN_DIGITS: Regex = Regex::new(
        r"\d{10}"
    ).unwrap();

    // Colombian mobile numbers start with 3
    pub static ref MOBILE_NUMBER: Regex = Regex::new(
        r"3\d{9}"
    ).unwrap();

    // Whole-payload content patterns. A single trailing newline is allowed,
    // decoders often leave one.
    pub static ref URL: Regex = Regex::new(
        r"^(https?|ftp)://[^\s/$.?#].[^\s]*\n?\z"
    ).unwrap();

    // Raw authority (userinfo, host, port) as written in the payload.
    pub static ref URL_AUTHORITY: Regex = Regex::new(
        r"^[A-Za-z]+://([^/?#\s]*)"
    ).unwrap();

    pub static ref EMAIL: Regex = Regex::new(
        r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}\n?\z"
    ).unwrap();

    pub static ref PHONE_LIKE: Regex = Regex::new(
        r"^\+?[\d\s-]{7,15}\n?\z"
    ).unwrap();

    pub static ref ADDRESS_LABELS: Vec<Regex> = marker_patterns(ADDRESS_MARKERS);
    pub static ref CITY_LABELS: Vec<Regex> = marker_patterns(CITY_MARKERS);
    pub static ref PHONE_LABELS: Vec<Regex> = marker_patterns(PHONE_MARKERS);
}

fn marker_patterns(markers: &[&str]) -> Vec<Regex> {
    markers
        .iter()
        .map(|m| Regex::new(&format!("(?i){}", regex::escape(m))).unwrap())
        .collect()
}

/// Find the first labeled value, trying markers in order.
///
/// The value runs from the end of the marker to the next line break and is
/// trimmed; an empty value falls through to the next marker. Returns the
/// value and its byte span in `text`.
pub fn labeled_value(text: &str, labels: &[Regex]) -> Option<(String, (usize, usize))> {
    for label in labels {
        let Some(m) = label.find(text) else {
            continue;
        };

        let start = m.end();
        let end = text[start..].find('\n').map_or(text.len(), |i| start + i);
        let value = text[start..end].trim();
        if !value.is_empty() {
            return Some((value.to_string(), (start, end)));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labeled_value_stops_at_newline() {
        let text = "Ciudad: Cali\nTel: 3001234567";
        let (value, (start, end)) = labeled_value(text, &CITY_LABELS).unwrap();
        assert_eq!(value, "Cali");
        assert_eq!(&text[start..end], " Cali");
    }

    #[test]
    fn test_labeled_value_skips_empty() {
        let text = "DIRECCION:   \nADDRESS: Calle Falsa 123";
        let (value, _) = labeled_value(text, &ADDRESS_LABELS).unwrap();
        assert_eq!(value, "Calle Falsa 123");
    }

    #[test]
    fn test_labeled_value_marker_order() {
        // DIRECCION: is tried before DIR: even though DIR: appears first.
        let text = "DIR: uno\nDIRECCION: dos";
        let (value, _) = labeled_value(text, &ADDRESS_LABELS).unwrap();
        assert_eq!(value, "dos");
    }
}
