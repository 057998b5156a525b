//! Scan pipeline: decode, extract, enrich, classify, assemble.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::decode::{normalize, QrDecoder, RawDecode, RqrrDecoder};
use crate::enrich::EnrichmentGateway;
use crate::error::Result;
use crate::models::config::QrscanConfig;
use crate::models::result::{ExtractionResult, Fields, ScanOutcome};

use super::rules::patterns::KNOWN_MERCHANTS;
use super::rules::{
    AddressExtractor, CityExtractor, ContentClassifier, ExtractionMatch, Field, FieldExtractor,
    NameExtractor, PhoneExtractor,
};

/// Raw extractor output for one payload, before enrichment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMatches {
    pub name: Option<ExtractionMatch>,
    pub address: Option<ExtractionMatch>,
    pub city: Option<ExtractionMatch>,
    pub phone: Option<ExtractionMatch>,
}

impl FieldMatches {
    /// Matches in a fixed field order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, Option<&ExtractionMatch>)> {
        [
            (Field::Name, self.name.as_ref()),
            (Field::Address, self.address.as_ref()),
            (Field::City, self.city.as_ref()),
            (Field::Phone, self.phone.as_ref()),
        ]
        .into_iter()
    }
}

/// End-to-end QR payload processor.
///
/// Holds no per-scan state; one instance can serve concurrent scans.
pub struct QrProcessor {
    decoder: Box<dyn QrDecoder>,
    gateway: EnrichmentGateway,
    name: NameExtractor,
    address: AddressExtractor,
    city: CityExtractor,
    phone: PhoneExtractor,
    classifier: ContentClassifier,
}

impl QrProcessor {
    /// Create a processor with the given decoder and enrichment disabled.
    pub fn new(decoder: impl QrDecoder + 'static) -> Self {
        Self {
            decoder: Box::new(decoder),
            gateway: EnrichmentGateway::disabled(),
            name: NameExtractor::new(),
            address: AddressExtractor::new(),
            city: CityExtractor::new(),
            phone: PhoneExtractor::new(),
            classifier: ContentClassifier::new(),
        }
    }

    /// Create a processor from configuration, with the `rqrr` decoder.
    pub fn from_config(config: &QrscanConfig) -> Result<Self> {
        let gateway = EnrichmentGateway::from_config(&config.enrichment)?;

        Ok(Self::new(RqrrDecoder::with_config(config.decoder.clone()))
            .with_gateway(gateway)
            .with_name_extractor(NameExtractor::new().with_min_length(config.extraction.min_name_length))
            .with_classifier(
                ContentClassifier::new().with_short_text_limit(config.extraction.short_text_limit),
            ))
    }

    /// Set the enrichment gateway.
    pub fn with_gateway(mut self, gateway: EnrichmentGateway) -> Self {
        self.gateway = gateway;
        self
    }

    /// Set the name extractor.
    pub fn with_name_extractor(mut self, extractor: NameExtractor) -> Self {
        self.name = extractor;
        self
    }

    /// Set the city extractor.
    pub fn with_city_extractor(mut self, extractor: CityExtractor) -> Self {
        self.city = extractor;
        self
    }

    /// Set the content classifier.
    pub fn with_classifier(mut self, classifier: ContentClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn gateway(&self) -> &EnrichmentGateway {
        &self.gateway
    }

    /// Decode an encoded image and interpret its payload.
    pub async fn process_image(&self, image_bytes: &[u8]) -> ScanOutcome {
        let start = Instant::now();

        let raw = match self.decoder.decode(image_bytes) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("QR decoding failed: {}", e);
                return ScanOutcome::NotDetected;
            }
        };
        debug!("Decoded image in {}ms", start.elapsed().as_millis());

        self.process_decoded(raw).await
    }

    /// Interpret an already-decoded result.
    pub async fn process_decoded(&self, raw: RawDecode) -> ScanOutcome {
        match normalize(raw) {
            Some(payload) => ScanOutcome::Detected(self.interpret(&payload).await),
            None => {
                info!("No QR payload detected");
                ScanOutcome::NotDetected
            }
        }
    }

    /// Run every field extractor over the same payload.
    pub fn extract(&self, text: &str) -> FieldMatches {
        FieldMatches {
            name: self.name.extract(text),
            address: self.address.extract(text),
            city: self.city.extract(text),
            phone: self.phone.extract(text),
        }
    }

    /// Interpret payload text: extract, enrich, then classify if nothing was found.
    pub async fn interpret(&self, text: &str) -> ExtractionResult {
        info!("Interpreting payload of {} characters", text.chars().count());
        debug!("Payload: {}", text);

        let matches = self.extract(text);
        for (field, m) in matches.iter() {
            match m {
                Some(m) => debug!("{} = {:?} ({})", field, m.value, m.strategy),
                None => debug!("{} not found", field),
            }
        }

        let city = match matches.city {
            Some(m) => Some(m.value),
            None => self.gateway.infer_city(text).await,
        };

        let name = match matches.name {
            Some(m) => Some(self.gateway.refine_name(&m.value, text).await),
            None => KNOWN_MERCHANTS
                .iter()
                .find(|(fragment, _)| text.contains(fragment))
                .map(|(_, merchant)| merchant.to_string()),
        };

        let fields = Fields {
            name,
            address: matches.address.map(|m| m.value),
            city,
            phone: matches.phone.map(|m| m.value),
        };

        let result = ExtractionResult::new(text, fields, |payload| self.classifier.classify(payload));
        if let Some(content_type) = &result.content_type {
            debug!("No structured fields, classified as {}", content_type);
        }

        result
    }
}
