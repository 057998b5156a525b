//! Configuration structures for the scanning pipeline.

use serde::{Deserialize, Serialize};

/// Environment variable holding the Gemini API key.
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Main configuration for the qrscan pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QrscanConfig {
    /// QR decoder configuration.
    pub decoder: DecoderConfig,

    /// Enrichment service configuration.
    pub enrichment: EnrichmentConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,
}

/// QR decoder configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Retry on a binarized copy when the first pass finds no symbol.
    pub threshold_fallback: bool,

    /// Luma threshold for the binarized pass (0 - 255).
    pub threshold: u8,

    /// Maximum image dimension (longer side); larger images are downscaled.
    pub max_image_size: u32,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            threshold_fallback: true,
            threshold: 128,
            max_image_size: 2048,
        }
    }
}

/// Enrichment (LLM) service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// Master switch; with no API key enrichment is off regardless.
    pub enabled: bool,

    /// API key for the Gemini service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model name.
    pub model: String,

    /// Base URL of the generative language API.
    pub endpoint: String,

    /// Upper bound for a single enrichment call, in seconds.
    pub timeout_secs: u64,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: None,
            model: "gemini-1.5-flash".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_secs: 10,
        }
    }
}

impl EnrichmentConfig {
    /// Whether enrichment calls should be made at all.
    pub fn is_active(&self) -> bool {
        self.enabled && self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Minimum length of a name candidate, in characters.
    pub min_name_length: usize,

    /// Payloads shorter than this are classified as short text.
    pub short_text_limit: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_name_length: 6,
            short_text_limit: 50,
        }
    }
}

impl QrscanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Override settings from the process environment.
    pub fn apply_env(mut self) -> Self {
        if let Ok(key) = std::env::var(GEMINI_API_KEY_VAR) {
            if !key.trim().is_empty() {
                self.enrichment.api_key = Some(key);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: QrscanConfig =
            serde_json::from_str(r#"{"enrichment": {"timeout_secs": 3}}"#).unwrap();

        assert_eq!(config.enrichment.timeout_secs, 3);
        assert_eq!(config.enrichment.model, "gemini-1.5-flash");
        assert_eq!(config.decoder.threshold, 128);
        assert_eq!(config.extraction.short_text_limit, 50);
    }

    #[test]
    fn test_enrichment_inactive_without_key() {
        let mut config = EnrichmentConfig::default();
        assert!(!config.is_active());

        config.api_key = Some("  ".to_string());
        assert!(!config.is_active());

        config.api_key = Some("secret".to_string());
        assert!(config.is_active());

        config.enabled = false;
        assert!(!config.is_active());
    }

    #[test]
    fn test_api_key_not_serialized_when_absent() {
        let json = serde_json::to_string(&QrscanConfig::default()).unwrap();
        assert!(!json.contains("api_key"));
    }
}
