//! Optional LLM enrichment for fields the rules could not settle.
//!
//! The gateway is best-effort: every failure is logged and replaced by the
//! caller's fallback value, so a missing or broken service never changes
//! the shape of a scan result.

mod gemini;

pub use gemini::GeminiModel;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::EnrichmentError;
use crate::models::config::EnrichmentConfig;

/// Answers the model gives when it finds no city.
const NO_CITY_ANSWERS: &[&str] = &["NONE", "NINGUNA"];

/// Trait for text-completion backends.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Model identifier, for logging.
    fn name(&self) -> &str;

    /// Complete a single prompt.
    async fn complete(&self, prompt: &str) -> Result<String, EnrichmentError>;
}

/// Best-effort enrichment over an optional [`LanguageModel`].
#[derive(Clone)]
pub struct EnrichmentGateway {
    model: Option<Arc<dyn LanguageModel>>,
    timeout: Duration,
}

impl EnrichmentGateway {
    /// A gateway that never calls out.
    pub fn disabled() -> Self {
        Self {
            model: None,
            timeout: Duration::from_secs(EnrichmentConfig::default().timeout_secs),
        }
    }

    /// Build the Gemini-backed gateway, or a disabled one when unconfigured.
    pub fn from_config(config: &EnrichmentConfig) -> Result<Self, EnrichmentError> {
        let model = GeminiModel::from_config(config)?.map(|m| Arc::new(m) as Arc<dyn LanguageModel>);
        if model.is_none() {
            debug!("Enrichment disabled: no API key configured");
        }

        Ok(Self {
            model,
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    /// Use a specific model.
    pub fn with_model(model: impl LanguageModel + 'static, timeout: Duration) -> Self {
        Self {
            model: Some(Arc::new(model)),
            timeout,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.model.is_some()
    }

    async fn ask(&self, prompt: &str) -> Result<String, EnrichmentError> {
        let model = self.model.as_ref().ok_or(EnrichmentError::NotConfigured)?;
        debug!("Enrichment request to {}", model.name());

        tokio::time::timeout(self.timeout, model.complete(prompt))
            .await
            .map_err(|_| EnrichmentError::Timeout(self.timeout.as_secs()))?
    }

    /// Ask the model for the city mentioned in a payload.
    pub async fn infer_city(&self, text: &str) -> Option<String> {
        if !self.is_enabled() {
            return None;
        }

        match self.ask(&city_prompt(text)).await {
            Ok(answer) => {
                let city = answer.trim().trim_matches('"').trim();
                if city.is_empty() || NO_CITY_ANSWERS.iter().any(|n| city.eq_ignore_ascii_case(n)) {
                    None
                } else {
                    Some(city.to_string())
                }
            }
            Err(e) => {
                warn!("City inference failed: {}", e);
                None
            }
        }
    }

    /// Ask the model to complete or correct a name candidate.
    ///
    /// Returns `candidate` unchanged on any failure. An all-uppercase
    /// candidate always yields an all-uppercase answer.
    pub async fn refine_name(&self, candidate: &str, text: &str) -> String {
        if !self.is_enabled() || candidate.is_empty() {
            return candidate.to_string();
        }

        match self.ask(&name_prompt(candidate, text)).await {
            Ok(answer) => {
                let refined = answer.trim().trim_matches('"').trim();
                if refined.is_empty() {
                    candidate.to_string()
                } else if is_all_uppercase(candidate) && !is_all_uppercase(refined) {
                    refined.to_uppercase()
                } else {
                    refined.to_string()
                }
            }
            Err(e) => {
                warn!("Name refinement failed: {}", e);
                candidate.to_string()
            }
        }
    }
}

impl Default for EnrichmentGateway {
    fn default() -> Self {
        Self::disabled()
    }
}

/// At least one cased character and no lowercase ones.
fn is_all_uppercase(s: &str) -> bool {
    let mut cased = false;
    for c in s.chars() {
        if c.is_lowercase() {
            return false;
        }
        cased |= c.is_uppercase();
    }
    cased
}

fn city_prompt(text: &str) -> String {
    format!(
        "Analyze the following QR code content and extract ONLY the name of the city or \
         municipality, if one is present.\n\n\
         QR content: \"{text}\"\n\n\
         Reply with the city name alone, without any explanation. \
         If there is no clear city, reply with the single word NONE."
    )
}

fn name_prompt(candidate: &str, text: &str) -> String {
    format!(
        "The name \"{candidate}\" was extracted from a QR code whose full content is:\n\
         \"{text}\"\n\n\
         Check whether the name looks truncated or badly formatted. If it is incomplete, \
         complete it using the QR content; fix typos and formatting. Keep it in UPPERCASE if \
         it already is.\n\n\
         Reply ONLY with the corrected full name. If it cannot be improved, reply with the \
         name exactly as given."
    )
}


#[cfg(test)]
mod tests {
    use super::testing::{FailingModel, FixedModel, SlowModel};
    use super::*;

    fn gateway(model: impl LanguageModel + 'static) -> EnrichmentGateway {
        EnrichmentGateway::with_model(model, Duration::from_millis(100))
    }

    #[tokio::test]
    async fn test_disabled_gateway_is_noop() {
        let gateway = EnrichmentGateway::disabled();
        assert!(!gateway.is_enabled());
        assert_eq!(gateway.infer_city("anything").await, None);
        assert_eq!(gateway.refine_name("JUAN", "anything").await, "JUAN");
    }

    #[tokio::test]
    async fn test_infer_city() {
        let (model, calls) = FixedModel::new("  Malambo\n");
        assert_eq!(gateway(model).infer_city("...").await, Some("Malambo".to_string()));
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_infer_city_none_answer() {
        let (model, _) = FixedModel::new("NONE");
        assert_eq!(gateway(model).infer_city("...").await, None);

        let (model, _) = FixedModel::new("ninguna");
        assert_eq!(gateway(model).infer_city("...").await, None);

        let (model, _) = FixedModel::new("   ");
        assert_eq!(gateway(model).infer_city("...").await, None);
    }

    #[tokio::test]
    async fn test_infer_city_failure_is_absent() {
        assert_eq!(gateway(FailingModel).infer_city("...").await, None);
    }

    #[tokio::test]
    async fn test_infer_city_timeout_is_absent() {
        assert_eq!(gateway(SlowModel).infer_city("...").await, None);
    }

    #[tokio::test]
    async fn test_refine_name_keeps_uppercase() {
        let (model, _) = FixedModel::new("Juan Carlos Pérez Rojas");
        let refined = gateway(model).refine_name("JUAN CARLOS PEREZ ROJA", "...").await;
        assert_eq!(refined, "JUAN CARLOS PÉREZ ROJAS");
    }

    #[tokio::test]
    async fn test_refine_name_mixed_case_candidate() {
        let (model, _) = FixedModel::new("Ana María");
        assert_eq!(gateway(model).refine_name("Ana Maria", "...").await, "Ana María");
    }

    #[tokio::test]
    async fn test_refine_name_failure_returns_candidate() {
        assert_eq!(gateway(FailingModel).refine_name("ANA MARIA", "...").await, "ANA MARIA");
        assert_eq!(gateway(SlowModel).refine_name("ANA MARIA", "...").await, "ANA MARIA");

        let (model, _) = FixedModel::new("");
        assert_eq!(gateway(model).refine_name("ANA MARIA", "...").await, "ANA MARIA");
    }

    #[test]
    fn test_is_all_uppercase() {
        assert!(is_all_uppercase("JUAN PÉREZ 2"));
        assert!(!is_all_uppercase("Juan"));
        assert!(!is_all_uppercase("123"));
    }

    #[test]
    fn test_prompts_embed_payload() {
        assert!(city_prompt("6007MALAMBO").contains("6007MALAMBO"));
        let prompt = name_prompt("ANA", "123ANA4");
        assert!(prompt.contains("\"ANA\""));
        assert!(prompt.contains("123ANA4"));
    }
}
