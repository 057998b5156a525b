//! Rendering of scan outcomes.

use qrscan_core::models::result::NOT_DETECTED_MESSAGE;
use qrscan_core::payload::FieldMatches;
use qrscan_core::{ExtractionResult, ScanOutcome};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Markdown chat-style reply
    Markdown,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "md",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn format_outcome(outcome: &ScanOutcome, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(outcome)?),
        OutputFormat::Markdown => Ok(match outcome.result() {
            Some(result) => format_markdown(result),
            None => format!("❌ *{}*", capitalize(NOT_DETECTED_MESSAGE)),
        }),
        OutputFormat::Text => Ok(match outcome.result() {
            Some(result) => format_text(result),
            None => format!("{}\n", capitalize(NOT_DETECTED_MESSAGE)),
        }),
    }
}

fn format_markdown(result: &ExtractionResult) -> String {
    let mut parts = vec!["*The following data was detected in this QR code:*".to_string()];

    if let Some(name) = &result.name {
        parts.push(format!("✅ Name: {}", name));
    }
    if let Some(address) = &result.address {
        parts.push(format!("💠 Address: {}", address));
    }
    if let Some(city) = &result.city {
        parts.push(format!("🏙️ City: {}", city));
    }
    if let Some(phone) = &result.phone {
        parts.push(format!("📱 Mobile number (personal QR codes only): {}", phone));
    }
    if let Some(content_type) = &result.content_type {
        parts.push(format!("ℹ️ Content type: {}", content_type));
    }

    parts.join("\n\n")
}

fn format_text(result: &ExtractionResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("Payload: {}\n", result.payload));
    output.push('\n');

    let fields = [
        ("Name", &result.name),
        ("Address", &result.address),
        ("City", &result.city),
        ("Phone", &result.phone),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            output.push_str(&format!("{:<9}{}\n", format!("{}:", label), value));
        }
    }

    if let Some(content_type) = &result.content_type {
        output.push_str(&format!("Type:    {}\n", content_type));
    }

    output
}

/// One line per field naming the rule that matched, before enrichment.
pub fn format_explain(matches: &FieldMatches) -> String {
    let mut output = String::new();

    for (field, m) in matches.iter() {
        match m {
            Some(m) => {
                let span = m
                    .position
                    .map(|(start, end)| format!(" at {}..{}", start, end))
                    .unwrap_or_default();
                output.push_str(&format!("{:<8} {:?} via {}{}\n", field, m.value, m.strategy, span));
            }
            None => output.push_str(&format!("{:<8} -\n", field)),
        }
    }

    output
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
