//! Interpret command - run extraction on payload text without an image.

use std::io::Read;
use std::process::ExitCode;

use clap::Args;

use qrscan_core::{QrProcessor, RawDecode};

use super::load_config;
use super::output::{format_explain, format_outcome, OutputFormat};

/// Arguments for the interpret command.
#[derive(Args)]
pub struct InterpretArgs {
    /// Decoded QR payload
    #[arg(required_unless_present = "stdin", conflicts_with = "stdin")]
    payload: Option<String>,

    /// Read the payload from standard input
    #[arg(long)]
    stdin: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Skip LLM enrichment
    #[arg(long)]
    no_enrich: bool,

    /// Show which rule matched each field
    #[arg(long)]
    explain: bool,
}

pub async fn run(args: InterpretArgs, config_path: Option<&str>) -> anyhow::Result<ExitCode> {
    let config = load_config(config_path, args.no_enrich)?;

    let payload = match args.payload {
        Some(payload) => payload,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    let processor = QrProcessor::from_config(&config)?;
    let outcome = processor.process_decoded(RawDecode::Scalar(payload)).await;

    if args.explain {
        if let Some(result) = outcome.result() {
            eprint!("{}", format_explain(&processor.extract(&result.payload)));
        }
    }

    println!("{}", format_outcome(&outcome, args.format)?);

    if outcome.is_detected() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
