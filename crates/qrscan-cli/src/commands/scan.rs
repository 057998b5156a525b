//! Scan command - read a QR code from a single image.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use qrscan_core::QrProcessor;

use super::load_config;
use super::output::{format_explain, format_outcome, OutputFormat};

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Image file containing a QR code
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

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

pub async fn run(args: ScanArgs, config_path: Option<&str>) -> anyhow::Result<ExitCode> {
    let start = Instant::now();
    let config = load_config(config_path, args.no_enrich)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Scanning file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Loading image...");

    let data = fs::read(&args.input)?;
    let processor = QrProcessor::from_config(&config)?;

    pb.set_message("Decoding QR code...");
    let outcome = processor.process_image(&data).await;

    pb.finish_and_clear();

    if args.explain {
        if let Some(result) = outcome.result() {
            eprintln!("{}", style("Rule matches:").bold());
            eprint!("{}", format_explain(&processor.extract(&result.payload)));
            eprintln!();
        }
    }

    let output = format_outcome(&outcome, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    if outcome.is_detected() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
