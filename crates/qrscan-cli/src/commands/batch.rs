//! Batch scanning command for multiple images.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use chrono::{DateTime, Utc};
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, error, warn};

use qrscan_core::{QrProcessor, ScanOutcome};

use super::load_config;
use super::output::{format_outcome, OutputFormat};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "bmp", "gif", "tiff", "tif"];

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching input images
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Skip LLM enrichment
    #[arg(long)]
    no_enrich: bool,
}

/// Result of scanning a single file.
struct ScanResult {
    path: PathBuf,
    outcome: Option<ScanOutcome>,
    error: Option<String>,
    processing_time_ms: u64,
    scanned_at: DateTime<Utc>,
}

/// One row of the summary CSV.
#[derive(Serialize)]
struct SummaryRow<'a> {
    filename: &'a str,
    status: &'a str,
    name: &'a str,
    address: &'a str,
    city: &'a str,
    phone: &'a str,
    content_type: String,
    processing_time_ms: u64,
    scanned_at: String,
    error: &'a str,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<ExitCode> {
    let start = Instant::now();
    let config = load_config(config_path, args.no_enrich)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| is_image(p))
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to scan",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let processor = QrProcessor::from_config(&config)?;
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let scanned_at = Utc::now();

        let outcome = match fs::read(&path) {
            Ok(data) => Ok(processor.process_image(&data).await),
            Err(e) => Err(e),
        };

        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match outcome {
            Ok(outcome) => results.push(ScanResult {
                path,
                outcome: Some(outcome),
                error: None,
                processing_time_ms,
                scanned_at,
            }),
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to read {}: {}", path.display(), error_msg);
                    results.push(ScanResult {
                        path,
                        outcome: None,
                        error: Some(error_msg),
                        processing_time_ms,
                        scanned_at,
                    });
                } else {
                    error!("Failed to read {}: {}", path.display(), error_msg);
                    anyhow::bail!("Scanning failed: {}", error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    if let Some(output_dir) = &args.output_dir {
        for result in &results {
            if let Some(outcome) = &result.outcome {
                let output_name = result
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("scan");
                let output_path =
                    output_dir.join(format!("{}.{}", output_name, args.format.extension()));

                fs::write(&output_path, format_outcome(outcome, args.format)?)?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let detected = results
        .iter()
        .filter(|r| r.outcome.as_ref().is_some_and(|o| o.is_detected()))
        .count();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    println!();
    println!(
        "{} Scanned {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} detected, {} without a QR code, {} failed",
        style(detected).green(),
        style(results.len() - detected - failed.len()).yellow(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn is_image(path: &Path) -> bool {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

fn summary_row(result: &ScanResult) -> SummaryRow<'_> {
    let filename = result
        .path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("");
    let extracted = result.outcome.as_ref().and_then(|o| o.result());

    let status = match (&result.outcome, extracted) {
        (_, Some(_)) => "detected",
        (Some(_), None) => "not_detected",
        (None, _) => "error",
    };

    SummaryRow {
        filename,
        status,
        name: extracted.and_then(|r| r.name.as_deref()).unwrap_or(""),
        address: extracted.and_then(|r| r.address.as_deref()).unwrap_or(""),
        city: extracted.and_then(|r| r.city.as_deref()).unwrap_or(""),
        phone: extracted.and_then(|r| r.phone.as_deref()).unwrap_or(""),
        content_type: extracted
            .and_then(|r| r.content_type.as_ref())
            .map(|c| c.to_string())
            .unwrap_or_default(),
        processing_time_ms: result.processing_time_ms,
        scanned_at: result.scanned_at.to_rfc3339(),
        error: result.error.as_deref().unwrap_or(""),
    }
}

fn write_summary(path: &Path, results: &[ScanResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    for result in results {
        wtr.serialize(summary_row(result))?;
    }

    wtr.flush()?;
    Ok(())
}
