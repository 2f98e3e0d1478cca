//! Email command - process every receipt inside an email container.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use console::style;
use tracing::info;

use kvitok_core::{primary_result, ReceiptPipeline};

use super::{load_config, progress_bar};
use crate::tesseract::TesseractEngine;

/// Arguments for the email command.
#[derive(Args)]
pub struct EmailArgs {
    /// Input email file (RFC822 / .eml)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report only the primary result instead of the whole batch
    #[arg(long)]
    first: bool,
}

pub fn run(args: EmailArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let data = fs::read(&args.input)?;
    let engine = TesseractEngine::new(&config.ocr);
    let pipeline = ReceiptPipeline::with_config(Arc::new(engine), config);

    let pb = progress_bar();
    let mut on_progress = |percent: u8, stage: &str| {
        pb.set_position(percent as u64);
        pb.set_message(stage.to_string());
    };

    let results = pipeline.process_email_container(&data, Some(&mut on_progress));
    pb.finish_with_message("Done");

    let succeeded = results.iter().filter(|r| r.is_success()).count();
    info!("{} of {} candidate(s) produced receipts", succeeded, results.len());

    let output = if args.first {
        match primary_result(&results) {
            Some(result) => serde_json::to_string_pretty(result)?,
            None => anyhow::bail!("no result produced"),
        }
    } else {
        serde_json::to_string_pretty(&results)?
    };

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

    if succeeded == 0 {
        let reason = results
            .first()
            .and_then(|r| r.error())
            .map(|e| e.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        anyhow::bail!("no receipts extracted: {}", reason);
    }

    Ok(())
}
