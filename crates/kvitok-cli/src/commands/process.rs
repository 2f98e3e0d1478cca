//! Process command - extract data from a single receipt file.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use kvitok_core::models::FileKind;
use kvitok_core::{classify, primary_result, ReceiptFile, ReceiptPipeline, ReceiptProcessingResult};

use super::{load_config, progress_bar};
use crate::tesseract::TesseractEngine;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (image, PDF, .eml, or plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Declared media type, overriding file-name classification
    #[arg(long)]
    media_type: Option<String>,

    /// OCR command, overriding the configured one
    #[arg(long)]
    ocr_cmd: Option<String>,

    /// OCR recognition languages (tesseract syntax, e.g. "rus+eng")
    #[arg(long)]
    lang: Option<String>,

    /// Skip QR detection and rely on extracted text only
    #[arg(long)]
    text_only: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let mut config = load_config(config_path)?;
    if let Some(cmd) = &args.ocr_cmd {
        config.ocr.command = cmd.clone();
    }
    if let Some(lang) = &args.lang {
        config.ocr.languages = lang.clone();
    }

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let data = fs::read(&args.input)?;
    let file_name = args.input.file_name().and_then(|n| n.to_str());
    let kind = classify(args.media_type.as_deref(), file_name);

    info!("Processing {} as {:?}", args.input.display(), kind);

    let engine = TesseractEngine::new(&config.ocr);
    if kind == FileKind::Image && !engine.available() {
        anyhow::bail!(
            "OCR engine '{}' not found. Install tesseract or point ocr.command at it.",
            config.ocr.command
        );
    }

    let mut pipeline = ReceiptPipeline::with_config(Arc::new(engine), config);
    if args.text_only {
        pipeline = pipeline.without_qr();
    }

    let pb = progress_bar();
    let mut on_progress = |percent: u8, stage: &str| {
        pb.set_position(percent as u64);
        pb.set_message(stage.to_string());
    };

    let results = if kind == FileKind::Email {
        pipeline.process_email_container(&data, Some(&mut on_progress))
    } else {
        let file = ReceiptFile::new(data, args.media_type.as_deref(), file_name);
        vec![pipeline.process_receipt(file, Some(&mut on_progress))]
    };

    pb.finish_with_message("Done");

    // A single-file invocation reports one result.
    let Some(result) = primary_result(&results) else {
        anyhow::bail!("no result produced");
    };

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(result)?,
        OutputFormat::Text => format_text(result),
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

    debug!("Total processing time: {:?}", start.elapsed());

    if let Some(error) = result.error() {
        anyhow::bail!("processing failed: {}", error);
    }

    Ok(())
}

pub fn format_text(result: &ReceiptProcessingResult) -> String {
    let Some(data) = result.data() else {
        return match result.error() {
            Some(error) => format!("Failed: {}", error),
            None => "Failed".to_string(),
        };
    };

    let mut output = String::new();
    output.push_str(&format!("Date:    {}\n", data.date));
    output.push_str(&format!("Amount:  {}\n", data.amount));
    if let Some(merchant) = &data.merchant {
        output.push_str(&format!("Merchant: {}\n", merchant));
    }
    if let Some(method) = data.payment_method {
        output.push_str(&format!("Payment: {:?}\n", method));
    }
    if let Some(description) = &data.description {
        output.push_str(&format!("Description: {}\n", description));
    }
    if !data.items.is_empty() {
        output.push_str("Items:\n");
        for item in &data.items {
            output.push_str(&format!("  {}  {}\n", item.name, item.price));
        }
    }

    output
}
