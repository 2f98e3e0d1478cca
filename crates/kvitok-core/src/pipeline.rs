//! End-to-end receipt processing: QR enrichment, text extraction, parsing,
//! field fusion, and validation, with coarse progress reporting.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use chrono::Local;
use tracing::{debug, info, warn};

use crate::email;
use crate::extract::TextExtractor;
use crate::merchants::MerchantIndex;
use crate::models::{
    FileKind, KvitokConfig, ParsedFields, ProcessingFailure, ReceiptData, ReceiptFile,
    ReceiptProcessingResult,
};
use crate::ocr::OcrEngine;
use crate::parser::{patterns, ReceiptParser};
use crate::qr::{self, FnsFragment};

/// Progress callback: percent complete (0–100) and a short stage label.
pub type ProgressFn<'a> = &'a mut dyn FnMut(u8, &str);

/// Wraps the optional host callback, enforcing monotonic percentages and
/// surviving a panicking callback.
struct ProgressSink<'a> {
    callback: Option<ProgressFn<'a>>,
    last: u8,
}

impl<'a> ProgressSink<'a> {
    fn new(callback: Option<ProgressFn<'a>>) -> Self {
        Self { callback, last: 0 }
    }

    fn report(&mut self, percent: u8, stage: &str) {
        let percent = percent.min(100).max(self.last);
        self.last = percent;
        if let Some(cb) = self.callback.as_mut() {
            if catch_unwind(AssertUnwindSafe(|| cb(percent, stage))).is_err() {
                warn!("progress callback panicked at stage '{}'", stage);
            }
        }
    }
}

/// Orchestrates the full path from raw file bytes to a structured result.
pub struct ReceiptPipeline {
    extractor: TextExtractor,
    parser: ReceiptParser,
    merchants: MerchantIndex,
    config: KvitokConfig,
    qr_enabled: bool,
}

impl ReceiptPipeline {
    pub fn new(ocr: Arc<dyn OcrEngine>) -> Self {
        Self::with_config(ocr, KvitokConfig::default())
    }

    pub fn with_config(ocr: Arc<dyn OcrEngine>, config: KvitokConfig) -> Self {
        let merchants = *MerchantIndex::builtin();
        Self {
            extractor: TextExtractor::new(ocr),
            parser: ReceiptParser::with_config(merchants, &config.parser),
            merchants,
            config,
            qr_enabled: true,
        }
    }

    /// Disable the QR detection stage (extracted text only).
    pub fn without_qr(mut self) -> Self {
        self.qr_enabled = false;
        self
    }

    /// Process one classified receipt file.
    ///
    /// Stages: QR attempt (images only, never blocking), text extraction,
    /// parse, fusion, validation. Progress is reported on a monotonic 0–100
    /// scale; the extraction stage maps the engine's own fraction onto the
    /// 10–70 window.
    pub fn process_receipt(
        &self,
        file: ReceiptFile,
        on_progress: Option<ProgressFn<'_>>,
    ) -> ReceiptProcessingResult {
        let mut progress = ProgressSink::new(on_progress);
        progress.report(0, "start");

        let (qr_payload, qr_fields) = if self.qr_enabled && file.kind == FileKind::Image {
            match qr::read_fiscal_qr(&file.data) {
                Some((payload, fragment)) => {
                    info!("fiscal QR decoded ({} bytes)", payload.len());
                    (Some(payload), fragment)
                }
                None => (None, None),
            }
        } else {
            (None, None)
        };
        progress.report(10, "qr");

        let raw_text = match self.extractor.extract(&file, &mut |fraction| {
            let percent = (10.0 + fraction.clamp(0.0, 1.0) * 60.0).round() as u8;
            progress.report(percent, "extract");
        }) {
            Ok(text) => text,
            Err(e) => {
                warn!("text extraction failed: {}", e);
                return ReceiptProcessingResult::Failure {
                    error: ProcessingFailure::Extraction(e.to_string()),
                    raw_text: None,
                    qr_payload,
                };
            }
        };
        progress.report(70, "extract");

        let fields = self.parser.parse(&raw_text);
        progress.report(75, "parse");

        let result = self.finish(fields, qr_fields, raw_text, qr_payload);
        progress.report(100, "done");
        result
    }

    /// Fuse, validate, and assemble the final record.
    fn finish(
        &self,
        fields: ParsedFields,
        qr_fields: Option<FnsFragment>,
        raw_text: String,
        qr_payload: Option<String>,
    ) -> ReceiptProcessingResult {
        let fused = fuse(fields, qr_fields.as_ref());

        let Some(amount) = fused.amount else {
            debug!("no amount recovered");
            return ReceiptProcessingResult::Failure {
                error: ProcessingFailure::NoAmountFound,
                raw_text: Some(raw_text),
                qr_payload,
            };
        };

        let merchant = fused
            .merchant_raw
            .as_deref()
            .map(|raw| self.merchants.normalize(raw));
        let description = self.parser.describe(&fused);
        let date = fused.date.unwrap_or_else(|| Local::now().naive_local());

        let data = ReceiptData {
            date,
            amount,
            description,
            merchant,
            payment_method: fused.payment_method,
            items: fused.items,
        };

        // Invariant enforcement (amount > 0, well-formed items) happens on
        // the assembled record, so a zero total is a failure, not a success.
        let issues = data.validate();
        if !issues.is_empty() {
            warn!("rejecting receipt: {}", issues.join("; "));
            return ReceiptProcessingResult::Failure {
                error: ProcessingFailure::NoAmountFound,
                raw_text: Some(raw_text),
                qr_payload,
            };
        }

        ReceiptProcessingResult::Success {
            data,
            raw_text: Some(raw_text),
            qr_payload,
        }
    }

    /// Process every candidate receipt inside an RFC822 email container.
    ///
    /// Qualifying attachments each run through the full per-file pipeline.
    /// With no attachments, a receipt-shaped body is processed as text. The
    /// returned vector is never empty: an unusable email yields a single
    /// failure entry.
    pub fn process_email_container(
        &self,
        raw: &[u8],
        mut on_progress: Option<ProgressFn<'_>>,
    ) -> Vec<ReceiptProcessingResult> {
        let content = match email::parse_container(raw) {
            Ok(content) => content,
            Err(e) => {
                return vec![ReceiptProcessingResult::Failure {
                    error: ProcessingFailure::EmailParse(e.to_string()),
                    raw_text: None,
                    qr_payload: None,
                }];
            }
        };

        let mut files = content.attachments;
        if files.len() > self.config.email.max_attachments {
            warn!(
                "email has {} attachments, processing the first {}",
                files.len(),
                self.config.email.max_attachments
            );
            files.truncate(self.config.email.max_attachments);
        }

        if files.is_empty() {
            if let Some(body) = content.body_text.filter(|t| has_receipt_markers(t)) {
                debug!("no attachments, processing receipt-shaped body text");
                files.push(ReceiptFile::with_kind(body.into_bytes(), FileKind::Text));
            }
        }

        if files.is_empty() {
            return vec![ReceiptProcessingResult::Failure {
                error: ProcessingFailure::NoReceiptsInEmail,
                raw_text: None,
                qr_payload: None,
            }];
        }

        files
            .into_iter()
            .map(|file| {
                let cb = on_progress
                    .as_mut()
                    .map(|cb| &mut **cb as &mut dyn FnMut(u8, &str));
                self.process_receipt(file, cb)
            })
            .collect()
    }
}

/// Per-field fusion of QR-decoded values with text-parsed candidates.
///
/// The fiscal QR is authoritative for timestamp and amount; every other
/// field comes from the text parser.
fn fuse(mut fields: ParsedFields, qr_fields: Option<&FnsFragment>) -> ParsedFields {
    if let Some(qr_fields) = qr_fields {
        if let Some(timestamp) = qr_fields.timestamp {
            fields.date = Some(timestamp);
        }
        if let Some(amount) = qr_fields.amount {
            fields.amount = Some(amount);
        }
    }
    fields
}

/// Whether free text looks like a typed-in receipt: a total-style label or
/// an amount-shaped number anywhere in the body.
fn has_receipt_markers(text: &str) -> bool {
    patterns::TOTAL_LABEL.is_match(text) || patterns::AMOUNT.is_match(text)
}

/// The result to report for a batch: first success, else first failure.
pub fn primary_result(results: &[ReceiptProcessingResult]) -> Option<&ReceiptProcessingResult> {
    results.iter().find(|r| r.is_success()).or_else(|| results.first())
}
