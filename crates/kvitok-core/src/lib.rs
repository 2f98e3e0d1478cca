//! Core library for receipt data extraction.
//!
//! This crate provides:
//! - File classification (image / PDF / email / plain text)
//! - Fiscal QR payload decoding and parsing
//! - Text extraction (OCR dispatch, PDF text, email attachments)
//! - Russian receipt field extraction (date, amount, merchant, payment, items)
//! - The end-to-end processing pipeline with progress reporting

pub mod email;
pub mod error;
pub mod extract;
pub mod merchants;
pub mod models;
pub mod ocr;
pub mod parser;
pub mod pdf;
pub mod pipeline;
pub mod qr;

pub use error::{EmailError, KvitokError, OcrError, PdfError, Result};
pub use models::{
    classify, FileKind, KvitokConfig, LineItem, ParsedFields, PaymentMethod, ProcessingFailure,
    ReceiptData, ReceiptFile, ReceiptProcessingResult,
};
pub use email::{body_text, extract_attachments, parse_container, EmailContent, EmailServiceResponse};
pub use extract::TextExtractor;
pub use merchants::{normalize_merchant_name, suggest_category_for, MerchantIndex, MerchantRecord};
pub use ocr::OcrEngine;
pub use parser::ReceiptParser;
pub use pdf::PdfText;
pub use pipeline::{primary_result, ProgressFn, ReceiptPipeline};
pub use qr::{parse_fiscal_payload, read_fiscal_qr, read_qr, FnsFragment};
