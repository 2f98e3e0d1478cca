//! Data models for the receipt pipeline.

pub mod config;
pub mod file;
pub mod receipt;

pub use config::{EmailConfig, KvitokConfig, OcrConfig, ParserConfig};
pub use file::{classify, FileKind, ReceiptFile};
pub use receipt::{
    LineItem, ParsedFields, PaymentMethod, ProcessingFailure, ReceiptData, ReceiptProcessingResult,
};
