//! Error types for the kvitok-core library.

use thiserror::Error;

/// Main error type for the kvitok library.
#[derive(Error, Debug)]
pub enum KvitokError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Email container error.
    #[error("email error: {0}")]
    Email(#[from] EmailError),

    /// Image processing error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The engine could not be invoked at all.
    #[error("OCR engine unavailable: {0}")]
    EngineUnavailable(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Invalid image format or dimensions.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

/// Errors related to email container handling.
#[derive(Error, Debug)]
pub enum EmailError {
    /// The bytes are not a parseable RFC822 message.
    #[error("failed to parse email: {0}")]
    Parse(String),

    /// An attachment body could not be decoded.
    #[error("failed to decode attachment {name}: {reason}")]
    AttachmentDecode { name: String, reason: String },
}

/// Result type for the kvitok library.
pub type Result<T> = std::result::Result<T, KvitokError>;
