//! Text extraction dispatch over classified receipt files.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{OcrError, Result};
use crate::models::{FileKind, ReceiptFile};
use crate::ocr::OcrEngine;
use crate::pdf::PdfText;

/// Obtains raw text from a classified file, reporting fractional progress.
///
/// Dispatches solely on the `kind` tag already assigned by the classifier;
/// routing files to the right kind is the orchestrator's job.
pub struct TextExtractor {
    ocr: Arc<dyn OcrEngine>,
}

impl TextExtractor {
    pub fn new(ocr: Arc<dyn OcrEngine>) -> Self {
        Self { ocr }
    }

    /// Extract raw text from the file.
    ///
    /// `on_progress` receives a 0.0–1.0 fraction as the underlying engine
    /// works. Fails with an extraction error when the engine cannot process
    /// the bytes.
    pub fn extract(&self, file: &ReceiptFile, on_progress: &mut dyn FnMut(f32)) -> Result<String> {
        match file.kind {
            FileKind::Image => {
                debug!("extracting text from image via {}", self.ocr.name());
                self.ocr.recognize(&file.data, on_progress)
            }
            FileKind::Pdf => {
                debug!("extracting text from PDF");
                let pdf = PdfText::load(&file.data)?;
                pdf.extract_text(on_progress)
            }
            FileKind::Text => {
                on_progress(1.0);
                Ok(String::from_utf8_lossy(&file.data).into_owned())
            }
            FileKind::Email => {
                // Containers are exploded before extraction; reaching here is
                // a routing bug upstream.
                warn!("email container reached the text extractor");
                Err(OcrError::InvalidImage(
                    "email containers must be split into attachments first".to_string(),
                )
                .into())
            }
        }
    }
}
