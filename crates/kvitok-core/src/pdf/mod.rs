//! PDF page-text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::debug;

use crate::error::{PdfError, Result};

/// A loaded PDF ready for page-text extraction.
pub struct PdfText {
    raw_data: Vec<u8>,
    page_count: u32,
}

impl PdfText {
    /// Load a PDF from memory, validating its structure.
    ///
    /// PDFs encrypted with an empty password are decrypted transparently;
    /// anything else encrypted is rejected, as is a zero-page document.
    pub fn load(data: &[u8]) -> Result<Self> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        let raw_data = if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted.into());
            }
            debug!("decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("failed to save decrypted PDF: {}", e)))?;
            decrypted
        } else {
            data.to_vec()
        };

        let page_count = doc.get_pages().len() as u32;
        if page_count == 0 {
            return Err(PdfError::NoPages.into());
        }

        debug!("loaded PDF with {} pages", page_count);
        Ok(Self { raw_data, page_count })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Extract text page by page, concatenated in page order.
    ///
    /// Pages yielding no text contribute nothing (no placeholder inserted).
    /// `on_progress` receives a 0.0–1.0 fraction after each page.
    pub fn extract_text(&self, on_progress: &mut dyn FnMut(f32)) -> Result<String> {
        let pages = pdf_extract::extract_text_from_mem_by_pages(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;

        if pages.is_empty() {
            return Err(PdfError::NoPages.into());
        }

        let total = pages.len();
        let mut full_text = String::new();

        for (i, page_text) in pages.into_iter().enumerate() {
            let page_text = page_text.trim();
            if !page_text.is_empty() {
                if !full_text.is_empty() {
                    full_text.push('\n');
                }
                full_text.push_str(page_text);
            }
            on_progress((i + 1) as f32 / total as f32);
        }

        Ok(full_text)
    }
}
