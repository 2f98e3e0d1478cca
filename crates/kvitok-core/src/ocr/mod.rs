//! OCR engine seam.
//!
//! The pipeline does not ship a recognition model; it calls whatever engine
//! the host injects through [`OcrEngine`]. Engines are expected to block for
//! non-trivial wall-clock time and to report fractional progress as they go.

use crate::error::Result;

/// A pluggable OCR engine.
///
/// `on_progress` receives a 0.0–1.0 fraction proportional to the engine's
/// own recognition progress; engines that cannot report progress should call
/// it once with `1.0` on completion.
pub trait OcrEngine: Send + Sync {
    /// Recognize text in raw image bytes.
    fn recognize(&self, image: &[u8], on_progress: &mut dyn FnMut(f32)) -> Result<String>;

    /// Short engine name for diagnostics.
    fn name(&self) -> &str {
        "ocr"
    }
}
