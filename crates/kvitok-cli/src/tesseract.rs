//! Tesseract CLI OCR engine.
//!
//! Invokes the system `tesseract` binary on a temporary file and captures
//! stdout. Requires tesseract (with the configured language packs) to be
//! installed on the host.

use std::process::Command;

use tracing::debug;

use kvitok_core::error::{OcrError, Result};
use kvitok_core::models::OcrConfig;
use kvitok_core::OcrEngine;

pub struct TesseractEngine {
    command: String,
    languages: String,
}

impl TesseractEngine {
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            command: config.command.clone(),
            languages: config.languages.clone(),
        }
    }

    /// Whether the configured tesseract binary can be invoked at all.
    pub fn available(&self) -> bool {
        Command::new(&self.command)
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }
}

impl OcrEngine for TesseractEngine {
    fn recognize(&self, image: &[u8], on_progress: &mut dyn FnMut(f32)) -> Result<String> {
        on_progress(0.1);

        // Tesseract wants a file path; the extension is irrelevant since
        // leptonica sniffs the format from the bytes.
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("receipt.png");
        std::fs::write(&input, image)?;

        on_progress(0.3);
        debug!("running {} -l {}", self.command, self.languages);

        let output = Command::new(&self.command)
            .arg(&input)
            .arg("stdout")
            .arg("-l")
            .arg(&self.languages)
            .output()
            .map_err(|e| {
                OcrError::EngineUnavailable(format!(
                    "failed to run '{}' (is tesseract installed?): {}",
                    self.command, e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::Recognition(format!(
                "tesseract exited with {}: {}",
                output.status.code().unwrap_or(-1),
                stderr.trim()
            ))
            .into());
        }

        on_progress(1.0);
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn name(&self) -> &str {
        "tesseract"
    }
}
