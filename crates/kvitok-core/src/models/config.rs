//! Configuration structures for the receipt pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{KvitokError, Result};

/// Main configuration for the kvitok pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KvitokConfig {
    /// Parser thresholds.
    pub parser: ParserConfig,

    /// OCR engine invocation settings.
    pub ocr: OcrConfig,

    /// Email container handling.
    pub email: EmailConfig,
}

/// Thresholds for the heuristic text parser.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Item prices below this value are treated as tax-line noise, not goods.
    pub min_item_price: f64,

    /// Amounts at or above this value are rejected as OCR noise.
    pub max_amount: f64,

    /// How many lines after a numbered item entry may hold its price.
    pub item_lookahead: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            min_item_price: 10.0,
            max_amount: 1_000_000.0,
            item_lookahead: 15,
        }
    }
}

/// OCR engine invocation settings (consumed by engine implementations).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Command used to invoke the OCR binary.
    pub command: String,

    /// Recognition languages passed to the engine.
    pub languages: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            command: "tesseract".to_string(),
            languages: "rus+eng".to_string(),
        }
    }
}

/// Email container handling limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    /// Maximum number of attachments processed from one message.
    pub max_attachments: usize,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self { max_attachments: 10 }
    }
}

impl KvitokConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| KvitokError::Config(e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| KvitokError::Config(e.to_string()))?;
        Ok(std::fs::write(path, content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trips_through_json() {
        let config = KvitokConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: KvitokConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.parser.item_lookahead, 15);
        assert_eq!(back.ocr.command, "tesseract");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: KvitokConfig = serde_json::from_str(r#"{"parser":{"min_item_price":5.0}}"#).unwrap();
        assert_eq!(config.parser.min_item_price, 5.0);
        assert_eq!(config.parser.max_amount, 1_000_000.0);
    }
}
