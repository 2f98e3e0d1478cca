//! Receipt data models: parser output, final result, and failure reasons.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How the purchase was paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash payment (наличные).
    Cash,
    /// Card / cashless payment (безналичными, карта).
    Card,
}

/// One purchased good or service on a receipt.
///
/// Invariants: `price > 0` and `name` is non-empty after trimming. Items keep
/// the order in which they appear in the source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item name as printed.
    pub name: String,
    /// Item price (total for the line).
    pub price: Decimal,
}

impl LineItem {
    /// Build a line item, rejecting empty names and non-positive prices.
    pub fn new(name: impl Into<String>, price: Decimal) -> Option<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() || price <= Decimal::ZERO {
            return None;
        }
        Some(Self { name, price })
    }
}

/// Raw output of the heuristic text parser.
///
/// Any field may be absent; absence is distinct from a parse error.
#[derive(Debug, Clone, Default)]
pub struct ParsedFields {
    /// Purchase date and time, if one was recognized (defaulted to "now" by
    /// the parser when no pattern matched).
    pub date: Option<NaiveDateTime>,
    /// Grand total amount.
    pub amount: Option<Decimal>,
    /// Merchant name exactly as found in the text, before canonicalization.
    pub merchant_raw: Option<String>,
    /// Payment method, only when a keyword matched (never a guess).
    pub payment_method: Option<PaymentMethod>,
    /// Line items in document order.
    pub items: Vec<LineItem>,
}

/// Final structured record for a successfully processed receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptData {
    /// Purchase date and time.
    pub date: NaiveDateTime,

    /// Grand total amount. Invariant: `amount > 0`.
    pub amount: Decimal,

    /// Human-readable transaction description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Canonicalized merchant display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,

    /// Payment method, if recognized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,

    /// Line items in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<LineItem>,
}

impl ReceiptData {
    /// Validate the record invariants, returning any issues found.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.amount <= Decimal::ZERO {
            issues.push(format!("amount must be positive, got {}", self.amount));
        }

        for item in &self.items {
            if item.price <= Decimal::ZERO {
                issues.push(format!("item '{}' has non-positive price", item.name));
            }
            if item.name.trim().is_empty() {
                issues.push("item with empty name".to_string());
            }
        }

        issues
    }
}

/// Reason a receipt could not be turned into a [`ReceiptData`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessingFailure {
    /// No positive grand total could be recovered.
    #[error("no amount found on the receipt")]
    NoAmountFound,

    /// The OCR/PDF engine could not produce text from the bytes.
    #[error("text extraction failed: {0}")]
    Extraction(String),

    /// The email container yielded neither attachments nor receipt text.
    #[error("no receipts found in the email")]
    NoReceiptsInEmail,

    /// The email container itself could not be parsed.
    #[error("email could not be parsed: {0}")]
    EmailParse(String),
}

// Failures cross the public boundary as plain strings.
impl Serialize for ProcessingFailure {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Outcome of processing one receipt file.
///
/// Raw text and QR payload are retained on failure so the host can offer a
/// manual-entry fallback with the evidence at hand.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReceiptProcessingResult {
    /// The file produced a valid structured record.
    Success {
        data: ReceiptData,
        #[serde(skip_serializing_if = "Option::is_none")]
        raw_text: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        qr_payload: Option<String>,
    },
    /// The file could not be processed; the reason and evidence are kept.
    Failure {
        error: ProcessingFailure,
        #[serde(skip_serializing_if = "Option::is_none")]
        raw_text: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        qr_payload: Option<String>,
    },
}

impl ReceiptProcessingResult {
    /// Whether this result is a success.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The structured record, if this result is a success.
    pub fn data(&self) -> Option<&ReceiptData> {
        match self {
            Self::Success { data, .. } => Some(data),
            Self::Failure { .. } => None,
        }
    }

    /// The failure reason, if this result is a failure.
    pub fn error(&self) -> Option<&ProcessingFailure> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error, .. } => Some(error),
        }
    }

    /// Raw extracted text, kept on both success and failure.
    pub fn raw_text(&self) -> Option<&str> {
        match self {
            Self::Success { raw_text, .. } | Self::Failure { raw_text, .. } => raw_text.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_line_item_rejects_invalid() {
        assert!(LineItem::new("", Decimal::from_str("10.00").unwrap()).is_none());
        assert!(LineItem::new("   ", Decimal::from_str("10.00").unwrap()).is_none());
        assert!(LineItem::new("Coffee", Decimal::ZERO).is_none());
        assert!(LineItem::new("Coffee", Decimal::from_str("-1").unwrap()).is_none());
    }

    #[test]
    fn test_line_item_trims_name() {
        let item = LineItem::new("  Coffee  ", Decimal::from_str("350.00").unwrap()).unwrap();
        assert_eq!(item.name, "Coffee");
    }

    #[test]
    fn test_validate_rejects_zero_amount() {
        let data = ReceiptData {
            date: chrono::NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            amount: Decimal::ZERO,
            description: None,
            merchant: None,
            payment_method: None,
            items: Vec::new(),
        };
        assert!(!data.validate().is_empty());
    }

    #[test]
    fn test_failure_serializes_error_as_string() {
        let result = ReceiptProcessingResult::Failure {
            error: ProcessingFailure::NoAmountFound,
            raw_text: Some("ИТОГО 0.00".to_string()),
            qr_payload: None,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "failure");
        assert_eq!(json["error"], "no amount found on the receipt");
        assert_eq!(json["raw_text"], "ИТОГО 0.00");
    }
}
