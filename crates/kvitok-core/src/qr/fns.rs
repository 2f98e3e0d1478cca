//! Fiscal-authority QR payload parsing.
//!
//! Russian point-of-sale receipts carry a QR code with an
//! ampersand-delimited payload certifying the purchase, e.g.
//! `t=20240115T1230&s=1234.56&fn=9282000100223794&i=141637&fp=4011455998&n=1`.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Structured fragment recovered from a fiscal QR payload.
///
/// Every field is individually optional; the fragment is merged into the
/// final result and then discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FnsFragment {
    /// Purchase timestamp (`t=` token).
    pub timestamp: Option<NaiveDateTime>,
    /// Total amount (`s=` token).
    pub amount: Option<Decimal>,
    /// Fiscal registry identifier (`fn=` token).
    pub registry_id: Option<String>,
    /// Fiscal document identifier (`i=` token).
    pub document_id: Option<String>,
    /// Fiscal signature (`fp=` token).
    pub signature: Option<String>,
}

impl FnsFragment {
    /// Whether the fragment carries anything at all.
    pub fn is_empty(&self) -> bool {
        self.timestamp.is_none()
            && self.amount.is_none()
            && self.registry_id.is_none()
            && self.document_id.is_none()
            && self.signature.is_none()
    }
}

/// Parse a fiscal QR payload into a fragment.
///
/// Malformed payloads and payloads with no recognized keys yield `None`
/// rather than an error; this is best-effort enrichment.
pub fn parse_fiscal_payload(payload: &str) -> Option<FnsFragment> {
    let mut fragment = FnsFragment::default();

    for pair in payload.trim().split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }

        match key.trim() {
            "t" => fragment.timestamp = parse_compact_timestamp(value),
            "s" => fragment.amount = Decimal::from_str(value).ok().filter(|a| *a > Decimal::ZERO),
            "fn" => fragment.registry_id = Some(value.to_string()),
            "i" => fragment.document_id = Some(value.to_string()),
            "fp" => fragment.signature = Some(value.to_string()),
            _ => {}
        }
    }

    if fragment.is_empty() {
        None
    } else {
        Some(fragment)
    }
}

/// Explode a compact `YYYYMMDDTHHMM[SS]` token into a timestamp.
fn parse_compact_timestamp(token: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(token, "%Y%m%dT%H%M%S")
        .or_else(|_| NaiveDateTime::parse_from_str(token, "%Y%m%dT%H%M"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_full_payload() {
        let fragment =
            parse_fiscal_payload("t=20240115T1230&s=1234.56&fn=9282000100223794&i=141637&fp=4011455998&n=1")
                .unwrap();

        assert_eq!(
            fragment.timestamp,
            Some(
                NaiveDate::from_ymd_opt(2024, 1, 15)
                    .unwrap()
                    .and_hms_opt(12, 30, 0)
                    .unwrap()
            )
        );
        assert_eq!(fragment.amount, Some(Decimal::from_str("1234.56").unwrap()));
        assert_eq!(fragment.registry_id.as_deref(), Some("9282000100223794"));
        assert_eq!(fragment.document_id.as_deref(), Some("141637"));
        assert_eq!(fragment.signature.as_deref(), Some("4011455998"));
    }

    #[test]
    fn test_parse_timestamp_with_seconds() {
        let fragment = parse_fiscal_payload("t=20200727T174700&s=4720.00").unwrap();
        assert_eq!(
            fragment.timestamp,
            Some(
                NaiveDate::from_ymd_opt(2020, 7, 27)
                    .unwrap()
                    .and_hms_opt(17, 47, 0)
                    .unwrap()
            )
        );
    }

    #[test]
    fn test_malformed_tokens_are_skipped() {
        let fragment = parse_fiscal_payload("t=notadate&s=12.00").unwrap();
        assert_eq!(fragment.timestamp, None);
        assert_eq!(fragment.amount, Some(Decimal::from_str("12.00").unwrap()));
    }

    #[test]
    fn test_unrecognized_payload_is_none() {
        assert_eq!(parse_fiscal_payload("hello world"), None);
        assert_eq!(parse_fiscal_payload("x=1&y=2"), None);
        assert_eq!(parse_fiscal_payload(""), None);
    }

    #[test]
    fn test_zero_amount_is_dropped() {
        let fragment = parse_fiscal_payload("s=0.00&i=5").unwrap();
        assert_eq!(fragment.amount, None);
        assert_eq!(fragment.document_id.as_deref(), Some("5"));
    }
}
