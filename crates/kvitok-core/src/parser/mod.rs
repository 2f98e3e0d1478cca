//! Heuristic extraction of structured fields from raw receipt text.
//!
//! Each field has its own rule module; `ReceiptParser` runs them all over a
//! normalized document and assembles the candidate fields. Fusion with
//! QR-decoded values happens later, in the pipeline.

mod amounts;
mod dates;
mod description;
mod items;
mod merchant;
pub(crate) mod patterns;
mod payment;

use chrono::Local;
use rust_decimal::Decimal;
use tracing::debug;

use crate::merchants::MerchantIndex;
use crate::models::{ParsedFields, ParserConfig};

pub use amounts::{extract_amount, parse_amount};
pub use dates::extract_date;
pub use description::{compose_description, genitive};
pub use items::extract_items;
pub use merchant::extract_merchant;
pub use payment::extract_payment_method;

const DEFAULT_MIN_ITEM_PRICE: u32 = 10;
const DEFAULT_MAX_AMOUNT: u32 = 1_000_000;
const DEFAULT_ITEM_LOOKAHEAD: usize = 15;

/// Rule-based receipt text parser.
pub struct ReceiptParser {
    merchants: MerchantIndex,
    min_item_price: Decimal,
    max_amount: Decimal,
    item_lookahead: usize,
}

impl ReceiptParser {
    pub fn new(merchants: MerchantIndex) -> Self {
        Self {
            merchants,
            min_item_price: Decimal::from(DEFAULT_MIN_ITEM_PRICE),
            max_amount: Decimal::from(DEFAULT_MAX_AMOUNT),
            item_lookahead: DEFAULT_ITEM_LOOKAHEAD,
        }
    }

    pub fn with_config(merchants: MerchantIndex, config: &ParserConfig) -> Self {
        Self {
            merchants,
            min_item_price: Decimal::from_f64_retain(config.min_item_price)
                .unwrap_or_else(|| Decimal::from(DEFAULT_MIN_ITEM_PRICE)),
            max_amount: Decimal::from_f64_retain(config.max_amount)
                .unwrap_or_else(|| Decimal::from(DEFAULT_MAX_AMOUNT)),
            item_lookahead: config.item_lookahead,
        }
    }

    /// Run every field rule over the document.
    ///
    /// Newlines are normalized first so the line-oriented rules see a
    /// consistent document. A date is always present in the output: when no
    /// pattern matches, the current local time stands in.
    pub fn parse(&self, text: &str) -> ParsedFields {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");

        let date = extract_date(&normalized).or_else(|| {
            debug!("no date pattern matched, defaulting to now");
            Some(Local::now().naive_local())
        });

        ParsedFields {
            date,
            amount: extract_amount(&normalized, self.max_amount),
            merchant_raw: extract_merchant(&normalized, &self.merchants),
            payment_method: extract_payment_method(&normalized),
            items: extract_items(&normalized, self.min_item_price, self.item_lookahead),
        }
    }

    /// Compose a description for already-parsed fields.
    pub fn describe(&self, fields: &ParsedFields) -> Option<String> {
        let merchant = fields
            .merchant_raw
            .as_deref()
            .map(|raw| self.merchants.normalize(raw));
        let category = merchant
            .as_deref()
            .and_then(|m| self.merchants.suggest_category(m));
        let item_names: Vec<String> = fields.items.iter().map(|i| i.name.clone()).collect();

        compose_description(&item_names, merchant.as_deref(), category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    use crate::models::PaymentMethod;

    fn parser() -> ReceiptParser {
        ReceiptParser::new(*MerchantIndex::builtin())
    }

    const SAMOKAT_RECEIPT: &str = "\
ООО УМНЫЙ РИТЕЙЛ
КАССОВЫЙ ЧЕК
15.01.2024 12:30
1: Кофе американо
Сумма 350.00
2: Круассан
Сумма 190.00
ИТОГО К ОПЛАТЕ: 540.00
БЕЗНАЛИЧНЫМИ 540.00";

    #[test]
    fn test_full_receipt() {
        let fields = parser().parse(SAMOKAT_RECEIPT);

        let date = fields.date.unwrap();
        assert_eq!((date.day(), date.month(), date.year()), (15, 1, 2024));
        assert_eq!((date.hour(), date.minute()), (12, 30));

        assert_eq!(fields.amount, Some(Decimal::from_str("540.00").unwrap()));
        assert_eq!(fields.merchant_raw.as_deref(), Some("Самокат"));
        assert_eq!(fields.payment_method, Some(PaymentMethod::Card));
        assert_eq!(fields.items.len(), 2);
        assert_eq!(fields.items[0].name, "Кофе американо");
    }

    #[test]
    fn test_describe_uses_category_and_declension() {
        let parser = parser();
        let fields = parser.parse(SAMOKAT_RECEIPT);
        assert_eq!(
            parser.describe(&fields).as_deref(),
            Some("Groceries from Самоката")
        );
    }

    #[test]
    fn test_date_defaults_to_now() {
        let fields = parser().parse("только текст без даты");
        assert!(fields.date.is_some());
    }

    #[test]
    fn test_crlf_input() {
        let fields = parser().parse("ИТОГ 100.00\r\nБЕЗНАЛИЧНЫМИ 100.00\r\n");
        assert_eq!(fields.amount, Some(Decimal::from_str("100.00").unwrap()));
        assert_eq!(fields.payment_method, Some(PaymentMethod::Card));
    }
}
