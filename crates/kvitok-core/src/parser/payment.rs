//! Payment method classification.

use crate::models::PaymentMethod;

/// Card/cashless keywords. Checked before the cash bucket: «безналичными»
/// contains «наличн», so order matters.
const CARD_KEYWORDS: &[&str] = &[
    "безнал",
    "картой",
    "карта",
    "эквайринг",
    "card",
    "visa",
    "mastercard",
    "contactless",
];

/// Cash keywords.
const CASH_KEYWORDS: &[&str] = &["наличн", "нал.", "cash"];

/// Classify the payment method from receipt text.
///
/// Two-bucket keyword classifier; unmatched text yields `None`, never a
/// guess.
pub fn extract_payment_method(text: &str) -> Option<PaymentMethod> {
    let haystack = text.to_lowercase();

    if CARD_KEYWORDS.iter().any(|k| haystack.contains(k)) {
        return Some(PaymentMethod::Card);
    }
    if CASH_KEYWORDS.iter().any(|k| haystack.contains(k)) {
        return Some(PaymentMethod::Cash);
    }
    None
}
