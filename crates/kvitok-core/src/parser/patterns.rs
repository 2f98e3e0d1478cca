//! Shared regex patterns and the boilerplate-line predicate.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Date patterns, in strict priority order
    pub static ref DATE_DMY_TIME: Regex = Regex::new(
        r"\b(\d{2})\.(\d{2})\.(\d{4})[ T](\d{2}):(\d{2})"
    ).unwrap();

    pub static ref DATE_DMY: Regex = Regex::new(
        r"\b(\d{2})\.(\d{2})\.(\d{4})\b"
    ).unwrap();

    pub static ref DATE_YMD_TIME: Regex = Regex::new(
        r"\b(\d{4})-(\d{2})-(\d{2})[ T](\d{2}):(\d{2})"
    ).unwrap();

    pub static ref DATE_YMD: Regex = Regex::new(
        r"\b(\d{4})-(\d{2})-(\d{2})\b"
    ).unwrap();

    // Amounts: 1 234,56 / 1234.56, thousands groups with space or nbsp
    pub static ref AMOUNT: Regex = Regex::new(
        r"(\d{1,3}(?:[ \u{00a0}]?\d{3})*[.,]\d{2})\b"
    ).unwrap();

    // Loose "decimal-looking number" for the last-resort amount heuristic
    pub static ref AMOUNT_LOOSE: Regex = Regex::new(
        r"\b(\d+[.,]\d{1,2})\b"
    ).unwrap();

    // Grand-total labels, three variants, each with a trailing amount
    pub static ref GRAND_TOTAL_ITOGO: Regex = Regex::new(
        r"(?i)итого?\s*к\s*оплате\D{0,10}(\d{1,3}(?:[ \u{00a0}]?\d{3})*[.,]\d{2})"
    ).unwrap();

    pub static ref GRAND_TOTAL_VSEGO: Regex = Regex::new(
        r"(?i)всего\s*к\s*оплате\D{0,10}(\d{1,3}(?:[ \u{00a0}]?\d{3})*[.,]\d{2})"
    ).unwrap();

    pub static ref GRAND_TOTAL_K_OPLATE: Regex = Regex::new(
        r"(?i)\bк\s*оплате\D{0,10}(\d{1,3}(?:[ \u{00a0}]?\d{3})*[.,]\d{2})"
    ).unwrap();

    // Generic total/amount label for the per-line scan
    pub static ref TOTAL_LABEL: Regex = Regex::new(
        r"(?i)\b(?:итог|итого|всего|сумма|total|amount)\b"
    ).unwrap();

    // Tax labels; such lines are skipped during the total scan
    pub static ref TAX_LABEL: Regex = Regex::new(
        r"(?i)\b(?:ндс|налог|vat|tax)\b"
    ).unwrap();

    // Merchant extraction
    pub static ref DOMAIN_TOKEN: Regex = Regex::new(
        r"(?i)\b((?:[a-z0-9][a-z0-9-]*\.)+(?:ru|com|net|org|su|рф))\b"
    ).unwrap();

    pub static ref LEGAL_ENTITY: Regex = Regex::new(
        r#"(?i)\b(ООО|ИП)\s*[«"']?([А-ЯЁа-яёA-Za-z0-9][А-ЯЁа-яёA-Za-z0-9 .\-]{1,40})"#
    ).unwrap();

    // Line items
    pub static ref NUMBERED_ITEM: Regex = Regex::new(
        r"^\s*(\d{1,3})[:.)]\s*(\S.*)$"
    ).unwrap();

    pub static ref ITEM_TOTAL: Regex = Regex::new(
        r"(?i)\b(?:сумма|стоимость)\b\D{0,10}(\d{1,3}(?:[ \u{00a0}]?\d{3})*[.,]\d{2})\s*(?:₽|руб\.?|р\.)?\s*$"
    ).unwrap();

    pub static ref QTY_TIMES_PRICE: Regex = Regex::new(
        r"(?i)(\d+(?:[.,]\d+)?)\s*[x×х*]\s*(\d{1,3}(?:[ \u{00a0}]?\d{3})*[.,]\d{2})"
    ).unwrap();

    // «Сумма» is deliberately absent: it labels a single item's line total.
    pub static ref END_OF_ITEMS: Regex = Regex::new(
        r"(?i)^\s*(?:итог|итого|всего|оплата|ндс)\b"
    ).unwrap();

    pub static ref FLAT_ITEM: Regex = Regex::new(
        r"^(\S.*?\S)[ \t\u{00a0}]{2,}(\d{1,3}(?:[ \u{00a0}]?\d{3})*[.,]\d{2})\s*(?:₽|руб\.?|р\.)?\s*$"
    ).unwrap();
}

/// Keywords marking a line as receipt boilerplate rather than content.
const BOILERPLATE_KEYWORDS: &[&str] = &[
    "итог",
    "всего",
    "сумма",
    "ндс",
    "налог",
    "сдача",
    "наличн",
    "безнал",
    "карта",
    "картой",
    "кассир",
    "кассовый чек",
    "приход",
    "смена",
    "ккт",
    "инн",
    "рн ккт",
    "зн ккт",
    "спасибо",
    "добро пожаловать",
    "www.",
    "total",
    "subtotal",
    "vat",
    "tax",
    "cash",
    "card",
    "change",
];

/// Shared boilerplate-line predicate: totals, tax, payment, fiscal metadata,
/// pleasantries, and lines carrying no letters at all.
pub fn is_boilerplate_line(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return true;
    }

    if !trimmed.chars().any(|c| c.is_alphabetic()) {
        return true;
    }

    let lower = trimmed.to_lowercase();
    BOILERPLATE_KEYWORDS.iter().any(|k| lower.contains(k))
}
