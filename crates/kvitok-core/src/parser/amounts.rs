//! Grand-total amount extraction.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::{
    AMOUNT, AMOUNT_LOOSE, GRAND_TOTAL_ITOGO, GRAND_TOTAL_K_OPLATE, GRAND_TOTAL_VSEGO, TAX_LABEL,
    TOTAL_LABEL,
};

/// Extract the grand total, trying rules in strict priority order:
/// explicit grand-total labels, then a generic total/amount line scan, then
/// the largest decimal-looking number under the sanity ceiling.
pub fn extract_amount(text: &str, max_amount: Decimal) -> Option<Decimal> {
    grand_total_label(text)
        .or_else(|| total_line_scan(text))
        .or_else(|| largest_amount(text, max_amount))
}

/// Rule 1: one of the three explicit "grand total" label variants.
fn grand_total_label(text: &str) -> Option<Decimal> {
    for pattern in [&*GRAND_TOTAL_ITOGO, &*GRAND_TOTAL_VSEGO, &*GRAND_TOTAL_K_OPLATE] {
        if let Some(caps) = pattern.captures(text) {
            if let Some(amount) = parse_amount(&caps[1]) {
                return Some(amount);
            }
        }
    }
    None
}

/// Rule 2: scan every line for a generic total/amount label.
///
/// Lines mentioning tax/VAT are skipped unless they also carry a total-style
/// label, so a tax sub-total is never mistaken for the grand total.
fn total_line_scan(text: &str) -> Option<Decimal> {
    for line in text.lines() {
        if TAX_LABEL.is_match(line) && !TOTAL_LABEL.is_match(line) {
            continue;
        }
        if !TOTAL_LABEL.is_match(line) {
            continue;
        }

        // The amount follows the label; take the last one on the line.
        if let Some(amount) = AMOUNT
            .captures_iter(line)
            .filter_map(|c| parse_amount(&c[1]))
            .last()
        {
            return Some(amount);
        }
    }
    None
}

/// Rule 3: every decimal-looking number in the document, largest value under
/// the sanity ceiling wins; values at or above it are treated as OCR noise.
fn largest_amount(text: &str, max_amount: Decimal) -> Option<Decimal> {
    AMOUNT_LOOSE
        .captures_iter(text)
        .filter_map(|c| parse_amount(&c[1]))
        .filter(|a| *a < max_amount && *a > Decimal::ZERO)
        .max()
}

/// Parse an amount string in either numeric convention
/// (`1 234,56` / `1234.56`), tolerating thousands separators.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    let normalized = if cleaned.contains(',') && !cleaned.contains('.') {
        cleaned.replace(',', ".")
    } else if cleaned.contains(',') && cleaned.contains('.') {
        // Both present: the later separator is the decimal one.
        let comma_pos = cleaned.rfind(',');
        let dot_pos = cleaned.rfind('.');
        match (comma_pos, dot_pos) {
            (Some(c), Some(d)) if c > d => cleaned.replace('.', "").replace(',', "."),
            _ => cleaned.replace(',', ""),
        }
    } else {
        cleaned
    };

    Decimal::from_str(&normalized).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn ceiling() -> Decimal {
        Decimal::from(1_000_000u32)
    }

    #[test]
    fn test_parse_amount_conventions() {
        assert_eq!(parse_amount("1 234,56"), Some(dec("1234.56")));
        assert_eq!(parse_amount("1234,56"), Some(dec("1234.56")));
        assert_eq!(parse_amount("1234.56"), Some(dec("1234.56")));
        assert_eq!(parse_amount("1,234.56"), Some(dec("1234.56")));
    }

    #[test]
    fn test_grand_total_label_wins() {
        let text = "НДС 20%: 205.00\nИТОГО К ОПЛАТЕ: 1230.00\nмусор 9999.99";
        assert_eq!(extract_amount(text, ceiling()), Some(dec("1230.00")));
    }

    #[test]
    fn test_grand_total_beats_tax() {
        // Both a tax amount and a grand total: the total must win even when
        // the tax line comes first and carries the bigger number.
        let text = "НАЛОГ: 2050.00\nВСЕГО К ОПЛАТЕ 1230,00";
        assert_eq!(extract_amount(text, ceiling()), Some(dec("1230.00")));
    }

    #[test]
    fn test_generic_total_line_skips_tax_lines() {
        let text = "НДС 20% 205.00\nИТОГ 1230.00";
        assert_eq!(extract_amount(text, ceiling()), Some(dec("1230.00")));
    }

    #[test]
    fn test_largest_amount_fallback() {
        let text = "Кофе 350.00\nКруассан 190.00";
        assert_eq!(extract_amount(text, ceiling()), Some(dec("350.00")));
    }

    #[test]
    fn test_sanity_ceiling_rejects_ocr_noise() {
        // 9999999.99 is above the ceiling and must lose to a sane value.
        let text = "Кофе 350.00 и шум 9999999.99";
        assert_eq!(extract_amount(text, ceiling()), Some(dec("350.00")));
    }

    #[test]
    fn test_no_amount_is_none() {
        assert_eq!(extract_amount("только текст", ceiling()), None);
    }
}
