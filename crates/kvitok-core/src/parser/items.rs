//! Line item extraction.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::LineItem;

use super::amounts::parse_amount;
use super::patterns::{
    is_boilerplate_line, END_OF_ITEMS, FLAT_ITEM, ITEM_TOTAL, NUMBERED_ITEM, QTY_TIMES_PRICE,
};

/// Extract line items in document order.
///
/// The primary strategy reads numbered entries (`N: <name>`) whose price
/// appears within the next `lookahead` lines. The flat-pair strategy runs
/// only when numbering found nothing. Prices below `min_price` are rejected
/// as noise (likely tax lines, not goods).
pub fn extract_items(text: &str, min_price: Decimal, lookahead: usize) -> Vec<LineItem> {
    let lines: Vec<&str> = text.lines().collect();

    let items = numbered_items(&lines, min_price, lookahead);
    if !items.is_empty() {
        return items;
    }

    flat_items(&lines, min_price)
}

fn numbered_items(lines: &[&str], min_price: Decimal, lookahead: usize) -> Vec<LineItem> {
    let mut items = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let Some(caps) = NUMBERED_ITEM.captures(line) else {
            continue;
        };
        let name = caps[2].trim();

        let mut price = None;
        for candidate in lines.iter().take((i + 1 + lookahead).min(lines.len())).skip(i + 1) {
            // The item block ends at the next numbered entry or a summary marker.
            if NUMBERED_ITEM.is_match(candidate) || END_OF_ITEMS.is_match(candidate) {
                break;
            }
            if let Some(p) = price_from_line(candidate) {
                price = Some(p);
                break;
            }
        }

        if let Some(price) = price {
            if price >= min_price {
                if let Some(item) = LineItem::new(name, price) {
                    items.push(item);
                }
            } else {
                debug!("dropping item '{}' with below-threshold price {}", name, price);
            }
        }
    }

    items
}

/// Price of one item block line: an explicit line-total label, or a
/// quantity-times-unit-price expression.
fn price_from_line(line: &str) -> Option<Decimal> {
    if let Some(caps) = ITEM_TOTAL.captures(line) {
        return parse_amount(&caps[1]);
    }

    if let Some(caps) = QTY_TIMES_PRICE.captures(line) {
        let quantity = parse_amount(&caps[1]);
        let unit_price = parse_amount(&caps[2])?;
        // OCR noise can produce absurd quantities; an overflowing product
        // falls back to the unit price rather than panicking.
        return match quantity {
            Some(q) if q > Decimal::ZERO => {
                Some(unit_price.checked_mul(q).unwrap_or(unit_price))
            }
            _ => Some(unit_price),
        };
    }

    None
}

/// Secondary strategy: `<name>   <amount>` lines as flat name/price pairs,
/// skipping boilerplate via the shared predicate.
fn flat_items(lines: &[&str], min_price: Decimal) -> Vec<LineItem> {
    let mut items = Vec::new();

    for line in lines {
        if is_boilerplate_line(line) {
            continue;
        }
        let Some(caps) = FLAT_ITEM.captures(line.trim_end()) else {
            continue;
        };

        let name = caps[1].trim();
        let Some(price) = parse_amount(&caps[2]) else {
            continue;
        };
        if price < min_price {
            continue;
        }
        if let Some(item) = LineItem::new(name, price) {
            items.push(item);
        }
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn extract(text: &str) -> Vec<LineItem> {
        extract_items(text, dec("10.00"), 15)
    }

    #[test]
    fn test_numbered_items_with_line_totals() {
        let text = "1: Кофе американо\nСумма 350.00\n2: Круассан\nСумма 190.00\nИТОГО 540.00";
        let items = extract(text);
        assert_eq!(
            items,
            vec![
                LineItem::new("Кофе американо", dec("350.00")).unwrap(),
                LineItem::new("Круассан", dec("190.00")).unwrap(),
            ]
        );
    }

    #[test]
    fn test_numbered_item_with_quantity() {
        let text = "1: Молоко 3.2%\n2 x 89.50\nИТОГО 179.00";
        let items = extract(text);
        assert_eq!(items, vec![LineItem::new("Молоко 3.2%", dec("179.00")).unwrap()]);
    }

    #[test]
    fn test_absurd_quantity_falls_back_to_unit_price() {
        // 2^96 - 1 parses as a valid Decimal; the product would overflow.
        let text = "1: Товар\n79228162514264337593543950335 x 999999.99";
        let items = extract(text);
        assert_eq!(items, vec![LineItem::new("Товар", dec("999999.99")).unwrap()]);
    }

    #[test]
    fn test_lookahead_stops_at_next_entry() {
        // The first entry has no price before the second begins.
        let text = "1: Без цены\n2: Хлеб\nСумма 45.00";
        let items = extract(text);
        assert_eq!(items, vec![LineItem::new("Хлеб", dec("45.00")).unwrap()]);
    }

    #[test]
    fn test_flat_pairs_when_no_numbering() {
        let text = "Coffee   350.00\nНДС 20% 58.33\nИТОГО 350.00";
        let items = extract(text);
        assert_eq!(items, vec![LineItem::new("Coffee", dec("350.00")).unwrap()]);
    }

    #[test]
    fn test_flat_pair_below_threshold_is_noise() {
        let items = extract("Пакет   5.00");
        assert!(items.is_empty());
    }

    #[test]
    fn test_document_order_is_preserved() {
        let text = "Яблоки   120.00\nХлеб   45.00\nМолоко   89.50";
        let names: Vec<_> = extract(text).into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["Яблоки", "Хлеб", "Молоко"]);
    }

    #[test]
    fn test_no_items() {
        assert!(extract("ИТОГО 100.00").is_empty());
    }
}
