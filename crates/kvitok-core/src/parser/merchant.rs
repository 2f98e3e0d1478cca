//! Merchant name extraction.

use crate::merchants::MerchantIndex;

use super::patterns::{is_boilerplate_line, DOMAIN_TOKEN, LEGAL_ENTITY};

/// Domains that appear on receipts but never identify the merchant:
/// fiscal-authority portals, OFD operators, and ISPs.
const DOMAIN_DENYLIST: &[&str] = &[
    "nalog.ru",
    "nalog.gov.ru",
    "ofd.ru",
    "platformaofd.ru",
    "taxcom.ru",
    "1-ofd.ru",
    "ofd.yandex.ru",
    "check.ofd.ru",
    "beeline.ru",
    "mts.ru",
    "megafon.ru",
    "tele2.ru",
];

/// Extract the merchant name, trying strategies in order; each is attempted
/// only if the previous one found nothing.
pub fn extract_merchant(text: &str, index: &MerchantIndex) -> Option<String> {
    known_merchant(text, index)
        .or_else(|| domain_token(text))
        .or_else(|| legal_entity(text))
        .or_else(|| first_content_line(text))
}

/// Strategy 1: known-merchant keyword/legal-name scan against the fixed
/// table — the most reliable signal, so it is checked before anything else.
fn known_merchant(text: &str, index: &MerchantIndex) -> Option<String> {
    let haystack = text.to_lowercase();

    for record in index.records() {
        let matched = record
            .keywords
            .iter()
            .chain(record.legal_names.iter())
            .any(|alias| haystack.contains(&alias.to_lowercase()));
        if matched {
            return Some(record.canonical_name.to_string());
        }
    }
    None
}

/// Strategy 2: a `word.tld` token, excluding fiscal/ISP domains.
fn domain_token(text: &str) -> Option<String> {
    for caps in DOMAIN_TOKEN.captures_iter(text) {
        let domain = caps[1].to_lowercase();
        let domain = domain.strip_prefix("www.").unwrap_or(&domain);
        if DOMAIN_DENYLIST.iter().any(|d| domain.ends_with(d)) {
            continue;
        }
        return Some(domain.to_string());
    }
    None
}

/// Strategy 3: a legal-entity marker (`ООО`, `ИП`) followed by a name.
fn legal_entity(text: &str) -> Option<String> {
    let caps = LEGAL_ENTITY.captures(text)?;
    let marker = caps[1].to_uppercase();
    let name = caps[2].trim().trim_matches(|c| c == '"' || c == '»' || c == '«');
    if name.is_empty() {
        return None;
    }
    Some(format!("{} {}", marker, name))
}

/// Strategy 4: the first non-empty, non-boilerplate line of the document.
fn first_content_line(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .find(|l| !is_boilerplate_line(l))
        .map(|l| l.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn index() -> &'static MerchantIndex {
        MerchantIndex::builtin()
    }

    #[test]
    fn test_known_keyword_beats_everything() {
        let text = "ООО РОГА И КОПЫТА\nsamokat.ru\nчек самокат";
        assert_eq!(extract_merchant(text, index()), Some("Самокат".to_string()));
    }

    #[test]
    fn test_legal_name_from_table() {
        let text = "КАССОВЫЙ ЧЕК\nООО УМНЫЙ РИТЕЙЛ\nИТОГО 100.00";
        assert_eq!(extract_merchant(text, index()), Some("Самокат".to_string()));
    }

    #[test]
    fn test_domain_token_excludes_fiscal_domains() {
        let text = "проверить чек: nalog.ru\ncoffeehouse.ru";
        assert_eq!(extract_merchant(text, index()), Some("coffeehouse.ru".to_string()));
    }

    #[test]
    fn test_legal_entity_prefix() {
        let text = "КАССОВЫЙ ЧЕК\nООО \"РОМАШКА\"\nИТОГО 100.00";
        assert_eq!(extract_merchant(text, index()), Some("ООО РОМАШКА".to_string()));
    }

    #[test]
    fn test_first_content_line_fallback() {
        let text = "КАССОВЫЙ ЧЕК №12\nКофейня Дружба\nИТОГО 100.00";
        assert_eq!(extract_merchant(text, index()), Some("Кофейня Дружба".to_string()));
    }

    #[test]
    fn test_nothing_found() {
        let text = "ИТОГО 100.00\nНДС 20.00";
        assert_eq!(extract_merchant(text, index()), None);
    }
}
