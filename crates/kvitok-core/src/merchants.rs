//! Static merchant knowledge base: alias resolution and category hints.

use lazy_static::lazy_static;

/// Reference data for one known merchant.
///
/// Read-only; the table is baked into the binary and never mutated.
#[derive(Debug, Clone, Copy)]
pub struct MerchantRecord {
    /// Canonical display name.
    pub canonical_name: &'static str,
    /// Legal entity names the merchant prints on receipts.
    pub legal_names: &'static [&'static str],
    /// Web domains associated with the merchant.
    pub domains: &'static [&'static str],
    /// Free-form keywords that identify the merchant.
    pub keywords: &'static [&'static str],
    /// Suggested spending category.
    pub category: Option<&'static str>,
}

/// Known merchants, checked in this exact order.
static MERCHANTS: &[MerchantRecord] = &[
    MerchantRecord {
        canonical_name: "Самокат",
        legal_names: &["ООО УМНЫЙ РИТЕЙЛ", "УМНЫЙ РИТЕЙЛ"],
        domains: &["samokat.ru"],
        keywords: &["самокат", "samokat"],
        category: Some("Groceries"),
    },
    MerchantRecord {
        canonical_name: "Пятёрочка",
        legal_names: &["ООО АГРОТОРГ", "АГРОТОРГ"],
        domains: &["5ka.ru", "pyaterochka.ru"],
        keywords: &["пятёрочка", "пятерочка"],
        category: Some("Groceries"),
    },
    MerchantRecord {
        canonical_name: "Магнит",
        legal_names: &["АО ТАНДЕР", "ТАНДЕР"],
        domains: &["magnit.ru"],
        keywords: &["магнит"],
        category: Some("Groceries"),
    },
    MerchantRecord {
        canonical_name: "Перекрёсток",
        legal_names: &["ТД ПЕРЕКРЕСТОК", "ТОРГОВЫЙ ДОМ ПЕРЕКРЕСТОК"],
        domains: &["perekrestok.ru"],
        keywords: &["перекрёсток", "перекресток"],
        category: Some("Groceries"),
    },
    MerchantRecord {
        canonical_name: "ВкусВилл",
        legal_names: &["ООО ВКУСВИЛЛ"],
        domains: &["vkusvill.ru"],
        keywords: &["вкусвилл", "vkusvill"],
        category: Some("Groceries"),
    },
    MerchantRecord {
        canonical_name: "Лента",
        legal_names: &["ООО ЛЕНТА"],
        domains: &["lenta.com"],
        keywords: &["гипермаркет лента", "супермаркет лента"],
        category: Some("Groceries"),
    },
    MerchantRecord {
        canonical_name: "Ozon",
        legal_names: &["ООО ИНТЕРНЕТ РЕШЕНИЯ"],
        domains: &["ozon.ru"],
        keywords: &["ozon", "озон"],
        category: Some("Shopping"),
    },
    MerchantRecord {
        canonical_name: "Wildberries",
        legal_names: &["ООО ВАЙЛДБЕРРИЗ"],
        domains: &["wildberries.ru"],
        keywords: &["wildberries", "вайлдберриз"],
        category: Some("Shopping"),
    },
    MerchantRecord {
        canonical_name: "Яндекс Еда",
        legal_names: &["ООО ЯНДЕКС.ЕДА"],
        domains: &["eda.yandex.ru", "eda.yandex"],
        keywords: &["яндекс еда", "яндекс.еда", "yandex eda"],
        category: Some("Restaurants"),
    },
    MerchantRecord {
        canonical_name: "Додо Пицца",
        legal_names: &["ООО ДОДО ФРАНЧАЙЗИНГ"],
        domains: &["dodopizza.ru"],
        keywords: &["додо пицца", "dodo pizza"],
        category: Some("Restaurants"),
    },
    MerchantRecord {
        canonical_name: "Вкусно и точка",
        legal_names: &["ООО СИСТЕМА ПБО"],
        domains: &["vkusnoitochka.ru"],
        keywords: &["вкусно и точка", "вкусно — и точка"],
        category: Some("Restaurants"),
    },
    MerchantRecord {
        canonical_name: "Лукойл",
        legal_names: &["ООО ЛУКОЙЛ-ЦЕНТРНЕФТЕПРОДУКТ"],
        domains: &["lukoil.ru"],
        keywords: &["лукойл", "lukoil"],
        category: Some("Transport"),
    },
];

/// Lookup over the static merchant table.
///
/// Loaded once at process start and passed explicitly into the parser rather
/// than reached as ambient global state, so the parser stays testable with
/// injected fixtures.
#[derive(Debug, Clone, Copy)]
pub struct MerchantIndex {
    records: &'static [MerchantRecord],
}

lazy_static! {
    static ref BUILTIN: MerchantIndex = MerchantIndex { records: MERCHANTS };
}

impl MerchantIndex {
    /// The process-wide built-in table.
    pub fn builtin() -> &'static MerchantIndex {
        &BUILTIN
    }

    /// Build an index over a caller-supplied table (test fixtures).
    pub fn from_records(records: &'static [MerchantRecord]) -> Self {
        Self { records }
    }

    /// Records in iteration order.
    pub fn records(&self) -> &'static [MerchantRecord] {
        self.records
    }

    /// Map a raw merchant spelling to its canonical display name.
    ///
    /// Matching order: keyword aliases (case-insensitive substring) first,
    /// then legal-name aliases, then domain aliases; first match wins. No
    /// match returns the trimmed input unchanged — an unknown merchant is
    /// still usable as a display string.
    pub fn normalize(&self, raw: &str) -> String {
        let haystack = raw.to_lowercase();

        for record in self.records {
            if record.keywords.iter().any(|k| haystack.contains(&k.to_lowercase())) {
                return record.canonical_name.to_string();
            }
        }

        for record in self.records {
            if record
                .legal_names
                .iter()
                .any(|l| haystack.contains(&l.to_lowercase()))
            {
                return record.canonical_name.to_string();
            }
        }

        for record in self.records {
            if record.domains.iter().any(|d| haystack.contains(d)) {
                return record.canonical_name.to_string();
            }
        }

        raw.trim().to_string()
    }

    /// Suggested spending category for a canonical merchant name.
    pub fn suggest_category(&self, canonical_name: &str) -> Option<&'static str> {
        let wanted = canonical_name.trim().to_lowercase();
        self.records
            .iter()
            .find(|r| r.canonical_name.to_lowercase() == wanted)
            .and_then(|r| r.category)
    }

    /// Find the record whose canonical name matches, if any.
    pub fn find(&self, canonical_name: &str) -> Option<&'static MerchantRecord> {
        let wanted = canonical_name.trim().to_lowercase();
        self.records
            .iter()
            .find(|r| r.canonical_name.to_lowercase() == wanted)
    }
}

/// Canonicalize a raw merchant name against the built-in table.
pub fn normalize_merchant_name(raw: Option<&str>) -> Option<String> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    Some(MerchantIndex::builtin().normalize(raw))
}

/// Suggested category for a merchant, via the built-in table.
pub fn suggest_category_for(merchant: Option<&str>) -> Option<String> {
    MerchantIndex::builtin()
        .suggest_category(merchant?)
        .map(|c| c.to_string())
}
