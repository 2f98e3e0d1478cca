//! Human-readable description synthesis.
//!
//! Merchant names are declined into the Russian genitive case so the
//! "from <merchant>" phrasing reads naturally. Known merchants come from a
//! fixed table; everything else goes through suffix rules.

/// Irregular or table-worthy genitive forms for the built-in merchants.
const GENITIVE_TABLE: &[(&str, &str)] = &[
    ("Самокат", "Самоката"),
    ("Пятёрочка", "Пятёрочки"),
    ("Магнит", "Магнита"),
    ("Перекрёсток", "Перекрёстка"),
    ("ВкусВилл", "ВкусВилла"),
    ("Лента", "Ленты"),
    ("Яндекс Еда", "Яндекс Еды"),
    ("Додо Пицца", "Додо Пиццы"),
    ("Вкусно и точка", "Вкусно и точки"),
    ("Лукойл", "Лукойла"),
];

/// Compose a one-line purchase description.
///
/// A single item speaks for itself. Several items are summarized by the
/// merchant's category when one is known, falling back to a generic phrase.
pub fn compose_description(
    items: &[String],
    merchant: Option<&str>,
    category: Option<&str>,
) -> Option<String> {
    match items.len() {
        0 => merchant.map(|m| format!("Purchase at {m}")),
        1 => Some(items[0].clone()),
        n => Some(match (category, merchant) {
            (Some(cat), Some(m)) => format!("{} from {}", cat, genitive(m)),
            (None, Some(m)) => format!("Purchase from {}", genitive(m)),
            (_, None) => format!("Purchase ({n} items)"),
        }),
    }
}

/// Decline a merchant name into the genitive case.
///
/// Table lookup first; otherwise suffix rules on the final letter. Latin
/// names and abbreviations are left unchanged.
pub fn genitive(name: &str) -> String {
    let trimmed = name.trim();
    if let Some((_, declined)) = GENITIVE_TABLE.iter().find(|(nominative, _)| *nominative == trimmed) {
        return (*declined).to_string();
    }

    let mut chars: Vec<char> = trimmed.chars().collect();
    let Some(&last) = chars.last() else {
        return trimmed.to_string();
    };

    match last {
        'й' | 'Й' => {
            chars.pop();
            chars.push('я');
        }
        'ь' | 'Ь' => {
            chars.pop();
            chars.push('я');
        }
        'а' | 'А' => {
            // -ка/-га/-ха and hushers take «и», the rest take «ы».
            let stem_last = chars.get(chars.len().wrapping_sub(2)).copied();
            chars.pop();
            match stem_last.map(|c| c.to_lowercase().next().unwrap_or(c)) {
                Some('г' | 'к' | 'х' | 'ж' | 'ч' | 'ш' | 'щ') => chars.push('и'),
                _ => chars.push('ы'),
            }
        }
        'я' | 'Я' => {
            chars.pop();
            chars.push('и');
        }
        c if is_russian_consonant(c) => chars.push('а'),
        // Other vowels and non-Cyrillic endings stay as-is.
        _ => return trimmed.to_string(),
    }

    chars.into_iter().collect()
}

fn is_russian_consonant(c: char) -> bool {
    matches!(
        c.to_lowercase().next().unwrap_or(c),
        'б' | 'в' | 'г' | 'д' | 'ж' | 'з' | 'к' | 'л' | 'м' | 'н' | 'п' | 'р' | 'с' | 'т'
            | 'ф' | 'х' | 'ц' | 'ч' | 'ш' | 'щ'
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_item_is_its_own_description() {
        let items = names(&["Кофе американо"]);
        assert_eq!(
            compose_description(&items, Some("Самокат"), Some("Groceries")),
            Some("Кофе американо".to_string())
        );
    }

    #[test]
    fn test_multiple_items_with_category() {
        let items = names(&["Кофе", "Круассан"]);
        assert_eq!(
            compose_description(&items, Some("Самокат"), Some("Groceries")),
            Some("Groceries from Самоката".to_string())
        );
    }

    #[test]
    fn test_multiple_items_without_category() {
        let items = names(&["Кофе", "Круассан"]);
        assert_eq!(
            compose_description(&items, Some("Кофейня Дружба"), None),
            Some("Purchase from Кофейня Дружбы".to_string())
        );
    }

    #[test]
    fn test_multiple_items_without_merchant() {
        let items = names(&["Кофе", "Круассан", "Сок"]);
        assert_eq!(
            compose_description(&items, None, None),
            Some("Purchase (3 items)".to_string())
        );
    }

    #[test]
    fn test_no_items_with_merchant() {
        assert_eq!(
            compose_description(&[], Some("Самокат"), Some("Groceries")),
            Some("Purchase at Самокат".to_string())
        );
    }

    #[test]
    fn test_no_items_no_merchant() {
        assert_eq!(compose_description(&[], None, None), None);
    }

    #[test]
    fn test_genitive_table_entries() {
        assert_eq!(genitive("Самокат"), "Самоката");
        assert_eq!(genitive("Пятёрочка"), "Пятёрочки");
        assert_eq!(genitive("Лента"), "Ленты");
        assert_eq!(genitive("Вкусно и точка"), "Вкусно и точки");
    }

    #[test]
    fn test_genitive_suffix_rules() {
        assert_eq!(genitive("Магнолия"), "Магнолии");
        assert_eq!(genitive("Ромашка"), "Ромашки");
        assert_eq!(genitive("Берёза"), "Берёзы");
        assert_eq!(genitive("Гастроном"), "Гастронома");
        assert_eq!(genitive("Огонь"), "Огоня");
        assert_eq!(genitive("Чай"), "Чая");
    }

    #[test]
    fn test_latin_names_unchanged() {
        assert_eq!(genitive("Ozon"), "Ozon");
        assert_eq!(genitive("Wildberries"), "Wildberries");
        assert_eq!(genitive("coffeehouse.ru"), "coffeehouse.ru");
    }
}
