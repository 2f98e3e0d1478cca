//! Date extraction from receipt text.

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

use super::patterns::{DATE_DMY, DATE_DMY_TIME, DATE_YMD, DATE_YMD_TIME};

/// Layout of the capture groups within one date pattern.
#[derive(Clone, Copy)]
enum DateLayout {
    DayFirst { with_time: bool },
    YearFirst { with_time: bool },
}

/// Extract the purchase date from text.
///
/// Patterns are tried in strict order: `DD.MM.YYYY HH:MM`, `DD.MM.YYYY`,
/// `YYYY-MM-DD HH:MM`, `YYYY-MM-DD`. Within each pattern, every match in the
/// document is considered in order; a match with invalid numeric components
/// (month 13, hour 25) is discarded without masking a later valid one.
pub fn extract_date(text: &str) -> Option<NaiveDateTime> {
    let rules: [(&Regex, DateLayout); 4] = [
        (&DATE_DMY_TIME, DateLayout::DayFirst { with_time: true }),
        (&DATE_DMY, DateLayout::DayFirst { with_time: false }),
        (&DATE_YMD_TIME, DateLayout::YearFirst { with_time: true }),
        (&DATE_YMD, DateLayout::YearFirst { with_time: false }),
    ];

    for (pattern, layout) in rules {
        for caps in pattern.captures_iter(text) {
            if let Some(date) = build_date(&caps, layout) {
                return Some(date);
            }
        }
    }

    None
}

fn build_date(caps: &regex::Captures<'_>, layout: DateLayout) -> Option<NaiveDateTime> {
    let num = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());

    let (year, month, day, with_time) = match layout {
        DateLayout::DayFirst { with_time } => (num(3)? as i32, num(2)?, num(1)?, with_time),
        DateLayout::YearFirst { with_time } => (num(1)? as i32, num(2)?, num(3)?, with_time),
    };

    let date = NaiveDate::from_ymd_opt(year, month, day)?;

    if with_time {
        date.and_hms_opt(num(4)?, num(5)?, 0)
    } else {
        date.and_hms_opt(0, 0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d).unwrap().and_hms_opt(h, mi, 0).unwrap()
    }

    #[test]
    fn test_dmy_with_time() {
        assert_eq!(
            extract_date("Чек от 15.01.2024 12:30 смена 12"),
            Some(dt(2024, 1, 15, 12, 30))
        );
    }

    #[test]
    fn test_dmy_without_time() {
        assert_eq!(extract_date("дата: 15.01.2024"), Some(dt(2024, 1, 15, 0, 0)));
    }

    #[test]
    fn test_ymd_with_time() {
        assert_eq!(extract_date("2024-01-15 09:05"), Some(dt(2024, 1, 15, 9, 5)));
    }

    #[test]
    fn test_ymd_without_time() {
        assert_eq!(extract_date("issued 2024-01-15"), Some(dt(2024, 1, 15, 0, 0)));
    }

    #[test]
    fn test_recovers_date_embedded_anywhere() {
        let text = "строка\nмусор 99 15.01.2024 ещё мусор\nстрока";
        assert_eq!(extract_date(text), Some(dt(2024, 1, 15, 0, 0)));
    }

    #[test]
    fn test_dmy_wins_over_ymd() {
        let text = "15.01.2024 и 2023-12-31";
        assert_eq!(extract_date(text), Some(dt(2024, 1, 15, 0, 0)));
    }

    #[test]
    fn test_invalid_month_does_not_crash() {
        // 45.13.2024 is not a date; the YMD pattern is tried next.
        assert_eq!(extract_date("45.13.2024 but 2024-02-29 ok"), Some(dt(2024, 2, 29, 0, 0)));
    }

    #[test]
    fn test_noise_does_not_mask_later_date_of_same_shape() {
        // An invalid pseudo-date earlier in the document must not hide a
        // valid one matching the same pattern.
        let text = "шум 45.13.2024 мусор\nдата: 15.01.2024\nИТОГО 100.00";
        assert_eq!(extract_date(text), Some(dt(2024, 1, 15, 0, 0)));
    }

    #[test]
    fn test_no_date_is_none() {
        assert_eq!(extract_date("ИТОГО 100.00"), None);
    }
}
