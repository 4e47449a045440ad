//! Indonesian date formatting.
//!
//! Letters are dated in the village's own time zone (`Asia/Jakarta`), not in
//! whatever zone the server happens to run in.

use chrono::{Datelike, NaiveDate, Utc};
use chrono_tz::Asia::Jakarta;

const MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

const ROMAN_MONTHS: [&str; 12] = [
    "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X", "XI", "XII",
];

/// Today's date in Western Indonesian Time.
pub fn today() -> NaiveDate {
    Utc::now().with_timezone(&Jakarta).date_naive()
}

/// Indonesian month name for a 1-based month number.
///
/// Out-of-range months fall back to January.
pub fn month_name(month: u32) -> &'static str {
    MONTHS
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or(MONTHS[0])
}

/// Roman numeral for a 1-based month number, `"I"` when out of range.
pub fn roman_month(month: u32) -> &'static str {
    ROMAN_MONTHS
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or(ROMAN_MONTHS[0])
}

/// Long form: `19 Oktober 2026`.
pub fn format_long(date: NaiveDate) -> String {
    format!("{} {} {}", date.day(), month_name(date.month()), date.year())
}

/// Short form used in document copy names: `19/10/2026`.
pub fn format_short(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}
