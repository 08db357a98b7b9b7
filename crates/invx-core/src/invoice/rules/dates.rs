//! Date separator conversion and date parsing.

use chrono::NaiveDate;

use super::patterns::{DATE_DMY, DATE_YMD};

/// Convert a printed date to `/` separators ("10.01.2024" -> "10/01/2024").
pub fn normalize_date(raw: &str) -> String {
    raw.trim().replace(['.', '-'], "/")
}

/// Parse a day-first (`10/01/2024`, `10.01.24`) or ISO (`2024-01-10`) date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    if let Some(caps) = DATE_YMD.captures(s) {
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    let caps = DATE_DMY.captures(s)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year = parse_year(&caps[3])?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_year(s: &str) -> Option<i32> {
    let year: i32 = s.parse().ok()?;
    if s.len() == 2 {
        // Two-digit year: assume 2000s for 00-50, 1900s for 51-99
        Some(if year <= 50 { 2000 + year } else { 1900 + year })
    } else {
        Some(year)
    }
}
