//! Common regex patterns for invoice extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Locale-formatted number right at the start of a slice: 1.234,56
    pub static ref LEADING_AMOUNT: Regex = Regex::new(
        r"^\s*([0-9.,]+)"
    ).unwrap();

    // Amount after separator conversion: digits with at most one decimal point
    pub static ref CANONICAL_AMOUNT: Regex = Regex::new(
        r"^-?[0-9]+(\.[0-9]+)?$"
    ).unwrap();

    // DD/MM/YYYY, DD.MM.YYYY or DD-MM-YYYY (two-digit years allowed)
    pub static ref DATE_DMY: Regex = Regex::new(
        r"^([0-9]{1,2})[./\-]([0-9]{1,2})[./\-]([0-9]{4}|[0-9]{2})$"
    ).unwrap();

    // YYYY-MM-DD or YYYY/MM/DD
    pub static ref DATE_YMD: Regex = Regex::new(
        r"^([0-9]{4})[./\-]([0-9]{1,2})[./\-]([0-9]{1,2})$"
    ).unwrap();
}
