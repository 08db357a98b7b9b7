//! Invoice total extraction and Italian-style amount conversion.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use super::normalize::find_line;
use super::patterns::{CANONICAL_AMOUNT, LEADING_AMOUNT};
use super::FieldExtractor;

/// Amount text following `marker` on the first line that contains it.
///
/// The number is returned as printed (e.g. `"1.234,56"`). Returns an empty
/// string when no line has the marker or no number follows it.
pub fn extract_marked_amount<S: AsRef<str>>(lines: &[S], marker: &str) -> String {
    if marker.is_empty() {
        return String::new();
    }

    let Some((_, normalized)) = find_line(lines, |normalized| normalized.contains(marker)) else {
        return String::new();
    };

    normalized
        .match_indices(marker)
        .find_map(|(pos, _)| LEADING_AMOUNT.captures(&normalized[pos + marker.len()..]))
        .map(|caps| caps[1].to_string())
        .unwrap_or_default()
}

/// Parse an amount using `.` for thousands and `,` for decimals (e.g. "1.234,56").
///
/// The result is rounded half away from zero and always carries two fraction
/// digits. Empty or malformed input yields `None`, never zero.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let canonical = s.replace('.', "").replacen(',', ".", 1);
    if !CANONICAL_AMOUNT.is_match(&canonical) {
        return None;
    }

    let mut amount = Decimal::from_str(&canonical)
        .ok()?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    // Values near the Decimal limit cannot hold two fraction digits.
    amount.rescale(2);
    (amount.scale() == 2).then_some(amount)
}

/// Format amount in US style (1,234.56).
pub fn format_amount_us(amount: Decimal) -> String {
    let mut amount = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    amount.rescale(2);

    let s = amount.abs().to_string();
    let Some((integer_part, decimal_part)) = s.split_once('.') else {
        return s;
    };

    // Add thousand separators
    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(*c);
    }

    let sign = if amount.is_sign_negative() && !amount.is_zero() { "-" } else { "" };
    format!("{}{}.{}", sign, formatted, decimal_part)
}

/// Invoice total printed after a fixed marker, parsed to a decimal.
#[derive(Debug, Clone)]
pub struct MarkedAmountExtractor {
    marker: String,
}

impl MarkedAmountExtractor {
    pub fn new(marker: impl Into<String>) -> Self {
        Self { marker: marker.into() }
    }

    /// The amount exactly as printed in the document.
    pub fn extract_raw<S: AsRef<str>>(&self, lines: &[S]) -> String {
        extract_marked_amount(lines, &self.marker)
    }
}

impl FieldExtractor for MarkedAmountExtractor {
    type Output = Option<Decimal>;

    fn extract<S: AsRef<str>>(&self, lines: &[S]) -> Option<Decimal> {
        parse_amount(&self.extract_raw(lines))
    }
}
