//! Colon-delimited label extraction ("Label: value" and "Label: a / b").

use super::normalize::find_line;
use super::FieldExtractor;

/// Text after the first colon of a line.
fn after_colon(line: &str) -> Option<&str> {
    line.split_once(':').map(|(_, rest)| rest)
}

fn line_containing<'a, S: AsRef<str>>(lines: &'a [S], label: &str) -> Option<&'a str> {
    if label.is_empty() {
        return None;
    }
    find_line(lines, |normalized| normalized.contains(label)).map(|(line, _)| line)
}

/// Value after the colon on the first line containing `label`.
///
/// Returns an empty string when no line carries the label or the line has
/// no colon.
pub fn extract_value<S: AsRef<str>>(lines: &[S], label: &str) -> String {
    line_containing(lines, label)
        .and_then(after_colon)
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

/// Two values separated by `/` after the colon on the first line containing `label`.
///
/// Only the first slash splits, so a date written with slashes stays whole in
/// the second half.
pub fn extract_pair<S: AsRef<str>>(lines: &[S], label: &str) -> (String, String) {
    let Some(rest) = line_containing(lines, label).and_then(after_colon) else {
        return (String::new(), String::new());
    };

    match rest.split_once('/') {
        Some((first, second)) => (first.trim().to_string(), second.trim().to_string()),
        None => (rest.trim().to_string(), String::new()),
    }
}

/// Value after the colon on the first line whose normalized form starts with `prefix`.
pub fn extract_prefixed<S: AsRef<str>>(lines: &[S], prefix: &str) -> String {
    if prefix.is_empty() {
        return String::new();
    }
    find_line(lines, |normalized| normalized.starts_with(prefix))
        .and_then(|(line, _)| after_colon(line))
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

/// Single "Label: value" field.
#[derive(Debug, Clone)]
pub struct LabelExtractor {
    label: String,
}

impl LabelExtractor {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into() }
    }
}

impl FieldExtractor for LabelExtractor {
    type Output = String;

    fn extract<S: AsRef<str>>(&self, lines: &[S]) -> String {
        extract_value(lines, &self.label)
    }
}

/// "Label: number / date" field pair.
#[derive(Debug, Clone)]
pub struct PairExtractor {
    label: String,
}

impl PairExtractor {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into() }
    }
}

impl FieldExtractor for PairExtractor {
    type Output = (String, String);

    fn extract<S: AsRef<str>>(&self, lines: &[S]) -> (String, String) {
        extract_pair(lines, &self.label)
    }
}

/// Field on a line that starts with a fixed prefix.
#[derive(Debug, Clone)]
pub struct PrefixExtractor {
    prefix: String,
}

impl PrefixExtractor {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }
}

impl FieldExtractor for PrefixExtractor {
    type Output = String;

    fn extract<S: AsRef<str>>(&self, lines: &[S]) -> String {
        extract_prefixed(lines, &self.prefix)
    }
}
