//! Multi-line block extraction anchored on an exact closing line.

use super::normalize::normalize;
use super::FieldExtractor;

/// Join the `span` lines ending at the first line equal to `anchor` (after trimming).
///
/// Lines are normalized and joined with `", "`. When the anchor sits closer
/// to the top of the document than `span - 1` lines, the block starts at the
/// first line instead. Returns an empty string if the anchor never appears.
pub fn extract_block<S: AsRef<str>>(lines: &[S], anchor: &str, span: usize) -> String {
    if anchor.is_empty() {
        return String::new();
    }

    let Some(end) = lines.iter().position(|line| line.as_ref().trim() == anchor) else {
        return String::new();
    };

    let start = (end + 1).saturating_sub(span.max(1));
    lines[start..=end]
        .iter()
        .map(|line| normalize(line.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Customer address block closed by a country line.
#[derive(Debug, Clone)]
pub struct BlockExtractor {
    anchor: String,
    span: usize,
}

impl BlockExtractor {
    pub fn new(anchor: impl Into<String>, span: usize) -> Self {
        Self {
            anchor: anchor.into(),
            span,
        }
    }
}

impl FieldExtractor for BlockExtractor {
    type Output = String;

    fn extract<S: AsRef<str>>(&self, lines: &[S]) -> String {
        extract_block(lines, &self.anchor, self.span)
    }
}
