//! A single input document as an ordered list of lines.

/// Lines of extracted invoice text, borrowed from the text they were split from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document<'a> {
    lines: Vec<&'a str>,
}

impl<'a> Document<'a> {
    /// Split text on `\n` and `\r\n`.
    pub fn from_text(text: &'a str) -> Self {
        Self {
            lines: text.lines().collect(),
        }
    }

    pub fn from_lines(lines: Vec<&'a str>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
