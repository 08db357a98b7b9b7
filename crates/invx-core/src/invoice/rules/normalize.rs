//! Whitespace normalization used for line matching.

/// Collapse every whitespace run to a single space and trim both ends.
pub fn normalize(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First line whose normalized form satisfies `pred`, with that normalized form.
pub(crate) fn find_line<'a, S, F>(lines: &'a [S], pred: F) -> Option<(&'a str, String)>
where
    S: AsRef<str>,
    F: Fn(&str) -> bool,
{
    lines.iter().map(|line| line.as_ref()).find_map(|line| {
        let normalized = normalize(line);
        pred(&normalized).then_some((line, normalized))
    })
}
