/// Literal two-character escape (`\` followed by `n`) that upstream copy uses for a line break.
pub const LITERAL_LINE_BREAK: &str = "\\n";

/// Width of a run of text in pixels, at whatever font and size the implementor represents.
///
/// Any `FnMut(&str) -> f64` closure is a `TextMeasure`.
pub trait TextMeasure {
    fn measure(&mut self, text: &str) -> f64;
}

impl<F> TextMeasure for F
where
    F: FnMut(&str) -> f64,
{
    fn measure(&mut self, text: &str) -> f64 {
        self(text)
    }
}

/// One output line of [`wrap_text`]. Lines render in `line_index` order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WrappedLine {
    pub text: String,
    pub line_index: usize,
}

/// Replace the literal `\n` escape and CRLF with real newlines.
pub fn normalize_line_breaks(text: &str) -> String {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace(LITERAL_LINE_BREAK, "\n")
}

/// Greedy word wrap.
///
/// Hard breaks (real newlines and the literal `\n` escape) always start a new line. Within a
/// paragraph, words are appended while the measured line stays within `max_width`. A word that
/// is wider than `max_width` on its own is emitted alone and unsplit.
///
/// Empty input yields one empty line.
pub fn wrap_text<M>(text: &str, max_width: f64, measure: &mut M) -> Vec<WrappedLine>
where
    M: TextMeasure + ?Sized,
{
    let normalized = normalize_line_breaks(text);
    let mut lines: Vec<String> = Vec::new();

    for paragraph in normalized.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate = format!("{current} {word}");
            if measure.measure(&candidate) <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            }
        }
        lines.push(current);
    }

    lines
        .into_iter()
        .enumerate()
        .map(|(line_index, text)| WrappedLine { text, line_index })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/layout/wrap.rs"]
mod tests;
