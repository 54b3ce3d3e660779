pub(crate) mod font;
pub(crate) mod shaper;

/// Font-aware text measurement used by style planning.
///
/// Implemented by [`shaper::TextShaper`] for real fonts and by [`MonospaceMetrics`] for tests
/// and dry runs that have no font at hand.
pub trait TextMetrics {
    /// Advance width of `text` set on one line at `font_size` pixels.
    fn text_width(&mut self, text: &str, font_size: f64) -> f64;
}

/// Synthetic metrics where every character advances `advance_em * font_size`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMetrics {
    pub advance_em: f64,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self { advance_em: 0.6 }
    }
}

impl TextMetrics for MonospaceMetrics {
    fn text_width(&mut self, text: &str, font_size: f64) -> f64 {
        text.chars().count() as f64 * self.advance_em * font_size
    }
}
