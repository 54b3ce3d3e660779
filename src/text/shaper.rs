use crate::{
    foundation::error::{AdframeError, AdframeResult},
    text::{TextMetrics, font::Typeface},
};

/// Shapes single lines of text with one registered [`Typeface`].
///
/// Holds Parley contexts, so it is per-render state: every compositing call builds its own.
pub struct TextShaper {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    family: String,
    weight: parley::style::FontWeight,
    style: parley::style::FontStyle,
    width: parley::style::FontWidth,
    font: vello_cpu::peniko::FontData,
}

impl TextShaper {
    pub fn new(typeface: &Typeface) -> AdframeResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let registered = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(typeface.bytes().to_vec()), None);
        // Collections register every face; shape with the one the rasterizer will draw.
        let (family_id, face) = registered
            .iter()
            .find_map(|(id, faces)| {
                faces
                    .iter()
                    .find(|f| f.index() == typeface.index())
                    .map(|f| (*id, f))
            })
            .ok_or_else(|| {
                AdframeError::font(format!(
                    "font data has no face at index {}",
                    typeface.index()
                ))
            })?;
        let (weight, style, width) = (face.weight(), face.style(), face.width());
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| AdframeError::font("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
            weight,
            style,
            width,
            font: typeface.font_data().clone(),
        })
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub(crate) fn font_data(&self) -> &vello_cpu::peniko::FontData {
        &self.font
    }

    /// Shape `text` as a single unbroken line at `font_size` pixels.
    pub fn layout_line(&mut self, text: &str, font_size: f32) -> parley::Layout<()> {
        let font_size = if font_size.is_finite() {
            font_size.max(1.0)
        } else {
            1.0
        };
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontWeight(self.weight));
        builder.push_default(parley::style::StyleProperty::FontStyle(self.style));
        builder.push_default(parley::style::StyleProperty::FontWidth(self.width));
        builder.push_default(parley::style::StyleProperty::FontSize(font_size));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}

impl TextMetrics for TextShaper {
    fn text_width(&mut self, text: &str, font_size: f64) -> f64 {
        if text.is_empty() {
            return 0.0;
        }
        f64::from(self.layout_line(text, font_size as f32).width())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/shaper.rs"]
mod tests;
