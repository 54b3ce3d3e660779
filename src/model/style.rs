use std::{fmt, str::FromStr};

use crate::foundation::error::AdframeError;

/// Visual treatment applied to a creative. Purely a selector: dispatch happens in
/// [`crate::plan_style`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StyleVariant {
    /// Minimal stacked hook / key messages / CTA with dark backing plates.
    SimpleOverlay,
    /// Poster look: large shadowed hook plus a CTA pill.
    Polished,
    /// Short-form caption look: stroked hook over a slightly rotated frame.
    NativeCaption,
    /// Testimonial card with avatar, handle and key messages.
    UgcTestimonial,
}

impl StyleVariant {
    pub const ALL: [StyleVariant; 4] = [
        StyleVariant::SimpleOverlay,
        StyleVariant::Polished,
        StyleVariant::NativeCaption,
        StyleVariant::UgcTestimonial,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StyleVariant::SimpleOverlay => "simpleOverlay",
            StyleVariant::Polished => "polished",
            StyleVariant::NativeCaption => "nativeCaption",
            StyleVariant::UgcTestimonial => "ugcTestimonial",
        }
    }
}

impl fmt::Display for StyleVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StyleVariant {
    type Err = AdframeError;

    /// Accepts camelCase, snake_case and kebab-case spellings, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "simpleoverlay" | "simple" => Ok(StyleVariant::SimpleOverlay),
            "polished" => Ok(StyleVariant::Polished),
            "nativecaption" | "native" => Ok(StyleVariant::NativeCaption),
            "ugctestimonial" | "ugc" => Ok(StyleVariant::UgcTestimonial),
            _ => Err(AdframeError::validation(format!("unknown style '{s}'"))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/style.rs"]
mod tests;
