/// The three copy fields of one ad creative.
///
/// Every field may be empty. `key_messages` may carry explicit line breaks, either as a real
/// newline or as the literal two-character escape `\n` produced by upstream copy generators.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextTriple {
    /// Headline.
    #[serde(default)]
    pub hook: String,
    /// Body copy.
    #[serde(default)]
    pub key_messages: String,
    /// Call to action.
    #[serde(default)]
    pub cta: String,
}

/// Identifies one field of a [`TextTriple`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextField {
    Hook,
    KeyMessages,
    Cta,
}

impl TextTriple {
    pub fn new(
        hook: impl Into<String>,
        key_messages: impl Into<String>,
        cta: impl Into<String>,
    ) -> Self {
        Self {
            hook: hook.into(),
            key_messages: key_messages.into(),
            cta: cta.into(),
        }
    }

    pub fn field(&self, field: TextField) -> &str {
        match field {
            TextField::Hook => &self.hook,
            TextField::KeyMessages => &self.key_messages,
            TextField::Cta => &self.cta,
        }
    }

    /// True when the field holds nothing but whitespace or line-break markers.
    pub fn is_blank(&self, field: TextField) -> bool {
        self.field(field)
            .replace(crate::layout::wrap::LITERAL_LINE_BREAK, " ")
            .trim()
            .is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/text.rs"]
mod tests;
