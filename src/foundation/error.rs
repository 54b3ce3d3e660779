/// Convenience result type used across adframe.
pub type AdframeResult<T> = Result<T, AdframeError>;

/// Top-level error taxonomy used by compositor APIs.
#[derive(thiserror::Error, Debug)]
pub enum AdframeError {
    /// Zero, negative or non-finite source/canvas dimensions.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// The drawing surface could not be created.
    #[error("surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// The source image could not be read or decoded.
    #[error("image decode failure: {context}")]
    ImageDecode {
        /// What was being decoded.
        context: String,
        /// Underlying codec or IO error.
        #[source]
        source: image::ImageError,
    },

    /// The final raster could not be serialized.
    #[error("encode failure: {context}")]
    Encode {
        /// What was being encoded.
        context: String,
        /// Underlying codec or IO error.
        #[source]
        source: image::ImageError,
    },

    /// Font data could not be loaded or registered.
    #[error("font error: {0}")]
    Font(String),

    /// Invalid user-provided settings or request data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error with context attached.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AdframeError {
    /// Build [`AdframeError::InvalidGeometry`].
    pub fn invalid_geometry(msg: impl Into<String>) -> Self {
        Self::InvalidGeometry(msg.into())
    }

    /// Build [`AdframeError::SurfaceUnavailable`].
    pub fn surface_unavailable(msg: impl Into<String>) -> Self {
        Self::SurfaceUnavailable(msg.into())
    }

    /// Build [`AdframeError::ImageDecode`] preserving `source`.
    pub fn decode(context: impl Into<String>, source: image::ImageError) -> Self {
        Self::ImageDecode {
            context: context.into(),
            source,
        }
    }

    /// Build [`AdframeError::Encode`] preserving `source`.
    pub fn encode(context: impl Into<String>, source: image::ImageError) -> Self {
        Self::Encode {
            context: context.into(),
            source,
        }
    }

    /// Build [`AdframeError::Font`].
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build [`AdframeError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build [`AdframeError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
