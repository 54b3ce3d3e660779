use std::path::Path;

use base64::Engine;
use image::ImageEncoder;

use crate::{
    foundation::error::{AdframeError, AdframeResult},
    render::frame::FrameRGBA,
};

/// Output image format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum OutputFormat {
    /// Baseline JPEG; `quality` is `1..=100`.
    Jpeg { quality: u8 },
    /// Lossless RGBA PNG.
    Png,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Jpeg { quality: 90 }
    }
}

impl OutputFormat {
    pub fn validate(self) -> AdframeResult<()> {
        if let Self::Jpeg { quality } = self
            && !(1..=100).contains(&quality)
        {
            return Err(AdframeError::validation(format!(
                "jpeg quality must be in 1..=100, got {quality}"
            )));
        }
        Ok(())
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg { .. } => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    pub fn file_extension(self) -> &'static str {
        match self {
            Self::Jpeg { .. } => "jpg",
            Self::Png => "png",
        }
    }
}

/// An encoded output image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedImage {
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

impl EncodedImage {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    pub fn file_extension(&self) -> &'static str {
        self.format.file_extension()
    }

    /// `data:<mime>;base64,<payload>`, ready for an `<img src>`.
    pub fn to_data_uri(&self) -> String {
        let mut uri = format!("data:{};base64,", self.mime_type());
        base64::prelude::BASE64_STANDARD.encode_string(&self.bytes, &mut uri);
        uri
    }

    pub fn write_to(&self, path: &Path) -> AdframeResult<()> {
        use anyhow::Context as _;
        ensure_parent_dir(path)?;
        std::fs::write(path, &self.bytes)
            .with_context(|| format!("failed to write output image '{}'", path.display()))?;
        Ok(())
    }
}

/// Encode a rendered frame.
///
/// JPEG has no alpha channel, so the frame is flattened over black first; PNG keeps straight
/// (un-premultiplied) alpha.
pub fn encode_frame(frame: &FrameRGBA, format: OutputFormat) -> AdframeResult<EncodedImage> {
    format.validate()?;
    let mut bytes = Vec::new();
    match format {
        OutputFormat::Jpeg { quality } => {
            let rgb = frame.to_rgb8_over_black();
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut bytes, quality)
                .write_image(
                    &rgb,
                    frame.width,
                    frame.height,
                    image::ExtendedColorType::Rgb8,
                )
                .map_err(|e| AdframeError::encode("encode frame as jpeg", e))?;
        }
        OutputFormat::Png => {
            let rgba = frame.to_straight_rgba8();
            image::codecs::png::PngEncoder::new(&mut bytes)
                .write_image(
                    &rgba,
                    frame.width,
                    frame.height,
                    image::ExtendedColorType::Rgba8,
                )
                .map_err(|e| AdframeError::encode("encode frame as png", e))?;
        }
    }

    Ok(EncodedImage {
        format,
        width: frame.width,
        height: frame.height,
        bytes,
    })
}

pub fn ensure_parent_dir(path: &Path) -> AdframeResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/output.rs"]
mod tests;
