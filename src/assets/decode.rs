use std::{path::Path, sync::Arc};

use base64::Engine;

use crate::foundation::{
    error::{AdframeError, AdframeResult},
    math::premultiply_rgba8_in_place,
};

/// Largest side the rasterizer can sample from.
pub(crate) const MAX_RASTER_SIDE: u32 = u16::MAX as u32;

/// A decoded source raster, premultiplied RGBA8.
///
/// Cheap to clone; the pixel buffer is shared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceImage {
    width: u32,
    height: u32,
    rgba8_premul: Arc<Vec<u8>>,
}

impl SourceImage {
    /// Decode any format `image` can sniff from the bytes.
    pub fn decode(bytes: &[u8]) -> AdframeResult<Self> {
        let dyn_img = image::load_from_memory(bytes)
            .map_err(|e| AdframeError::decode("decode source image from memory", e))?;
        Self::from_dynamic(dyn_img)
    }

    pub fn open(path: impl AsRef<Path>) -> AdframeResult<Self> {
        let path = path.as_ref();
        let dyn_img = image::open(path)
            .map_err(|e| AdframeError::decode(format!("open source image '{}'", path.display()), e))?;
        Self::from_dynamic(dyn_img)
    }

    /// Decode a `data:<mime>;base64,<payload>` URI, as produced by browser canvases and
    /// image generation APIs.
    pub fn from_data_uri(uri: &str) -> AdframeResult<Self> {
        let rest = uri
            .trim()
            .strip_prefix("data:")
            .ok_or_else(|| AdframeError::validation("data URI must start with 'data:'"))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| AdframeError::validation("data URI has no ',' separator"))?;
        if !header.split(';').any(|p| p.eq_ignore_ascii_case("base64")) {
            return Err(AdframeError::validation(
                "only base64-encoded data URIs are supported",
            ));
        }
        let bytes = base64::prelude::BASE64_STANDARD
            .decode(payload.trim())
            .map_err(|e| AdframeError::validation(format!("data URI payload: {e}")))?;
        Self::decode(&bytes)
    }

    pub fn from_dynamic(img: image::DynamicImage) -> AdframeResult<Self> {
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba8(width, height, rgba.into_raw())
    }

    /// Wrap straight-alpha RGBA8 pixels.
    pub fn from_rgba8(width: u32, height: u32, mut rgba8: Vec<u8>) -> AdframeResult<Self> {
        if width == 0 || height == 0 {
            return Err(AdframeError::invalid_geometry(format!(
                "source image must be non-empty, got {width}x{height}"
            )));
        }
        if rgba8.len() as u64 != u64::from(width) * u64::from(height) * 4 {
            return Err(AdframeError::invalid_geometry(format!(
                "expected {width}x{height}x4 bytes, got {}",
                rgba8.len()
            )));
        }
        premultiply_rgba8_in_place(&mut rgba8);
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgba8_premul(&self) -> &[u8] {
        &self.rgba8_premul
    }

    /// This image resampled so neither side exceeds `max_side`, keeping its aspect ratio.
    /// Returns a cheap clone when it already fits.
    pub(crate) fn bounded(&self, max_side: u32) -> AdframeResult<Self> {
        if self.width <= max_side && self.height <= max_side {
            return Ok(self.clone());
        }
        let scale = (f64::from(max_side) / f64::from(self.width))
            .min(f64::from(max_side) / f64::from(self.height));
        let side = |v: u32| ((f64::from(v) * scale).round() as u32).clamp(1, max_side);
        let (width, height) = (side(self.width), side(self.height));

        let full = image::RgbaImage::from_raw(self.width, self.height, self.rgba8_premul.to_vec())
            .ok_or_else(|| AdframeError::invalid_geometry("source image byte length mismatch"))?;
        let resized =
            image::imageops::resize(&full, width, height, image::imageops::FilterType::Triangle);
        tracing::debug!(
            from_width = self.width,
            from_height = self.height,
            width,
            height,
            "downscaled oversized source"
        );
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(resized.into_raw()),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
