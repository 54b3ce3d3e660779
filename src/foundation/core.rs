use crate::foundation::error::{AdframeError, AdframeResult};

pub use kurbo::{Affine, BezPath, Circle, Point, Rect, RoundedRect, Vec2};

/// Pixel dimensions of an output frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> AdframeResult<Self> {
        if width == 0 || height == 0 {
            return Err(AdframeError::invalid_geometry(format!(
                "canvas must be non-empty, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    pub fn width_f(self) -> f64 {
        f64::from(self.width)
    }

    pub fn height_f(self) -> f64 {
        f64::from(self.height)
    }

    pub fn pixel_count(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, self.width_f(), self.height_f())
    }

    pub fn center(self) -> Point {
        Point::new(self.width_f() / 2.0, self.height_f() / 2.0)
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const WHITE: Self = Self::opaque(255, 255, 255);
    pub const BLACK: Self = Self::opaque(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// `0xRRGGBB`, fully opaque.
    pub const fn from_hex(rgb: u32) -> Self {
        Self::opaque((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Same color with alpha set from a `0.0..=1.0` fraction.
    pub fn with_alpha(self, alpha: f64) -> Self {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { a, ..self }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
