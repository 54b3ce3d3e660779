use std::{fmt, str::FromStr};

use crate::foundation::{
    core::Canvas,
    error::{AdframeError, AdframeResult},
};

/// Canonical output width in pixels; canvas height follows from the aspect ratio.
pub const CANONICAL_WIDTH: u32 = 1080;

/// `width:height` ratio of an output canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AspectRatio {
    pub width: u32,
    pub height: u32,
}

impl AspectRatio {
    pub const SQUARE: Self = Self::from_parts(1, 1);
    pub const PORTRAIT_3_4: Self = Self::from_parts(3, 4);
    pub const VERTICAL_9_16: Self = Self::from_parts(9, 16);
    pub const LANDSCAPE_16_9: Self = Self::from_parts(16, 9);

    const fn from_parts(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn new(width: u32, height: u32) -> AdframeResult<Self> {
        if width == 0 || height == 0 {
            return Err(AdframeError::invalid_geometry(format!(
                "aspect ratio terms must be > 0, got {width}:{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Canvas of the given width whose height is `round(width * h / w)`.
    pub fn canvas(self, width: u32) -> AdframeResult<Canvas> {
        if self.width == 0 || self.height == 0 {
            return Err(AdframeError::invalid_geometry("aspect ratio terms must be > 0"));
        }
        let height = (u64::from(width) * u64::from(self.height) * 2 + u64::from(self.width))
            / (2 * u64::from(self.width));
        let height = u32::try_from(height)
            .map_err(|_| AdframeError::invalid_geometry("canvas height exceeds u32"))?;
        Canvas::new(width, height)
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

impl FromStr for AspectRatio {
    type Err = AdframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| AdframeError::validation(format!("aspect ratio '{s}' is not W:H")))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|e| AdframeError::validation(format!("aspect ratio '{s}': {e}")))
        };
        Self::new(parse(w)?, parse(h)?)
    }
}

impl TryFrom<String> for AspectRatio {
    type Error = AdframeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AspectRatio> for String {
    fn from(value: AspectRatio) -> Self {
        value.to_string()
    }
}

/// Delivery resolution class of a platform. Informational: canvases always use
/// [`CANONICAL_WIDTH`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Resolution {
    #[serde(rename = "720p")]
    P720,
    #[serde(rename = "1080p")]
    P1080,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Resolution::P720 => "720p",
            Resolution::P1080 => "1080p",
        })
    }
}

/// A publishing target and the canvas shape it expects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Platform {
    pub id: &'static str,
    pub name: &'static str,
    pub aspect_ratio: AspectRatio,
    pub resolution: Resolution,
}

pub const PLATFORMS: [Platform; 6] = [
    Platform {
        id: "tiktok",
        name: "TikTok",
        aspect_ratio: AspectRatio::VERTICAL_9_16,
        resolution: Resolution::P1080,
    },
    Platform {
        id: "youtube_shorts",
        name: "YouTube Shorts",
        aspect_ratio: AspectRatio::VERTICAL_9_16,
        resolution: Resolution::P1080,
    },
    Platform {
        id: "instagram_story",
        name: "Instagram Story",
        aspect_ratio: AspectRatio::VERTICAL_9_16,
        resolution: Resolution::P1080,
    },
    Platform {
        id: "instagram_post",
        name: "Instagram Post",
        aspect_ratio: AspectRatio::SQUARE,
        resolution: Resolution::P1080,
    },
    Platform {
        id: "facebook_post",
        name: "Facebook Post",
        aspect_ratio: AspectRatio::PORTRAIT_3_4,
        resolution: Resolution::P1080,
    },
    Platform {
        id: "google_ad_landscape",
        name: "Google Ad (Landscape)",
        aspect_ratio: AspectRatio::LANDSCAPE_16_9,
        resolution: Resolution::P720,
    },
];

/// Look up a platform profile by its id (e.g. `"tiktok"`).
pub fn platform_by_id(id: &str) -> AdframeResult<&'static Platform> {
    PLATFORMS
        .iter()
        .find(|p| p.id.eq_ignore_ascii_case(id.trim()))
        .ok_or_else(|| AdframeError::validation(format!("unknown platform '{id}'")))
}

#[cfg(test)]
#[path = "../../tests/unit/model/platform.rs"]
mod tests;
