//! Adframe turns a generated base image and three short copy fields into a finished
//! social-ad creative.
//!
//! # Pipeline overview
//!
//! 1. **Fit**: the source image is cover-fitted into a canvas whose size depends only on the
//!    target aspect ratio (canonical width 1080 px).
//! 2. **Plan**: the selected [`StyleVariant`] wraps and places the hook, key messages and CTA
//!    into a [`StylePlan`] display list, measuring text through [`TextMetrics`].
//! 3. **Render**: the plan is drawn on the CPU into a scoped premultiplied RGBA8 frame.
//! 4. **Encode**: the frame is written as JPEG (quality 90 by default) or PNG, as bytes or a
//!    data URI.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: identical inputs produce identical bytes. The only randomness, the
//!   native-caption background jitter, comes from a caller-supplied seed or random source.
//! - **No shared state**: a [`Compositor`] is immutable; every call owns its own surface,
//!   shaper and random source, so calls can run in parallel.
//!
//! # Getting started
//!
//! ```no_run
//! use adframe::{AspectRatio, Compositor, CompositorSettings, RenderOptions, SourceImage,
//!     StyleVariant, TextTriple, Typeface};
//!
//! # fn main() -> adframe::AdframeResult<()> {
//! let compositor = Compositor::new(Typeface::system_sans()?, CompositorSettings::default())?;
//! let image = SourceImage::open("base.png")?;
//! let text = TextTriple::new("Big Sale", "", "Shop Now");
//! let out = compositor.composite(
//!     &image,
//!     &text,
//!     StyleVariant::Polished,
//!     AspectRatio::SQUARE,
//!     &RenderOptions::default(),
//! )?;
//! std::fs::write("creative.jpg", &out.bytes).ok();
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]

mod assets;
mod compositor;
mod encode;
mod foundation;
mod layout;
mod model;
mod render;
mod style;
mod text;

pub use assets::decode::SourceImage;
pub use compositor::{CompositeRequest, Compositor, CompositorSettings, RenderOptions};
pub use encode::output::{EncodedImage, OutputFormat, encode_frame};
pub use foundation::core::{Affine, BezPath, Canvas, Point, Rect, Rgba8, Vec2};
pub use foundation::error::{AdframeError, AdframeResult};
pub use layout::fit::{CoverFit, fit_cover};
pub use layout::wrap::{
    LITERAL_LINE_BREAK, TextMeasure, WrappedLine, normalize_line_breaks, wrap_text,
};
pub use model::platform::{
    AspectRatio, CANONICAL_WIDTH, PLATFORMS, Platform, Resolution, platform_by_id,
};
pub use model::style::StyleVariant;
pub use model::text::{TextField, TextTriple};
pub use render::frame::FrameRGBA;
pub use style::jitter::{MAX_JITTER_BOUND_RAD, seeded_rng};
pub use style::{
    DrawOp, StylePlan, TextRun, TextShadow, TextSource, TextStroke, plan_style,
};
pub use text::font::Typeface;
pub use text::shaper::TextShaper;
pub use text::{MonospaceMetrics, TextMetrics};
