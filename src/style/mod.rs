//! Style renderer: turns a [`TextTriple`] into a backend-agnostic display list for one
//! [`StyleVariant`].
//!
//! Each variant is a plain planning function. Planning only needs text measurement, so plans
//! can be built and inspected without a drawing surface; [`crate::render`] executes them.

pub(crate) mod jitter;
mod native_caption;
mod polished;
mod simple_overlay;
mod ugc_testimonial;

use crate::{
    foundation::core::{Canvas, Point, Rect, Rgba8, Vec2},
    layout::wrap::{WrappedLine, wrap_text},
    model::{
        style::StyleVariant,
        text::{TextField, TextTriple},
    },
    text::TextMetrics,
};

/// Display list produced by a style, drawn over the cover-fitted background.
#[derive(Clone, Debug, PartialEq)]
pub struct StylePlan {
    pub style: StyleVariant,
    pub canvas: Canvas,
    /// Rotation applied to the background image about the canvas center, before any op.
    pub background_rotation_rad: f64,
    /// Draw operations in paint order.
    pub ops: Vec<DrawOp>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    FillRect {
        rect: Rect,
        color: Rgba8,
    },
    FillRoundedRect {
        rect: Rect,
        radius: f64,
        color: Rgba8,
    },
    FillCircle {
        center: Point,
        radius: f64,
        color: Rgba8,
    },
    Text(TextRun),
}

/// Where the characters of a [`TextRun`] came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextSource {
    Field(TextField),
    /// Fixed decoration text such as the testimonial handle.
    Label,
}

/// One line of text placed on the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub source: TextSource,
    pub text: String,
    pub line_index: usize,
    pub font_size: f64,
    /// Left edge of the line and the vertical center of its line box.
    pub origin: Point,
    /// Measured advance width.
    pub width: f64,
    pub line_height: f64,
    pub color: Rgba8,
    /// Outline drawn before the fill.
    pub stroke: Option<TextStroke>,
    pub shadow: Option<TextShadow>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStroke {
    pub width: f64,
    pub color: Rgba8,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextShadow {
    pub offset: Vec2,
    pub blur_radius: f64,
    pub color: Rgba8,
}

impl TextRun {
    /// Line box: measured width by line height, centered on `origin.y`.
    pub fn bounds(&self) -> Rect {
        let half = self.line_height / 2.0;
        Rect::new(
            self.origin.x,
            self.origin.y - half,
            self.origin.x + self.width,
            self.origin.y + half,
        )
    }
}

impl StylePlan {
    pub fn new(style: StyleVariant, canvas: Canvas) -> Self {
        Self {
            style,
            canvas,
            background_rotation_rad: 0.0,
            ops: Vec::new(),
        }
    }

    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(run) => Some(run),
            _ => None,
        })
    }

    /// Distinct copy fields that produced at least one text run, in paint order.
    pub fn drawn_fields(&self) -> Vec<TextField> {
        let mut out = Vec::new();
        for run in self.text_runs() {
            if let TextSource::Field(field) = run.source
                && !out.contains(&field)
            {
                out.push(field);
            }
        }
        out
    }
}

/// Inputs shared by every style planner.
pub(crate) struct StyleContext<'a> {
    pub canvas: Canvas,
    pub text: &'a TextTriple,
    pub metrics: &'a mut dyn TextMetrics,
}

impl StyleContext<'_> {
    pub fn wrap(&mut self, text: &str, font_size: f64, max_width: f64) -> Vec<WrappedLine> {
        let metrics = &mut *self.metrics;
        wrap_text(text, max_width, &mut |s: &str| metrics.text_width(s, font_size))
    }

    pub fn wrap_field(
        &mut self,
        field: TextField,
        font_size: f64,
        max_width: f64,
    ) -> Vec<WrappedLine> {
        let triple = self.text;
        self.wrap(triple.field(field), font_size, max_width)
    }

    /// A run horizontally centered on `center_x` whose line box is centered on `center_y`.
    #[allow(clippy::too_many_arguments)]
    pub fn centered_run(
        &mut self,
        source: TextSource,
        line: WrappedLine,
        font_size: f64,
        center_x: f64,
        center_y: f64,
        line_height: f64,
        color: Rgba8,
    ) -> TextRun {
        let width = self.metrics.text_width(&line.text, font_size);
        TextRun {
            source,
            text: line.text,
            line_index: line.line_index,
            font_size,
            origin: Point::new(center_x - width / 2.0, center_y),
            width,
            line_height,
            color,
            stroke: None,
            shadow: None,
        }
    }
}

/// Plan `style` for `text` on `canvas`.
///
/// Only [`StyleVariant::NativeCaption`] draws from `rng`, sampling one rotation in
/// `[-max_jitter_rad, max_jitter_rad]`; every other variant is a pure function of its inputs.
pub fn plan_style(
    style: StyleVariant,
    text: &TextTriple,
    canvas: Canvas,
    metrics: &mut dyn TextMetrics,
    rng: &mut dyn rand::RngCore,
    max_jitter_rad: f64,
) -> StylePlan {
    let mut ctx = StyleContext {
        canvas,
        text,
        metrics,
    };
    match style {
        StyleVariant::SimpleOverlay => simple_overlay::plan(&mut ctx),
        StyleVariant::Polished => polished::plan(&mut ctx),
        StyleVariant::NativeCaption => {
            let rotation = jitter::sample_rotation(rng, max_jitter_rad);
            native_caption::plan(&mut ctx, rotation)
        }
        StyleVariant::UgcTestimonial => ugc_testimonial::plan(&mut ctx),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/plan.rs"]
mod tests;
