use crate::{
    foundation::core::{Rect, Rgba8},
    model::{style::StyleVariant, text::TextField},
    style::{DrawOp, StyleContext, StylePlan, TextSource},
};

/// (field, size relative to the base size, anchor height as a fraction of canvas height)
const BLOCKS: [(TextField, f64, f64); 3] = [
    (TextField::Hook, 1.1, 0.15),
    (TextField::KeyMessages, 0.9, 0.50),
    (TextField::Cta, 1.0, 0.85),
];

const BASE_SIZE_DIVISOR: f64 = 20.0;
const MAX_WIDTH_FRAC: f64 = 0.9;
const LINE_HEIGHT: f64 = 1.2;
const BACKING_PAD_FRAC: f64 = 10.0 / 1080.0;
const BACKING_ALPHA: f64 = 0.6;

/// Stacked blocks, each line on its own dark plate. Blank fields draw nothing.
pub(crate) fn plan(ctx: &mut StyleContext<'_>) -> StylePlan {
    let canvas = ctx.canvas;
    let mut plan = StylePlan::new(StyleVariant::SimpleOverlay, canvas);

    let w = canvas.width_f();
    let h = canvas.height_f();
    let base = w / BASE_SIZE_DIVISOR;
    let pad = w * BACKING_PAD_FRAC;
    let center_x = w / 2.0;
    let backing = Rgba8::BLACK.with_alpha(BACKING_ALPHA);

    for (field, scale, anchor) in BLOCKS {
        if ctx.text.is_blank(field) {
            continue;
        }
        let size = base * scale;
        let line_height = size * LINE_HEIGHT;

        for line in ctx.wrap_field(field, size, w * MAX_WIDTH_FRAC) {
            if line.text.is_empty() {
                continue;
            }
            let y = h * anchor + line.line_index as f64 * line_height;
            let run = ctx.centered_run(
                TextSource::Field(field),
                line,
                size,
                center_x,
                y,
                line_height,
                Rgba8::WHITE,
            );
            let bounds = run.bounds();
            plan.ops.push(DrawOp::FillRect {
                rect: Rect::new(bounds.x0 - pad, bounds.y0, bounds.x1 + pad, bounds.y1),
                color: backing,
            });
            plan.ops.push(DrawOp::Text(run));
        }
    }

    plan
}
