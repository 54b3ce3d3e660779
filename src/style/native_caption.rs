use crate::{
    foundation::core::Rgba8,
    model::{style::StyleVariant, text::TextField},
    style::{DrawOp, StyleContext, StylePlan, TextSource, TextStroke},
};

const HOOK_SIZE_DIVISOR: f64 = 12.0;
const FIRST_LINE_FRAC: f64 = 0.25;
const MAX_WIDTH_FRAC: f64 = 0.88;
const LINE_HEIGHT: f64 = 1.2;
const STROKE_EM: f64 = 0.12;

/// Short-form caption look: outlined hook over a slightly rotated background. Only the hook is
/// drawn.
pub(crate) fn plan(ctx: &mut StyleContext<'_>, rotation_rad: f64) -> StylePlan {
    let canvas = ctx.canvas;
    let mut plan = StylePlan::new(StyleVariant::NativeCaption, canvas);
    plan.background_rotation_rad = rotation_rad;

    if ctx.text.is_blank(TextField::Hook) {
        return plan;
    }

    let w = canvas.width_f();
    let size = w / HOOK_SIZE_DIVISOR;
    let line_height = size * LINE_HEIGHT;
    let first = canvas.height_f() * FIRST_LINE_FRAC;
    let stroke = TextStroke {
        width: size * STROKE_EM,
        color: Rgba8::BLACK,
    };

    for line in ctx.wrap_field(TextField::Hook, size, w * MAX_WIDTH_FRAC) {
        if line.text.is_empty() {
            continue;
        }
        let y = first + line.line_index as f64 * line_height;
        let mut run = ctx.centered_run(
            TextSource::Field(TextField::Hook),
            line,
            size,
            w / 2.0,
            y,
            line_height,
            Rgba8::WHITE,
        );
        run.stroke = Some(stroke);
        plan.ops.push(DrawOp::Text(run));
    }

    plan
}
