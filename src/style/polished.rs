use crate::{
    foundation::core::{Rect, Rgba8, Vec2},
    layout::wrap::WrappedLine,
    model::{style::StyleVariant, text::TextField},
    style::{DrawOp, StyleContext, StylePlan, TextRun, TextShadow, TextSource},
};

const HOOK_SIZE_DIVISOR: f64 = 10.0;
const SIDE_PAD_FRAC: f64 = 0.06;
const HOOK_TOP_FRAC: f64 = 0.08;
const HOOK_LINE_HEIGHT: f64 = 1.15;
const SHADOW_OFFSET_FRAC: f64 = 0.004;
const SHADOW_BLUR_FRAC: f64 = 0.008;

const CTA_SIZE_DIVISOR: f64 = 18.0;
const CTA_CENTER_FRAC: f64 = 0.85;
const CTA_PAD_X_EM: f64 = 0.9;
const CTA_PAD_Y_EM: f64 = 0.5;
const CTA_LINE_HEIGHT: f64 = 1.2;

const ACCENT: Rgba8 = Rgba8::from_hex(0x06B6D4);
const ON_ACCENT: Rgba8 = Rgba8::from_hex(0x0F172A);

/// Poster look: big shadowed hook at the top, CTA pill at the bottom. Key messages are not
/// drawn.
pub(crate) fn plan(ctx: &mut StyleContext<'_>) -> StylePlan {
    let canvas = ctx.canvas;
    let mut plan = StylePlan::new(StyleVariant::Polished, canvas);
    let w = canvas.width_f();
    let h = canvas.height_f();

    if !ctx.text.is_blank(TextField::Hook) {
        let size = w / HOOK_SIZE_DIVISOR;
        let line_height = size * HOOK_LINE_HEIGHT;
        let pad = w * SIDE_PAD_FRAC;
        let top = h * HOOK_TOP_FRAC;
        let shadow = TextShadow {
            offset: Vec2::new(w * SHADOW_OFFSET_FRAC, w * SHADOW_OFFSET_FRAC),
            blur_radius: w * SHADOW_BLUR_FRAC,
            color: Rgba8::BLACK.with_alpha(0.6),
        };

        for line in ctx.wrap_field(TextField::Hook, size, w - 2.0 * pad) {
            if line.text.is_empty() {
                continue;
            }
            let y = top + (line.line_index as f64 + 0.5) * line_height;
            let mut run = ctx.centered_run(
                TextSource::Field(TextField::Hook),
                line,
                size,
                w / 2.0,
                y,
                line_height,
                Rgba8::WHITE,
            );
            run.shadow = Some(shadow);
            plan.ops.push(DrawOp::Text(run));
        }
    }

    if !ctx.text.is_blank(TextField::Cta) {
        plan_cta(ctx, &mut plan);
    }

    plan
}

/// CTA wrapped inside the side padding, on one accent pill centered at `CTA_CENTER_FRAC`.
fn plan_cta(ctx: &mut StyleContext<'_>, plan: &mut StylePlan) {
    let (w, h) = (ctx.canvas.width_f(), ctx.canvas.height_f());
    let size = w / CTA_SIZE_DIVISOR;
    let line_height = size * CTA_LINE_HEIGHT;
    let pad_x = size * CTA_PAD_X_EM;
    let pad_y = size * CTA_PAD_Y_EM;
    let max_width = w - 2.0 * (w * SIDE_PAD_FRAC + pad_x);
    let lines: Vec<WrappedLine> = ctx
        .wrap_field(TextField::Cta, size, max_width)
        .into_iter()
        .filter(|line| !line.text.is_empty())
        .collect();
    if lines.is_empty() {
        return;
    }
    let center_y = h * CTA_CENTER_FRAC;
    let first_y = center_y - (lines.len() as f64 - 1.0) * line_height / 2.0;

    let runs: Vec<TextRun> = lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            ctx.centered_run(
                TextSource::Field(TextField::Cta),
                line,
                size,
                w / 2.0,
                first_y + i as f64 * line_height,
                line_height,
                ON_ACCENT,
            )
        })
        .collect();

    let text_width = runs.iter().map(|r| r.width).fold(0.0, f64::max);
    let half_w = text_width / 2.0 + pad_x;
    let half_h = runs.len() as f64 * line_height / 2.0 + pad_y;
    let pill = Rect::new(
        w / 2.0 - half_w,
        center_y - half_h,
        w / 2.0 + half_w,
        center_y + half_h,
    );
    plan.ops.push(DrawOp::FillRoundedRect {
        rect: pill,
        radius: line_height / 2.0 + pad_y,
        color: ACCENT,
    });
    plan.ops.extend(runs.into_iter().map(DrawOp::Text));
}
