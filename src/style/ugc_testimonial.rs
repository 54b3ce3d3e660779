use crate::{
    foundation::core::{Point, Rect, Rgba8},
    layout::wrap::WrappedLine,
    model::{style::StyleVariant, text::TextField},
    style::{DrawOp, StyleContext, StylePlan, TextSource},
};

pub(crate) const HANDLE_LABEL: &str = "@happy_customer";

const CARD_MARGIN_FRAC: f64 = 0.08;
const CARD_TOP_FRAC: f64 = 0.2;
const CARD_BOTTOM_FRAC: f64 = 0.8;
const CARD_ALPHA: f64 = 0.85;

// Fractions of the canvas's shorter side, so the header stays proportionate on landscape.
const CARD_RADIUS_FRAC: f64 = 0.03;
const INNER_PAD_FRAC: f64 = 0.05;
const AVATAR_RADIUS_FRAC: f64 = 0.045;
const HANDLE_GAP_FRAC: f64 = 0.03;

const HANDLE_SIZE_DIVISOR: f64 = 28.0;
const BODY_SIZE_DIVISOR: f64 = 25.0;
const BODY_LINE_HEIGHT: f64 = 1.3;

const AVATAR: Rgba8 = Rgba8::from_hex(0xD1D5DB);
const INK: Rgba8 = Rgba8::from_hex(0x111827);

/// Testimonial card: avatar and handle header, key messages as centered body copy. Hook and
/// CTA are not drawn.
pub(crate) fn plan(ctx: &mut StyleContext<'_>) -> StylePlan {
    let canvas = ctx.canvas;
    let mut plan = StylePlan::new(StyleVariant::UgcTestimonial, canvas);
    let w = canvas.width_f();
    let h = canvas.height_f();
    let short = w.min(h);

    let margin = w * CARD_MARGIN_FRAC;
    let card = Rect::new(margin, h * CARD_TOP_FRAC, w - margin, h * CARD_BOTTOM_FRAC);
    plan.ops.push(DrawOp::FillRoundedRect {
        rect: card,
        radius: short * CARD_RADIUS_FRAC,
        color: Rgba8::WHITE.with_alpha(CARD_ALPHA),
    });

    let inner = short * INNER_PAD_FRAC;
    let avatar_r = short * AVATAR_RADIUS_FRAC;
    let avatar = Point::new(card.x0 + inner + avatar_r, card.y0 + inner + avatar_r);
    plan.ops.push(DrawOp::FillCircle {
        center: avatar,
        radius: avatar_r,
        color: AVATAR,
    });

    let handle_size = w / HANDLE_SIZE_DIVISOR;
    let mut handle = ctx.centered_run(
        TextSource::Label,
        WrappedLine {
            text: HANDLE_LABEL.to_string(),
            line_index: 0,
        },
        handle_size,
        0.0,
        avatar.y,
        handle_size * 1.2,
        INK,
    );
    handle.origin.x = avatar.x + avatar_r + short * HANDLE_GAP_FRAC;
    plan.ops.push(DrawOp::Text(handle));

    if ctx.text.is_blank(TextField::KeyMessages) {
        return plan;
    }

    let size = w / BODY_SIZE_DIVISOR;
    let line_height = size * BODY_LINE_HEIGHT;
    let lines = ctx.wrap_field(TextField::KeyMessages, size, card.width() - 2.0 * inner);

    let region_top = avatar.y + avatar_r + inner / 2.0;
    let region_bottom = card.y1 - inner;
    let block = lines.len() as f64 * line_height;
    let block_top = ((region_top + region_bottom) / 2.0 - block / 2.0).max(region_top);

    for line in lines {
        if line.text.is_empty() {
            continue;
        }
        let y = block_top + (line.line_index as f64 + 0.5) * line_height;
        let run = ctx.centered_run(
            TextSource::Field(TextField::KeyMessages),
            line,
            size,
            card.center().x,
            y,
            line_height,
            INK,
        );
        plan.ops.push(DrawOp::Text(run));
    }

    plan
}
