use kurbo::Shape;

use crate::{
    assets::decode::{MAX_RASTER_SIDE, SourceImage},
    foundation::{
        core::{Affine, BezPath, Circle, Point, Rect, Rgba8, RoundedRect, Vec2},
        error::{AdframeError, AdframeResult},
    },
    layout::fit::fit_cover,
    render::frame::Frame,
    style::{DrawOp, StylePlan, TextRun, TextStroke},
    text::shaper::TextShaper,
};

const PATH_TOLERANCE: f64 = 0.1;
const BACKDROP: [u8; 4] = [0, 0, 0, 255];

/// One surface pass of a [`StylePlan`].
#[derive(Debug, PartialEq)]
pub(crate) enum Pass<'a> {
    /// Ops drawn as-is, in order.
    Scene(Vec<&'a DrawOp>),
    /// Shadows of consecutive text runs sharing one blur radius.
    Shadow {
        blur_radius: f64,
        runs: Vec<&'a TextRun>,
    },
}

/// Split plan ops into passes, hoisting each group of shadowed runs' shadows into a blurred
/// pass right beneath them.
pub(crate) fn group_passes(plan: &StylePlan) -> Vec<Pass<'_>> {
    let mut passes: Vec<Pass<'_>> = Vec::new();
    let mut i = 0;
    while i < plan.ops.len() {
        let Some(blur_radius) = shadow_blur(&plan.ops[i]) else {
            push_scene_op(&mut passes, &plan.ops[i]);
            i += 1;
            continue;
        };

        let start = i;
        while i < plan.ops.len() && shadow_blur(&plan.ops[i]) == Some(blur_radius) {
            i += 1;
        }
        let group = &plan.ops[start..i];
        passes.push(Pass::Shadow {
            blur_radius,
            runs: group
                .iter()
                .filter_map(|op| match op {
                    DrawOp::Text(run) => Some(run),
                    _ => None,
                })
                .collect(),
        });
        passes.push(Pass::Scene(group.iter().collect()));
    }
    passes
}

fn shadow_blur(op: &DrawOp) -> Option<f64> {
    match op {
        DrawOp::Text(TextRun {
            shadow: Some(shadow),
            ..
        }) => Some(shadow.blur_radius),
        _ => None,
    }
}

fn push_scene_op<'a>(passes: &mut Vec<Pass<'a>>, op: &'a DrawOp) {
    if let Some(Pass::Scene(ops)) = passes.last_mut() {
        ops.push(op);
    } else {
        passes.push(Pass::Scene(vec![op]));
    }
}

/// Paint the cover-fitted background and then every pass of `plan` onto `frame`.
pub(crate) fn execute_plan(
    frame: &mut Frame,
    source: &SourceImage,
    plan: &StylePlan,
    shaper: &mut TextShaper,
) -> AdframeResult<()> {
    let canvas = frame.canvas();
    if plan.canvas != canvas {
        return Err(AdframeError::invalid_geometry(format!(
            "plan for {}x{} executed on a {}x{} frame",
            plan.canvas.width, plan.canvas.height, canvas.width, canvas.height
        )));
    }

    // Fit uses the true source size; the raster may be a downscaled copy.
    let raster = source.bounded(MAX_RASTER_SIDE)?;
    let paint = source_paint(&raster)?;
    let (src_w, src_h) = (f64::from(source.width()), f64::from(source.height()));
    let (ras_w, ras_h) = (f64::from(raster.width()), f64::from(raster.height()));
    let mut fit = fit_cover(src_w, src_h, canvas.width_f(), canvas.height_f())?;
    let angle = plan.background_rotation_rad;
    if angle != 0.0 {
        fit = fit.covering_rotation(canvas.width_f(), canvas.height_f(), angle);
    }
    tracing::debug!(
        draw_width = fit.draw_width,
        draw_height = fit.draw_height,
        offset_x = fit.offset_x,
        offset_y = fit.offset_y,
        rotation = angle,
        "cover fit"
    );
    let transform = Affine::rotate_about(angle, canvas.center())
        * fit.to_affine(src_w, src_h)
        * Affine::scale_non_uniform(src_w / ras_w, src_h / ras_h);

    frame.clear(BACKDROP);
    frame.paint(|ctx| {
        ctx.set_transform(affine_to_cpu(transform));
        ctx.set_paint(paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, ras_w, ras_h));
        Ok(())
    })?;

    let passes = group_passes(plan);
    tracing::debug!(passes = passes.len(), ops = plan.ops.len(), "executing style plan");
    for pass in passes {
        match pass {
            Pass::Scene(ops) => frame.paint(|ctx| {
                for op in ops {
                    draw_op(ctx, op, shaper)?;
                }
                Ok(())
            })?,
            Pass::Shadow { blur_radius, runs } => {
                let region = runs
                    .iter()
                    .filter_map(|run| run.shadow.map(|s| run.bounds() + s.offset))
                    .reduce(|a, b| a.union(b))
                    .unwrap_or(Rect::ZERO);
                frame.paint_blurred(region, blur_radius, |ctx| {
                    for run in runs {
                        if let Some(shadow) = run.shadow {
                            let stroke = run.stroke.map(|s| TextStroke {
                                color: shadow.color,
                                ..s
                            });
                            draw_text(ctx, run, shaper, shadow.offset, shadow.color, stroke)?;
                        }
                    }
                    Ok(())
                })?;
            }
        }
    }
    tracing::trace!(composited = frame.pass_count(), "style plan executed");
    Ok(())
}

fn draw_op(
    ctx: &mut vello_cpu::RenderContext,
    op: &DrawOp,
    shaper: &mut TextShaper,
) -> AdframeResult<()> {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

    match op {
        DrawOp::FillRect { rect, color } => {
            ctx.set_paint(color_to_cpu(*color));
            ctx.fill_rect(&rect_to_cpu(*rect));
        }
        DrawOp::FillRoundedRect {
            rect,
            radius,
            color,
        } => {
            ctx.set_paint(color_to_cpu(*color));
            let path = RoundedRect::from_rect(*rect, *radius).to_path(PATH_TOLERANCE);
            ctx.fill_path(&bezpath_to_cpu(&path));
        }
        DrawOp::FillCircle {
            center,
            radius,
            color,
        } => {
            ctx.set_paint(color_to_cpu(*color));
            let path = Circle::new(*center, *radius).to_path(PATH_TOLERANCE);
            ctx.fill_path(&bezpath_to_cpu(&path));
        }
        DrawOp::Text(run) => {
            draw_text(ctx, run, shaper, Vec2::ZERO, run.color, run.stroke)?;
        }
    }
    Ok(())
}

/// Stroke (if any) then fill one line of text, vertically centered on its line box.
fn draw_text(
    ctx: &mut vello_cpu::RenderContext,
    run: &TextRun,
    shaper: &mut TextShaper,
    offset: Vec2,
    fill: Rgba8,
    stroke: Option<TextStroke>,
) -> AdframeResult<()> {
    if run.text.is_empty() {
        return Ok(());
    }
    let layout = shaper.layout_line(&run.text, run.font_size as f32);
    let top = run.origin.y - f64::from(layout.height()) / 2.0;
    let origin = Point::new(run.origin.x, top) + offset;
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((origin.x, origin.y)));
    let font = shaper.font_data().clone();

    if let Some(stroke) = stroke {
        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(stroke.width));
        ctx.set_paint(color_to_cpu(stroke.color));
        for_each_glyph_run(&layout, |font_size, glyphs| {
            ctx.glyph_run(&font)
                .font_size(font_size)
                .stroke_glyphs(glyphs.into_iter());
        });
    }

    ctx.set_paint(color_to_cpu(fill));
    for_each_glyph_run(&layout, |font_size, glyphs| {
        ctx.glyph_run(&font)
            .font_size(font_size)
            .fill_glyphs(glyphs.into_iter());
    });
    Ok(())
}

fn for_each_glyph_run<F>(layout: &parley::Layout<()>, mut f: F)
where
    F: FnMut(f32, Vec<vello_cpu::Glyph>),
{
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                continue;
            };
            let mut x = glyph_run.offset();
            let y = glyph_run.baseline();
            let glyphs = glyph_run
                .glyphs()
                .map(|g| {
                    let glyph = vello_cpu::Glyph {
                        id: g.id,
                        x: x + g.x,
                        y: y - g.y,
                    };
                    x += g.advance;
                    glyph
                })
                .collect();
            f(glyph_run.run().font_size(), glyphs);
        }
    }
}

fn source_paint(source: &SourceImage) -> AdframeResult<vello_cpu::Image> {
    let pixmap =
        image_premul_bytes_to_pixmap(source.rgba8_premul(), source.width(), source.height())?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(std::sync::Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> AdframeResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| AdframeError::invalid_geometry("source image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| AdframeError::invalid_geometry("source image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(AdframeError::invalid_geometry(
            "source image byte length mismatch",
        ));
    }

    let mut may_have_opacities = false;
    let pixels = rgba8_premul
        .chunks_exact(4)
        .map(|px| {
            may_have_opacities |= px[3] != 255;
            vello_cpu::peniko::color::PremulRgba8 {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            }
        })
        .collect();

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
