use crate::foundation::{
    core::{Affine, Rect, Vec2},
    error::{AdframeError, AdframeResult},
};

/// Placement of a source image inside a canvas, in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoverFit {
    pub draw_width: f64,
    pub draw_height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

/// Scale a `source_width x source_height` image so it fully covers the canvas without
/// distortion, centered, cropping the overflowing axis.
///
/// The axis that is relatively shorter matches the canvas exactly; the other overflows and
/// gets a negative offset.
pub fn fit_cover(
    source_width: f64,
    source_height: f64,
    canvas_width: f64,
    canvas_height: f64,
) -> AdframeResult<CoverFit> {
    for (name, v) in [
        ("source width", source_width),
        ("source height", source_height),
        ("canvas width", canvas_width),
        ("canvas height", canvas_height),
    ] {
        if !v.is_finite() || v <= 0.0 {
            return Err(AdframeError::invalid_geometry(format!(
                "{name} must be finite and > 0, got {v}"
            )));
        }
    }

    let img_ratio = source_width / source_height;
    let canvas_ratio = canvas_width / canvas_height;

    let fit = if img_ratio > canvas_ratio {
        let draw_height = canvas_height;
        let draw_width = (draw_height * img_ratio).max(canvas_width);
        CoverFit {
            draw_width,
            draw_height,
            offset_x: (canvas_width - draw_width) / 2.0,
            offset_y: 0.0,
        }
    } else {
        let draw_width = canvas_width;
        let draw_height = (draw_width / img_ratio).max(canvas_height);
        CoverFit {
            draw_width,
            draw_height,
            offset_x: 0.0,
            offset_y: (canvas_height - draw_height) / 2.0,
        }
    };
    Ok(fit)
}

impl CoverFit {
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.offset_x,
            self.offset_y,
            self.offset_x + self.draw_width,
            self.offset_y + self.draw_height,
        )
    }

    /// Maps source pixel space onto the fitted rectangle.
    pub fn to_affine(&self, source_width: f64, source_height: f64) -> Affine {
        Affine::translate(Vec2::new(self.offset_x, self.offset_y))
            * Affine::scale_non_uniform(
                self.draw_width / source_width,
                self.draw_height / source_height,
            )
    }

    /// Grow the fit about the canvas center so the canvas stays covered after rotating the
    /// image by `angle_rad` around that center.
    pub fn covering_rotation(&self, canvas_width: f64, canvas_height: f64, angle_rad: f64) -> Self {
        let (sin, cos) = angle_rad.sin_cos();
        let (sin, cos) = (sin.abs(), cos.abs());
        let half_w = canvas_width / 2.0;
        let half_h = canvas_height / 2.0;
        // Extents of the canvas expressed in the rotated image frame.
        let need_x = half_w * cos + half_h * sin;
        let need_y = half_w * sin + half_h * cos;

        let rect = self.rect();
        let cx = half_w;
        let cy = half_h;
        let avail_x = (cx - rect.x0).min(rect.x1 - cx);
        let avail_y = (cy - rect.y0).min(rect.y1 - cy);
        let scale = (need_x / avail_x).max(need_y / avail_y).max(1.0);
        if scale == 1.0 {
            return *self;
        }

        Self {
            draw_width: self.draw_width * scale,
            draw_height: self.draw_height * scale,
            offset_x: cx - (cx - self.offset_x) * scale,
            offset_y: cy - (cy - self.offset_y) * scale,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/fit.rs"]
mod tests;
