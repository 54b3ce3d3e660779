use crate::{
    foundation::{
        core::{Canvas, Rect},
        error::{AdframeError, AdframeResult},
        math::unpremultiply_rgba8_in_place,
    },
    render::effects::{blur_region_in_place, over_in_place, shadow_kernel},
};

/// A finished raster read back from a [`Frame`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Straight-alpha copy of the pixel data.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut data = self.data.clone();
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut data);
        }
        data
    }

    /// RGB bytes of the frame composited over opaque black.
    pub fn to_rgb8_over_black(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len() / 4 * 3);
        if self.premultiplied {
            for px in self.data.chunks_exact(4) {
                out.extend_from_slice(&px[..3]);
            }
        } else {
            for px in self.data.chunks_exact(4) {
                let a = u16::from(px[3]);
                out.extend(
                    px[..3]
                        .iter()
                        .map(|&c| crate::foundation::math::mul_div255_u8(u16::from(c), a)),
                );
            }
        }
        out
    }
}

/// The drawing surface of one compositing call.
///
/// Acquired with [`Frame::acquire`] and owned by a single render; the pixel storage is
/// released when the value is dropped, whichever way the render exits.
pub(crate) struct Frame {
    canvas: Canvas,
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
    passes: usize,
}

impl Frame {
    /// Allocate a transparent premultiplied surface for `canvas`.
    pub fn acquire(canvas: Canvas, max_pixels: u64) -> AdframeResult<Self> {
        if canvas.pixel_count() > max_pixels {
            return Err(AdframeError::surface_unavailable(format!(
                "{}x{} exceeds the {max_pixels} pixel surface limit",
                canvas.width, canvas.height
            )));
        }
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| AdframeError::surface_unavailable("surface width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| AdframeError::surface_unavailable("surface height exceeds u16"))?;

        tracing::trace!(width, height, "acquired drawing surface");
        Ok(Self {
            canvas,
            width,
            height,
            pixmap: vello_cpu::Pixmap::new(width, height),
            passes: 0,
        })
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn clear(&mut self, premul: [u8; 4]) {
        for px in self.pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
            px.copy_from_slice(&premul);
        }
    }

    /// Draw one pass into a transparent scratch surface and composite it source-over.
    pub fn paint<F>(&mut self, draw: F) -> AdframeResult<()>
    where
        F: FnOnce(&mut vello_cpu::RenderContext) -> AdframeResult<()>,
    {
        let scratch = self.render_scratch(draw)?;
        self.composite(&scratch)
    }

    /// Like [`Frame::paint`], but gaussian-blurs the pass inside `region` (grown by the blur
    /// margin) before compositing.
    pub fn paint_blurred<F>(&mut self, region: Rect, blur: f64, draw: F) -> AdframeResult<()>
    where
        F: FnOnce(&mut vello_cpu::RenderContext) -> AdframeResult<()>,
    {
        let mut scratch = self.render_scratch(draw)?;
        let (radius, sigma) = shadow_kernel(blur);
        if radius > 0 {
            let margin = f64::from(radius);
            let grown = region.inflate(margin, margin).intersect(self.canvas.rect());
            let bounds = [
                grown.x0.floor().max(0.0) as u32,
                grown.y0.floor().max(0.0) as u32,
                grown.x1.ceil().max(0.0) as u32,
                grown.y1.ceil().max(0.0) as u32,
            ];
            blur_region_in_place(
                scratch.data_as_u8_slice_mut(),
                u32::from(self.width),
                u32::from(self.height),
                bounds,
                radius,
                sigma,
            )?;
        }
        self.composite(&scratch)
    }

    pub fn pass_count(&self) -> usize {
        self.passes
    }

    pub fn readback(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    fn render_scratch<F>(&self, draw: F) -> AdframeResult<vello_cpu::Pixmap>
    where
        F: FnOnce(&mut vello_cpu::RenderContext) -> AdframeResult<()>,
    {
        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        draw(&mut ctx)?;
        ctx.flush();
        let mut scratch = vello_cpu::Pixmap::new(self.width, self.height);
        ctx.render_to_pixmap(&mut scratch);
        Ok(scratch)
    }

    fn composite(&mut self, scratch: &vello_cpu::Pixmap) -> AdframeResult<()> {
        over_in_place(
            self.pixmap.data_as_u8_slice_mut(),
            scratch.data_as_u8_slice(),
        )?;
        self.passes += 1;
        Ok(())
    }
}

impl Drop for Frame {
    fn drop(&mut self) {
        tracing::trace!(
            width = self.width,
            height = self.height,
            passes = self.passes,
            "released drawing surface"
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
