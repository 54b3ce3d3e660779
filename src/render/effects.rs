use crate::foundation::{
    error::{AdframeError, AdframeResult},
    math::mul_div255_u8,
};

pub(crate) type PremulRgba8 = [u8; 4];

/// Premultiplied source-over.
pub(crate) fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

pub(crate) fn over_in_place(dst: &mut [u8], src: &[u8]) -> AdframeResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(AdframeError::invalid_geometry(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Gaussian parameters for a canvas-style shadow blur of `blur` pixels.
///
/// Returns `(kernel_radius, sigma)`; a zero radius means no blur.
pub(crate) fn shadow_kernel(blur: f64) -> (u32, f32) {
    if !blur.is_finite() || blur <= 0.0 {
        return (0, 0.0);
    }
    let sigma = blur / 2.0;
    ((sigma * 3.0).ceil() as u32, sigma as f32)
}

pub(crate) fn blur_rgba8_premul(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> AdframeResult<Vec<u8>> {
    let expected_len = buffer_len(width, height)?;
    if src.len() != expected_len {
        return Err(AdframeError::invalid_geometry(
            "blur_rgba8_premul expects src matching width*height*4",
        ));
    }
    if radius == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    horizontal_pass(src, &mut tmp, width, height, &kernel);
    vertical_pass(&tmp, &mut out, width, height, &kernel);
    Ok(out)
}

/// Blur only the pixels inside `[x0, x1) x [y0, y1)` of a `width x height` buffer.
///
/// Samples outside the region are treated as edge-clamped region pixels, so the region should
/// already include the blur margin around whatever it contains.
pub(crate) fn blur_region_in_place(
    buf: &mut [u8],
    width: u32,
    height: u32,
    region: [u32; 4],
    radius: u32,
    sigma: f32,
) -> AdframeResult<()> {
    if buf.len() != buffer_len(width, height)? {
        return Err(AdframeError::invalid_geometry(
            "blur_region_in_place expects buf matching width*height*4",
        ));
    }
    let [x0, y0, x1, y1] = region;
    let (x1, y1) = (x1.min(width), y1.min(height));
    if radius == 0 || x0 >= x1 || y0 >= y1 {
        return Ok(());
    }

    let (rw, rh) = (x1 - x0, y1 - y0);
    let stride = width as usize * 4;
    let row_bytes = rw as usize * 4;
    let mut crop = Vec::with_capacity(row_bytes * rh as usize);
    for y in y0..y1 {
        let start = y as usize * stride + x0 as usize * 4;
        crop.extend_from_slice(&buf[start..start + row_bytes]);
    }

    let blurred = blur_rgba8_premul(&crop, rw, rh, radius, sigma)?;
    for (row, y) in blurred.chunks_exact(row_bytes).zip(y0..y1) {
        let start = y as usize * stride + x0 as usize * 4;
        buf[start..start + row_bytes].copy_from_slice(row);
    }
    Ok(())
}

fn buffer_len(width: u32, height: u32) -> AdframeResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| AdframeError::invalid_geometry("blur buffer size overflow"))
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> AdframeResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(AdframeError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    let denom = 2.0 * f64::from(sigma) * f64::from(sigma);
    for i in -r..=r {
        let x = f64::from(i);
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    // Rounding drift goes to the center tap so the kernel sums to exactly 1.0.
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }

    Ok(weights)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    for y in 0..height as i32 {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sx = (x + ki as i32 - radius).clamp(0, w - 1);
                let idx = ((y * w + sx) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y + ki as i32 - radius).clamp(0, h - 1);
                let idx = ((sy * w + x) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    v.min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/effects.rs"]
mod tests;
