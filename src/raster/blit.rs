use rayon::prelude::*;

use crate::foundation::color::RgbF;
use crate::foundation::core::Rgba8;
use crate::raster::buffer::PixelBuffer;
use crate::raster::primitives::blend_straight;

/// Placement and color modulation for [`draw_image`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawParams {
    /// Left edge of the drawn image on the destination.
    pub x: f64,
    /// Top edge of the drawn image on the destination.
    pub y: f64,
    /// Uniform scale applied to the source image.
    pub scale: f64,
    /// Per-channel color multiplier.
    pub tint: RgbF,
    /// Alpha multiplier in `[0, 1]`.
    pub opacity: f32,
}

impl DrawParams {
    /// Unscaled, untinted, opaque placement at `(x, y)`.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            scale: 1.0,
            tint: RgbF::WHITE,
            opacity: 1.0,
        }
    }
}

/// Draw `src` onto `dst` with bilinear sampling, tint and opacity, blending source-over.
///
/// Destination rows covered by the image are blended in parallel.
pub fn draw_image(dst: &mut PixelBuffer, src: &PixelBuffer, p: &DrawParams) {
    let opacity = p.opacity.clamp(0.0, 1.0);
    if opacity <= 0.0
        || !p.scale.is_finite()
        || p.scale <= 0.0
        || src.width() == 0
        || src.height() == 0
    {
        return;
    }

    let w = f64::from(src.width()) * p.scale;
    let h = f64::from(src.height()) * p.scale;
    let (x0, x1) = dst.clip_x(p.x.floor() as i32, (p.x + w).ceil() as i32);
    let (y0, y1) = dst.clip_y(p.y.floor() as i32, (p.y + h).ceil() as i32);

    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let stride = dst.width() as usize * 4;
    let (row_start, row_end) = (y0 as usize * stride, y1 as usize * stride);
    let to_u8 = |v: f32| (v * 255.0).round().clamp(0.0, 255.0) as u8;

    dst.as_bytes_mut()[row_start..row_end]
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(i, row)| {
            let py = y0 as usize + i;
            let v = (py as f64 + 0.5 - p.y) / p.scale - 0.5;
            for px in x0..x1 {
                let u = (f64::from(px) + 0.5 - p.x) / p.scale - 0.5;
                let [r, g, b, a] = sample_bilinear_premul(src, u, v);
                if a <= 0.0 {
                    continue;
                }
                let c = [
                    to_u8(r / a * p.tint.r),
                    to_u8(g / a * p.tint.g),
                    to_u8(b / a * p.tint.b),
                    to_u8(a * opacity),
                ];
                let o = px as usize * 4;
                let d = [row[o], row[o + 1], row[o + 2], row[o + 3]];
                row[o..o + 4].copy_from_slice(&blend_straight(d, c));
            }
        });
}

/// Bilinear sample at continuous texel coordinates, returning normalized premultiplied
/// RGBA. Texels outside the image count as transparent.
fn sample_bilinear_premul(src: &PixelBuffer, u: f64, v: f64) -> [f32; 4] {
    let fx = u.floor();
    let fy = v.floor();
    let tx = (u - fx) as f32;
    let ty = (v - fy) as f32;
    let (ix, iy) = (fx as i32, fy as i32);

    let texel = |x: i32, y: i32| -> [f32; 4] {
        match src.pixel(x, y) {
            Some(c) => {
                let a = f32::from(c.a) / 255.0;
                [
                    f32::from(c.r) / 255.0 * a,
                    f32::from(c.g) / 255.0 * a,
                    f32::from(c.b) / 255.0 * a,
                    a,
                ]
            }
            None => [0.0; 4],
        }
    };

    let t00 = texel(ix, iy);
    let t10 = texel(ix + 1, iy);
    let t01 = texel(ix, iy + 1);
    let t11 = texel(ix + 1, iy + 1);

    let mut out = [0.0f32; 4];
    for c in 0..4 {
        let top = t00[c] + (t10[c] - t00[c]) * tx;
        let bottom = t01[c] + (t11[c] - t01[c]) * tx;
        out[c] = top + (bottom - top) * ty;
    }
    out
}

/// Stretch `bg` over the whole of `dst`, multiply its color by `dim` and make it opaque.
///
/// Nearest-neighbour sampling. An empty background fills `dst` with opaque black.
pub fn draw_background(dst: &mut PixelBuffer, bg: &PixelBuffer, dim: f32) {
    if bg.width() == 0 || bg.height() == 0 {
        dst.fill(Rgba8::BLACK);
        return;
    }
    let dim = dim.clamp(0.0, 1.0);
    let (dw, dh) = (dst.width() as usize, dst.height() as usize);
    if dw == 0 || dh == 0 {
        return;
    }
    let sx = f64::from(bg.width()) / dw as f64;
    let sy = f64::from(bg.height()) / dh as f64;
    let bg_w = bg.width() as usize;
    let bg_bytes = bg.as_bytes();

    dst.as_bytes_mut()
        .par_chunks_mut(dw * 4)
        .enumerate()
        .for_each(|(y, row)| {
            let src_y = (((y as f64) + 0.5) * sy) as usize;
            let src_y = src_y.min(bg.height() as usize - 1);
            for x in 0..dw {
                let src_x = ((((x as f64) + 0.5) * sx) as usize).min(bg_w - 1);
                let s = (src_y * bg_w + src_x) * 4;
                for c in 0..3 {
                    row[x * 4 + c] = (f32::from(bg_bytes[s + c]) * dim).round() as u8;
                }
                row[x * 4 + 3] = 255;
            }
        });
}

#[cfg(test)]
#[path = "../../tests/unit/raster/blit.rs"]
mod tests;
