use rayon::prelude::*;

use crate::foundation::error::{HeartError, HeartResult};
use crate::raster::buffer::PixelBuffer;

/// Separable Gaussian blur of a whole buffer.
///
/// The kernel spans `2 * radius + 1` taps with standard deviation `sigma`; edges clamp.
/// Blurring runs on premultiplied values so transparent pixels do not bleed black into
/// their neighbours' color. Rows and columns are processed in parallel.
pub fn gaussian_blur(src: &PixelBuffer, radius: u32, sigma: f32) -> HeartResult<PixelBuffer> {
    if radius == 0 || src.width() == 0 || src.height() == 0 {
        return Ok(src.clone());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let (width, height) = (src.width() as usize, src.height() as usize);

    let mut premul = src.as_bytes().to_vec();
    premultiply_in_place(&mut premul);

    let mut tmp = vec![0u8; premul.len()];
    horizontal_pass(&premul, &mut tmp, width, &kernel);

    let mut out = vec![0u8; premul.len()];
    vertical_pass(&tmp, &mut out, width, height, &kernel);

    unpremultiply_in_place(&mut out);
    PixelBuffer::from_raw(src.width(), src.height(), out)
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> HeartResult<Vec<u32>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(HeartError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let sigma = f64::from(sigma);
    let denom = 2.0 * sigma * sigma;
    let weights_f: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = f64::from(i);
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights_f.iter().sum();
    if sum <= 0.0 {
        return Err(HeartError::render("gaussian kernel sum is zero"));
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = (((wf / sum) * 65536.0).round() as i64).clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    // Fold rounding drift into the center tap so the kernel sums to exactly 1.0.
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }

    Ok(weights)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: usize, k: &[u32]) {
    let radius = (k.len() / 2) as isize;
    let w = width as isize;
    dst.par_chunks_mut(width * 4)
        .zip(src.par_chunks(width * 4))
        .for_each(|(out_row, in_row)| {
            for x in 0..w {
                let mut acc = [0u64; 4];
                for (ki, &kw) in k.iter().enumerate() {
                    let sx = (x + ki as isize - radius).clamp(0, w - 1) as usize;
                    for c in 0..4 {
                        acc[c] += u64::from(kw) * u64::from(in_row[sx * 4 + c]);
                    }
                }
                let o = (x as usize) * 4;
                for c in 0..4 {
                    out_row[o + c] = q16_to_u8(acc[c]);
                }
            }
        });
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: usize, height: usize, k: &[u32]) {
    let radius = (k.len() / 2) as isize;
    let h = height as isize;
    dst.par_chunks_mut(width * 4)
        .enumerate()
        .for_each(|(y, out_row)| {
            for x in 0..width {
                let mut acc = [0u64; 4];
                for (ki, &kw) in k.iter().enumerate() {
                    let sy = (y as isize + ki as isize - radius).clamp(0, h - 1) as usize;
                    let idx = (sy * width + x) * 4;
                    for c in 0..4 {
                        acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                    }
                }
                for c in 0..4 {
                    out_row[x * 4 + c] = q16_to_u8(acc[c]);
                }
            }
        });
}

fn q16_to_u8(acc: u64) -> u8 {
    ((acc + 32768) >> 16).min(255) as u8
}

pub(crate) fn premultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * a + 127) / 255) as u8;
        }
    }
}

pub(crate) fn unpremultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 {
            px[..3].fill(0);
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/blur.rs"]
mod tests;
