//! Stateless compositing primitives over [`PixelBuffer`].
//!
//! Coordinates are integer pixel positions. Anything outside the buffer is clipped
//! without error.

use crate::foundation::core::Rgba8;
use crate::raster::buffer::PixelBuffer;

/// Fill color of the close-button disc.
pub const CLOSE_BUTTON_FILL: Rgba8 = Rgba8::new(200, 60, 60, 255);
/// Color of the close-button cross strokes.
pub const CLOSE_BUTTON_CROSS: Rgba8 = Rgba8::new(255, 255, 255, 220);

fn dist(x: i32, y: i32, cx: i32, cy: i32) -> f64 {
    f64::from(x - cx).hypot(f64::from(y - cy))
}

/// Overwrite the rounded rectangle `[x0, x1) x [y0, y1)` with `color`.
///
/// Pixels in the cross-shaped band away from the corners are always filled; corner pixels
/// are filled when within `radius` of their corner circle center.
pub fn fill_rounded_rect(
    buf: &mut PixelBuffer,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    radius: i32,
    color: Rgba8,
) {
    let (cx0, cx1) = buf.clip_x(x0, x1);
    let (cy0, cy1) = buf.clip_y(y0, y1);
    let r = radius;
    let px = color.to_array();

    for y in cy0 as i32..cy1 as i32 {
        for x in cx0 as i32..cx1 as i32 {
            let inside = if (x >= x0 + r && x < x1 - r) || (y >= y0 + r && y < y1 - r) {
                true
            } else {
                let cx = if x < x0 + r { x0 + r } else { x1 - r - 1 };
                let cy = if y < y0 + r { y0 + r } else { y1 - r - 1 };
                dist(x, y, cx, cy) <= f64::from(r)
            };
            if inside {
                let o = buf.offset(x as u32, y as u32);
                buf.as_bytes_mut()[o..o + 4].copy_from_slice(&px);
            }
        }
    }
}

/// Source-over blend of `src` onto one pixel, in straight alpha.
///
/// `out_a = src_a + dst_a * (1 - src_a)`; color channels are weighted by their alphas and
/// divided back out. A fully transparent result is stored as transparent black.
pub fn blend_pixel(buf: &mut PixelBuffer, x: i32, y: i32, src: Rgba8) {
    if !buf.in_bounds(x, y) {
        return;
    }
    let o = buf.offset(x as u32, y as u32);
    let d = &mut buf.as_bytes_mut()[o..o + 4];
    let out = blend_straight([d[0], d[1], d[2], d[3]], src.to_array());
    d.copy_from_slice(&out);
}

pub(crate) fn blend_straight(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let sa = f64::from(src[3]) / 255.0;
    let da = f64::from(dst[3]) / 255.0;

    let out_a = sa + da * (1.0 - sa);
    if out_a == 0.0 {
        return [0, 0, 0, 0];
    }

    let to_u8 = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;
    let mut out = [0u8; 4];
    for c in 0..3 {
        let s = f64::from(src[c]) / 255.0;
        let d = f64::from(dst[c]) / 255.0;
        out[c] = to_u8((s * sa + d * da * (1.0 - sa)) / out_a);
    }
    out[3] = to_u8(out_a);
    out
}

/// Layered drop shadow behind the rectangle `[x0, x1) x [y0, y1)`.
///
/// Draws `max_blur` black rounded rectangles, outermost first. Layer `i` (from `max_blur`
/// down to 1) is grown by `4 * i` pixels on every side, its corner radius by the same
/// amount, and has alpha `4 * (max_blur - i)`. Layers overwrite rather than blend, so the
/// innermost layer wins. This is a cheap stand-in for a real blur; callers may run
/// [`crate::gaussian_blur`] afterwards.
#[allow(clippy::too_many_arguments)]
pub fn draw_shadow(
    buf: &mut PixelBuffer,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    radius: i32,
    offset_x: i32,
    offset_y: i32,
    max_blur: i32,
) {
    for i in (1..=max_blur).rev() {
        let alpha = ((max_blur - i) * 4).clamp(0, 255) as u8;
        let expand = i * 4;
        fill_rounded_rect(
            buf,
            x0 + offset_x - expand,
            y0 + offset_y - expand,
            x1 + offset_x + expand,
            y1 + offset_y + expand,
            radius + expand,
            Rgba8::new(0, 0, 0, alpha),
        );
    }
}

/// Red disc with a white "X", centred on `(cx, cy)`.
pub fn draw_close_button(buf: &mut PixelBuffer, cx: i32, cy: i32, radius: i32) {
    for y in cy - radius..=cy + radius {
        for x in cx - radius..=cx + radius {
            if dist(x, y, cx, cy) <= f64::from(radius) {
                blend_pixel(buf, x, y, CLOSE_BUTTON_FILL);
            }
        }
    }

    let thickness = (radius / 8).max(1);
    let half_len = (radius as f32 / 2.5) as i32;
    for dy in -thickness..=thickness {
        for t in -half_len..=half_len {
            blend_pixel(buf, cx + t, cy + t + dy, CLOSE_BUTTON_CROSS);
            blend_pixel(buf, cx + t, cy - t + dy, CLOSE_BUTTON_CROSS);
        }
    }
}

/// Blend a solid disc of `radius` centred on `(cx, cy)`.
///
/// A pixel is covered when its center lies within the radius. No anti-aliasing.
pub fn fill_circle(buf: &mut PixelBuffer, cx: f64, cy: f64, radius: f64, color: Rgba8) {
    if radius <= 0.0 || !radius.is_finite() {
        return;
    }
    let r2 = radius * radius;
    let y_min = (cy - radius).floor() as i32;
    let y_max = (cy + radius).ceil() as i32;
    let x_min = (cx - radius).floor() as i32;
    let x_max = (cx + radius).ceil() as i32;
    for y in y_min..=y_max {
        let dy = f64::from(y) + 0.5 - cy;
        for x in x_min..=x_max {
            let dx = f64::from(x) + 0.5 - cx;
            if dx * dx + dy * dy <= r2 {
                blend_pixel(buf, x, y, color);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/primitives.rs"]
mod tests;
