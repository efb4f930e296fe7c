use crate::foundation::core::Rgba8;

/// Fixed card tint palette.
pub const PALETTE: [Rgba8; 13] = [
    Rgba8::new(0xA6, 0xA9, 0xFF, 0xFF),
    Rgba8::new(0xCC, 0x8C, 0xF5, 0xFF),
    Rgba8::new(0xFF, 0xA6, 0xF9, 0xFF),
    Rgba8::new(0xF1, 0xE6, 0xF7, 0xFF),
    Rgba8::new(0xFF, 0xE6, 0x8C, 0xFF),
    Rgba8::new(0x41, 0xBC, 0xA4, 0xFF),
    Rgba8::new(0xA5, 0xED, 0x53, 0xFF),
    Rgba8::new(0xFF, 0xFD, 0x91, 0xFF),
    Rgba8::new(0xFF, 0xD3, 0x53, 0xFF),
    Rgba8::new(0xFF, 0x72, 0x68, 0xFF),
    Rgba8::new(0x7D, 0xD2, 0xD1, 0xFF),
    Rgba8::new(0xBA, 0xF0, 0x6A, 0xFF),
    Rgba8::new(0xFF, 0x6A, 0x00, 0xFF),
];

/// Palette slot used for every heart-set popup.
pub const HEART_PALETTE_INDEX: usize = 2;

/// Normalized (0..1) RGB triple used as a color multiplier.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct RgbF {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
}

impl RgbF {
    /// Construct from normalized channels.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Identity multiplier.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    /// Normalize the color channels of an 8-bit color (alpha is ignored).
    pub fn from_rgba8(c: Rgba8) -> Self {
        Self::new(
            f32::from(c.r) / 255.0,
            f32::from(c.g) / 255.0,
            f32::from(c.b) / 255.0,
        )
    }

    /// HSL lightness: mean of the largest and smallest channel.
    pub fn lightness(self) -> f32 {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        (max + min) / 2.0
    }

    /// Scale HSL lightness by `factor`, clamped to `[0, 1]`.
    pub fn scale_lightness(self, factor: f32) -> Self {
        let (h, s, l) = rgb_to_hsl(self);
        hsl_to_rgb(h, s, (l * factor).clamp(0.0, 1.0))
    }

    /// Readable text color for a card of this tint.
    ///
    /// Dark cards (lightness <= 0.5) get a brightened text color, light cards a darkened one.
    pub fn readable_text_color(self) -> Self {
        if self.lightness() <= 0.5 {
            self.scale_lightness(2.4)
        } else {
            self.scale_lightness(0.3)
        }
    }
}

/// HSV to 8-bit RGB. `h` is in degrees and wraps, `s`/`v` are in `[0, 1]`.
///
/// Channels are truncated, not rounded.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (u8, u8, u8) {
    let h = h.rem_euclid(360.0);
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
    let m = v - c;
    let (rp, gp, bp) = match (h / 60.0) as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        5 => (c, 0.0, x),
        _ => (0.0, 0.0, 0.0),
    };
    let to_u8 = |v: f64| ((v + m) * 255.0).clamp(0.0, 255.0) as u8;
    (to_u8(rp), to_u8(gp), to_u8(bp))
}

/// RGB to HSL; hue in degrees `[0, 360)`, saturation and lightness in `[0, 1]`.
pub fn rgb_to_hsl(c: RgbF) -> (f32, f32, f32) {
    let max = c.r.max(c.g).max(c.b);
    let min = c.r.min(c.g).min(c.b);
    let l = (max + min) / 2.0;

    if max == min {
        return (0.0, 0.0, l);
    }

    let delta = max - min;
    let s = if l < 0.5 {
        delta / (max + min)
    } else {
        delta / (2.0 - max - min)
    };

    let mut h = if c.r == max {
        (c.g - c.b) / delta
    } else if c.g == max {
        2.0 + (c.b - c.r) / delta
    } else {
        4.0 + (c.r - c.g) / delta
    };
    h *= 60.0;
    if h < 0.0 {
        h += 360.0;
    }

    (h, s, l)
}

/// HSL to RGB. Zero saturation returns `l` on every channel.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> RgbF {
    if s == 0.0 {
        return RgbF::new(l, l, l);
    }

    fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;
    let h = h / 360.0;

    RgbF::new(
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
