use std::sync::Arc;

use crate::card::builder::CARD_TITLE_HEIGHT;
use crate::foundation::color::RgbF;
use crate::foundation::core::{Point, Rgba8};
use crate::raster::blit::{DrawParams, draw_image};
use crate::raster::buffer::PixelBuffer;

/// Max age given to heart-set popups; they never expire on their own.
pub const HEART_MAX_AGE: f64 = 9999.0;
/// Opacity every popup starts with.
pub const BASE_OPACITY: f32 = 0.9;
/// Share of a popup's life after which it starts fading out.
pub const FADE_START: f64 = 0.7;

/// Opacity of a popup that has lived `life` of its `max_age` seconds.
///
/// Constant at [`BASE_OPACITY`] up to [`FADE_START`] of the lifetime, then linear down to
/// zero at the end.
pub fn fade_opacity(life: f64, max_age: f64) -> f32 {
    let progress = life / max_age;
    if progress <= FADE_START {
        return BASE_OPACITY;
    }
    let remaining = 1.0 - (progress - FADE_START) / (1.0 - FADE_START);
    (remaining.max(0.0) as f32) * BASE_OPACITY
}

/// A message card drawn at a point, scaled by its zoom.
#[derive(Clone, Debug)]
pub struct Popup {
    /// Screen position of the card center.
    pub pos: Point,
    /// Scale applied to the card and text bitmaps.
    pub zoom: f64,
    /// Card color multiplier.
    pub tint: RgbF,
    /// Text color multiplier, derived from the tint's lightness.
    pub text_color: RgbF,
    /// Current opacity in `[0, 1]`.
    pub opacity: f32,
    /// Seconds since spawn.
    pub life: f64,
    /// Lifetime in seconds.
    pub max_age: f64,
    card: Arc<PixelBuffer>,
    text: Arc<PixelBuffer>,
}

impl Popup {
    /// A freshly spawned popup sharing the given card and text bitmaps.
    pub fn new(
        pos: Point,
        zoom: f64,
        tint: Rgba8,
        max_age: f64,
        card: Arc<PixelBuffer>,
        text: Arc<PixelBuffer>,
    ) -> Self {
        let tint = RgbF::from_rgba8(tint);
        Self {
            pos,
            zoom,
            tint,
            text_color: tint.readable_text_color(),
            opacity: BASE_OPACITY,
            life: 0.0,
            max_age,
            card,
            text,
        }
    }

    /// Shared card bitmap.
    pub fn card(&self) -> &Arc<PixelBuffer> {
        &self.card
    }

    /// Message bitmap picked at spawn.
    pub fn text(&self) -> &Arc<PixelBuffer> {
        &self.text
    }

    /// Age by `dt`, fading near the end. Returns `false` once the popup has expired.
    pub(crate) fn age(&mut self, dt: f64) -> bool {
        self.life += dt;
        if self.life / self.max_age > FADE_START {
            self.opacity = fade_opacity(self.life, self.max_age);
        }
        self.life < self.max_age
    }

    /// Push the popup away from `center` by `spread` and grow its zoom by `growth`.
    pub(crate) fn expand_from(&mut self, center: Point, spread: f64, growth: f64) {
        self.pos = center + (self.pos - center) * spread;
        self.zoom *= growth;
    }

    /// Draw the card centred on the popup, then its message over the card body.
    pub fn draw(&self, surface: &mut PixelBuffer) {
        let z = self.zoom;
        let card = DrawParams {
            x: self.pos.x - f64::from(self.card.width()) / 2.0 * z,
            y: self.pos.y - f64::from(self.card.height()) / 2.0 * z,
            scale: z,
            tint: self.tint,
            opacity: self.opacity,
        };
        draw_image(surface, &self.card, &card);

        let tw = f64::from(self.text.width()) * z;
        let th = f64::from(self.text.height()) * z;
        let text = DrawParams {
            x: self.pos.x - tw / 2.0,
            y: self.pos.y + (f64::from(CARD_TITLE_HEIGHT) * z - th) / 2.0,
            scale: z,
            tint: self.text_color,
            opacity: self.opacity,
        };
        draw_image(surface, &self.text, &text);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/popups/popup.rs"]
mod tests;
