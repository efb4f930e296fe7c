use std::sync::Arc;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{HeartError, HeartResult};
use crate::raster::blur::gaussian_blur;
use crate::raster::buffer::PixelBuffer;
use crate::raster::primitives::{draw_close_button, draw_shadow, fill_rounded_rect};
use crate::text::rasterizer::{FontFace, TextRasterizer};

/// Width of the card bitmap, including shadow margin.
pub const CARD_IMAGE_WIDTH: u32 = 700;
/// Height of the card bitmap, including shadow margin.
pub const CARD_IMAGE_HEIGHT: u32 = 620;
/// Width of the card body.
pub const CARD_WIDTH: i32 = 540;
/// Height of the card body.
pub const CARD_HEIGHT: i32 = 320;
/// Height of the title strip at the top of the card body.
pub const CARD_TITLE_HEIGHT: i32 = 54;

const CORNER_RADIUS: i32 = 20;
const SHADOW_OFFSET: (i32, i32) = (8, 12);
const SHADOW_LAYERS: i32 = 16;
const SHADOW_BLUR_RADIUS: u32 = 40;
// Matches a kernel of exp(-x^2 / (4 * radius)), i.e. sigma = sqrt(2 * radius).
const SHADOW_BLUR_SIGMA: f32 = 8.944_272;
const CLOSE_RADIUS: i32 = 16;
const CLOSE_MARGIN: i32 = 24;
const TITLE_COLOR: Rgba8 = Rgba8::new(180, 180, 180, 255);
const TITLE_TEXT: &str = "With Love";
const TITLE_TEXT_SIZE: f32 = 32.0;
const TITLE_TEXT_OFFSET: (i32, i32) = (12, 16);

/// Font size of the pre-rendered message bitmaps.
pub const MESSAGE_TEXT_SIZE: f32 = 40.0;

/// Candidate popup messages, in the order their bitmaps are stored.
pub const MESSAGES: [&str; 22] = [
    "May every day bring you joy",
    "A brand new day, you've got this!",
    "As bright as the fireworks, just like you!",
    "Stay romantic, shine on",
    "The world is brighter with you",
    "I love you, forever and always!",
    "Missing you every single day!",
    "Thinking of you from far away!",
    "I want to marry you!",
    "You are my one and only!",
    "Be happy every day!",
    "Remember to drink water!",
    "Call me when you miss me!",
    "Another day of missing you!",
    "You are my treasure!",
    "Don't forget to think of me!",
    "I love everything about you!",
    "Silly you, remember to miss me!",
    "My heart is full of you",
    "I miss you more than the sea is deep!",
    "Marry me, let me take care of you!",
    "Life has meaning because of you!",
];

fn card_origin() -> (i32, i32) {
    (
        (CARD_IMAGE_WIDTH as i32 - CARD_WIDTH) / 2,
        (CARD_IMAGE_HEIGHT as i32 - CARD_HEIGHT) / 2,
    )
}

/// Immutable bitmaps shared by every popup: the card and one bitmap per message.
#[derive(Clone, Debug)]
pub struct CardAssets {
    card: Arc<PixelBuffer>,
    texts: Vec<Arc<PixelBuffer>>,
}

impl CardAssets {
    /// Bundle a card bitmap with its message bitmaps. At least one message is required.
    pub fn new(card: PixelBuffer, texts: Vec<PixelBuffer>) -> HeartResult<Self> {
        if texts.is_empty() {
            return Err(HeartError::validation(
                "card assets need at least one message bitmap",
            ));
        }
        Ok(Self {
            card: Arc::new(card),
            texts: texts.into_iter().map(Arc::new).collect(),
        })
    }

    /// Shared card bitmap.
    pub fn card(&self) -> &Arc<PixelBuffer> {
        &self.card
    }

    /// Message bitmaps in message-table order.
    pub fn texts(&self) -> &[Arc<PixelBuffer>] {
        &self.texts
    }
}

/// Draw the card bitmap: shadow, optional blur, body, title strip, close button, title.
pub fn build_card_bitmap<R: TextRasterizer + ?Sized>(
    rasterizer: &mut R,
    face: &FontFace,
    blur: bool,
) -> HeartResult<PixelBuffer> {
    let (x0, y0) = card_origin();
    let (x1, y1) = (x0 + CARD_WIDTH, y0 + CARD_HEIGHT);

    let mut bg = PixelBuffer::new(CARD_IMAGE_WIDTH, CARD_IMAGE_HEIGHT);
    draw_shadow(
        &mut bg,
        x0,
        y0,
        x1,
        y1,
        CORNER_RADIUS,
        SHADOW_OFFSET.0,
        SHADOW_OFFSET.1,
        SHADOW_LAYERS,
    );
    if blur {
        bg = gaussian_blur(&bg, SHADOW_BLUR_RADIUS, SHADOW_BLUR_SIGMA)?;
    }

    fill_rounded_rect(&mut bg, x0, y0, x1, y1, CORNER_RADIUS, Rgba8::WHITE);

    // Title strip: round the top corners with the body, then square off its bottom edge.
    fill_rounded_rect(
        &mut bg,
        x0,
        y0,
        x1,
        y0 + CARD_TITLE_HEIGHT,
        CORNER_RADIUS,
        TITLE_COLOR,
    );
    bg.fill_rect(
        x0,
        y0 + CORNER_RADIUS,
        x1,
        y0 + CARD_TITLE_HEIGHT,
        TITLE_COLOR,
    );

    draw_close_button(
        &mut bg,
        x1 - CLOSE_MARGIN - CLOSE_RADIUS,
        y0 + CARD_TITLE_HEIGHT / 2,
        CLOSE_RADIUS,
    );

    rasterizer.render(
        TITLE_TEXT,
        face,
        TITLE_TEXT_SIZE,
        &mut bg,
        (x0 + TITLE_TEXT_OFFSET.0, y0 + TITLE_TEXT_OFFSET.1),
        Rgba8::WHITE,
    )?;

    Ok(bg)
}

/// Render each message in white onto a bitmap sized to its measured extent.
pub fn build_message_bitmaps<R: TextRasterizer + ?Sized>(
    rasterizer: &mut R,
    face: &FontFace,
    messages: &[&str],
) -> HeartResult<Vec<PixelBuffer>> {
    messages
        .iter()
        .map(|msg| {
            let (w, h) = rasterizer.measure(msg, face, MESSAGE_TEXT_SIZE)?;
            let mut img = PixelBuffer::new(w, h);
            rasterizer.render(msg, face, MESSAGE_TEXT_SIZE, &mut img, (0, 0), Rgba8::WHITE)?;
            Ok(img)
        })
        .collect()
}

/// Load the font face and build every shared popup asset.
///
/// A face that cannot be loaded is the one unrecoverable error of the engine.
#[tracing::instrument(skip(rasterizer, font_bytes), fields(font_bytes = font_bytes.len()))]
pub fn build_card_assets<R: TextRasterizer + ?Sized>(
    rasterizer: &mut R,
    font_bytes: &[u8],
    blur: bool,
) -> HeartResult<CardAssets> {
    let face = rasterizer.load_face(font_bytes)?;
    let card = build_card_bitmap(rasterizer, &face, blur)?;
    let texts = build_message_bitmaps(rasterizer, &face, &MESSAGES)?;
    tracing::debug!(messages = texts.len(), "card assets built");
    CardAssets::new(card, texts)
}

#[cfg(test)]
#[path = "../../tests/unit/card/builder.rs"]
mod tests;
