//! heartfx renders a fireworks-and-love-notes overlay on top of a still background.
//!
//! Two engines run side by side each frame:
//!
//! - A [`ParticleEngine`] spawns and simulates bursts of colored sparks
//! - A [`PopupEngine`] lays message cards along a heart curve, then lets them drift apart
//!   while random cards fade in and out
//!
//! Both draw onto a straight-alpha RGBA8 [`PixelBuffer`]. The card bitmap every popup shares
//! is assembled once by [`build_card_assets`] from software compositing primitives and a
//! [`TextRasterizer`]. [`Overlay`] ties everything to a frame loop.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod card;
mod driver;
mod foundation;
mod particles;
mod popups;
mod raster;
mod text;

pub use crate::foundation::color::{
    HEART_PALETTE_INDEX, PALETTE, RgbF, hsl_to_rgb, hsv_to_rgb, rgb_to_hsl,
};
pub use crate::foundation::core::{Canvas, Point, Rgba8, Vec2};
pub use crate::foundation::error::{HeartError, HeartResult};

pub use crate::raster::blit::{DrawParams, draw_background, draw_image};
pub use crate::raster::blur::gaussian_blur;
pub use crate::raster::buffer::PixelBuffer;
pub use crate::raster::primitives::{
    CLOSE_BUTTON_CROSS, CLOSE_BUTTON_FILL, blend_pixel, draw_close_button, draw_shadow,
    fill_circle, fill_rounded_rect,
};

pub use crate::text::rasterizer::{FontFace, ParleyRasterizer, TextRasterizer};

pub use crate::card::builder::{
    CARD_HEIGHT, CARD_IMAGE_HEIGHT, CARD_IMAGE_WIDTH, CARD_TITLE_HEIGHT, CARD_WIDTH, CardAssets,
    MESSAGE_TEXT_SIZE, MESSAGES, build_card_assets, build_card_bitmap, build_message_bitmaps,
};

pub use crate::particles::engine::{GRAVITY, Particle, ParticleEngine, RADIUS_DECAY, VELOCITY_DRAG};

pub use crate::popups::choreography::{
    Choreography, EMIT_EVERY, HEART_CUTOFF, Phase, SHUTTLE_FROM, TRACE_SPEED, heart_curve,
    heart_point, heart_scale,
};
pub use crate::popups::engine::{HEART_ZOOM, PopupEngine, RANDOM_SPAWN_PERCENT, RANDOM_ZOOM};
pub use crate::popups::popup::{BASE_OPACITY, FADE_START, HEART_MAX_AGE, Popup, fade_opacity};

pub use crate::driver::clock::{AutoSpawner, FrameClock, NOMINAL_DT, frame_dt};
pub use crate::driver::overlay::{FrameControl, FrameInput, Overlay, OverlayOpts};
