use std::collections::VecDeque;
use std::sync::Arc;

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::card::builder::CardAssets;
use crate::foundation::color::{HEART_PALETTE_INDEX, PALETTE};
use crate::foundation::core::{Canvas, Point};
use crate::popups::choreography::{Choreography, Phase, heart_point};
use crate::popups::popup::{HEART_MAX_AGE, Popup};
use crate::raster::buffer::PixelBuffer;

/// Percent chance per expanding-phase update that a random popup appears.
pub const RANDOM_SPAWN_PERCENT: u32 = 40;
/// Initial zoom of heart popups.
pub const HEART_ZOOM: f64 = 0.5;
/// Initial zoom of random popups.
pub const RANDOM_ZOOM: f64 = 0.25;

const HEART_SPREAD: f64 = 1.005;
const SHUTTLE_SPREAD: f64 = 1.0045;
const ZOOM_GROWTH: f64 = 1.002;

/// Owns every popup and runs the heart choreography.
#[derive(Debug)]
pub struct PopupEngine {
    canvas: Canvas,
    assets: CardAssets,
    clock: Choreography,
    hearts: Vec<Popup>,
    randoms: VecDeque<Popup>,
    rng: StdRng,
}

impl PopupEngine {
    /// Engine at the start of the tracing phase. A `seed` makes it reproducible.
    pub fn new(canvas: Canvas, assets: CardAssets, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            canvas,
            assets,
            clock: Choreography::new(),
            hearts: Vec::new(),
            randoms: VecDeque::new(),
            rng,
        }
    }

    /// Choreography clock.
    pub fn choreography(&self) -> &Choreography {
        &self.clock
    }

    /// Heart-set popups in emission order.
    pub fn hearts(&self) -> &[Popup] {
        &self.hearts
    }

    /// Random popups in draw order.
    pub fn randoms(&self) -> impl ExactSizeIterator<Item = &Popup> {
        self.randoms.iter()
    }

    fn random_text(&mut self) -> Arc<PixelBuffer> {
        let texts = self.assets.texts();
        Arc::clone(&texts[self.rng.random_range(0..texts.len())])
    }

    fn spawn_heart(&mut self, t: f64) {
        let text = self.random_text();
        self.hearts.push(Popup::new(
            heart_point(self.canvas, t),
            HEART_ZOOM,
            PALETTE[HEART_PALETTE_INDEX],
            HEART_MAX_AGE,
            Arc::clone(self.assets.card()),
            text,
        ));
    }

    /// Spawn one random popup. Shuttle popups start near the center and go to the front.
    pub(crate) fn spawn_random(&mut self, shuttle: bool) {
        let (w, h) = (self.canvas.w(), self.canvas.h());
        let (pos, max_age) = if shuttle {
            let x = self.rng.random::<f64>() * w / 6.0 + w * 5.0 / 12.0;
            let y = self.rng.random::<f64>() * h / 6.0 + h * 5.0 / 12.0;
            (Point::new(x, y), 6.0 + self.rng.random::<f64>() * 16.0)
        } else {
            let x = self.rng.random::<f64>() * w;
            let y = self.rng.random::<f64>() * h;
            (Point::new(x, y), 4.0 + self.rng.random::<f64>() * 10.0)
        };
        let tint = PALETTE[self.rng.random_range(0..PALETTE.len())];
        let text = self.random_text();
        let popup = Popup::new(
            pos,
            RANDOM_ZOOM,
            tint,
            max_age,
            Arc::clone(self.assets.card()),
            text,
        );
        if shuttle {
            self.randoms.push_front(popup);
        } else {
            self.randoms.push_back(popup);
        }
    }

    /// Advance the choreography and every popup by `dt` seconds.
    pub fn update(&mut self, dt: f64) {
        let center = self.canvas.center();
        let shuttling = self.clock.shuttling();
        self.randoms.retain_mut(|p| {
            let alive = p.age(dt);
            if alive && shuttling {
                p.expand_from(center, SHUTTLE_SPREAD, ZOOM_GROWTH);
            }
            alive
        });

        match self.clock.phase() {
            Phase::Tracing => {
                if let Some(t) = self.clock.trace(dt) {
                    self.spawn_heart(t);
                }
            }
            Phase::Expanding => {
                if self.rng.random_range(0..100) < RANDOM_SPAWN_PERCENT {
                    self.spawn_random(self.clock.shuttling());
                }
                if !self.hearts.is_empty() {
                    for p in &mut self.hearts {
                        p.expand_from(center, HEART_SPREAD, ZOOM_GROWTH);
                    }
                    if self.clock.past_cutoff() {
                        tracing::debug!(
                            hearts = self.hearts.len(),
                            heart_time = self.clock.heart_time(),
                            "heart set cleared"
                        );
                        self.hearts.clear();
                    }
                }
                self.clock.advance(dt);
            }
        }
    }

    /// Draw random popups, then the heart set on top.
    pub fn draw(&self, surface: &mut PixelBuffer) {
        for p in &self.randoms {
            p.draw(surface);
        }
        for p in &self.hearts {
            p.draw(surface);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/popups/engine.rs"]
mod tests;
