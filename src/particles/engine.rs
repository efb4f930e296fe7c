use std::f64::consts::TAU;

use parking_lot::Mutex;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::foundation::color::hsv_to_rgb;
use crate::foundation::core::{Canvas, Point, Rgba8, Vec2};
use crate::raster::buffer::PixelBuffer;
use crate::raster::primitives::fill_circle;

/// Downward acceleration in pixels per second squared.
pub const GRAVITY: f64 = 30.0;
/// Per-update velocity multiplier.
pub const VELOCITY_DRAG: f64 = 0.998;
/// Per-update radius multiplier.
pub const RADIUS_DECAY: f64 = 0.995;

const BURST_MIN: usize = 220;
const BURST_SPREAD: usize = 400;
const HUE_JITTER: f64 = 20.0;
const SATURATION: f64 = 0.9;
const VALUE: f64 = 1.0;
const ALPHA: u8 = 200;

/// One spark of a burst.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Position in surface pixels.
    pub pos: Point,
    /// Velocity in pixels per second.
    pub vel: Vec2,
    /// Remaining lifetime in seconds.
    pub life: f64,
    /// Drawn radius in pixels.
    pub radius: f64,
    /// Fixed color, chosen at spawn.
    pub color: Rgba8,
}

impl Particle {
    /// Integrate one step. Returns `false` once the particle should be retired.
    fn step(&mut self, dt: f64, canvas: Canvas) -> bool {
        self.pos += self.vel * dt;
        self.vel.y += GRAVITY * dt;
        self.life -= dt;
        self.vel *= VELOCITY_DRAG;
        self.radius *= RADIUS_DECAY;
        self.life > 0.0 && canvas.contains(self.pos)
    }
}

struct ParticleState {
    // Oldest first; drawing walks it backwards so the newest particles come first.
    particles: Vec<Particle>,
    rng: StdRng,
}

/// Live particle collection, safe to spawn into from one thread while another ticks it.
///
/// Every operation holds one lock for its full duration.
pub struct ParticleEngine {
    canvas: Canvas,
    state: Mutex<ParticleState>,
}

impl std::fmt::Debug for ParticleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParticleEngine")
            .field("canvas", &self.canvas)
            .field("live", &self.len())
            .finish()
    }
}

impl ParticleEngine {
    /// Empty engine bounded by `canvas`. A `seed` makes bursts reproducible.
    pub fn new(canvas: Canvas, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            canvas,
            state: Mutex::new(ParticleState {
                particles: Vec::new(),
                rng,
            }),
        }
    }

    /// Bounds particles are retired outside of.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Spawn one burst of particles at `(x, y)`. Returns how many were created.
    pub fn spawn(&self, x: f64, y: f64) -> usize {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let rng = &mut state.rng;

        let count = BURST_MIN + rng.random_range(0..BURST_SPREAD);
        let base_hue = rng.random::<f64>() * 360.0;
        state.particles.reserve(count);
        for _ in 0..count {
            let hue = base_hue + rng.random::<f64>() * 2.0 * HUE_JITTER - HUE_JITTER;
            let (r, g, b) = hsv_to_rgb(hue, SATURATION, VALUE);
            let theta = rng.random::<f64>() * TAU;
            let radius = 1.0 + rng.random::<f64>() * 4.0;
            // Bigger sparks in bigger bursts fly faster.
            let speed = 1.0 + rng.random::<f64>() * 1.5 * count as f64 / radius;
            let life = 3.0 + rng.random::<f64>() * 3.0;
            state.particles.push(Particle {
                pos: Point::new(x, y),
                vel: Vec2::new(theta.cos() * speed, theta.sin() * speed),
                life,
                radius,
                color: Rgba8::new(r, g, b, ALPHA),
            });
        }
        tracing::trace!(count, x, y, "particle burst");
        count
    }

    /// Add a single pre-built particle as the newest one.
    pub fn insert(&self, particle: Particle) {
        self.state.lock().particles.push(particle);
    }

    /// Advance every particle by `dt` seconds, retiring expired or off-screen ones.
    pub fn update(&self, dt: f64) {
        let canvas = self.canvas;
        self.state
            .lock()
            .particles
            .retain_mut(|p| p.step(dt, canvas));
    }

    /// Draw every live particle as a filled circle, newest first.
    pub fn draw(&self, surface: &mut PixelBuffer) {
        let state = self.state.lock();
        for p in state.particles.iter().rev() {
            fill_circle(surface, p.pos.x, p.pos.y, p.radius, p.color);
        }
    }

    /// Number of live particles.
    pub fn len(&self) -> usize {
        self.state.lock().particles.len()
    }

    /// Whether no particles are live.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the live particles in draw order (newest first).
    pub fn snapshot(&self) -> Vec<Particle> {
        self.state.lock().particles.iter().rev().cloned().collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/engine.rs"]
mod tests;
