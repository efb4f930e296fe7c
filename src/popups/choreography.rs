//! Heart-shaped emission curve and the two-phase choreography clock.

use std::f64::consts::TAU;

use crate::foundation::core::{Canvas, Point, Vec2};

/// Heart popups are emitted on every `EMIT_EVERY`-th tracing tick.
pub const EMIT_EVERY: u64 = 9;
/// Curve parameter speed-up while tracing.
pub const TRACE_SPEED: f64 = 3.0;
/// Heart time from which random popups spawn near the center and drift outwards.
pub const SHUTTLE_FROM: f64 = 6.0;
/// Heart time after which the heart set is dropped.
pub const HEART_CUTOFF: f64 = 12.3;

/// Curve offset of the heart at parameter `t`, y pointing up.
pub fn heart_curve(t: f64) -> Vec2 {
    let x = 16.0 * t.sin().powi(3);
    let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
    Vec2::new(x, y)
}

/// Pixels per curve unit; the heart fills a fixed share of the screen height.
pub fn heart_scale(canvas: Canvas) -> f64 {
    35.0 * canvas.h() / 1440.0
}

/// Screen position of the heart curve at `t`, centred on the canvas.
pub fn heart_point(canvas: Canvas, t: f64) -> Point {
    let s = heart_scale(canvas);
    let v = heart_curve(t);
    canvas.center() + Vec2::new(v.x * s, -v.y * s)
}

/// Which stage of the choreography is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Heart popups are laid along the curve.
    Tracing,
    /// Hearts spread out and random popups appear.
    Expanding,
}

/// Time and tick counters driving the popup choreography.
#[derive(Clone, Debug, PartialEq)]
pub struct Choreography {
    phase: Phase,
    heart_time: f64,
    heart_tick: u64,
}

impl Default for Choreography {
    fn default() -> Self {
        Self::new()
    }
}

impl Choreography {
    /// Start of the tracing phase.
    pub fn new() -> Self {
        Self {
            phase: Phase::Tracing,
            heart_time: 0.0,
            heart_tick: 0,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Accumulated heart time.
    pub fn heart_time(&self) -> f64 {
        self.heart_time
    }

    /// Number of tracing ticks taken.
    pub fn heart_tick(&self) -> u64 {
        self.heart_tick
    }

    /// Whether random popups should spawn near the center and drift outwards.
    pub fn shuttling(&self) -> bool {
        self.heart_time >= SHUTTLE_FROM
    }

    /// Whether the heart set has outlived its cutoff.
    pub fn past_cutoff(&self) -> bool {
        self.heart_time > HEART_CUTOFF
    }

    /// One tracing tick. Returns the curve parameter to emit a heart at, if any.
    pub(crate) fn trace(&mut self, dt: f64) -> Option<f64> {
        let emit = (self.heart_tick % EMIT_EVERY == 0).then_some(self.heart_time);
        if emit.is_some() {
            self.heart_time += dt * TRACE_SPEED;
        }
        self.heart_tick += 1;
        if self.heart_time >= TAU {
            self.phase = Phase::Expanding;
            tracing::debug!(
                heart_time = self.heart_time,
                ticks = self.heart_tick,
                "heart traced"
            );
        }
        emit
    }

    /// Advance the expanding-phase clock.
    pub(crate) fn advance(&mut self, dt: f64) {
        self.heart_time += dt;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/popups/choreography.rs"]
mod tests;
