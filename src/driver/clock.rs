use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::foundation::core::{Canvas, Point};

/// Step used when no valid frame timing is available.
pub const NOMINAL_DT: f64 = 1.0 / 60.0;

const FIRST_BURST_AT: f64 = 0.5;
const BURST_GAP_MIN_MS: u64 = 200;
const BURST_GAP_SPREAD_MS: u64 = 600;

/// Step for a measured frame rate. Unknown or non-positive rates fall back to [`NOMINAL_DT`].
pub fn frame_dt(fps: f64) -> f64 {
    if fps.is_finite() && fps > 0.0 {
        1.0 / fps
    } else {
        NOMINAL_DT
    }
}

/// Simulated time, advanced once per frame from the measured frame duration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameClock {
    now: f64,
    frames: u64,
}

impl FrameClock {
    /// Clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds of simulated time so far.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Frames ticked so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Record a frame that took `frame_secs` and return the step to simulate.
    pub fn tick(&mut self, frame_secs: f64) -> f64 {
        let fps = if frame_secs.is_finite() && frame_secs > 0.0 {
            1.0 / frame_secs
        } else {
            0.0
        };
        let dt = frame_dt(fps);
        self.now += dt;
        self.frames += 1;
        dt
    }
}

/// Fires a particle burst somewhere in the middle band of the screen every few hundred ms.
#[derive(Debug)]
pub struct AutoSpawner {
    next_at: f64,
    rng: StdRng,
}

impl AutoSpawner {
    /// Spawner whose first burst is due half a second in.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            next_at: FIRST_BURST_AT,
            rng,
        }
    }

    /// Time of the next scheduled burst.
    pub fn next_at(&self) -> f64 {
        self.next_at
    }

    /// Returns a burst origin once `now` has passed the scheduled time, then reschedules.
    pub fn poll(&mut self, now: f64, canvas: Canvas) -> Option<Point> {
        if now <= self.next_at {
            return None;
        }
        let x = self.rng.random::<f64>() * canvas.w();
        let y = self.rng.random::<f64>() * canvas.h() / 2.0 + canvas.h() / 4.0;
        let gap_ms = BURST_GAP_MIN_MS + self.rng.random_range(0..BURST_GAP_SPREAD_MS);
        self.next_at = now + gap_ms as f64 / 1000.0;
        Some(Point::new(x, y))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/driver/clock.rs"]
mod tests;
