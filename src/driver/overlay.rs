use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use crate::card::builder::CardAssets;
use crate::driver::clock::{AutoSpawner, FrameClock, NOMINAL_DT};
use crate::foundation::core::{Canvas, Point, Rgba8};
use crate::foundation::error::{HeartError, HeartResult};
use crate::particles::engine::ParticleEngine;
use crate::popups::engine::PopupEngine;
use crate::raster::blit::draw_background;
use crate::raster::buffer::PixelBuffer;

/// Runtime options for an [`Overlay`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverlayOpts {
    /// Seed for every random source; OS entropy when unset.
    pub seed: Option<u64>,
    /// Run the Gaussian pass over the card shadow.
    pub card_blur: bool,
    /// Multiplier applied to the background color.
    pub background_dim: f32,
    /// Fire scheduled bursts on top of pointer-driven ones.
    pub auto_spawn: bool,
}

impl Default for OverlayOpts {
    fn default() -> Self {
        Self {
            seed: None,
            card_blur: true,
            background_dim: 0.6,
            auto_spawn: true,
        }
    }
}

impl OverlayOpts {
    /// Parse options from a JSON reader. Missing fields take their defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> HeartResult<Self> {
        let opts: Self = serde_json::from_reader(r)
            .map_err(|e| HeartError::serde(format!("parse overlay options JSON: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Parse options from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> HeartResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            HeartError::io(format!("open overlay options '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Reject values the overlay cannot honor.
    pub fn validate(&self) -> HeartResult<()> {
        if !self.background_dim.is_finite() || !(0.0..=1.0).contains(&self.background_dim) {
            return Err(HeartError::validation(
                "background_dim must be finite and in [0, 1]",
            ));
        }
        Ok(())
    }

    fn sub_seed(&self, salt: u64) -> Option<u64> {
        self.seed.map(|s| s.wrapping_add(salt))
    }
}

/// Input sampled by the host for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Pointer position in surface pixels.
    pub pointer: Point,
    /// Whether the primary pointer button is held.
    pub primary_down: bool,
    /// Whether the user asked to quit.
    pub escape: bool,
}

/// What the host loop should do after an update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
    /// Keep running.
    Continue,
    /// Stop the loop.
    Terminate,
}

/// Reference frame driver: owns both engines and composes them over a background.
pub struct Overlay {
    canvas: Canvas,
    opts: OverlayOpts,
    background: Option<PixelBuffer>,
    clock: FrameClock,
    spawner: Option<AutoSpawner>,
    particles: Arc<ParticleEngine>,
    popups: PopupEngine,
}

impl std::fmt::Debug for Overlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Overlay")
            .field("canvas", &self.canvas)
            .field("opts", &self.opts)
            .field("has_background", &self.background.is_some())
            .field("clock", &self.clock)
            .field("particles", &self.particles.len())
            .field("hearts", &self.popups.hearts().len())
            .field("randoms", &self.popups.randoms().len())
            .finish()
    }
}

impl Overlay {
    /// Build an overlay for `canvas`. Without a background the surface is cleared to black.
    pub fn new(
        canvas: Canvas,
        background: Option<PixelBuffer>,
        assets: CardAssets,
        opts: OverlayOpts,
    ) -> HeartResult<Self> {
        opts.validate()?;
        let spawner = opts.auto_spawn.then(|| AutoSpawner::new(opts.sub_seed(2)));
        Ok(Self {
            canvas,
            background,
            clock: FrameClock::new(),
            spawner,
            particles: Arc::new(ParticleEngine::new(canvas, opts.sub_seed(0))),
            popups: PopupEngine::new(canvas, assets, opts.sub_seed(1)),
            opts,
        })
    }

    /// Surface size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Options the overlay was built with.
    pub fn opts(&self) -> &OverlayOpts {
        &self.opts
    }

    /// Frame clock.
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Particle engine; clone the handle to spawn bursts from another thread.
    pub fn particles(&self) -> &Arc<ParticleEngine> {
        &self.particles
    }

    /// Popup engine.
    pub fn popups(&self) -> &PopupEngine {
        &self.popups
    }

    /// Advance one frame that took `frame_secs` of wall time.
    ///
    /// Particles step by the measured time; popups always step by [`NOMINAL_DT`].
    pub fn update(&mut self, input: &FrameInput, frame_secs: f64) -> FrameControl {
        if input.escape {
            tracing::debug!(frames = self.clock.frames(), "overlay terminated");
            return FrameControl::Terminate;
        }
        if input.primary_down {
            self.particles.spawn(input.pointer.x, input.pointer.y);
        }

        let dt = self.clock.tick(frame_secs);
        if let Some(spawner) = self.spawner.as_mut()
            && let Some(p) = spawner.poll(self.clock.now(), self.canvas)
        {
            self.particles.spawn(p.x, p.y);
        }

        self.particles.update(dt);
        self.popups.update(NOMINAL_DT);
        FrameControl::Continue
    }

    /// Compose background, popups and particles onto `surface`.
    pub fn draw(&self, surface: &mut PixelBuffer) {
        match &self.background {
            Some(bg) => draw_background(surface, bg, self.opts.background_dim),
            None => surface.fill(Rgba8::BLACK),
        }
        self.popups.draw(surface);
        self.particles.draw(surface);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/driver/overlay.rs"]
mod tests;
