//! Frame pacing and lifecycle for a mounted scene.
//!
//! The host's frame-callback mechanism (vsync, `request_repaint`, a
//! test loop) is abstracted behind [`FrameSource`] so the scheduler
//! can be driven deterministically in tests. The contract mirrors a
//! requestAnimationFrame-style host: the scheduler asks for one frame
//! at a time, the host delivers it whenever it likes via
//! [`Scheduler::on_frame`], and a delivery that arrives after
//! [`Scheduler::stop`] is discarded without observing any state.

use crate::{
    config::{Config, ConfigError},
    scene::Scene,
};
use tracing::debug;

/// Capability to request one future frame callback from the host.
///
/// Implementations must be cheap and non-blocking; the scheduler calls
/// this from inside the tick.
pub trait FrameSource {
    /// Ask the host to deliver one more frame to [`Scheduler::on_frame`].
    fn request_frame(&mut self);
}

/// Monotonic per-instance animation clock.
///
/// Advances by a fixed configured step per tick, independent of
/// wall-clock jitter, so motion speed stays visually deterministic
/// even when frame timing is irregular. Reset only at construction.
#[derive(Clone, Copy, Debug)]
pub struct AnimationClock {
    time: f32,
    step: f32,
}

impl AnimationClock {
    /// Creates a clock at zero with the given per-tick step.
    pub fn new(step: f32) -> Self {
        Self { time: 0.0, step }
    }

    /// Advances by one step and returns the new clock value.
    pub fn tick(&mut self) -> f32 {
        self.time += self.step;
        self.time
    }

    /// Current clock value.
    pub fn time(&self) -> f32 {
        self.time
    }
}

/// Owns the scene, the clock, and the run/stop lifecycle.
///
/// Exactly one scheduler exists per mounted instance. All state
/// mutation happens synchronously inside [`Scheduler::on_frame`]; the
/// scheduler never blocks and never performs I/O.
#[derive(Debug)]
pub struct Scheduler {
    scene: Scene,
    clock: AnimationClock,
    running: bool,
    released: bool,
}

impl Scheduler {
    /// Builds a scheduler and its scene from a configuration.
    ///
    /// ### Errors
    /// Propagates [`ConfigError`] from scene construction; nothing is
    /// partially applied on failure.
    pub fn new(cfg: &Config) -> Result<Self, ConfigError> {
        let scene = Scene::from_config(cfg)?;
        Ok(Self {
            scene,
            clock: AnimationClock::new(cfg.speed),
            running: false,
            released: false,
        })
    }

    /// Read access to the scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Current clock value.
    pub fn time(&self) -> f32 {
        self.clock.time()
    }

    /// Whether the tick loop is active.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Begins the tick loop by requesting the first frame.
    ///
    /// Safe to call repeatedly and after [`Scheduler::stop`] (the
    /// lifecycle is re-entrant); a released scheduler stays inert.
    pub fn start(&mut self, frames: &mut dyn FrameSource) {
        if self.released || self.running {
            return;
        }
        self.running = true;
        debug!(time = %self.clock.time(), "scheduler started");
        frames.request_frame();
    }

    /// Stops the tick loop.
    ///
    /// Idempotent. Once this returns, no delivered frame ticks the
    /// scene: a callback the host already scheduled is discarded by
    /// [`Scheduler::on_frame`].
    pub fn stop(&mut self) {
        if self.running {
            debug!(time = %self.clock.time(), "scheduler stopped");
        }
        self.running = false;
    }

    /// Host entry point for one frame callback.
    ///
    /// If the scheduler is running, advances the clock by its fixed
    /// step, ticks the scene at the new value, requests the next
    /// frame, and returns `true`. A frame delivered while stopped is
    /// discarded and returns `false` without touching any state.
    pub fn on_frame(&mut self, frames: &mut dyn FrameSource) -> bool {
        if !self.running {
            return false;
        }
        let time = self.clock.tick();
        self.scene.tick(time);
        frames.request_frame();
        true
    }

    /// Advances exactly one tick regardless of the run state.
    ///
    /// This is the manual single-step control (host "Step" button); it
    /// does not schedule any frames. A released scheduler ignores it.
    pub fn step(&mut self) {
        if self.released {
            return;
        }
        let time = self.clock.tick();
        self.scene.tick(time);
    }

    /// Host viewport-resize notification.
    ///
    /// Forwarded to the tile renderer; the clock and the noise seed
    /// are untouched. A resize racing teardown is ignored once the
    /// scheduler has been released.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        if self.released {
            return;
        }
        debug!(width, height, "viewport resized");
        self.scene.resize(width, height, self.clock.time());
    }

    /// Permanently tears the scheduler down.
    ///
    /// Stops the loop and makes every later `start`, `step`, and
    /// resize notification a no-op. Called from [`Drop`] as well, so a
    /// dropped scheduler can never leak a live tick loop.
    pub fn release(&mut self) {
        if !self.released {
            debug!(time = %self.clock.time(), "scheduler released");
        }
        self.running = false;
        self.released = true;
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.release();
    }
}
