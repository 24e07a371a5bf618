//! Periodic frame sources
//!
//! The ticker subscribes to exactly one [`FrameSource`] while it has live
//! countdowns and releases it as soon as the last one is unregistered.
//!
//! - [`IntervalFrameSource`]: tokio interval at display cadence (~60 FPS)
//! - [`ManualFrameSource`]: fires only when told to, and records how often
//!   it was started and stopped

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Callback invoked once per frame
pub type FrameCallback = Box<dyn FnMut()>;

/// A repeating timing signal
///
/// `stop` may be called from inside the running callback.
pub trait FrameSource {
    /// Begin invoking `on_frame` periodically, replacing any previous callback
    fn start(&mut self, on_frame: FrameCallback);

    /// Stop invoking the callback and release the subscription
    fn stop(&mut self);
}

// ─────────────────────────────────────────────────────────────────────────────
// Tokio interval
// ─────────────────────────────────────────────────────────────────────────────

/// Frame source backed by a local tokio task
///
/// `start` uses [`tokio::task::spawn_local`], so it must be called from
/// inside a [`tokio::task::LocalSet`].
#[derive(Debug)]
pub struct IntervalFrameSource {
    period: Duration,
    task: Option<JoinHandle<()>>,
}

impl IntervalFrameSource {
    /// Frame source with the given period. A zero period is raised to 1ms.
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            task: None,
        }
    }

    pub fn from_millis(period_ms: u64) -> Self {
        Self::new(Duration::from_millis(period_ms))
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Default for IntervalFrameSource {
    fn default() -> Self {
        Self::from_millis(countdown_types::DEFAULT_FRAME_INTERVAL_MS)
    }
}

impl FrameSource for IntervalFrameSource {
    fn start(&mut self, mut on_frame: FrameCallback) {
        self.stop();

        let period = self.period;
        tracing::debug!(period_ms = period.as_millis() as u64, "Frame source started");
        self.task = Some(tokio::task::spawn_local(async move {
            let mut frames = tokio::time::interval(period);
            // A late frame is simply dropped; the next sweep reads the clock anyway
            frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                frames.tick().await;
                on_frame();
            }
        }));
    }

    fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!("Frame source stopped");
        }
    }
}

impl Drop for IntervalFrameSource {
    fn drop(&mut self) {
        self.stop();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Manual
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct ManualState {
    callback: RefCell<Option<FrameCallback>>,
    running: Cell<bool>,
    // Bumped by start/stop so a frame in flight knows whether to put its callback back
    generation: Cell<u64>,
    starts: Cell<usize>,
    stops: Cell<usize>,
    frames: Cell<usize>,
}

/// Frame source driven by hand
///
/// Clones share state: hand one clone to the ticker and keep another to fire
/// frames and inspect counters.
#[derive(Clone, Default)]
pub struct ManualFrameSource {
    state: Rc<ManualState>,
}

impl ManualFrameSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invoke the callback once. Returns false when the source is stopped.
    pub fn fire(&self) -> bool {
        let Some(mut on_frame) = self.state.callback.borrow_mut().take() else {
            return false;
        };
        let generation = self.state.generation.get();

        on_frame();
        self.state.frames.set(self.state.frames.get() + 1);

        if self.state.generation.get() == generation {
            *self.state.callback.borrow_mut() = Some(on_frame);
        }
        true
    }

    /// Fire `n` frames, stopping early if the source is stopped
    pub fn fire_n(&self, n: usize) -> usize {
        (0..n).take_while(|_| self.fire()).count()
    }

    pub fn is_running(&self) -> bool {
        self.state.running.get()
    }

    pub fn start_count(&self) -> usize {
        self.state.starts.get()
    }

    pub fn stop_count(&self) -> usize {
        self.state.stops.get()
    }

    /// Frames delivered so far
    pub fn frames_fired(&self) -> usize {
        self.state.frames.get()
    }
}

impl FrameSource for ManualFrameSource {
    fn start(&mut self, on_frame: FrameCallback) {
        self.state.generation.set(self.state.generation.get() + 1);
        self.state.starts.set(self.state.starts.get() + 1);
        self.state.running.set(true);
        *self.state.callback.borrow_mut() = Some(on_frame);
    }

    fn stop(&mut self) {
        self.state.generation.set(self.state.generation.get() + 1);
        self.state.stops.set(self.state.stops.get() + 1);
        self.state.running.set(false);
        self.state.callback.borrow_mut().take();
    }
}
