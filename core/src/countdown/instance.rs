//! A single countdown instance
//!
//! # Lifecycle
//!
//! 1. Created from a `CountdownConfig` → duration applied → `reset()`
//! 2. `start()` fixes an absolute end time and moves to `playing`
//! 3. The ticker rewrites `remain` on each frame while playing
//! 4. `remain` hits zero → next frame moves to `finished` and emits `Finish`

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use countdown_types::CountdownConfig;

use super::event::{CountdownEvent, CountdownId, EventKind, EventSender};
use crate::clock::Clock;
use crate::format::{self, FRAGMENT_DELIMITER, SECOND, TimeData};

/// Shared ownership of a countdown; the ticker only keeps a `Weak` to it.
pub type CountdownHandle = Rc<RefCell<Countdown>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountdownState {
    #[default]
    Paused,
    Playing,
    Finished,
}

impl fmt::Display for CountdownState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CountdownState::Paused => "paused",
            CountdownState::Playing => "playing",
            CountdownState::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// Immutable render snapshot handed to the display layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownData {
    pub formatted_time: String,
    pub remain: u64,
    pub fragments: Vec<String>,
}

pub struct Countdown {
    id: CountdownId,
    state: CountdownState,
    /// Milliseconds left, written only by start/reset and the ticker sweep
    remain: u64,
    /// Absolute end time; stale unless playing
    end_time: u64,
    total_time: u64,
    format: String,
    auto_start: bool,
    millisecond: bool,
    clock: Rc<dyn Clock>,
    events: Option<EventSender>,
}

impl fmt::Debug for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Countdown")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("remain", &self.remain)
            .field("end_time", &self.end_time)
            .field("total_time", &self.total_time)
            .field("format", &self.format)
            .field("auto_start", &self.auto_start)
            .field("millisecond", &self.millisecond)
            .finish_non_exhaustive()
    }
}

impl Countdown {
    /// Create a countdown without a notification channel
    pub fn new(config: &CountdownConfig, clock: Rc<dyn Clock>) -> Self {
        Self::build(config, clock, None)
    }

    /// Create a countdown that reports to `events`
    ///
    /// The sender is attached before the initial reset, so an auto-started
    /// countdown's first `Render` is delivered too.
    pub fn with_events(config: &CountdownConfig, clock: Rc<dyn Clock>, events: EventSender) -> Self {
        Self::build(config, clock, Some(events))
    }

    fn build(config: &CountdownConfig, clock: Rc<dyn Clock>, events: Option<EventSender>) -> Self {
        let mut countdown = Self {
            id: CountdownId::next(),
            state: CountdownState::Paused,
            remain: 0,
            end_time: 0,
            total_time: 0,
            format: config.format.clone(),
            auto_start: config.auto_start,
            millisecond: config.millisecond,
            clock,
            events,
        };
        countdown.set_time(config.time_ms);
        countdown
    }

    pub fn into_handle(self) -> CountdownHandle {
        Rc::new(RefCell::new(self))
    }

    // ─── Accessors ──────────────────────────────────────────────────────────

    pub fn id(&self) -> CountdownId {
        self.id
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    /// Remaining milliseconds as of the last frame (not recomputed on read)
    pub fn remain(&self) -> u64 {
        self.remain
    }

    /// Absolute end time, only while playing
    pub fn end_time(&self) -> Option<u64> {
        (self.state == CountdownState::Playing).then_some(self.end_time)
    }

    pub fn time(&self) -> u64 {
        self.total_time
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn auto_start(&self) -> bool {
        self.auto_start
    }

    pub fn millisecond(&self) -> bool {
        self.millisecond
    }

    // ─── Configuration ──────────────────────────────────────────────────────

    /// Set the total duration (negative clamps to 0) and reset
    pub fn set_time(&mut self, time_ms: i64) {
        self.total_time = time_ms.max(0) as u64;
        self.reset();
    }

    pub fn set_format(&mut self, format: impl Into<String>) {
        self.format = format.into();
        self.emit(EventKind::Render);
    }

    // ─── Controls ───────────────────────────────────────────────────────────

    /// Start or resume. Restarts from the full duration once finished.
    pub fn start(&mut self) {
        if self.state == CountdownState::Playing {
            return;
        }

        if self.state == CountdownState::Finished {
            self.remain = self.total_time;
        }

        self.end_time = self.clock.now_ms().saturating_add(self.remain);
        self.state = CountdownState::Playing;
        tracing::debug!(countdown = %self.id, remain_ms = self.remain, "Countdown started");
    }

    /// Freeze at the last ticked `remain`
    pub fn pause(&mut self) {
        self.state = CountdownState::Paused;
    }

    /// Back to the full duration; auto-starts when configured to
    pub fn reset(&mut self) {
        self.pause();
        self.remain = self.total_time;
        self.emit(EventKind::Render);

        if self.auto_start {
            self.start();
        }
    }

    // ─── Ticking ────────────────────────────────────────────────────────────

    /// Advance one frame. Called by the ticker sweep only.
    pub(crate) fn advance(&mut self, now: u64) {
        if self.state != CountdownState::Playing {
            return;
        }

        if self.remain == 0 {
            self.state = CountdownState::Finished;
            tracing::info!(countdown = %self.id, "Countdown finished");
            self.emit(EventKind::Finish);
            self.emit(EventKind::Render);
            return;
        }

        let remain = self.end_time.saturating_sub(now);

        if self.millisecond || !format::is_same_whole_second(remain, self.remain) || remain == 0 {
            self.remain = remain;
            self.emit(EventKind::Tick { remain_ms: remain });
        }

        self.emit(EventKind::Render);
    }

    // ─── Rendering ──────────────────────────────────────────────────────────

    /// Build the render snapshot from the current state
    ///
    /// Without a millisecond token, a playing countdown rounds up to the next
    /// whole second so that `5000` reads `00:00:05` until `4000` is crossed.
    pub fn data(&self) -> CountdownData {
        let shows_millis = self.format.contains('S');
        let display = if !shows_millis && self.state == CountdownState::Playing {
            self.remain.div_ceil(SECOND) * SECOND
        } else {
            self.remain
        };

        let formatted_time = format::render(&self.format, &TimeData::from_millis(display));
        let fragments = formatted_time
            .split(FRAGMENT_DELIMITER)
            .map(str::to_string)
            .collect();

        CountdownData {
            formatted_time,
            remain: self.remain,
            fragments,
        }
    }

    fn emit(&mut self, kind: EventKind) {
        let Some(events) = &self.events else {
            return;
        };
        if events.send(CountdownEvent { id: self.id, kind }).is_err() {
            tracing::trace!(countdown = %self.id, "Event receiver dropped, detaching");
            self.events = None;
        }
    }
}
