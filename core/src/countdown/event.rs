//! Notifications emitted by countdown instances

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::mpsc;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique countdown identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CountdownId(u64);

impl CountdownId {
    pub(crate) fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CountdownId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What happened to a countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Displayed remaining time changed
    Tick { remain_ms: u64 },
    /// Countdown reached zero and moved to `finished`
    Finish,
    /// State or timing changed; pull a fresh snapshot
    Render,
}

/// A notification tagged with the countdown it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownEvent {
    pub id: CountdownId,
    pub kind: EventKind,
}

pub type EventSender = mpsc::UnboundedSender<CountdownEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<CountdownEvent>;

/// Create a channel for countdown notifications
///
/// One sender may be shared by any number of countdowns.
pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
