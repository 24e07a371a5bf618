//! Countdown instances
//!
//! This module provides:
//! - **Instance**: state machine (`paused` → `playing` → `finished`) plus remaining time
//! - **Events**: `Tick`, `Finish` and `Render` notifications over an mpsc channel
//! - **Snapshot**: `CountdownData`, the formatted view pulled by the display layer
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                 Ticker (one frame source)                    │
//! │        sweep: for each registered countdown → advance()      │
//! └──────────────────────────────────────────────────────────────┘
//!                              │
//!                      Weak<RefCell<Countdown>>
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │            Countdown (owned by the mounting component)       │
//! │     remain / end_time / state  →  CountdownEvent channel     │
//! └──────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//!                     Display layer pulls data()
//! ```

mod event;
mod instance;

#[cfg(test)]
mod instance_tests;

pub use event::{
    CountdownEvent, CountdownId, EventKind, EventReceiver, EventSender, event_channel,
};
pub use instance::{Countdown, CountdownData, CountdownHandle, CountdownState};
