//! Shared ticking
//!
//! Every countdown in the process is driven by one frame source instead of a
//! timer of its own:
//!
//! - **Ticker**: registry of mounted countdowns plus the frame subscription
//! - **Registration**: RAII guard tying a countdown's mount to the registry
//!
//! Per frame, each playing countdown compares its end time against the clock,
//! updates `remain` at whole-second (or millisecond) resolution, and requests
//! a render. Countdowns that reached zero on the previous frame move to
//! `finished` and emit `Finish`.
//!
//! Everything here is single-threaded (`Rc`/`RefCell`); the frame source runs
//! the sweep on the thread that owns the ticker.

mod registration;
mod scheduler;


pub use registration::Registration;
pub use scheduler::Ticker;
