pub mod clock;
pub mod config;
pub mod countdown;
pub mod error;
pub mod format;
pub mod frame_source;
pub mod ticker;

// Re-exports for convenience
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{AppConfig, AppConfigExt, CountdownConfig};
pub use countdown::{
    Countdown, CountdownData, CountdownEvent, CountdownHandle, CountdownId, CountdownState,
    EventKind, EventReceiver, EventSender, event_channel,
};
pub use error::ConfigError;
pub use format::{TimeData, decompose, is_same_whole_second, render};
pub use frame_source::{FrameCallback, FrameSource, IntervalFrameSource, ManualFrameSource};
pub use ticker::{Registration, Ticker};
