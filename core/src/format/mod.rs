//! Time formatting
//!
//! Pure functions that turn a remaining duration in milliseconds into a
//! [`TimeData`] breakdown and render it through a format template.

mod template;
mod time_data;

pub use template::render;
pub use time_data::{DAY, HOUR, MINUTE, SECOND, TimeData, decompose};

/// Delimiter used to split a rendered time into fragments
pub const FRAGMENT_DELIMITER: char = ':';

/// True when both values fall in the same whole second
pub fn is_same_whole_second(a: u64, b: u64) -> bool {
    a / SECOND == b / SECOND
}
