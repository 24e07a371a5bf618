//! Shared configuration types for the countdown library
//!
//! This crate contains serializable configuration types that are shared between
//! the ticking core (countdown-core) and the host application (countdown-cli).

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Defaults
// ─────────────────────────────────────────────────────────────────────────────

/// Default render template for a countdown
pub const DEFAULT_FORMAT: &str = "HH:mm:ss";

/// Default countdown duration in milliseconds (one minute)
pub const DEFAULT_TIME_MS: i64 = 60_000;

/// Default frame interval (~60 FPS)
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;

const ONE_DAY_MS: i64 = 86_400_000;

fn default_true() -> bool {
    true
}
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_time_ms() -> i64 {
    DEFAULT_TIME_MS
}
fn default_frame_interval_ms() -> u64 {
    DEFAULT_FRAME_INTERVAL_MS
}
fn default_countdowns() -> Vec<CountdownConfig> {
    CountdownConfig::demo_set()
}

// ─────────────────────────────────────────────────────────────────────────────
// Countdown Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Per-instance countdown configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownConfig {
    /// Optional display label (host only, ignored by the core)
    #[serde(default)]
    pub label: Option<String>,
    /// Render template, see the token table in `countdown_core::format`
    #[serde(default = "default_format")]
    pub format: String,
    /// Start counting as soon as the countdown is created or reset
    #[serde(default = "default_true")]
    pub auto_start: bool,
    /// Emit a tick on every frame instead of once per whole second
    #[serde(default)]
    pub millisecond: bool,
    /// Total duration in milliseconds. Negative values are clamped to 0.
    #[serde(default = "default_time_ms", rename = "time")]
    pub time_ms: i64,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            label: None,
            format: default_format(),
            auto_start: true,
            millisecond: false,
            time_ms: DEFAULT_TIME_MS,
        }
    }
}

impl CountdownConfig {
    /// Countdown of `time_ms` with every other field at its default
    pub fn with_time(time_ms: i64) -> Self {
        Self {
            time_ms,
            ..Self::default()
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn millisecond(mut self, millisecond: bool) -> Self {
        self.millisecond = millisecond;
        self
    }

    pub fn auto_start(mut self, auto_start: bool) -> Self {
        self.auto_start = auto_start;
        self
    }

    /// The countdowns mounted by a fresh host installation
    pub fn demo_set() -> Vec<Self> {
        vec![
            Self::with_time(ONE_DAY_MS).label("Base usage"),
            Self::with_time(60_000).label("Seconds only").format("ss"),
            Self::with_time(ONE_DAY_MS)
                .label("Millisecond render")
                .format("HH:mm:ss:SSS")
                .millisecond(true),
            Self::with_time(10_000)
                .label("Manual control")
                .format("HH:mm:ss:SSS")
                .millisecond(true)
                .auto_start(false),
            Self::with_time(ONE_DAY_MS * 2)
                .label("Fragments")
                .format("HH:mm:ss:SSS")
                .millisecond(true),
        ]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Host application configuration
///
/// Note: Persistence (load/save) is provided by countdown-core via confy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Interval between shared frames in milliseconds
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
    /// Countdowns mounted at startup
    #[serde(default = "default_countdowns")]
    pub countdowns: Vec<CountdownConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            countdowns: default_countdowns(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_defaults() {
        let config = CountdownConfig::default();
        assert_eq!(config.format, "HH:mm:ss");
        assert!(config.auto_start);
        assert!(!config.millisecond);
        assert_eq!(config.time_ms, 60_000);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: CountdownConfig = toml::from_str("time = 5000").unwrap();
        assert_eq!(config.time_ms, 5000);
        assert_eq!(config.format, DEFAULT_FORMAT);
        assert!(config.auto_start);

        let app: AppConfig = toml::from_str("frame_interval_ms = 33").unwrap();
        assert_eq!(app.frame_interval_ms, 33);
        assert_eq!(app.countdowns.len(), 5);
    }

    #[test]
    fn test_demo_set_has_one_manual_countdown() {
        let manual: Vec<_> = CountdownConfig::demo_set()
            .into_iter()
            .filter(|c| !c.auto_start)
            .collect();
        assert_eq!(manual.len(), 1);
        assert_eq!(manual[0].time_ms, 10_000);
    }
}
