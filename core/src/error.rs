//! Error types for configuration operations

use thiserror::Error;

/// Errors during configuration loading and saving
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration")]
    Load(#[source] confy::ConfyError),

    #[error("failed to save configuration")]
    Save(#[source] confy::ConfyError),

    #[error("failed to resolve configuration path")]
    Path(#[source] confy::ConfyError),

    #[error("frame interval must be at least 1ms")]
    ZeroFrameInterval,

    #[error("countdown {index} has an empty format")]
    EmptyFormat { index: usize },
}
