//! Application configuration
//!
//! This module re-exports shared types from countdown-types and provides
//! persistence for AppConfig.

use std::path::PathBuf;

pub use countdown_types::{
    AppConfig, CountdownConfig, DEFAULT_FORMAT, DEFAULT_FRAME_INTERVAL_MS, DEFAULT_TIME_MS,
};

use crate::error::ConfigError;

const APP_NAME: &str = "countdown";
const CONFIG_NAME: &str = "config";

/// Extension trait for AppConfig persistence and validation
pub trait AppConfigExt: Sized {
    fn load() -> Result<Self, ConfigError>;
    fn save(&self) -> Result<(), ConfigError>;
    fn config_path() -> Result<PathBuf, ConfigError>;
    fn validate(&self) -> Result<(), ConfigError>;
}

impl AppConfigExt for AppConfig {
    /// Load from the platform config directory, writing defaults on first run
    fn load() -> Result<Self, ConfigError> {
        let config: AppConfig = confy::load(APP_NAME, CONFIG_NAME).map_err(ConfigError::Load)?;
        config.validate()?;
        Ok(config)
    }

    fn save(&self) -> Result<(), ConfigError> {
        self.validate()?;
        confy::store(APP_NAME, CONFIG_NAME, self).map_err(ConfigError::Save)
    }

    fn config_path() -> Result<PathBuf, ConfigError> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME).map_err(ConfigError::Path)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_interval_ms == 0 {
            return Err(ConfigError::ZeroFrameInterval);
        }
        if let Some(index) = self.countdowns.iter().position(|c| c.format.is_empty()) {
            return Err(ConfigError::EmptyFormat { index });
        }
        Ok(())
    }
}
