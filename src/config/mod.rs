pub mod gameplay;
pub mod loader;

use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

use crate::difficulty::Difficulty;
use crate::pipes::PipeConfig;

// Global configuration instance with thread-safe access
pub static CONFIG: once_cell::sync::Lazy<Arc<RwLock<Config>>> =
    once_cell::sync::Lazy::new(|| Arc::new(RwLock::new(Config::default())));

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub difficulty: Difficulty,
    pub field: gameplay::FieldConfig,
    pub pipes: gameplay::PipeOverrides,
    pub timing: gameplay::TimingConfig,
}

impl Config {
    /// Pool configuration for `difficulty` with this file's overrides applied
    #[must_use]
    pub fn pipe_config(&self, difficulty: Difficulty) -> PipeConfig {
        let mut config = PipeConfig::for_difficulty(difficulty, self.field.width, self.field.height);
        let overrides = &self.pipes;

        config.pipe_count = overrides.pipe_count.or(config.pipe_count);
        if let Some(spacing) = overrides.starting_spacing {
            config.starting_spacing = spacing;
        }
        if let Some(spacing) = overrides.final_spacing {
            config.final_spacing = spacing;
        }
        if let Some(step) = overrides.decrement_step {
            config.decrement_step = step;
        }
        if let Some(gap) = overrides.vertical_gap {
            config.vertical_gap = gap;
        }
        if let Some(speed) = overrides.scroll_speed {
            config.velocity_x = -speed;
        }

        config
    }

    /// Checks the pipe overrides against every difficulty, since any of them can be selected in play
    pub fn validate(&self) -> Result<(), loader::ConfigError> {
        for difficulty in Difficulty::ALL {
            self.pipe_config(difficulty)
                .validate()
                .map_err(|err| loader::ConfigError::Invalid(difficulty, err))?;
        }
        Ok(())
    }

    // Replace the global configuration
    pub fn install(config: Config) {
        match CONFIG.write() {
            Ok(mut current) => *current = config,
            Err(poisoned) => *poisoned.into_inner() = config,
        }
    }

    // Force reload the configuration from file into the global instance
    pub fn force_reload() -> Result<Config, loader::ConfigError> {
        let config = loader::load_config_from_file()?;
        Self::install(config.clone());
        Ok(config)
    }

    // Snapshot of the global configuration
    #[must_use]
    pub fn current() -> Config {
        match CONFIG.read() {
            Ok(config) => config.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}
