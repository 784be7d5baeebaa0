//! Settings for the terminal game.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tactoe_core::Timing;
use tracing::{debug, info, instrument};

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "tactoe.toml";

/// User-tunable settings. Every field has a default, so an empty or missing
/// file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Pause before the computer answers, in milliseconds.
    reply_delay_ms: u64,

    /// Fade-out time before the board clears on reset, in milliseconds.
    reset_delay_ms: u64,

    /// Pause after the computer's mark appears, in milliseconds.
    settle_delay_ms: u64,

    /// Seed for the computer's random source. `None` draws from entropy.
    seed: Option<u64>,

    /// Where tracing output goes while the terminal UI owns the screen.
    log_file: PathBuf,

    /// How long the victory confetti stays on screen, in milliseconds.
    celebration_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reply_delay_ms: 600,
            reset_delay_ms: 600,
            settle_delay_ms: 600,
            seed: None,
            log_file: PathBuf::from("tactoe.log"),
            celebration_ms: 1500,
        }
    }
}

impl Settings {
    /// Loads settings from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading settings from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let settings: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(?settings, "Settings loaded");
        Ok(settings)
    }

    /// Loads `path` if given, else [`DEFAULT_CONFIG_FILE`] if it exists,
    /// else the defaults.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Replaces the seed when `seed` is set.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    /// Delays for the game controller.
    pub fn timing(&self) -> Timing {
        Timing {
            reply_delay: Duration::from_millis(self.reply_delay_ms),
            reset_delay: Duration::from_millis(self.reset_delay_ms),
            settle_delay: Duration::from_millis(self.settle_delay_ms),
        }
    }

    /// Celebration length as a duration.
    pub fn celebration(&self) -> Duration {
        Duration::from_millis(self.celebration_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
