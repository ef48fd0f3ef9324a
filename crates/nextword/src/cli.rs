//! Command-line arguments.

use crate::config::{AppConfig, ConfigError};
use clap::Parser;
use std::path::PathBuf;

/// Terminal editor with inline next-word suggestions.
#[derive(Parser, Debug, Default)]
#[command(name = "nextword", version, about)]
pub struct Cli {
    /// Load configuration from a TOML file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Prediction endpoint (POST)
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Health-check endpoint (GET)
    #[arg(long, value_name = "URL")]
    pub health_endpoint: Option<String>,

    /// Delay between the last keystroke and the prediction request
    #[arg(long, value_name = "MS")]
    pub debounce_ms: Option<u64>,

    /// Client-side timeout for prediction requests
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Start with auto-suggest off (toggle with Ctrl+T)
    #[arg(long)]
    pub no_auto_suggest: bool,

    /// Do not add a space after an accepted word (toggle with Ctrl+S)
    #[arg(long)]
    pub no_smart_space: bool,

    /// Write logs to this file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `nextword_engine=trace`
    #[arg(long, value_name = "FILTER", default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// The configuration file (if any) with command-line overrides applied.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `--config` names an unreadable or invalid
    /// file.
    pub fn resolve(&self) -> Result<AppConfig, ConfigError> {
        let config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };
        Ok(self.apply(config))
    }

    /// Apply the flags that were given on top of `config`.
    pub fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(endpoint) = &self.endpoint {
            config.predict.endpoint.clone_from(endpoint);
        }
        if let Some(endpoint) = &self.health_endpoint {
            config.predict.health_endpoint.clone_from(endpoint);
        }
        if let Some(ms) = self.debounce_ms {
            config.engine.debounce_delay_ms = ms;
        }
        if let Some(ms) = self.timeout_ms {
            config.predict.timeout_ms = Some(ms);
        }
        if self.no_auto_suggest {
            config.engine.auto_suggest = false;
        }
        if self.no_smart_space {
            config.engine.smart_space = false;
        }
        if let Some(path) = &self.log_file {
            config.log_file = Some(path.clone());
        }
        config
    }
}
