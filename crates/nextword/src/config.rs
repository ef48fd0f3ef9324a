//! Application configuration loaded from TOML.
//!
//! ```toml
//! log-file = "nextword.log"
//!
//! [engine]
//! smart-space = false
//! debounce-delay-ms = 200
//!
//! [predict]
//! endpoint = "http://localhost:5000/predict"
//! timeout-ms = 2000
//! ```

use nextword_engine::EngineConfig;
use nextword_predict::PredictConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Errors from reading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid configuration TOML.
    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Everything the binary can be configured with. Missing tables and keys
/// take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AppConfig {
    /// Suggestion behaviour.
    pub engine: EngineConfig,
    /// Prediction service location.
    pub predict: PredictConfig,
    /// Write logs here. No file, no logs.
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns the TOML error for malformed input or unknown value types.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Read and parse a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not valid configuration.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }
}
