use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default prediction endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/predict";

/// Default health-check endpoint.
pub const DEFAULT_HEALTH_ENDPOINT: &str = "http://localhost:5000/health";

/// Where the prediction service lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PredictConfig {
    /// URL that accepts `POST {"text": ...}`.
    pub endpoint: String,
    /// URL answering `GET` with a 2xx status when the service is up.
    pub health_endpoint: String,
    /// Client-side request timeout. `None` waits forever.
    pub timeout_ms: Option<u64>,
}

impl Default for PredictConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            health_endpoint: DEFAULT_HEALTH_ENDPOINT.to_owned(),
            timeout_ms: None,
        }
    }
}

impl PredictConfig {
    /// Set the prediction endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the health-check endpoint.
    pub fn with_health_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.health_endpoint = endpoint.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// The request timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}
