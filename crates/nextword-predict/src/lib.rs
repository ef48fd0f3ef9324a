//! HTTP collaborators for the suggestion engine.
//!
//! [`HttpPredictor`] sends `POST {"text": "..."}` to the prediction service
//! and decodes `{"predictions": [{"word", "probability"}]}`.
//! [`HttpHealthProbe`] checks the service's health endpoint for the status bar.
//!
//! Failures map onto [`PredictError`](nextword_engine::PredictError):
//! connection problems and timeouts become `Transport`, non-2xx answers
//! `Status`, and bodies that are not the expected JSON `Malformed`.

pub mod config;
pub mod http;
pub mod wire;

pub use config::{PredictConfig, DEFAULT_ENDPOINT, DEFAULT_HEALTH_ENDPOINT};
pub use http::{HttpHealthProbe, HttpPredictor};
