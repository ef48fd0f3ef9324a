//! Interfaces to the services the engine consumes but does not implement.

use crate::suggestion::Suggestion;
use futures::future::BoxFuture;
use std::sync::Arc;

/// Why a prediction (or health) request produced no usable answer.
///
/// None of these ever reach the user as an error: the engine logs them and
/// degrades to showing no suggestion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PredictError {
    /// The request could not be sent or no response arrived.
    #[error("prediction transport failed: {0}")]
    Transport(String),
    /// The service answered with a non-success status.
    #[error("prediction service returned status {0}")]
    Status(u16),
    /// The response body could not be decoded.
    #[error("malformed prediction payload: {0}")]
    Malformed(String),
}

/// The next-word prediction service.
///
/// `predict` receives the trimmed text before the caret and resolves to the
/// ranked candidates, most likely first. An empty list means "no suggestion".
pub trait Predictor: Send + Sync + 'static {
    /// Request predictions for `text`.
    fn predict(&self, text: String) -> BoxFuture<'static, Result<Vec<Suggestion>, PredictError>>;
}

impl<P: Predictor + ?Sized> Predictor for Arc<P> {
    fn predict(&self, text: String) -> BoxFuture<'static, Result<Vec<Suggestion>, PredictError>> {
        (**self).predict(text)
    }
}

/// Liveness probe for the prediction service. Only feeds a status indicator.
pub trait HealthProbe: Send + Sync + 'static {
    /// Resolve to `Ok(())` when the service is reachable and healthy.
    fn check(&self) -> BoxFuture<'static, Result<(), PredictError>>;
}

impl<H: HealthProbe + ?Sized> HealthProbe for Arc<H> {
    fn check(&self) -> BoxFuture<'static, Result<(), PredictError>> {
        (**self).check()
    }
}
