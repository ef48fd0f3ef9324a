//! JSON bodies exchanged with the prediction service.

use nextword_engine::Suggestion;
use serde::{Deserialize, Serialize};

/// `POST` body: the trimmed text before the caret.
#[derive(Debug, Serialize)]
pub struct PredictRequest<'a> {
    pub text: &'a str,
}

/// Response body. A missing or `null` list means no prediction.
#[derive(Debug, Default, Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub predictions: Option<Vec<Prediction>>,
}

/// One ranked entry as sent by the service.
#[derive(Debug, Deserialize)]
pub struct Prediction {
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    pub probability: f32,
}

impl PredictResponse {
    /// Convert to suggestions in the service's order, dropping entries with
    /// an empty word and clamping probabilities into `[0, 1]`.
    pub fn into_suggestions(self) -> Vec<Suggestion> {
        self.predictions
            .unwrap_or_default()
            .into_iter()
            .filter_map(|p| Suggestion::new(p.word, p.probability))
            .collect()
    }
}
