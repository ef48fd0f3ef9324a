/// One ranked candidate for the next word.
///
/// Suggestions are immutable once received. A list of them is kept in the
/// order the prediction service returned it; the engine never re-sorts.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    word: String,
    probability: f32,
}

impl Suggestion {
    /// Build a suggestion. Returns `None` for an empty (or all-whitespace)
    /// word; the probability is clamped into `[0, 1]` and NaN becomes 0.
    pub fn new(word: impl Into<String>, probability: f32) -> Option<Self> {
        let word = word.into();
        if word.trim().is_empty() {
            return None;
        }
        let probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        Some(Self { word, probability })
    }

    /// The suggested word.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Probability in `[0, 1]`.
    pub fn probability(&self) -> f32 {
        self.probability
    }

    /// Probability formatted as a percentage with one decimal, e.g. `70.0%`.
    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.probability * 100.0)
    }
}
