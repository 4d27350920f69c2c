//! Core types for spamscore

use serde::{Deserialize, Serialize};

/// Outcome of scoring a single text
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// `true` when the text is classified as spam
    pub prediction: bool,

    /// Probability of the positive (spam) class, in [0, 1]
    pub propensity: f64,
}

impl ScoreResult {
    /// Build a result by comparing `propensity` against `threshold`.
    ///
    /// The comparison is inclusive: a propensity equal to the threshold is
    /// a positive prediction.
    pub fn from_propensity(propensity: f64, threshold: f64) -> Self {
        Self {
            prediction: propensity >= threshold,
            propensity,
        }
    }

    /// Human-readable label for logs and metric labels
    pub fn label(&self) -> &'static str {
        if self.prediction {
            "spam"
        } else {
            "ham"
        }
    }
}
