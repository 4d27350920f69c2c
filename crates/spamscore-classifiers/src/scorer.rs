//! Propensity scoring: vectorize, predict probability, compare to threshold

use crate::classifier::{inference_err, Classifier, ProbabilisticClassifier};
use crate::model_loader::ModelBundle;
use crate::vectorizer::Vectorizer;
use spamscore_core::{Error, Result, ScoreResult};
use std::sync::Arc;
use tracing::debug;

/// Default decision threshold on the spam probability
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Column of the positive (spam) class in a binary {0, 1} model
const POSITIVE_CLASS_INDEX: usize = 1;

/// Check that `threshold` lies in [0, 1]; NaN is rejected
pub fn validate_threshold(threshold: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(Error::invalid_argument(format!(
            "threshold must be between 0 and 1, got {threshold}"
        )))
    }
}

/// Score `text` with a fitted classifier and vectorizer.
///
/// Fails with [`Error::InvalidArgument`] for a threshold outside [0, 1] and
/// with [`Error::UnsupportedModel`] when the classifier cannot produce class
/// probabilities or is not binary. There is no fallback to hard `predict`.
pub fn score(
    text: &str,
    classifier: &dyn Classifier,
    vectorizer: &Vectorizer,
    threshold: f64,
) -> Result<ScoreResult> {
    let threshold = validate_threshold(threshold)?;

    let model = classifier.as_probabilistic().ok_or_else(|| {
        Error::unsupported_model(format!(
            "{} does not implement predict_proba",
            classifier.name()
        ))
    })?;
    if classifier.classes().len() != 2 {
        return Err(Error::unsupported_model(format!(
            "{} has {} classes, a binary model is required",
            classifier.name(),
            classifier.classes().len()
        )));
    }

    let features = vectorizer.transform(&[text])?;
    let proba = model
        .predict_proba(&features)?
        .to_vec2::<f64>()
        .map_err(inference_err)?;

    let propensity = proba
        .first()
        .and_then(|row| row.get(POSITIVE_CLASS_INDEX))
        .copied()
        .ok_or_else(|| Error::inference("probability output has no positive class column"))?;
    if !(0.0..=1.0).contains(&propensity) {
        return Err(Error::inference(format!(
            "probability {propensity} outside [0, 1]"
        )));
    }

    debug!("Probability: {}", propensity);

    Ok(ScoreResult::from_propensity(propensity, threshold))
}

/// A loaded model bundle paired with a validated decision threshold
#[derive(Clone)]
pub struct Scorer {
    bundle: Arc<ModelBundle>,
    threshold: f64,
}

impl Scorer {
    pub fn new(bundle: Arc<ModelBundle>, threshold: f64) -> Result<Self> {
        Ok(Self {
            bundle,
            threshold: validate_threshold(threshold)?,
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn bundle(&self) -> &ModelBundle {
        &self.bundle
    }

    pub fn score(&self, text: &str) -> Result<ScoreResult> {
        score(
            text,
            self.bundle.classifier(),
            self.bundle.vectorizer(),
            self.threshold,
        )
    }
}
