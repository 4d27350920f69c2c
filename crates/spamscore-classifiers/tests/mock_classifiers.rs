//! Mock classifiers for testing
//!
//! Configurable implementations of the classifier traits for exercising the
//! scorer's validation, error paths and threshold handling without a fitted
//! model.

use candle_core::{Device, Tensor};
use spamscore_classifiers::{score, Classifier, ProbabilisticClassifier, Vectorizer, VectorizerParams};
use spamscore_core::{Error, Result};
use std::sync::atomic::{AtomicU32, Ordering};

/// A binary classifier returning a fixed spam probability
pub struct MockClassifier {
    propensity: f64,
    n_features: usize,
    call_count: AtomicU32,
}

impl MockClassifier {
    /// Create a new mock classifier with the given propensity
    pub fn new(propensity: f64) -> Self {
        Self {
            propensity,
            n_features: 1,
            call_count: AtomicU32::new(0),
        }
    }

    /// Get the number of times predict_proba was called
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }
}

impl Classifier for MockClassifier {
    fn name(&self) -> &str {
        "mock"
    }

    fn classes(&self) -> &[i64] {
        &[0, 1]
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, features: &Tensor) -> Result<Vec<i64>> {
        let rows = features.dim(0).map_err(|e| Error::inference(e.to_string()))?;
        Ok(vec![i64::from(self.propensity >= 0.5); rows])
    }

    fn as_probabilistic(&self) -> Option<&dyn ProbabilisticClassifier> {
        Some(self)
    }
}

impl ProbabilisticClassifier for MockClassifier {
    fn predict_proba(&self, features: &Tensor) -> Result<Tensor> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        let rows = features.dim(0).map_err(|e| Error::inference(e.to_string()))?;
        let data: Vec<f64> = (0..rows)
            .flat_map(|_| [1.0 - self.propensity, self.propensity])
            .collect();
        Tensor::from_vec(data, (rows, 2), &Device::Cpu).map_err(|e| Error::inference(e.to_string()))
    }
}

/// A classifier that only makes hard decisions
pub struct HardDecisionClassifier;

impl Classifier for HardDecisionClassifier {
    fn name(&self) -> &str {
        "hard-decision"
    }

    fn classes(&self) -> &[i64] {
        &[0, 1]
    }

    fn n_features(&self) -> usize {
        1
    }

    fn predict(&self, features: &Tensor) -> Result<Vec<i64>> {
        let rows = features.dim(0).map_err(|e| Error::inference(e.to_string()))?;
        Ok(vec![1; rows])
    }
}

/// A probabilistic classifier that always fails
pub struct FailingClassifier;

impl Classifier for FailingClassifier {
    fn name(&self) -> &str {
        "failing"
    }

    fn classes(&self) -> &[i64] {
        &[0, 1]
    }

    fn n_features(&self) -> usize {
        1
    }

    fn predict(&self, _features: &Tensor) -> Result<Vec<i64>> {
        Err(Error::inference("Simulated classifier failure"))
    }

    fn as_probabilistic(&self) -> Option<&dyn ProbabilisticClassifier> {
        Some(self)
    }
}

impl ProbabilisticClassifier for FailingClassifier {
    fn predict_proba(&self, _features: &Tensor) -> Result<Tensor> {
        Err(Error::inference("Simulated classifier failure"))
    }
}

fn vectorizer() -> Vectorizer {
    Vectorizer::from_params(VectorizerParams {
        vocabulary: [("prize".to_string(), 0)].into_iter().collect(),
        idf: None,
        norm: None,
        binary: false,
        sublinear_tf: false,
        ngram_range: (1, 1),
    })
    .unwrap()
}

#[test]
fn test_mock_propensity_passes_through() {
    let classifier = MockClassifier::new(0.8);

    let result = score("hello", &classifier, &vectorizer(), 0.5).unwrap();
    assert_eq!(result.propensity, 0.8);
    assert!(result.prediction);
    assert_eq!(classifier.call_count(), 1);
}

#[test]
fn test_prediction_follows_threshold() {
    let classifier = MockClassifier::new(0.3);
    let vec = vectorizer();

    assert!(score("hello", &classifier, &vec, 0.3).unwrap().prediction);
    assert!(!score("hello", &classifier, &vec, 0.31).unwrap().prediction);
    assert!(score("hello", &classifier, &vec, 0.0).unwrap().prediction);
    assert!(!score("hello", &classifier, &vec, 1.0).unwrap().prediction);
}

#[test]
fn test_certain_spam_at_threshold_one() {
    let classifier = MockClassifier::new(1.0);
    assert!(score("hello", &classifier, &vectorizer(), 1.0).unwrap().prediction);
}

#[test]
fn test_invalid_threshold_never_reaches_model() {
    let classifier = MockClassifier::new(0.8);

    let err = score("hello", &classifier, &vectorizer(), 2.0).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
    assert_eq!(classifier.call_count(), 0);
}

#[test]
fn test_hard_decision_classifier_is_unsupported() {
    let err = score("hello", &HardDecisionClassifier, &vectorizer(), 0.5).unwrap_err();
    assert!(matches!(err, Error::UnsupportedModel(_)));
    assert!(err.to_string().contains("predict_proba"));
}

#[test]
fn test_out_of_range_probability_is_inference_error() {
    let classifier = MockClassifier::new(1.5);
    let err = score("hello", &classifier, &vectorizer(), 0.5).unwrap_err();
    assert!(matches!(err, Error::Inference(_)));

    let classifier = MockClassifier::new(f64::NAN);
    let err = score("hello", &classifier, &vectorizer(), 0.5).unwrap_err();
    assert!(matches!(err, Error::Inference(_)));
}

#[test]
fn test_model_failure_propagates() {
    let err = score("hello", &FailingClassifier, &vectorizer(), 0.5).unwrap_err();
    assert!(matches!(err, Error::Inference(_)));
}
