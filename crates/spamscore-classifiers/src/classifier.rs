//! Classifier traits and shared tensor helpers

use candle_core::{Device, Tensor, D};
use spamscore_core::{Error, Result};

/// A fitted classifier operating on vectorized text.
///
/// Every classifier can make hard decisions. Classifiers that can also
/// estimate class-membership probabilities advertise it through
/// [`Classifier::as_probabilistic`].
pub trait Classifier: Send + Sync {
    /// Get the model kind name
    fn name(&self) -> &str;

    /// Class labels in ascending order; probability columns follow this order
    fn classes(&self) -> &[i64];

    /// Number of input features the model was fitted on
    fn n_features(&self) -> usize;

    /// Predict a class label for every row of `features` (n_samples × n_features)
    fn predict(&self, features: &Tensor) -> Result<Vec<i64>>;

    /// Access the probability capability, if the model has one
    fn as_probabilistic(&self) -> Option<&dyn ProbabilisticClassifier> {
        None
    }
}

/// A classifier that produces per-class probabilities
pub trait ProbabilisticClassifier: Classifier {
    /// Class probabilities for every row of `features`, shape (n_samples × n_classes)
    fn predict_proba(&self, features: &Tensor) -> Result<Tensor>;
}

/// Map a candle error into an inference error
pub(crate) fn inference_err(e: candle_core::Error) -> Error {
    Error::inference(e.to_string())
}

/// Build a contiguous (n_features × n_outputs) weight matrix from row-major
/// (n_outputs × n_features) rows.
pub(crate) fn transposed_weights(rows: &[Vec<f64>], n_features: usize) -> Result<Tensor> {
    let n_outputs = rows.len();
    let mut data = vec![0.0f64; n_features * n_outputs];
    for (out, row) in rows.iter().enumerate() {
        for (feature, weight) in row.iter().enumerate() {
            data[feature * n_outputs + out] = *weight;
        }
    }
    Tensor::from_vec(data, (n_features, n_outputs), &Device::Cpu).map_err(inference_err)
}

/// Affine projection `features · weights + bias`
pub(crate) fn linear(features: &Tensor, weights: &Tensor, bias: &Tensor) -> Result<Tensor> {
    features
        .matmul(weights)
        .and_then(|z| z.broadcast_add(bias))
        .map_err(inference_err)
}

/// Map each row's arg-max column to its class label
pub(crate) fn argmax_classes(scores: &Tensor, classes: &[i64]) -> Result<Vec<i64>> {
    let indices = scores
        .argmax(D::Minus1)
        .and_then(|t| t.to_vec1::<u32>())
        .map_err(inference_err)?;

    indices
        .into_iter()
        .map(|i| {
            classes
                .get(i as usize)
                .copied()
                .ok_or_else(|| Error::inference(format!("class index {i} out of range")))
        })
        .collect()
}

/// Check the shared structural rules of a linear model artifact
pub(crate) fn validate_linear(
    kind: &str,
    classes: &[i64],
    rows: &[Vec<f64>],
    bias_len: usize,
) -> Result<usize> {
    if classes.len() < 2 {
        return Err(Error::artifact(format!(
            "{kind}: at least two classes required, got {}",
            classes.len()
        )));
    }
    if classes.windows(2).any(|w| w[0] >= w[1]) {
        return Err(Error::artifact(format!(
            "{kind}: classes must be strictly ascending"
        )));
    }

    let n_features = rows
        .first()
        .map(Vec::len)
        .ok_or_else(|| Error::artifact(format!("{kind}: empty weight matrix")))?;
    if n_features == 0 {
        return Err(Error::artifact(format!("{kind}: zero features")));
    }
    if let Some(bad) = rows.iter().position(|r| r.len() != n_features) {
        return Err(Error::artifact(format!(
            "{kind}: weight row {bad} has {} features, expected {n_features}",
            rows[bad].len()
        )));
    }
    if rows.len() != bias_len {
        return Err(Error::artifact(format!(
            "{kind}: {} weight rows but {bias_len} bias terms",
            rows.len()
        )));
    }
    if rows.iter().flatten().any(|w| !w.is_finite()) {
        return Err(Error::artifact(format!("{kind}: non-finite weight")));
    }

    Ok(n_features)
}
