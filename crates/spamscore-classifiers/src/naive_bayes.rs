//! Multinomial naive Bayes classifier

use crate::classifier::{
    argmax_classes, inference_err, linear, transposed_weights, validate_linear, Classifier,
    ProbabilisticClassifier,
};
use candle_core::{Device, Tensor, D};
use serde::{Deserialize, Serialize};
use spamscore_core::Result;

/// Serialized multinomial naive Bayes parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultinomialNbParams {
    pub classes: Vec<i64>,
    pub class_log_prior: Vec<f64>,
    /// One row of per-feature log probabilities per class
    pub feature_log_prob: Vec<Vec<f64>>,
}

/// Fitted multinomial naive Bayes
pub struct MultinomialNb {
    classes: Vec<i64>,
    n_features: usize,
    feature_log_prob: Tensor,
    class_log_prior: Tensor,
}

impl MultinomialNb {
    pub fn from_params(params: MultinomialNbParams) -> Result<Self> {
        let n_features = validate_linear(
            "multinomial_nb",
            &params.classes,
            &params.feature_log_prob,
            params.class_log_prior.len(),
        )?;
        if params.feature_log_prob.len() != params.classes.len() {
            return Err(spamscore_core::Error::artifact(format!(
                "multinomial_nb: {} rows for {} classes",
                params.feature_log_prob.len(),
                params.classes.len()
            )));
        }

        let feature_log_prob = transposed_weights(&params.feature_log_prob, n_features)?;
        let n_classes = params.class_log_prior.len();
        let class_log_prior = Tensor::from_vec(params.class_log_prior, n_classes, &Device::Cpu)
            .map_err(inference_err)?;

        Ok(Self {
            classes: params.classes,
            n_features,
            feature_log_prob,
            class_log_prior,
        })
    }

    /// Unnormalised log posterior per class
    fn joint_log_likelihood(&self, features: &Tensor) -> Result<Tensor> {
        linear(features, &self.feature_log_prob, &self.class_log_prior)
    }
}

impl Classifier for MultinomialNb {
    fn name(&self) -> &str {
        "multinomial_nb"
    }

    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, features: &Tensor) -> Result<Vec<i64>> {
        let jll = self.joint_log_likelihood(features)?;
        argmax_classes(&jll, &self.classes)
    }

    fn as_probabilistic(&self) -> Option<&dyn ProbabilisticClassifier> {
        Some(self)
    }
}

impl ProbabilisticClassifier for MultinomialNb {
    fn predict_proba(&self, features: &Tensor) -> Result<Tensor> {
        let jll = self.joint_log_likelihood(features)?;
        candle_nn::ops::softmax(&jll, D::Minus1).map_err(inference_err)
    }
}
