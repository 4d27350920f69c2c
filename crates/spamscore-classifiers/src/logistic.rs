//! Logistic regression classifier

use crate::classifier::{
    argmax_classes, inference_err, linear, transposed_weights, validate_linear, Classifier,
    ProbabilisticClassifier,
};
use candle_core::{Device, Tensor, D};
use serde::{Deserialize, Serialize};
use spamscore_core::Result;

/// Serialized logistic regression parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegressionParams {
    pub classes: Vec<i64>,
    /// One row for a binary model, one row per class otherwise
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
}

/// Fitted logistic regression.
///
/// A binary model has a single weight row and uses the logistic function;
/// a multi-class model uses softmax over one row per class.
pub struct LogisticRegression {
    classes: Vec<i64>,
    n_features: usize,
    weights: Tensor,
    bias: Tensor,
}

impl LogisticRegression {
    pub fn from_params(params: LogisticRegressionParams) -> Result<Self> {
        let n_features = validate_linear(
            "logistic_regression",
            &params.classes,
            &params.coef,
            params.intercept.len(),
        )?;

        let binary = params.classes.len() == 2 && params.coef.len() == 1;
        if !binary && params.coef.len() != params.classes.len() {
            return Err(spamscore_core::Error::artifact(format!(
                "logistic_regression: {} weight rows for {} classes",
                params.coef.len(),
                params.classes.len()
            )));
        }

        let weights = transposed_weights(&params.coef, n_features)?;
        let bias = Tensor::from_vec(params.intercept, params.coef.len(), &Device::Cpu)
            .map_err(inference_err)?;

        Ok(Self {
            classes: params.classes,
            n_features,
            weights,
            bias,
        })
    }

    fn is_binary(&self) -> bool {
        self.bias.dims1().map(|n| n == 1).unwrap_or(false)
    }
}

impl Classifier for LogisticRegression {
    fn name(&self) -> &str {
        "logistic_regression"
    }

    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, features: &Tensor) -> Result<Vec<i64>> {
        let proba = self.predict_proba(features)?;
        argmax_classes(&proba, &self.classes)
    }

    fn as_probabilistic(&self) -> Option<&dyn ProbabilisticClassifier> {
        Some(self)
    }
}

impl ProbabilisticClassifier for LogisticRegression {
    fn predict_proba(&self, features: &Tensor) -> Result<Tensor> {
        let z = linear(features, &self.weights, &self.bias)?;

        if self.is_binary() {
            // sigmoid(z) = 1 / (1 + exp(-z))
            let positive = z
                .neg()
                .and_then(|t| t.exp())
                .and_then(|t| t.affine(1.0, 1.0))
                .and_then(|t| t.recip())
                .map_err(inference_err)?;
            let negative = positive.affine(-1.0, 1.0).map_err(inference_err)?;
            Tensor::cat(&[&negative, &positive], 1).map_err(inference_err)
        } else {
            candle_nn::ops::softmax(&z, D::Minus1).map_err(inference_err)
        }
    }
}
