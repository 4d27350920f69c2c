//! Linear support vector classifier.
//!
//! Only exposes a signed decision function; it has no calibrated
//! probabilities and therefore cannot be used for propensity scoring.

use crate::classifier::{
    argmax_classes, inference_err, linear, transposed_weights, validate_linear, Classifier,
};
use candle_core::{Device, Tensor};
use serde::{Deserialize, Serialize};
use spamscore_core::Result;

/// Serialized linear SVC parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearSvcParams {
    pub classes: Vec<i64>,
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
}

pub struct LinearSvc {
    classes: Vec<i64>,
    n_features: usize,
    weights: Tensor,
    bias: Tensor,
}

impl LinearSvc {
    pub fn from_params(params: LinearSvcParams) -> Result<Self> {
        let n_features = validate_linear(
            "linear_svc",
            &params.classes,
            &params.coef,
            params.intercept.len(),
        )?;
        let binary = params.classes.len() == 2 && params.coef.len() == 1;
        if !binary && params.coef.len() != params.classes.len() {
            return Err(spamscore_core::Error::artifact(format!(
                "linear_svc: {} weight rows for {} classes",
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

    /// Signed distance to the separating hyperplane(s)
    pub fn decision_function(&self, features: &Tensor) -> Result<Tensor> {
        linear(features, &self.weights, &self.bias)
    }
}

impl Classifier for LinearSvc {
    fn name(&self) -> &str {
        "linear_svc"
    }

    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, features: &Tensor) -> Result<Vec<i64>> {
        let decision = self.decision_function(features)?;
        if decision.dim(1).map_err(inference_err)? == 1 {
            let values = decision
                .flatten_all()
                .and_then(|t| t.to_vec1::<f64>())
                .map_err(inference_err)?;
            return Ok(values
                .into_iter()
                .map(|v| if v > 0.0 { self.classes[1] } else { self.classes[0] })
                .collect());
        }
        argmax_classes(&decision, &self.classes)
    }
}
