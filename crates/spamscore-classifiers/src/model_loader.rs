//! Loading the classifier and vectorizer artifacts from disk

use crate::classifier::Classifier;
use crate::linear_svc::{LinearSvc, LinearSvcParams};
use crate::logistic::{LogisticRegression, LogisticRegressionParams};
use crate::naive_bayes::{MultinomialNb, MultinomialNbParams};
use crate::vectorizer::{Vectorizer, VectorizerParams};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use spamscore_core::{Error, Result};
use std::path::Path;
use tracing::info;

/// Serialized classifier, tagged by model kind
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    LogisticRegression(LogisticRegressionParams),
    MultinomialNb(MultinomialNbParams),
    LinearSvc(LinearSvcParams),
}

impl ClassifierArtifact {
    /// Validate the parameters and build the runtime classifier
    pub fn into_classifier(self) -> Result<Box<dyn Classifier>> {
        Ok(match self {
            Self::LogisticRegression(p) => Box::new(LogisticRegression::from_params(p)?),
            Self::MultinomialNb(p) => Box::new(MultinomialNb::from_params(p)?),
            Self::LinearSvc(p) => Box::new(LinearSvc::from_params(p)?),
        })
    }
}

/// Read and deserialize a JSON artifact, naming `path` in every error
fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })?;
    serde_json::from_str(&content)
        .map_err(|e| Error::artifact(format!("{}: {}", path.display(), e)))
}

/// Prefix an artifact validation error with the file it came from
fn with_path(path: &Path, err: Error) -> Error {
    match err {
        Error::Artifact(msg) => Error::Artifact(format!("{}: {}", path.display(), msg)),
        other => other,
    }
}

/// Load a classifier artifact
pub fn load_classifier(path: impl AsRef<Path>) -> Result<Box<dyn Classifier>> {
    let path = path.as_ref();
    let artifact: ClassifierArtifact = read_artifact(path)?;
    artifact.into_classifier().map_err(|e| with_path(path, e))
}

/// Load a vectorizer artifact
pub fn load_vectorizer(path: impl AsRef<Path>) -> Result<Vectorizer> {
    let path = path.as_ref();
    let params: VectorizerParams = read_artifact(path)?;
    Vectorizer::from_params(params).map_err(|e| with_path(path, e))
}

/// The fitted classifier and vectorizer, loaded once and shared read-only
pub struct ModelBundle {
    classifier: Box<dyn Classifier>,
    vectorizer: Vectorizer,
}

impl ModelBundle {
    /// Pair a classifier with its vectorizer, checking the feature counts agree
    pub fn new(classifier: Box<dyn Classifier>, vectorizer: Vectorizer) -> Result<Self> {
        if classifier.n_features() != vectorizer.n_features() {
            return Err(Error::artifact(format!(
                "classifier expects {} features but vectorizer produces {}",
                classifier.n_features(),
                vectorizer.n_features()
            )));
        }
        Ok(Self {
            classifier,
            vectorizer,
        })
    }

    /// Load both artifacts from disk
    pub fn load(
        classifier_path: impl AsRef<Path>,
        vectorizer_path: impl AsRef<Path>,
    ) -> Result<Self> {
        let classifier_path = classifier_path.as_ref();
        let vectorizer_path = vectorizer_path.as_ref();

        info!("Loading classifier from: {}", classifier_path.display());
        let classifier = load_classifier(classifier_path)?;

        info!("Loading vectorizer from: {}", vectorizer_path.display());
        let vectorizer = load_vectorizer(vectorizer_path)?;

        let bundle = Self::new(classifier, vectorizer)?;
        info!(
            model = bundle.classifier.name(),
            classes = bundle.classifier.classes().len(),
            features = bundle.vectorizer.n_features(),
            probabilistic = bundle.classifier.as_probabilistic().is_some(),
            "Model and vectorizer successfully loaded"
        );
        Ok(bundle)
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    pub fn vectorizer(&self) -> &Vectorizer {
        &self.vectorizer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_json(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_classifier_artifact_tags() {
        let lr: ClassifierArtifact = serde_json::from_str(
            r#"{"kind": "logistic_regression", "classes": [0, 1], "coef": [[1.0]], "intercept": [0.0]}"#,
        )
        .unwrap();
        assert!(matches!(lr, ClassifierArtifact::LogisticRegression(_)));

        let nb: ClassifierArtifact = serde_json::from_str(
            r#"{"kind": "multinomial_nb", "classes": [0, 1], "class_log_prior": [-0.7, -0.7], "feature_log_prob": [[-1.0], [-1.0]]}"#,
        )
        .unwrap();
        assert!(matches!(nb, ClassifierArtifact::MultinomialNb(_)));

        let unknown = serde_json::from_str::<ClassifierArtifact>(r#"{"kind": "random_forest"}"#);
        assert!(unknown.is_err());
    }

    #[test]
    fn test_load_bundle() {
        let classifier = write_json(
            r#"{"kind": "logistic_regression", "classes": [0, 1], "coef": [[1.0, -1.0]], "intercept": [0.0]}"#,
        );
        let vectorizer = write_json(r#"{"vocabulary": {"prize": 0, "weekend": 1}}"#);

        let bundle = ModelBundle::load(classifier.path(), vectorizer.path()).unwrap();
        assert_eq!(bundle.classifier().name(), "logistic_regression");
        assert_eq!(bundle.vectorizer().n_features(), 2);
    }

    #[test]
    fn test_missing_file_is_io_error_with_path() {
        let err = load_classifier("/definitely/not/here/best_model.json").err().unwrap();
        match err {
            Error::Io(e) => assert!(e.to_string().contains("best_model.json")),
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn test_corrupt_file_is_artifact_error() {
        let file = write_json("{not json");
        let err = load_vectorizer(file.path()).err().unwrap();
        assert!(matches!(err, Error::Artifact(_)));
    }

    #[test]
    fn test_invalid_params_name_path_once() {
        let file = write_json(
            r#"{"kind": "logistic_regression", "classes": [0, 1], "coef": [[1.0], [2.0]], "intercept": [0.0]}"#,
        );
        let err = load_classifier(file.path()).err().unwrap();

        let message = err.to_string();
        assert!(matches!(err, Error::Artifact(_)));
        assert!(message.contains(&file.path().display().to_string()));
        assert_eq!(message.matches("artifact error").count(), 1, "{message}");
    }

    #[test]
    fn test_feature_count_mismatch() {
        let classifier = write_json(
            r#"{"kind": "logistic_regression", "classes": [0, 1], "coef": [[1.0, -1.0, 0.5]], "intercept": [0.0]}"#,
        );
        let vectorizer = write_json(r#"{"vocabulary": {"prize": 0, "weekend": 1}}"#);

        let err = ModelBundle::load(classifier.path(), vectorizer.path()).err().unwrap();
        assert!(matches!(err, Error::Artifact(_)));
    }
}
