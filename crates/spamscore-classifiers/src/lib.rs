//! spamscore Classifiers
//!
//! Everything needed to turn raw text into a spam propensity:
//! - Text preprocessing (tokenize, drop stopwords, lemmatize, lowercase)
//! - A fitted vectorizer that uses the preprocessor as its analyzer
//! - Classifier traits, with probability estimation as a separate capability
//! - Logistic regression, multinomial naive Bayes and linear SVC models
//! - Artifact loading and the threshold-based scorer
//!
//! All tensor math runs on the CPU through Candle.

pub mod classifier;
pub mod linear_svc;
pub mod logistic;
pub mod model_loader;
pub mod naive_bayes;
pub mod preprocess;
pub mod scorer;
pub mod vectorizer;

pub use classifier::{Classifier, ProbabilisticClassifier};
pub use linear_svc::{LinearSvc, LinearSvcParams};
pub use logistic::{LogisticRegression, LogisticRegressionParams};
pub use model_loader::{load_classifier, load_vectorizer, ClassifierArtifact, ModelBundle};
pub use naive_bayes::{MultinomialNb, MultinomialNbParams};
pub use preprocess::{lemmatize, preprocess, Preprocessor};
pub use scorer::{score, validate_threshold, Scorer, DEFAULT_THRESHOLD};
pub use vectorizer::{Norm, Vectorizer, VectorizerParams};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::{Classifier, ProbabilisticClassifier};
    pub use crate::model_loader::ModelBundle;
    pub use crate::scorer::{score, Scorer};
    pub use crate::vectorizer::Vectorizer;
}
