//! Fitted bag-of-words / TF-IDF vectorizer

use crate::classifier::inference_err;
use crate::preprocess::Preprocessor;
use candle_core::{Device, Tensor};
use serde::{Deserialize, Serialize};
use spamscore_core::{Error, Result};
use std::collections::HashMap;

/// Row normalisation applied after term weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// Serialized vectorizer state produced by the training pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerParams {
    /// Term to column index
    pub vocabulary: HashMap<String, usize>,

    /// Inverse document frequency per column; absent for plain counts
    #[serde(default)]
    pub idf: Option<Vec<f64>>,

    #[serde(default)]
    pub norm: Option<Norm>,

    /// Clip term counts to 1
    #[serde(default)]
    pub binary: bool,

    /// Replace tf with 1 + ln(tf)
    #[serde(default)]
    pub sublinear_tf: bool,

    /// Inclusive (min, max) n-gram sizes over preprocessed tokens
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

/// Transforms raw text into the dense feature rows a classifier expects.
///
/// The analyzer is always the text [`Preprocessor`]: raw text goes in, it is
/// tokenized, stopword-filtered, lemmatized and lowercased, then n-grams of
/// those tokens are looked up in the vocabulary.
pub struct Vectorizer {
    params: VectorizerParams,
    preprocessor: Preprocessor,
}

impl Vectorizer {
    /// Validate parameters and build a vectorizer
    pub fn from_params(params: VectorizerParams) -> Result<Self> {
        let n_features = params.vocabulary.len();
        if n_features == 0 {
            return Err(Error::artifact("vectorizer: empty vocabulary"));
        }

        let mut seen = vec![false; n_features];
        for (term, &index) in &params.vocabulary {
            match seen.get_mut(index) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => {
                    return Err(Error::artifact(format!(
                        "vectorizer: column {index} assigned twice (term {term:?})"
                    )))
                }
                None => {
                    return Err(Error::artifact(format!(
                        "vectorizer: column {index} of term {term:?} out of range 0..{n_features}"
                    )))
                }
            }
        }

        if let Some(idf) = &params.idf {
            if idf.len() != n_features {
                return Err(Error::artifact(format!(
                    "vectorizer: idf has {} entries, vocabulary has {n_features}",
                    idf.len()
                )));
            }
            if idf.iter().any(|w| !w.is_finite()) {
                return Err(Error::artifact("vectorizer: non-finite idf weight"));
            }
        }

        let (min_n, max_n) = params.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(Error::artifact(format!(
                "vectorizer: invalid ngram_range ({min_n}, {max_n})"
            )));
        }

        Ok(Self {
            params,
            preprocessor: Preprocessor::new()?,
        })
    }

    /// Vocabulary size, i.e. number of output columns
    pub fn n_features(&self) -> usize {
        self.params.vocabulary.len()
    }

    pub fn params(&self) -> &VectorizerParams {
        &self.params
    }

    /// Preprocess `text` and expand it into the configured n-grams
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let tokens = self.preprocessor.process(text);
        let (min_n, max_n) = self.params.ngram_range;
        if (min_n, max_n) == (1, 1) {
            return tokens;
        }

        let mut terms = Vec::new();
        for n in min_n..=max_n {
            terms.extend(tokens.windows(n).map(|gram| gram.join(" ")));
        }
        terms
    }

    /// Feature row for a single text
    pub fn transform_one(&self, text: &str) -> Vec<f64> {
        let mut row = vec![0.0f64; self.n_features()];
        for term in self.analyze(text) {
            if let Some(&index) = self.params.vocabulary.get(&term) {
                row[index] += 1.0;
            }
        }

        for value in row.iter_mut().filter(|v| **v > 0.0) {
            if self.params.binary {
                *value = 1.0;
            } else if self.params.sublinear_tf {
                *value = 1.0 + value.ln();
            }
        }

        if let Some(idf) = &self.params.idf {
            for (value, weight) in row.iter_mut().zip(idf) {
                *value *= weight;
            }
        }

        let norm = match self.params.norm {
            Some(Norm::L1) => row.iter().map(|v| v.abs()).sum::<f64>(),
            Some(Norm::L2) => row.iter().map(|v| v * v).sum::<f64>().sqrt(),
            None => 0.0,
        };
        if norm > 0.0 {
            for value in row.iter_mut() {
                *value /= norm;
            }
        }

        row
    }

    /// Transform a batch of texts into an (n_texts × n_features) tensor
    pub fn transform(&self, texts: &[&str]) -> Result<Tensor> {
        let n_features = self.n_features();
        let data: Vec<f64> = texts
            .iter()
            .flat_map(|text| self.transform_one(text))
            .collect();
        Tensor::from_vec(data, (texts.len(), n_features), &Device::Cpu).map_err(inference_err)
    }
}
