//! Text preprocessing: tokenize, drop stopwords, lemmatize, lowercase.
//!
//! The preprocessor is the analyzer of every [`Vectorizer`](crate::Vectorizer),
//! so the tokens produced here are exactly the terms looked up in a fitted
//! vocabulary.

use once_cell::sync::Lazy;
use regex::Regex;
use spamscore_core::{Error, Result};
use std::collections::HashSet;
use stopwords::{Language, Stopwords, NLTK};

/// Words with internal `.`, `-` or `@` stay whole (URLs, e-mail addresses,
/// hyphenated words); clitics such as `'s` are split off; any other
/// punctuation character is its own token.
const TOKEN_PATTERN: &str = r"\w+(?:[.\-@]\w+)*|'\w+|[^\w\s]";

static DEFAULT_PREPROCESSOR: Lazy<Preprocessor> = Lazy::new(Preprocessor::default);

/// Preprocess `text` with the default English preprocessor
pub fn preprocess(text: &str) -> Vec<String> {
    DEFAULT_PREPROCESSOR.process(text)
}

/// Reusable text preprocessor with a compiled tokenizer and stopword set
pub struct Preprocessor {
    token_regex: Regex,
    stopwords: HashSet<String>,
}

impl Preprocessor {
    /// Create a preprocessor using the NLTK English stopword list
    pub fn new() -> Result<Self> {
        let token_regex = Regex::new(TOKEN_PATTERN)
            .map_err(|e| Error::internal(format!("Failed to compile token regex: {}", e)))?;

        let stopwords = NLTK::stopwords(Language::English)
            .into_iter()
            .flatten()
            .map(|w| w.to_string())
            .collect::<HashSet<String>>();
        if stopwords.is_empty() {
            return Err(Error::internal("English stopword list is unavailable"));
        }

        Ok(Self {
            token_regex,
            stopwords,
        })
    }

    /// Split text into word-level tokens
    pub fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.token_regex.find_iter(text).map(|m| m.as_str()).collect()
    }

    /// Whether the lowercased token is an English stopword
    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(&token.to_lowercase())
    }

    /// Run the full pipeline; never fails, an empty result is valid
    pub fn process(&self, text: &str) -> Vec<String> {
        self.tokenize(text)
            .into_iter()
            .filter(|token| !self.is_stopword(token))
            .map(lemmatize)
            .map(|token| token.to_lowercase())
            .filter(|token| !token.is_empty())
            .collect()
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new().expect("Failed to create text preprocessor")
    }
}

/// Irregular plurals, looked up before any suffix rule
const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("analyses", "analysis"),
    ("children", "child"),
    ("crises", "crisis"),
    ("criteria", "criterion"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("halves", "half"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("lives", "life"),
    ("men", "man"),
    ("mice", "mouse"),
    ("oxen", "ox"),
    ("people", "person"),
    ("phenomena", "phenomenon"),
    ("teeth", "tooth"),
    ("theses", "thesis"),
    ("wives", "wife"),
    ("wolves", "wolf"),
    ("women", "woman"),
];

/// Words ending in `s` that are already base forms
const UNINFLECTED: &[&str] = &[
    "always", "bonus", "news", "perhaps", "physics", "plus", "series", "species", "thanks",
    "yes",
];

/// Reduce a token to its noun lemma.
///
/// Only alphabetic tokens are touched; anything else is returned unchanged.
/// The rules follow WordNet's noun morphology: exceptions first, then
/// `ies → y`, `sses/xes/ches/shes → drop "es"`, then `s → ""`.
pub fn lemmatize(token: &str) -> String {
    if token.is_empty() || !token.chars().all(char::is_alphabetic) {
        return token.to_string();
    }

    let lower = token.to_lowercase();
    if let Some((_, lemma)) = IRREGULAR_NOUNS.iter().find(|(plural, _)| *plural == lower) {
        return (*lemma).to_string();
    }
    if lower.chars().count() <= 3 || UNINFLECTED.contains(&lower.as_str()) {
        return token.to_string();
    }
    if ["ss", "us", "is"].iter().any(|s| lower.ends_with(s)) {
        return token.to_string();
    }

    if let Some(stem) = lower.strip_suffix("ies") {
        if stem.chars().count() >= 2 {
            return format!("{stem}y");
        }
    }
    for suffix in ["sses", "xes", "ches", "shes"] {
        if lower.ends_with(suffix) {
            return lower[..lower.len() - 2].to_string();
        }
    }
    match lower.strip_suffix('s') {
        Some(stem) => stem.to_string(),
        None => token.to_string(),
    }
}
