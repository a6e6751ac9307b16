//! Common types for taxonomy classification.

use serde::{Deserialize, Serialize};

/// One labelled training document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingPair {
    /// Taxonomy category, e.g. `"Running Shoes"`.
    pub label: String,
    /// Free-text product description.
    pub document: String,
}

impl TrainingPair {
    /// Create a new training pair.
    pub fn new<L: Into<String>, D: Into<String>>(label: L, document: D) -> Self {
        Self {
            label: label.into(),
            document: document.into(),
        }
    }
}

impl<L: Into<String>, D: Into<String>> From<(L, D)> for TrainingPair {
    fn from((label, document): (L, D)) -> Self {
        Self::new(label, document)
    }
}

/// Classification strategy, chosen at construction time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Multinomial naive Bayes over TF-IDF weights.
    #[default]
    Multinomial,
    /// Label of the most cosine-similar training document.
    Similarity,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Multinomial => write!(f, "multinomial"),
            Strategy::Similarity => write!(f, "similarity"),
        }
    }
}

/// Split pairs into parallel label and document sequences, preserving order.
pub(crate) fn split_pairs(pairs: &[TrainingPair]) -> (Vec<String>, Vec<&str>) {
    pairs
        .iter()
        .map(|pair| (pair.label.clone(), pair.document.as_str()))
        .unzip()
}
