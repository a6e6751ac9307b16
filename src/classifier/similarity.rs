//! Nearest-neighbor classification by cosine similarity.
//!
//! Training keeps every document's TF-IDF row next to its label, in training
//! order. A query is scored against every row and takes the label of the
//! best match. Ties, including the all-zero case where the query shares no
//! term with the vocabulary, go to the earliest training document.

use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::AnalyzerConfig;
use crate::classifier::classifier::Classifier;
use crate::classifier::tfidf::{DocumentTermMatrix, FittedTransform, TfIdfVectorizer};
use crate::classifier::types::{TrainingPair, split_pairs};
use crate::error::{Result, TaxoclassError};
use crate::vector::SparseVector;

/// Row count above which scoring fans out over rayon.
const PARALLEL_SCORING_THRESHOLD: usize = 2048;

/// A single scored training document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatch {
    /// Row index in training order.
    pub index: usize,
    /// Label paired with that row.
    pub label: String,
    /// Cosine similarity to the query, in `[0, 1]`.
    pub similarity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "TrainedSimilarityData", into = "TrainedSimilarityData")]
struct TrainedSimilarity {
    matrix: DocumentTermMatrix,
    transform: FittedTransform,
    labels: Vec<String>,
}

#[derive(Serialize, Deserialize)]
struct TrainedSimilarityData {
    matrix: DocumentTermMatrix,
    transform: FittedTransform,
    labels: Vec<String>,
}

impl TryFrom<TrainedSimilarityData> for TrainedSimilarity {
    type Error = TaxoclassError;

    fn try_from(data: TrainedSimilarityData) -> Result<Self> {
        if data.labels.is_empty() {
            return Err(TaxoclassError::model("similarity model has no training rows"));
        }
        if data.labels.len() != data.matrix.len() {
            return Err(TaxoclassError::model(format!(
                "similarity model has {} labels for {} matrix rows",
                data.labels.len(),
                data.matrix.len()
            )));
        }
        if data.matrix.dimension() != data.transform.vocabulary_size() {
            return Err(TaxoclassError::model(format!(
                "matrix dimension {} does not match vocabulary size {}",
                data.matrix.dimension(),
                data.transform.vocabulary_size()
            )));
        }

        Ok(Self {
            matrix: data.matrix,
            transform: data.transform,
            labels: data.labels,
        })
    }
}

impl From<TrainedSimilarity> for TrainedSimilarityData {
    fn from(state: TrainedSimilarity) -> Self {
        TrainedSimilarityData {
            matrix: state.matrix,
            transform: state.transform,
            labels: state.labels,
        }
    }
}

impl TrainedSimilarity {
    fn similarities(&self, query: &SparseVector) -> Vec<f64> {
        let rows = self.matrix.rows();
        if rows.len() > PARALLEL_SCORING_THRESHOLD {
            rows.par_iter()
                .map(|row| row.cosine_similarity(query))
                .collect()
        } else {
            rows.iter().map(|row| row.cosine_similarity(query)).collect()
        }
    }
}

/// First index holding the maximum score.
fn argmax_first(scores: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (index, score) in scores.iter().enumerate() {
        match best {
            Some(current) if *score <= scores[current] => {}
            _ => best = Some(index),
        }
    }
    best
}

/// Classifier returning the label of the most similar training document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimilarityClassifier {
    analyzer: AnalyzerConfig,
    state: Option<TrainedSimilarity>,
}

impl SimilarityClassifier {
    /// Create an untrained classifier.
    pub fn new(analyzer: AnalyzerConfig) -> Self {
        Self {
            analyzer,
            state: None,
        }
    }

    fn trained(&self) -> Result<&TrainedSimilarity> {
        self.state.as_ref().ok_or(TaxoclassError::NotTrained)
    }

    /// Similarity of `text` to every training document, in training order.
    pub fn similarities(&self, text: &str) -> Result<Vec<f64>> {
        let state = self.trained()?;
        let query = state.transform.apply(text)?;
        Ok(state.similarities(&query))
    }

    /// The `k` best matches, highest similarity first. Equal scores keep
    /// training order.
    pub fn nearest(&self, text: &str, k: usize) -> Result<Vec<SimilarityMatch>> {
        let state = self.trained()?;
        let scores = self.similarities(text)?;

        let mut order: Vec<usize> = (0..scores.len()).collect();
        order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

        Ok(order
            .into_iter()
            .take(k)
            .map(|index| SimilarityMatch {
                index,
                label: state.labels[index].clone(),
                similarity: scores[index],
            })
            .collect())
    }

    /// Training labels in training order (duplicates included).
    pub fn labels(&self) -> &[String] {
        self.state
            .as_ref()
            .map(|state| state.labels.as_slice())
            .unwrap_or(&[])
    }

    /// The fitted feature transform, if trained.
    pub fn transform(&self) -> Option<&FittedTransform> {
        self.state.as_ref().map(|state| &state.transform)
    }
}

impl Classifier for SimilarityClassifier {
    fn train(&mut self, pairs: &[TrainingPair]) -> Result<()> {
        if pairs.is_empty() {
            return Err(TaxoclassError::insufficient_data("no training pairs"));
        }

        let (labels, documents) = split_pairs(pairs);
        let (matrix, transform) = TfIdfVectorizer::new(self.analyzer.clone()).fit(&documents)?;
        if transform.is_empty() {
            return Err(TaxoclassError::EmptyVocabulary);
        }
        info!(
            "trained similarity classifier: {} documents, {} terms",
            matrix.len(),
            transform.vocabulary_size()
        );

        self.state = Some(TrainedSimilarity {
            matrix,
            transform,
            labels,
        });
        Ok(())
    }

    fn classify(&self, text: &str) -> Result<String> {
        let state = self.trained()?;
        let query = state.transform.apply(text)?;
        if query.is_zero() {
            debug!("no known terms in query, returning first training label");
        }

        let scores = state.similarities(&query);
        argmax_first(&scores)
            .and_then(|best| state.labels.get(best))
            .cloned()
            .ok_or(TaxoclassError::NotTrained)
    }

    fn name(&self) -> &str {
        "similarity"
    }

    fn is_trained(&self) -> bool {
        self.state.is_some()
    }
}
