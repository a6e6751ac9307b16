//! Multinomial naive Bayes over TF-IDF features.
//!
//! Each feature dimension is treated as the count of a discrete event, with
//! the TF-IDF weight standing in for the count. With smoothing `alpha` and
//! vocabulary size `|V|`:
//!
//! ```text
//! log P(t | c) = ln(fc[c][t] + alpha) - ln(Σ fc[c] + alpha·|V|)
//! log P(c)     = ln(docs(c) / n)
//! score(c, x)  = log P(c) + Σ_t x[t] · log P(t | c)
//! ```
//!
//! Classes are held in lexicographic order; on equal scores the first one
//! wins, which callers should not rely on.

use std::collections::BTreeMap;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::AnalyzerConfig;
use crate::classifier::classifier::Classifier;
use crate::classifier::config::MultinomialConfig;
use crate::classifier::tfidf::{DocumentTermMatrix, FittedTransform, TfIdfVectorizer};
use crate::classifier::types::{TrainingPair, split_pairs};
use crate::error::{Result, TaxoclassError};
use crate::vector::SparseVector;

/// Fitted naive Bayes parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct NaiveBayesModel {
    classes: Vec<String>,
    class_log_prior: Vec<f64>,
    feature_log_prob: Vec<Vec<f64>>,
}

impl NaiveBayesModel {
    fn fit(matrix: &DocumentTermMatrix, labels: &[String], alpha: f64) -> Result<Self> {
        let mut class_index: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        for (row, label) in labels.iter().enumerate() {
            class_index.entry(label.as_str()).or_default().push(row);
        }

        let dimension = matrix.dimension();
        let n_documents = labels.len() as f64;
        let mut classes = Vec::with_capacity(class_index.len());
        let mut class_log_prior = Vec::with_capacity(class_index.len());
        let mut feature_log_prob = Vec::with_capacity(class_index.len());

        for (label, rows) in class_index {
            let mut feature_count = vec![0.0; dimension];
            for &row in &rows {
                let vector = matrix.row(row).ok_or_else(|| {
                    TaxoclassError::other(format!("Missing matrix row {row}"))
                })?;
                for (index, value) in vector.iter() {
                    feature_count[index] += value;
                }
            }

            let denominator = (feature_count.iter().sum::<f64>() + alpha * dimension as f64).ln();
            classes.push(label.to_string());
            class_log_prior.push((rows.len() as f64 / n_documents).ln());
            feature_log_prob.push(
                feature_count
                    .into_iter()
                    .map(|count| (count + alpha).ln() - denominator)
                    .collect(),
            );
        }

        Ok(Self {
            classes,
            class_log_prior,
            feature_log_prob,
        })
    }

    fn joint_log_likelihood(&self, features: &SparseVector) -> Vec<f64> {
        self.class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, log_prob)| prior + features.dot_dense(log_prob))
            .collect()
    }

    fn predict(&self, features: &SparseVector) -> Option<&str> {
        let scores = self.joint_log_likelihood(features);
        let mut best = 0;
        for (index, score) in scores.iter().enumerate().skip(1) {
            if *score > scores[best] {
                best = index;
            }
        }
        self.classes.get(best).map(String::as_str)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "TrainedMultinomialData", into = "TrainedMultinomialData")]
struct TrainedMultinomial {
    model: NaiveBayesModel,
    transform: FittedTransform,
}

#[derive(Serialize, Deserialize)]
struct TrainedMultinomialData {
    model: NaiveBayesModel,
    transform: FittedTransform,
}

impl TryFrom<TrainedMultinomialData> for TrainedMultinomial {
    type Error = TaxoclassError;

    fn try_from(data: TrainedMultinomialData) -> Result<Self> {
        let model = &data.model;
        if model.classes.is_empty() {
            return Err(TaxoclassError::model("naive Bayes model has no classes"));
        }
        if model.class_log_prior.len() != model.classes.len()
            || model.feature_log_prob.len() != model.classes.len()
        {
            return Err(TaxoclassError::model(format!(
                "naive Bayes model has {} classes, {} priors and {} feature rows",
                model.classes.len(),
                model.class_log_prior.len(),
                model.feature_log_prob.len()
            )));
        }
        let vocabulary_size = data.transform.vocabulary_size();
        if let Some((class, row)) = model
            .classes
            .iter()
            .zip(&model.feature_log_prob)
            .find(|(_, row)| row.len() != vocabulary_size)
        {
            return Err(TaxoclassError::model(format!(
                "feature row for {class:?} has {} entries, vocabulary has {vocabulary_size}",
                row.len()
            )));
        }

        Ok(Self {
            model: data.model,
            transform: data.transform,
        })
    }
}

impl From<TrainedMultinomial> for TrainedMultinomialData {
    fn from(state: TrainedMultinomial) -> Self {
        TrainedMultinomialData {
            model: state.model,
            transform: state.transform,
        }
    }
}

/// Classifier backed by multinomial naive Bayes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MultinomialClassifier {
    config: MultinomialConfig,
    analyzer: AnalyzerConfig,
    state: Option<TrainedMultinomial>,
}

impl MultinomialClassifier {
    /// Create an untrained classifier.
    pub fn new(config: MultinomialConfig, analyzer: AnalyzerConfig) -> Self {
        Self {
            config,
            analyzer,
            state: None,
        }
    }

    fn trained(&self) -> Result<&TrainedMultinomial> {
        self.state.as_ref().ok_or(TaxoclassError::NotTrained)
    }

    /// Joint log-likelihood per label, in label order.
    pub fn scores(&self, text: &str) -> Result<Vec<(String, f64)>> {
        let state = self.trained()?;
        let features = state.transform.apply(text)?;
        let scores = state.model.joint_log_likelihood(&features);
        Ok(state.model.classes.iter().cloned().zip(scores).collect())
    }

    /// Distinct labels seen at training time, sorted.
    pub fn labels(&self) -> Vec<String> {
        self.state
            .as_ref()
            .map(|state| state.model.classes.clone())
            .unwrap_or_default()
    }

    /// The fitted feature transform, if trained.
    pub fn transform(&self) -> Option<&FittedTransform> {
        self.state.as_ref().map(|state| &state.transform)
    }

    /// Smoothing configuration.
    pub fn config(&self) -> &MultinomialConfig {
        &self.config
    }
}

impl Classifier for MultinomialClassifier {
    fn train(&mut self, pairs: &[TrainingPair]) -> Result<()> {
        self.config.validate()?;
        if pairs.is_empty() {
            return Err(TaxoclassError::insufficient_data("no training pairs"));
        }

        let (labels, documents) = split_pairs(pairs);
        let mut distinct: Vec<&str> = labels.iter().map(String::as_str).collect();
        distinct.sort_unstable();
        distinct.dedup();
        if distinct.len() < 2 {
            return Err(TaxoclassError::insufficient_data(format!(
                "multinomial classifier needs at least 2 distinct labels, got {}",
                distinct.len()
            )));
        }

        let (matrix, transform) = TfIdfVectorizer::new(self.analyzer.clone()).fit(&documents)?;
        if transform.is_empty() {
            return Err(TaxoclassError::EmptyVocabulary);
        }

        let model = NaiveBayesModel::fit(&matrix, &labels, self.config.alpha)?;
        info!(
            "trained multinomial classifier: {} documents, {} labels, {} terms",
            pairs.len(),
            model.classes.len(),
            transform.vocabulary_size()
        );

        self.state = Some(TrainedMultinomial { model, transform });
        Ok(())
    }

    fn classify(&self, text: &str) -> Result<String> {
        let state = self.trained()?;
        let features = state.transform.apply(text)?;
        if features.is_zero() {
            debug!("no known terms in query, falling back to class priors");
        }
        state
            .model
            .predict(&features)
            .map(str::to_string)
            .ok_or_else(|| TaxoclassError::model("naive Bayes model has no classes"))
    }

    fn name(&self) -> &str {
        "multinomial"
    }

    fn is_trained(&self) -> bool {
        self.state.is_some()
    }
}
