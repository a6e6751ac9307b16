//! TF-IDF feature transform.
//!
//! Fitting happens once over the training documents:
//!
//! 1. every document is analyzed into terms,
//! 2. the vocabulary is the sorted set of all surviving terms,
//! 3. `idf(t) = ln((1 + n) / (1 + df(t))) + 1`,
//! 4. each row is `count(t) * idf(t)`, then L2-normalized.
//!
//! The result is a [`DocumentTermMatrix`] aligned with the input order and a
//! [`FittedTransform`] that applies the identical pipeline to new text.

use std::collections::BTreeMap;

use ahash::{AHashMap, AHashSet};
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{Analyzer, AnalyzerConfig, StandardAnalyzer};
use crate::error::{Result, TaxoclassError};
use crate::vector::SparseVector;

/// Fits a [`FittedTransform`] over a corpus.
#[derive(Debug, Clone, Default)]
pub struct TfIdfVectorizer {
    config: AnalyzerConfig,
}

impl TfIdfVectorizer {
    /// Create a vectorizer using the given analysis configuration.
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Fit on `documents`, returning the weighted matrix for those documents
    /// and the reusable transform.
    ///
    /// An empty corpus, or one with no surviving terms, yields an empty
    /// vocabulary rather than an error; callers decide whether that is fatal.
    pub fn fit<S>(&self, documents: &[S]) -> Result<(DocumentTermMatrix, FittedTransform)>
    where
        S: AsRef<str> + Sync,
    {
        let analyzer = StandardAnalyzer::from_config(self.config.clone())?;

        let analyzed: Vec<Vec<String>> = documents
            .par_iter()
            .map(|doc| analyzer.terms(doc.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for terms in &analyzed {
            let unique: AHashSet<&str> = terms.iter().map(String::as_str).collect();
            for term in unique {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let n_documents = documents.len() as f64;
        let mut terms = Vec::with_capacity(document_frequency.len());
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (term, df) in document_frequency {
            terms.push(term.to_string());
            idf.push(((1.0 + n_documents) / (1.0 + df as f64)).ln() + 1.0);
        }

        let transform = FittedTransform::from_parts(self.config.clone(), analyzer, terms, idf)?;

        let rows = analyzed
            .par_iter()
            .map(|terms| transform.weigh(terms))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "fitted tf-idf over {} documents, vocabulary size {}",
            documents.len(),
            transform.vocabulary_size()
        );

        let matrix = DocumentTermMatrix {
            dimension: transform.vocabulary_size(),
            rows,
        };
        Ok((matrix, transform))
    }
}

/// Weighted feature rows, one per training document, in training order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DocumentTermMatrixData", into = "DocumentTermMatrixData")]
pub struct DocumentTermMatrix {
    dimension: usize,
    rows: Vec<SparseVector>,
}

#[derive(Serialize, Deserialize)]
struct DocumentTermMatrixData {
    dimension: usize,
    rows: Vec<SparseVector>,
}

impl TryFrom<DocumentTermMatrixData> for DocumentTermMatrix {
    type Error = TaxoclassError;

    fn try_from(data: DocumentTermMatrixData) -> Result<Self> {
        if let Some(row) = data.rows.iter().position(|row| row.dimension() != data.dimension) {
            return Err(TaxoclassError::model(format!(
                "matrix row {row} has dimension {}, expected {}",
                data.rows[row].dimension(),
                data.dimension
            )));
        }
        Ok(Self {
            dimension: data.dimension,
            rows: data.rows,
        })
    }
}

impl From<DocumentTermMatrix> for DocumentTermMatrixData {
    fn from(matrix: DocumentTermMatrix) -> Self {
        DocumentTermMatrixData {
            dimension: matrix.dimension,
            rows: matrix.rows,
        }
    }
}

impl DocumentTermMatrix {
    /// Number of rows (documents).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the matrix has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns (vocabulary size).
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Row for the document at `index`.
    pub fn row(&self, index: usize) -> Option<&SparseVector> {
        self.rows.get(index)
    }

    /// All rows in training order.
    pub fn rows(&self) -> &[SparseVector] {
        &self.rows
    }
}

/// Frozen vocabulary and IDF weights, plus the analyzer that produced them.
///
/// Serializes as the analyzer configuration, the term list (index order) and
/// the weight table; the analyzer is rebuilt on deserialization.
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "FittedTransformData", into = "FittedTransformData")]
pub struct FittedTransform {
    config: AnalyzerConfig,
    analyzer: StandardAnalyzer,
    vocabulary: AHashMap<String, usize>,
    terms: Vec<String>,
    idf: Vec<f64>,
}

#[derive(Serialize, Deserialize)]
struct FittedTransformData {
    analyzer: AnalyzerConfig,
    terms: Vec<String>,
    idf: Vec<f64>,
}

impl TryFrom<FittedTransformData> for FittedTransform {
    type Error = TaxoclassError;

    fn try_from(data: FittedTransformData) -> Result<Self> {
        let analyzer = StandardAnalyzer::from_config(data.analyzer.clone())?;
        FittedTransform::from_parts(data.analyzer, analyzer, data.terms, data.idf)
    }
}

impl From<FittedTransform> for FittedTransformData {
    fn from(transform: FittedTransform) -> Self {
        FittedTransformData {
            analyzer: transform.config,
            terms: transform.terms,
            idf: transform.idf,
        }
    }
}

impl FittedTransform {
    fn from_parts(
        config: AnalyzerConfig,
        analyzer: StandardAnalyzer,
        terms: Vec<String>,
        idf: Vec<f64>,
    ) -> Result<Self> {
        if terms.len() != idf.len() {
            return Err(TaxoclassError::model(format!(
                "vocabulary has {} terms but {} idf weights",
                terms.len(),
                idf.len()
            )));
        }
        let vocabulary: AHashMap<String, usize> = terms
            .iter()
            .enumerate()
            .map(|(index, term)| (term.clone(), index))
            .collect();
        if vocabulary.len() != terms.len() {
            return Err(TaxoclassError::model("vocabulary contains duplicate terms"));
        }

        Ok(Self {
            config,
            analyzer,
            vocabulary,
            terms,
            idf,
        })
    }

    /// Transform `text` into a weighted, L2-normalized feature vector.
    ///
    /// Terms outside the vocabulary are ignored; text with no known terms
    /// produces a zero vector.
    pub fn apply(&self, text: &str) -> Result<SparseVector> {
        let terms = self.analyzer.terms(text)?;
        self.weigh(&terms)
    }

    fn weigh(&self, terms: &[String]) -> Result<SparseVector> {
        let mut counts: AHashMap<usize, f64> = AHashMap::new();
        for term in terms {
            if let Some(&index) = self.vocabulary.get(term) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut vector = SparseVector::from_entries(
            self.terms.len(),
            counts
                .into_iter()
                .map(|(index, count)| (index, count * self.idf[index])),
        )?;
        vector.normalize();
        Ok(vector)
    }

    /// Number of distinct terms.
    pub fn vocabulary_size(&self) -> usize {
        self.terms.len()
    }

    /// True if fitting kept no terms at all.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Feature index of `term`, if it is in the vocabulary.
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Term at feature index `index`.
    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(String::as_str)
    }

    /// IDF weight of `term`.
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.index_of(term).map(|index| self.idf[index])
    }

    /// The analysis configuration used at fit time.
    pub fn analyzer_config(&self) -> &AnalyzerConfig {
        &self.config
    }
}

impl std::fmt::Debug for FittedTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FittedTransform")
            .field("vocabulary_size", &self.terms.len())
            .field("analyzer", &self.config)
            .finish()
    }
}
