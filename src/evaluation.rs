//! Held-out evaluation of a trained classifier.

use std::collections::BTreeMap;

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::classifier::Classifier;
use crate::error::Result;

/// A category with the held-out descriptions that belong to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationPair {
    pub label: String,
    pub documents: Vec<String>,
}

impl EvaluationPair {
    pub fn new<L: Into<String>>(label: L, documents: Vec<String>) -> Self {
        Self {
            label: label.into(),
            documents,
        }
    }
}

/// Metrics for a single label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelMetrics {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Number of evaluated documents whose true label is this one.
    pub support: usize,
}

/// Aggregate result of [`evaluate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// One entry per label seen as truth or prediction, sorted by label.
    pub labels: Vec<LabelMetrics>,
    pub accuracy: f64,
    pub macro_precision: f64,
    pub macro_recall: f64,
    pub macro_f1: f64,
    pub correct: usize,
    pub total: usize,
}

impl EvaluationReport {
    pub fn label(&self, label: &str) -> Option<&LabelMetrics> {
        self.labels.iter().find(|metrics| metrics.label == label)
    }
}

#[derive(Default)]
struct Counts {
    true_positive: usize,
    false_positive: usize,
    false_negative: usize,
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let len = values.len();
    if len == 0 {
        0.0
    } else {
        values.sum::<f64>() / len as f64
    }
}

/// Classify every held-out document and score the predictions.
///
/// Any classification error aborts the evaluation.
pub fn evaluate<C: Classifier + ?Sized>(
    classifier: &C,
    pairs: &[EvaluationPair],
) -> Result<EvaluationReport> {
    let cases: Vec<(&str, &str)> = pairs
        .iter()
        .flat_map(|pair| {
            pair.documents
                .iter()
                .map(move |document| (pair.label.as_str(), document.as_str()))
        })
        .collect();

    let predictions: Vec<String> = cases
        .par_iter()
        .map(|(_, document)| classifier.classify(document))
        .collect::<Result<_>>()?;

    let mut counts: BTreeMap<String, Counts> = BTreeMap::new();
    let mut correct = 0;
    for ((expected, _), predicted) in cases.iter().zip(&predictions) {
        if *expected == predicted.as_str() {
            correct += 1;
            counts.entry(predicted.clone()).or_default().true_positive += 1;
        } else {
            counts.entry(expected.to_string()).or_default().false_negative += 1;
            counts.entry(predicted.clone()).or_default().false_positive += 1;
        }
    }

    let labels: Vec<LabelMetrics> = counts
        .into_iter()
        .map(|(label, c)| {
            let precision = ratio(c.true_positive, c.true_positive + c.false_positive);
            let recall = ratio(c.true_positive, c.true_positive + c.false_negative);
            let f1 = if precision + recall == 0.0 {
                0.0
            } else {
                2.0 * precision * recall / (precision + recall)
            };
            LabelMetrics {
                label,
                precision,
                recall,
                f1,
                support: c.true_positive + c.false_negative,
            }
        })
        .collect();

    let total = cases.len();
    let report = EvaluationReport {
        accuracy: ratio(correct, total),
        macro_precision: mean(labels.iter().map(|m| m.precision)),
        macro_recall: mean(labels.iter().map(|m| m.recall)),
        macro_f1: mean(labels.iter().map(|m| m.f1)),
        labels,
        correct,
        total,
    };
    info!(
        "evaluated {} documents: accuracy {:.4}, macro f1 {:.4}",
        total, report.accuracy, report.macro_f1
    );
    Ok(report)
}
