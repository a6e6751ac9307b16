//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, TaxoclassArgs};
use crate::classifier::Strategy;
use crate::error::Result;
use crate::evaluation::EvaluationReport;

/// Result structure for training.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainResult {
    pub model_path: String,
    pub strategy: Strategy,
    pub training_pairs: usize,
    pub labels: usize,
    pub vocabulary_size: usize,
    pub held_out_documents: Option<usize>,
    pub duration_ms: u64,
}

/// One line of `--explain` output.
#[derive(Debug, Serialize, Deserialize)]
pub struct Explanation {
    pub label: String,
    pub score: f64,
    /// Training row, for similarity models.
    pub index: Option<usize>,
}

/// Result structure for classification.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub text: String,
    pub label: String,
    pub explanation: Option<Vec<Explanation>>,
}

/// Model summary.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelInfo {
    pub model_path: String,
    pub strategy: Strategy,
    pub labels: Vec<String>,
    pub vocabulary_size: usize,
    pub alpha: Option<f64>,
}

/// Rendering for human-readable output.
pub trait HumanReadable {
    fn print_human(&self, args: &TaxoclassArgs);
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + HumanReadable>(
    message: &str,
    result: &T,
    args: &TaxoclassArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                println!("{message}");
                println!();
            }
            result.print_human(args);
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &TaxoclassArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

impl HumanReadable for TrainResult {
    fn print_human(&self, args: &TaxoclassArgs) {
        println!("Model saved to {}", self.model_path);
        if args.verbosity() > 0 {
            println!("Strategy: {}", self.strategy);
            println!("Training pairs: {}", self.training_pairs);
            println!("Labels: {}", self.labels);
            println!("Vocabulary size: {}", self.vocabulary_size);
            if let Some(held_out) = self.held_out_documents {
                println!("Held-out documents: {held_out}");
            }
            println!("Training time: {}", format_duration(self.duration_ms));
        }
    }
}

impl HumanReadable for ClassificationResult {
    fn print_human(&self, _args: &TaxoclassArgs) {
        println!("{}", self.label);
        if let Some(explanation) = &self.explanation {
            for (rank, item) in explanation.iter().enumerate() {
                match item.index {
                    Some(index) => println!(
                        "  {}. {} (document {index}, similarity {:.4})",
                        rank + 1,
                        item.label,
                        item.score
                    ),
                    None => println!(
                        "  {}. {} (log-likelihood {:.4})",
                        rank + 1,
                        item.label,
                        item.score
                    ),
                }
            }
        }
    }
}

impl HumanReadable for EvaluationReport {
    fn print_human(&self, _args: &TaxoclassArgs) {
        let width = self
            .labels
            .iter()
            .map(|metrics| metrics.label.len())
            .max()
            .unwrap_or(0)
            .max("label".len());

        println!(
            "{:<width$}  {:>9}  {:>9}  {:>9}  {:>7}",
            "label", "precision", "recall", "f1", "support"
        );
        for metrics in &self.labels {
            println!(
                "{:<width$}  {:>9.4}  {:>9.4}  {:>9.4}  {:>7}",
                metrics.label, metrics.precision, metrics.recall, metrics.f1, metrics.support
            );
        }
        println!();
        println!(
            "{:<width$}  {:>9.4}  {:>9.4}  {:>9.4}  {:>7}",
            "macro avg", self.macro_precision, self.macro_recall, self.macro_f1, self.total
        );
        println!(
            "Accuracy: {:.4} ({}/{})",
            self.accuracy, self.correct, self.total
        );
    }
}

impl HumanReadable for ModelInfo {
    fn print_human(&self, _args: &TaxoclassArgs) {
        println!("Model: {}", self.model_path);
        println!("Strategy: {}", self.strategy);
        if let Some(alpha) = self.alpha {
            println!("Alpha: {alpha}");
        }
        println!("Vocabulary size: {}", self.vocabulary_size);
        println!("Labels ({}):", self.labels.len());
        for label in &self.labels {
            println!("  {label}");
        }
    }
}

/// Format duration in human-readable format.
pub fn format_duration(ms: u64) -> String {
    if ms < 1000 {
        format!("{ms}ms")
    } else if ms < 60_000 {
        format!("{:.1}s", ms as f64 / 1000.0)
    } else {
        let minutes = ms / 60_000;
        let seconds = (ms % 60_000) / 1000;
        format!("{minutes}m {seconds}s")
    }
}
