//! Command line argument parsing for the taxoclass CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::classifier::Strategy;
use crate::corpus::DEFAULT_TRAIN_FRACTION;

/// Taxoclass - product taxonomy classification
#[derive(Parser, Debug, Clone)]
#[command(name = "taxoclass")]
#[command(about = "Classify product descriptions into taxonomy categories")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct TaxoclassArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl TaxoclassArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train a classifier and save it as a model file
    Train(TrainArgs),

    /// Classify text with a saved model
    Classify(ClassifyArgs),

    /// Score a saved model against held-out pairs
    Evaluate(EvaluateArgs),

    /// Show what a saved model contains
    Inspect(InspectArgs),
}

/// Arguments for training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Training pairs (JSON array or JSONL)
    #[arg(short, long, value_name = "CORPUS_FILE")]
    pub corpus: PathBuf,

    /// Model output path (`.json` for JSON, anything else for bincode)
    #[arg(short, long, value_name = "MODEL_FILE")]
    pub output: PathBuf,

    /// Classification strategy (overrides the config file)
    #[arg(short, long)]
    pub strategy: Option<Strategy>,

    /// Naive Bayes smoothing (overrides the config file)
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Classifier configuration file (JSON)
    #[arg(long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Join every category's descriptions into one training document
    #[arg(long)]
    pub group_by_label: bool,

    /// Only train on categories listed in this file, one per line
    #[arg(long, value_name = "CATEGORIES_FILE")]
    pub categories: Option<PathBuf>,

    /// Hold out the tail of each category and write it here as JSONL
    #[arg(long, value_name = "HOLDOUT_FILE")]
    pub holdout: Option<PathBuf>,

    /// Share of each category kept for training when holding out
    #[arg(long, default_value_t = DEFAULT_TRAIN_FRACTION)]
    pub train_fraction: f64,
}

/// Arguments for classification
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    /// Saved model file
    #[arg(short, long, value_name = "MODEL_FILE")]
    pub model: PathBuf,

    /// Text to classify; omit to read queries from stdin interactively
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// Show the N best-scoring labels or training documents
    #[arg(long, value_name = "N")]
    pub explain: Option<usize>,
}

/// Arguments for evaluation
#[derive(Parser, Debug, Clone)]
pub struct EvaluateArgs {
    /// Saved model file
    #[arg(short, long, value_name = "MODEL_FILE")]
    pub model: PathBuf,

    /// Held-out pairs (JSON array or JSONL)
    #[arg(short, long = "eval", value_name = "EVAL_FILE")]
    pub eval_file: PathBuf,
}

/// Arguments for model inspection
#[derive(Parser, Debug, Clone)]
pub struct InspectArgs {
    /// Saved model file
    #[arg(short, long, value_name = "MODEL_FILE")]
    pub model: PathBuf,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
