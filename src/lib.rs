//! # Taxoclass
//!
//! Product taxonomy classification for free-text product descriptions.
//!
//! ## Features
//!
//! - Regex tokenizer, lowercase and English stop-word filtering
//! - TF-IDF feature extraction with a frozen, serializable transform
//! - Multinomial naive Bayes and cosine nearest-neighbor strategies
//! - JSON / JSONL corpus loading and held-out evaluation
//! - JSON and bincode model files

pub mod analysis;
pub mod classifier;
pub mod cli;
pub mod corpus;
pub mod error;
pub mod evaluation;
pub mod persistence;
pub mod vector;

pub mod prelude {
    pub use crate::classifier::{
        Classifier, ClassifierConfig, Strategy, TaxonomyClassifier, TrainingPair,
    };
    pub use crate::error::{Result, TaxoclassError};
    pub use crate::evaluation::{EvaluationPair, EvaluationReport, evaluate};
    pub use crate::persistence::{load_classifier, save_classifier};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
