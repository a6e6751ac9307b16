//! Product taxonomy classification over TF-IDF features.
//!
//! Two strategies share one feature pipeline:
//! - Multinomial: naive Bayes over TF-IDF weights, one score per label
//! - Similarity: label of the training document with the highest cosine
//!   similarity to the query
//!
//! # Architecture
//!
//! - `Classifier` trait: train once, classify many times
//! - `TaxonomyClassifier`: either strategy behind one serializable type
//! - `MultinomialClassifier` / `SimilarityClassifier`: the strategies
//! - `TfIdfVectorizer`: fits a `FittedTransform` and the training matrix
//! - `TrainingPair`: one `(label, document)` example
//!
//! # Example
//!
//! ```rust,no_run
//! use taxoclass::classifier::{Classifier, Strategy, TaxonomyClassifier, TrainingPair};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pairs = vec![
//!     TrainingPair::new("Running Shoes", "nike pegasus running shoe breathable"),
//!     TrainingPair::new("Soccer Cleats", "adidas soccer cleats leather upper"),
//! ];
//!
//! let mut classifier = TaxonomyClassifier::with_strategy(Strategy::Similarity);
//! classifier.train(&pairs)?;
//!
//! let label = classifier.classify("breathable running shoe")?;
//! # Ok(())
//! # }
//! ```

mod classifier;
mod config;
mod core;
mod multinomial;
mod similarity;
mod tfidf;
mod types;

pub use classifier::Classifier;
pub use config::{ClassifierConfig, MultinomialConfig};
pub use self::core::{TaxonomyClassifier, train_classifier};
pub use multinomial::MultinomialClassifier;
pub use similarity::{SimilarityClassifier, SimilarityMatch};
pub use tfidf::{DocumentTermMatrix, FittedTransform, TfIdfVectorizer};
pub use types::{Strategy, TrainingPair};
