//! Error types for the taxoclass library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`TaxoclassError`] enum.
//!
//! # Examples
//!
//! ```
//! use taxoclass::error::{Result, TaxoclassError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(TaxoclassError::insufficient_data("need at least two labels"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for taxoclass operations.
#[derive(Error, Debug)]
pub enum TaxoclassError {
    /// `classify` was called on a classifier that has not been trained.
    #[error("Classifier has not been trained")]
    NotTrained,

    /// Training data is too small for the chosen strategy.
    #[error("Insufficient training data: {0}")]
    InsufficientData(String),

    /// Fitting produced zero usable terms.
    #[error("Empty vocabulary: no usable terms survived text analysis")]
    EmptyVocabulary,

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Malformed corpus or evaluation files.
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// A model file that decodes but is not internally consistent.
    #[error("Invalid model: {0}")]
    Model(String),

    /// I/O errors (file operations, stdin, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary model encoding errors
    #[error("Bincode error: {0}")]
    Bincode(#[from] bincode::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with TaxoclassError.
pub type Result<T> = std::result::Result<T, TaxoclassError>;

impl TaxoclassError {
    /// Create a new insufficient data error.
    pub fn insufficient_data<S: Into<String>>(msg: S) -> Self {
        TaxoclassError::InsufficientData(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        TaxoclassError::InvalidConfig(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        TaxoclassError::Analysis(msg.into())
    }

    /// Create a new corpus error.
    pub fn corpus<S: Into<String>>(msg: S) -> Self {
        TaxoclassError::Corpus(msg.into())
    }

    /// Create a new invalid model error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        TaxoclassError::Model(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        TaxoclassError::Other(msg.into())
    }
}
