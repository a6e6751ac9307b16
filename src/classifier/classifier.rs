//! Classifier trait definition.

use crate::classifier::types::TrainingPair;
use crate::error::Result;

/// A text classifier trained once on labelled pairs.
///
/// `train` takes `&mut self` and `classify` takes `&self`, so a trained
/// instance can be shared across threads for classification while training
/// can never overlap a classify call.
pub trait Classifier: Send + Sync {
    /// Fit the classifier on ordered `(label, document)` pairs.
    ///
    /// On failure the previous state, trained or not, is left untouched.
    fn train(&mut self, pairs: &[TrainingPair]) -> Result<()>;

    /// Predict the single best label for `text`.
    ///
    /// Fails with [`TaxoclassError::NotTrained`] before `train` has succeeded.
    ///
    /// [`TaxoclassError::NotTrained`]: crate::error::TaxoclassError::NotTrained
    fn classify(&self, text: &str) -> Result<String>;

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &str;

    /// Whether `train` has succeeded at least once.
    fn is_trained(&self) -> bool;
}
