//! Classifier configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::AnalyzerConfig;
use crate::classifier::types::Strategy;
use crate::error::{Result, TaxoclassError};

/// Multinomial naive Bayes settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultinomialConfig {
    /// Additive (Laplace) smoothing.
    pub alpha: f64,
}

impl Default for MultinomialConfig {
    fn default() -> Self {
        Self { alpha: 1.0 }
    }
}

impl MultinomialConfig {
    /// Reject non-positive or non-finite smoothing.
    pub fn validate(&self) -> Result<()> {
        if !self.alpha.is_finite() || self.alpha <= 0.0 {
            return Err(TaxoclassError::invalid_config(format!(
                "alpha must be a positive finite number, got {}",
                self.alpha
            )));
        }
        Ok(())
    }
}

/// Top-level configuration for building a classifier.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Which strategy to build.
    pub strategy: Strategy,
    /// Text analysis settings shared by both strategies.
    pub analyzer: AnalyzerConfig,
    /// Naive Bayes settings, ignored by the similarity strategy.
    pub multinomial: MultinomialConfig,
}

impl ClassifierConfig {
    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ClassifierConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every value that can be checked before training.
    pub fn validate(&self) -> Result<()> {
        self.multinomial.validate()?;
        self.analyzer.build()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::StopWords;

    #[test]
    fn test_default_config() {
        let config = ClassifierConfig::default();
        assert_eq!(config.strategy, Strategy::Multinomial);
        assert_eq!(config.multinomial.alpha, 1.0);
        assert_eq!(config.analyzer.stop_words, StopWords::English);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config: ClassifierConfig =
            serde_json::from_str(r#"{"strategy": "similarity", "multinomial": {"alpha": 0.5}}"#)
                .unwrap();
        assert_eq!(config.strategy, Strategy::Similarity);
        assert_eq!(config.multinomial.alpha, 0.5);
        assert!(config.analyzer.lowercase);
    }

    #[test]
    fn test_invalid_alpha() {
        for alpha in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = MultinomialConfig { alpha };
            assert!(matches!(
                config.validate(),
                Err(TaxoclassError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn test_invalid_token_pattern() {
        let mut config = ClassifierConfig::default();
        config.analyzer.token_pattern = "[".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"strategy": "similarity"}"#).unwrap();

        let config = ClassifierConfig::from_file(&path).unwrap();
        assert_eq!(config.strategy, Strategy::Similarity);
    }
}
