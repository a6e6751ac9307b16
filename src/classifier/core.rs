//! Strategy selection and construction helpers.

use serde::{Deserialize, Serialize};

use crate::classifier::classifier::Classifier;
use crate::classifier::config::ClassifierConfig;
use crate::classifier::multinomial::MultinomialClassifier;
use crate::classifier::similarity::SimilarityClassifier;
use crate::classifier::tfidf::FittedTransform;
use crate::classifier::types::{Strategy, TrainingPair};
use crate::error::Result;

/// A classifier of either strategy, chosen at construction time.
///
/// This is the type persisted to disk, so a saved model remembers which
/// strategy produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxonomyClassifier {
    Multinomial(MultinomialClassifier),
    Similarity(SimilarityClassifier),
}

impl TaxonomyClassifier {
    /// Build an untrained classifier from configuration.
    pub fn new(config: &ClassifierConfig) -> Self {
        match config.strategy {
            Strategy::Multinomial => TaxonomyClassifier::Multinomial(MultinomialClassifier::new(
                config.multinomial.clone(),
                config.analyzer.clone(),
            )),
            Strategy::Similarity => {
                TaxonomyClassifier::Similarity(SimilarityClassifier::new(config.analyzer.clone()))
            }
        }
    }

    /// Untrained classifier with default settings for `strategy`.
    pub fn with_strategy(strategy: Strategy) -> Self {
        Self::new(&ClassifierConfig {
            strategy,
            ..ClassifierConfig::default()
        })
    }

    pub fn strategy(&self) -> Strategy {
        match self {
            TaxonomyClassifier::Multinomial(_) => Strategy::Multinomial,
            TaxonomyClassifier::Similarity(_) => Strategy::Similarity,
        }
    }

    /// Distinct labels known to the trained classifier, sorted.
    pub fn labels(&self) -> Vec<String> {
        match self {
            TaxonomyClassifier::Multinomial(inner) => inner.labels(),
            TaxonomyClassifier::Similarity(inner) => {
                let mut labels = inner.labels().to_vec();
                labels.sort();
                labels.dedup();
                labels
            }
        }
    }

    pub fn transform(&self) -> Option<&FittedTransform> {
        match self {
            TaxonomyClassifier::Multinomial(inner) => inner.transform(),
            TaxonomyClassifier::Similarity(inner) => inner.transform(),
        }
    }

    /// Number of terms in the fitted vocabulary, zero when untrained.
    pub fn vocabulary_size(&self) -> usize {
        self.transform()
            .map(FittedTransform::vocabulary_size)
            .unwrap_or(0)
    }

    fn inner(&self) -> &dyn Classifier {
        match self {
            TaxonomyClassifier::Multinomial(inner) => inner,
            TaxonomyClassifier::Similarity(inner) => inner,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Classifier {
        match self {
            TaxonomyClassifier::Multinomial(inner) => inner,
            TaxonomyClassifier::Similarity(inner) => inner,
        }
    }
}

impl Default for TaxonomyClassifier {
    fn default() -> Self {
        Self::new(&ClassifierConfig::default())
    }
}

impl Classifier for TaxonomyClassifier {
    fn train(&mut self, pairs: &[TrainingPair]) -> Result<()> {
        self.inner_mut().train(pairs)
    }

    fn classify(&self, text: &str) -> Result<String> {
        self.inner().classify(text)
    }

    fn name(&self) -> &str {
        self.inner().name()
    }

    fn is_trained(&self) -> bool {
        self.inner().is_trained()
    }
}

/// Build a classifier from `config` and train it on `pairs`.
pub fn train_classifier(
    config: &ClassifierConfig,
    pairs: &[TrainingPair],
) -> Result<TaxonomyClassifier> {
    config.validate()?;
    let mut classifier = TaxonomyClassifier::new(config);
    classifier.train(pairs)?;
    Ok(classifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::config::MultinomialConfig;
    use crate::error::TaxoclassError;

    fn pairs() -> Vec<TrainingPair> {
        vec![
            TrainingPair::new("Running Shoes", "nike pegasus running shoe"),
            TrainingPair::new("Soccer Cleats", "adidas soccer cleats"),
            TrainingPair::new("Running Shoes", "asics gel running"),
        ]
    }

    #[test]
    fn test_strategy_dispatch() {
        for strategy in [Strategy::Multinomial, Strategy::Similarity] {
            let mut classifier = TaxonomyClassifier::with_strategy(strategy);
            assert_eq!(classifier.strategy(), strategy);
            assert_eq!(classifier.name(), strategy.to_string());
            assert!(!classifier.is_trained());
            assert_eq!(classifier.vocabulary_size(), 0);

            classifier.train(&pairs()).unwrap();
            assert!(classifier.is_trained());
            assert_eq!(classifier.labels(), vec!["Running Shoes", "Soccer Cleats"]);
            assert_eq!(classifier.classify("soccer cleats").unwrap(), "Soccer Cleats");
        }
    }

    #[test]
    fn test_train_classifier_validates_config() {
        let config = ClassifierConfig {
            multinomial: MultinomialConfig { alpha: -1.0 },
            ..ClassifierConfig::default()
        };
        assert!(matches!(
            train_classifier(&config, &pairs()),
            Err(TaxoclassError::InvalidConfig(_))
        ));

        let classifier = train_classifier(&ClassifierConfig::default(), &pairs()).unwrap();
        assert_eq!(classifier.strategy(), Strategy::Multinomial);
    }

    #[test]
    fn test_shared_across_threads() {
        let classifier = std::sync::Arc::new(
            train_classifier(&ClassifierConfig::default(), &pairs()).unwrap(),
        );
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let classifier = classifier.clone();
                std::thread::spawn(move || classifier.classify("nike running").unwrap())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), "Running Shoes");
        }
    }
}
