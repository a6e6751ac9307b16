use taxoclass::classifier::{
    Classifier, ClassifierConfig, Strategy, TaxonomyClassifier, TrainingPair, train_classifier,
};
use taxoclass::error::{Result, TaxoclassError};

const STRATEGIES: [Strategy; 2] = [Strategy::Multinomial, Strategy::Similarity];

fn shoe_corpus() -> Vec<TrainingPair> {
    vec![
        TrainingPair::new("Basketball Shoes", "lebron basketball shoe high quality"),
        TrainingPair::new("Running Shoes", "nike pegasus running shoe breathable"),
        TrainingPair::new("Soccer Cleats", "adidas soccer cleats leather upper"),
    ]
}

fn gear_corpus() -> Vec<TrainingPair> {
    [
        ("Tents", "two person dome tent with waterproof rainfly and aluminum poles"),
        ("Sleeping Bags", "mummy sleeping bag rated to twenty degrees with down insulation"),
        ("Tents", "ultralight backpacking tent freestanding with mesh inner and vestibule"),
        ("Stoves", "compact canister stove boils water fast with piezo ignition"),
        ("Sleeping Bags", "synthetic insulated sleeping bag with hood and draft collar"),
        ("Stoves", "liquid fuel camping stove for cold weather and high altitude"),
        ("Headlamps", "rechargeable headlamp with red night mode and bright beam"),
        ("Headlamps", "lightweight headlamp lumens battery tilt beam for trail running"),
    ]
    .into_iter()
    .map(TrainingPair::from)
    .collect()
}

fn trained(strategy: Strategy, pairs: &[TrainingPair]) -> Result<TaxonomyClassifier> {
    let config = ClassifierConfig {
        strategy,
        ..ClassifierConfig::default()
    };
    train_classifier(&config, pairs)
}

#[test]
fn both_strategies_pick_running_shoes_for_a_running_query() -> Result<()> {
    for strategy in STRATEGIES {
        let classifier = trained(strategy, &shoe_corpus())?;
        assert_eq!(
            classifier.classify("nike breathable running shoe")?,
            "Running Shoes",
            "strategy {strategy}"
        );
    }
    Ok(())
}

#[test]
fn training_documents_are_recalled_exactly() -> Result<()> {
    for strategy in STRATEGIES {
        for corpus in [shoe_corpus(), gear_corpus()] {
            let classifier = trained(strategy, &corpus)?;
            for pair in &corpus {
                assert_eq!(
                    classifier.classify(&pair.document)?,
                    pair.label,
                    "strategy {strategy}, document {:?}",
                    pair.document
                );
            }
        }
    }
    Ok(())
}

#[test]
fn unseen_queries_land_in_the_expected_category() -> Result<()> {
    let cases = [
        ("waterproof dome tent", "Tents"),
        ("down sleeping bag", "Sleeping Bags"),
        ("canister stove", "Stoves"),
        ("bright rechargeable headlamp", "Headlamps"),
        ("mesh vestibule", "Tents"),
    ];
    for strategy in STRATEGIES {
        let classifier = trained(strategy, &gear_corpus())?;
        for (query, expected) in cases {
            assert_eq!(classifier.classify(query)?, expected, "strategy {strategy}");
        }
    }
    Ok(())
}

#[test]
fn similarity_ties_resolve_to_the_first_training_document() -> Result<()> {
    let pairs = vec![TrainingPair::new("A", "x"), TrainingPair::new("B", "x")];
    let classifier = trained(Strategy::Similarity, &pairs)?;
    for _ in 0..10 {
        assert_eq!(classifier.classify("x")?, "A");
    }
    Ok(())
}

#[test]
fn empty_and_stop_word_queries_still_return_a_label() -> Result<()> {
    for strategy in STRATEGIES {
        let classifier = trained(strategy, &gear_corpus())?;
        let labels = classifier.labels();
        for query in ["", "   ", "the and of", "!!! ???"] {
            let label = classifier.classify(query)?;
            assert!(labels.contains(&label), "strategy {strategy}: {label}");
        }
    }

    let similarity = trained(Strategy::Similarity, &gear_corpus())?;
    assert_eq!(similarity.classify("")?, "Tents");
    Ok(())
}

#[test]
fn classification_is_deterministic() -> Result<()> {
    for strategy in STRATEGIES {
        let first = trained(strategy, &gear_corpus())?;
        let second = trained(strategy, &gear_corpus())?;
        for query in ["insulated stove bag", "trail tent", "beam"] {
            let label = first.classify(query)?;
            assert_eq!(first.classify(query)?, label);
            assert_eq!(second.classify(query)?, label);
        }
    }
    Ok(())
}

#[test]
fn multinomial_rejects_a_single_label_corpus() {
    let pairs = vec![
        TrainingPair::new("Tents", "dome tent"),
        TrainingPair::new("Tents", "tunnel tent"),
    ];
    assert!(matches!(
        trained(Strategy::Multinomial, &pairs),
        Err(TaxoclassError::InsufficientData(_))
    ));
}

#[test]
fn stop_word_only_corpus_is_rejected() {
    let pairs = vec![
        TrainingPair::new("A", "the of and"),
        TrainingPair::new("B", "it is what it is"),
    ];
    for strategy in STRATEGIES {
        assert!(matches!(
            trained(strategy, &pairs),
            Err(TaxoclassError::EmptyVocabulary)
        ));
    }
}

#[test]
fn retraining_replaces_the_previous_model() -> Result<()> {
    for strategy in STRATEGIES {
        let mut classifier = TaxonomyClassifier::with_strategy(strategy);
        classifier.train(&shoe_corpus())?;
        classifier.train(&gear_corpus())?;

        assert!(!classifier.labels().contains(&"Running Shoes".to_string()));
        assert_eq!(classifier.classify("canister stove")?, "Stoves");
    }
    Ok(())
}
