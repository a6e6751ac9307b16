use taxoclass::classifier::{ClassifierConfig, Strategy, TrainingPair, train_classifier};
use taxoclass::corpus::{DEFAULT_TRAIN_FRACTION, evaluation_pairs, group_by_label, holdout_split};
use taxoclass::error::Result;
use taxoclass::evaluation::evaluate;

fn descriptions() -> Vec<TrainingPair> {
    [
        ("Running Shoes", "nike pegasus road running shoe breathable mesh"),
        ("Soccer Cleats", "adidas predator firm ground soccer cleats"),
        ("Running Shoes", "asics gel nimbus cushioned running shoe"),
        ("Soccer Cleats", "nike mercurial vapor soccer cleats synthetic upper"),
        ("Running Shoes", "hoka clifton lightweight road running"),
        ("Soccer Cleats", "puma future soccer cleats knit collar"),
        ("Running Shoes", "brooks ghost neutral running shoe mesh"),
        ("Soccer Cleats", "leather soccer cleats firm ground studs"),
    ]
    .into_iter()
    .map(TrainingPair::from)
    .collect()
}

#[test]
fn training_documents_score_perfectly() -> Result<()> {
    let pairs = descriptions();
    for strategy in [Strategy::Multinomial, Strategy::Similarity] {
        let config = ClassifierConfig {
            strategy,
            ..ClassifierConfig::default()
        };
        let classifier = train_classifier(&config, &pairs)?;
        let report = evaluate(&classifier, &evaluation_pairs(&pairs))?;

        assert_eq!(report.total, pairs.len());
        assert_eq!(report.accuracy, 1.0);
        assert_eq!(report.macro_f1, 1.0);
        for metrics in &report.labels {
            assert_eq!(metrics.precision, 1.0);
            assert_eq!(metrics.recall, 1.0);
            assert_eq!(metrics.support, 4);
        }
    }
    Ok(())
}

#[test]
fn holdout_evaluation_on_grouped_training_data() -> Result<()> {
    let (train, held_out) = holdout_split(&descriptions(), DEFAULT_TRAIN_FRACTION)?;
    assert_eq!(train.len(), 6);
    assert_eq!(held_out.len(), 2);
    assert_eq!(held_out[0].documents, vec!["brooks ghost neutral running shoe mesh"]);

    let grouped = group_by_label(&train);
    assert_eq!(grouped.len(), 2);

    let classifier = train_classifier(&ClassifierConfig::default(), &grouped)?;
    let report = evaluate(&classifier, &held_out)?;

    assert_eq!(report.total, 2);
    assert_eq!(report.correct, 2);
    assert_eq!(report.label("Soccer Cleats").map(|m| m.support), Some(1));
    Ok(())
}
