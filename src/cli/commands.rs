//! Command implementations for the taxoclass CLI.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use log::{info, warn};

use crate::classifier::{
    Classifier, ClassifierConfig, TaxonomyClassifier, TrainingPair, train_classifier,
};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::corpus::{evaluation_pairs, group_by_label, holdout_split, load_categories, load_pairs};
use crate::error::{Result, TaxoclassError};
use crate::evaluation::{EvaluationPair, evaluate};
use crate::persistence::{load_classifier, save_classifier};

/// Execute a CLI command.
pub fn execute_command(args: TaxoclassArgs) -> Result<()> {
    match &args.command {
        Command::Train(train_args) => train_model(train_args, &args),
        Command::Classify(classify_args) => classify_text(classify_args, &args),
        Command::Evaluate(evaluate_args) => evaluate_model(evaluate_args, &args),
        Command::Inspect(inspect_args) => inspect_model(inspect_args, &args),
    }
}

/// Resolve the classifier configuration: file first, flags on top.
fn build_config(args: &TrainArgs) -> Result<ClassifierConfig> {
    let mut config = match &args.config {
        Some(path) => ClassifierConfig::from_file(path)?,
        None => ClassifierConfig::default(),
    };
    if let Some(strategy) = args.strategy {
        config.strategy = strategy;
    }
    if let Some(alpha) = args.alpha {
        config.multinomial.alpha = alpha;
    }
    config.validate()?;
    Ok(config)
}

/// Keep only pairs whose label is listed in `path`.
fn filter_categories(pairs: Vec<TrainingPair>, path: &Path) -> Result<Vec<TrainingPair>> {
    let categories: HashSet<String> = load_categories(path)?.into_iter().collect();
    let seen: HashSet<&str> = pairs.iter().map(|pair| pair.label.as_str()).collect();
    for category in &categories {
        if !seen.contains(category.as_str()) {
            warn!("category {category:?} has no training pairs");
        }
    }
    Ok(pairs
        .into_iter()
        .filter(|pair| categories.contains(&pair.label))
        .collect())
}

fn write_held_out(held_out: &[EvaluationPair], path: &Path) -> Result<usize> {
    let mut writer = BufWriter::new(File::create(path)?);
    let mut written = 0;
    for pair in held_out {
        for document in &pair.documents {
            serde_json::to_writer(&mut writer, &TrainingPair::new(&pair.label, document))?;
            writeln!(writer)?;
            written += 1;
        }
    }
    writer.flush()?;
    Ok(written)
}

/// Train a classifier and save it.
fn train_model(args: &TrainArgs, cli_args: &TaxoclassArgs) -> Result<()> {
    let start_time = Instant::now();
    let config = build_config(args)?;

    let mut pairs = load_pairs(&args.corpus)?;
    if let Some(path) = &args.categories {
        pairs = filter_categories(pairs, path)?;
    }

    let mut held_out_documents = None;
    if let Some(path) = &args.holdout {
        let (train, held_out) = holdout_split(&pairs, args.train_fraction)?;
        let written = write_held_out(&held_out, path)?;
        info!("wrote {written} held-out documents to {}", path.display());
        held_out_documents = Some(written);
        pairs = train;
    }

    if args.group_by_label {
        pairs = group_by_label(&pairs);
    }

    let classifier = train_classifier(&config, &pairs)?;
    save_classifier(&classifier, &args.output)?;

    output_result(
        "Training complete",
        &TrainResult {
            model_path: args.output.to_string_lossy().to_string(),
            strategy: classifier.strategy(),
            training_pairs: pairs.len(),
            labels: classifier.labels().len(),
            vocabulary_size: classifier.vocabulary_size(),
            held_out_documents,
            duration_ms: start_time.elapsed().as_millis() as u64,
        },
        cli_args,
    )
}

/// The `top` best labels or documents behind a prediction.
fn explain(classifier: &TaxonomyClassifier, text: &str, top: usize) -> Result<Vec<Explanation>> {
    match classifier {
        TaxonomyClassifier::Multinomial(inner) => {
            let mut scores = inner.scores(text)?;
            scores.sort_by(|a, b| b.1.total_cmp(&a.1));
            Ok(scores
                .into_iter()
                .take(top)
                .map(|(label, score)| Explanation {
                    label,
                    score,
                    index: None,
                })
                .collect())
        }
        TaxonomyClassifier::Similarity(inner) => Ok(inner
            .nearest(text, top)?
            .into_iter()
            .map(|found| Explanation {
                label: found.label,
                score: found.similarity,
                index: Some(found.index),
            })
            .collect()),
    }
}

fn classify_one(
    classifier: &TaxonomyClassifier,
    text: &str,
    args: &ClassifyArgs,
    cli_args: &TaxoclassArgs,
) -> Result<()> {
    let label = classifier.classify(text)?;
    let explanation = match args.explain {
        Some(top) => Some(explain(classifier, text, top)?),
        None => None,
    };
    output_result(
        "Classification",
        &ClassificationResult {
            text: text.to_string(),
            label,
            explanation,
        },
        cli_args,
    )
}

/// Classify one text, or every line typed on stdin until EOF.
fn classify_text(args: &ClassifyArgs, cli_args: &TaxoclassArgs) -> Result<()> {
    let classifier = load_classifier(&args.model)?;

    if let Some(text) = &args.text {
        return classify_one(&classifier, text, args, cli_args);
    }

    let interactive = cli_args.output_format == OutputFormat::Human && cli_args.verbosity() > 0;
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            print!("Enter text to classify: ");
            io::stdout().flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        classify_one(&classifier, text, args, cli_args)?;
    }
    if interactive {
        println!();
    }
    Ok(())
}

/// Evaluate a saved model on held-out pairs.
fn evaluate_model(args: &EvaluateArgs, cli_args: &TaxoclassArgs) -> Result<()> {
    let classifier = load_classifier(&args.model)?;
    let pairs = evaluation_pairs(&load_pairs(&args.eval_file)?);
    if pairs.is_empty() {
        return Err(TaxoclassError::corpus(format!(
            "no evaluation pairs in {}",
            args.eval_file.display()
        )));
    }

    let report = evaluate(&classifier, &pairs)?;
    output_result("Evaluation", &report, cli_args)
}

/// Describe a saved model.
fn inspect_model(args: &InspectArgs, cli_args: &TaxoclassArgs) -> Result<()> {
    let classifier = load_classifier(&args.model)?;
    let alpha = match &classifier {
        TaxonomyClassifier::Multinomial(inner) => Some(inner.config().alpha),
        TaxonomyClassifier::Similarity(_) => None,
    };

    output_result(
        "Model",
        &ModelInfo {
            model_path: args.model.to_string_lossy().to_string(),
            strategy: classifier.strategy(),
            labels: classifier.labels(),
            vocabulary_size: classifier.vocabulary_size(),
            alpha,
        },
        cli_args,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Strategy;
    use clap::Parser;

    fn write_corpus(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("pairs.jsonl");
        let lines = [
            ("Running Shoes", "nike pegasus running shoe"),
            ("Running Shoes", "asics gel running"),
            ("Running Shoes", "hoka clifton cushioned running"),
            ("Running Shoes", "brooks ghost running"),
            ("Soccer Cleats", "adidas predator soccer cleats"),
            ("Soccer Cleats", "nike mercurial firm ground cleats"),
            ("Soccer Cleats", "puma future soccer boot"),
            ("Soccer Cleats", "leather soccer cleats"),
        ];
        let content: Vec<String> = lines
            .iter()
            .map(|(label, document)| {
                serde_json::to_string(&TrainingPair::new(*label, *document)).unwrap()
            })
            .collect();
        std::fs::write(&path, content.join("\n")).unwrap();
        path
    }

    fn run(argv: &[&str]) -> Result<()> {
        execute_command(TaxoclassArgs::try_parse_from(argv).unwrap())
    }

    #[test]
    fn test_train_with_holdout_then_evaluate() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = write_corpus(dir.path());
        let model = dir.path().join("model.json");
        let holdout = dir.path().join("heldout.jsonl");

        run(&[
            "taxoclass",
            "-q",
            "train",
            "--corpus",
            corpus.to_str().unwrap(),
            "--output",
            model.to_str().unwrap(),
            "--holdout",
            holdout.to_str().unwrap(),
        ])
        .unwrap();

        let held_out = load_pairs(&holdout).unwrap();
        assert_eq!(held_out.len(), 2);
        assert_eq!(held_out[0].document, "brooks ghost running");

        let classifier = load_classifier(&model).unwrap();
        assert_eq!(classifier.strategy(), Strategy::Multinomial);

        run(&[
            "taxoclass",
            "-q",
            "-f",
            "json",
            "evaluate",
            "--model",
            model.to_str().unwrap(),
            "--eval",
            holdout.to_str().unwrap(),
        ])
        .unwrap();
    }

    #[test]
    fn test_flags_override_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        std::fs::write(
            &config_path,
            r#"{"strategy": "multinomial", "multinomial": {"alpha": 0.5}}"#,
        )
        .unwrap();

        let args = TaxoclassArgs::try_parse_from([
            "taxoclass",
            "train",
            "-c",
            "pairs.json",
            "-o",
            "model.bin",
            "--config",
            config_path.to_str().unwrap(),
            "--strategy",
            "similarity",
        ])
        .unwrap();
        let Command::Train(train_args) = args.command else {
            panic!("Expected Train command");
        };

        let config = build_config(&train_args).unwrap();
        assert_eq!(config.strategy, Strategy::Similarity);
        assert_eq!(config.multinomial.alpha, 0.5);
    }

    #[test]
    fn test_invalid_alpha_flag() {
        let args = TaxoclassArgs::try_parse_from([
            "taxoclass", "train", "-c", "pairs.json", "-o", "model.bin", "--alpha", "0",
        ])
        .unwrap();
        let Command::Train(train_args) = args.command else {
            panic!("Expected Train command");
        };
        assert!(matches!(
            build_config(&train_args),
            Err(TaxoclassError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_category_filter_and_explain() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = write_corpus(dir.path());
        let categories = dir.path().join("categories.txt");
        std::fs::write(&categories, "Running Shoes\nSoccer Cleats\nTennis Shoes\n").unwrap();
        let model = dir.path().join("model.bin");

        run(&[
            "taxoclass",
            "-q",
            "train",
            "--corpus",
            corpus.to_str().unwrap(),
            "--output",
            model.to_str().unwrap(),
            "--strategy",
            "similarity",
            "--categories",
            categories.to_str().unwrap(),
        ])
        .unwrap();

        let classifier = load_classifier(&model).unwrap();
        let explanation = explain(&classifier, "soccer cleats", 2).unwrap();
        assert_eq!(explanation.len(), 2);
        assert_eq!(explanation[0].label, "Soccer Cleats");
        assert!(explanation[0].index.is_some());
    }

    #[test]
    fn test_filter_categories_drops_unlisted() {
        let dir = tempfile::tempdir().unwrap();
        let categories = dir.path().join("categories.txt");
        std::fs::write(&categories, "Soccer Cleats\n").unwrap();

        let pairs = vec![
            TrainingPair::new("Running Shoes", "pegasus"),
            TrainingPair::new("Soccer Cleats", "mercurial"),
        ];
        let kept = filter_categories(pairs, &categories).unwrap();
        assert_eq!(kept, vec![TrainingPair::new("Soccer Cleats", "mercurial")]);
    }
}
