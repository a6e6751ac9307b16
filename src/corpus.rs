//! Loading and shaping training corpora.
//!
//! Pair files hold `{"label": ..., "document": ...}` records, either as one
//! JSON array (`.json`) or one record per line (`.jsonl`). Category lists are
//! plain text, one category per line.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use ahash::AHashMap;
use log::{debug, warn};

use crate::classifier::TrainingPair;
use crate::error::{Result, TaxoclassError};
use crate::evaluation::EvaluationPair;

/// Share of each category's descriptions kept for training by [`holdout_split`].
pub const DEFAULT_TRAIN_FRACTION: f64 = 0.75;

fn is_jsonl(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jsonl"))
}

/// Load training pairs from a `.json` array or a `.jsonl` file.
pub fn load_pairs<P: AsRef<Path>>(path: P) -> Result<Vec<TrainingPair>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let pairs = if is_jsonl(path) {
        read_jsonl(BufReader::new(file))?
    } else {
        read_json(BufReader::new(file))?
    };
    debug!("loaded {} pairs from {}", pairs.len(), path.display());
    Ok(pairs)
}

/// Parse a JSON array of pairs.
pub fn read_json<R: Read>(reader: R) -> Result<Vec<TrainingPair>> {
    Ok(serde_json::from_reader(reader)?)
}

/// Parse one pair per line. Blank lines are skipped.
pub fn read_jsonl<R: BufRead>(reader: R) -> Result<Vec<TrainingPair>> {
    let mut pairs = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let pair: TrainingPair = serde_json::from_str(trimmed).map_err(|e| {
            TaxoclassError::corpus(format!("line {}: {e}", number + 1))
        })?;
        pairs.push(pair);
    }
    Ok(pairs)
}

/// Load a category list: one per line, blank lines and `#` comments skipped,
/// duplicates dropped keeping the first occurrence.
pub fn load_categories<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    let mut categories: Vec<String> = Vec::new();
    for line in content.lines() {
        let category = line.trim();
        if category.is_empty() || category.starts_with('#') {
            continue;
        }
        if categories.iter().any(|existing| existing == category) {
            warn!("duplicate category {category:?} ignored");
            continue;
        }
        categories.push(category.to_string());
    }
    Ok(categories)
}

/// Group documents by label, labels in order of first appearance.
fn group_documents(pairs: &[TrainingPair]) -> Vec<(String, Vec<String>)> {
    let mut position: AHashMap<&str, usize> = AHashMap::new();
    let mut groups: Vec<(String, Vec<String>)> = Vec::new();
    for pair in pairs {
        let index = *position.entry(pair.label.as_str()).or_insert_with(|| {
            groups.push((pair.label.clone(), Vec::new()));
            groups.len() - 1
        });
        groups[index].1.push(pair.document.clone());
    }
    groups
}

/// Collapse every label's documents into a single space-joined document.
pub fn group_by_label(pairs: &[TrainingPair]) -> Vec<TrainingPair> {
    group_documents(pairs)
        .into_iter()
        .map(|(label, documents)| TrainingPair::new(label, documents.join(" ")))
        .collect()
}

/// Gather pairs into one [`EvaluationPair`] per label.
pub fn evaluation_pairs(pairs: &[TrainingPair]) -> Vec<EvaluationPair> {
    group_documents(pairs)
        .into_iter()
        .map(|(label, documents)| EvaluationPair::new(label, documents))
        .collect()
}

/// Split each label's documents into a training head and a held-out tail.
///
/// The first `floor(len * train_fraction)` documents of every label, in input
/// order, are kept for training. Labels whose tail is empty are left out of
/// the held-out set.
pub fn holdout_split(
    pairs: &[TrainingPair],
    train_fraction: f64,
) -> Result<(Vec<TrainingPair>, Vec<EvaluationPair>)> {
    if !(0.0..=1.0).contains(&train_fraction) {
        return Err(TaxoclassError::invalid_config(format!(
            "train fraction must be within [0, 1], got {train_fraction}"
        )));
    }

    let mut train = Vec::new();
    let mut held_out = Vec::new();
    for (label, mut documents) in group_documents(pairs) {
        let keep = (documents.len() as f64 * train_fraction).floor() as usize;
        let tail = documents.split_off(keep);
        train.extend(
            documents
                .into_iter()
                .map(|document| TrainingPair::new(label.clone(), document)),
        );
        if !tail.is_empty() {
            held_out.push(EvaluationPair::new(label, tail));
        }
    }
    Ok((train, held_out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn pairs() -> Vec<TrainingPair> {
        vec![
            TrainingPair::new("Running Shoes", "pegasus"),
            TrainingPair::new("Soccer Cleats", "mercurial"),
            TrainingPair::new("Running Shoes", "gel nimbus"),
            TrainingPair::new("Running Shoes", "ghost"),
            TrainingPair::new("Running Shoes", "clifton"),
        ]
    }

    #[test]
    fn test_read_jsonl() {
        let input = concat!(
            "{\"label\": \"A\", \"document\": \"one\"}\n",
            "\n",
            "{\"label\": \"B\", \"document\": \"two\"}\n",
        );
        let pairs = read_jsonl(Cursor::new(input)).unwrap();
        assert_eq!(pairs, vec![TrainingPair::new("A", "one"), TrainingPair::new("B", "two")]);
    }

    #[test]
    fn test_read_jsonl_reports_line() {
        let input = "{\"label\": \"A\", \"document\": \"one\"}\n{\"label\": \"B\"}\n";
        let err = read_jsonl(Cursor::new(input)).unwrap_err();
        assert!(matches!(err, TaxoclassError::Corpus(_)));
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_read_json_array() {
        let input = r#"[{"label": "A", "document": "one"}]"#;
        let pairs = read_json(Cursor::new(input)).unwrap();
        assert_eq!(pairs, vec![TrainingPair::new("A", "one")]);
        assert!(read_json(Cursor::new("{")).is_err());
    }

    #[test]
    fn test_load_pairs_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("pairs.json");
        let jsonl = dir.path().join("pairs.jsonl");
        std::fs::write(&json, r#"[{"label": "A", "document": "one"}]"#).unwrap();
        std::fs::write(&jsonl, "{\"label\": \"A\", \"document\": \"one\"}\n").unwrap();

        assert_eq!(load_pairs(&json).unwrap(), load_pairs(&jsonl).unwrap());
        assert!(matches!(
            load_pairs(dir.path().join("missing.json")),
            Err(TaxoclassError::Io(_))
        ));
    }

    #[test]
    fn test_load_categories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("categories.txt");
        std::fs::write(
            &path,
            "# shoes\nBasketball Shoes\n\n  Running Shoes  \nBasketball Shoes\nSoccer Cleats\n",
        )
        .unwrap();

        assert_eq!(
            load_categories(&path).unwrap(),
            vec!["Basketball Shoes", "Running Shoes", "Soccer Cleats"]
        );
    }

    #[test]
    fn test_group_by_label() {
        let grouped = group_by_label(&pairs());
        assert_eq!(
            grouped,
            vec![
                TrainingPair::new("Running Shoes", "pegasus gel nimbus ghost clifton"),
                TrainingPair::new("Soccer Cleats", "mercurial"),
            ]
        );
    }

    #[test]
    fn test_evaluation_pairs() {
        let grouped = evaluation_pairs(&pairs());
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].documents.len(), 4);
        assert_eq!(grouped[1].label, "Soccer Cleats");
    }

    #[test]
    fn test_holdout_split() {
        let (train, held_out) = holdout_split(&pairs(), DEFAULT_TRAIN_FRACTION).unwrap();

        // 4 running descriptions keep 3, the single soccer one keeps 0.
        assert_eq!(
            train,
            vec![
                TrainingPair::new("Running Shoes", "pegasus"),
                TrainingPair::new("Running Shoes", "gel nimbus"),
                TrainingPair::new("Running Shoes", "ghost"),
            ]
        );
        assert_eq!(
            held_out,
            vec![
                EvaluationPair::new("Running Shoes", vec!["clifton".to_string()]),
                EvaluationPair::new("Soccer Cleats", vec!["mercurial".to_string()]),
            ]
        );
    }

    #[test]
    fn test_holdout_split_bounds() {
        let (train, held_out) = holdout_split(&pairs(), 1.0).unwrap();
        assert_eq!(train.len(), 5);
        assert!(held_out.is_empty());

        assert!(matches!(
            holdout_split(&pairs(), 1.5),
            Err(TaxoclassError::InvalidConfig(_))
        ));
        assert!(holdout_split(&pairs(), -0.1).is_err());
    }
}
