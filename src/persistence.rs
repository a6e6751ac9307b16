//! Saving and loading trained classifiers.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::classifier::{Classifier, TaxonomyClassifier};
use crate::error::{Result, TaxoclassError};

/// On-disk encoding of a model file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ModelFormat {
    Json,
    Bincode,
}

impl ModelFormat {
    /// `.json` files are JSON, everything else is bincode.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ModelFormat::Json,
            _ => ModelFormat::Bincode,
        }
    }
}

/// Write `classifier` to `path`, choosing the format from the extension.
pub fn save_classifier<P: AsRef<Path>>(classifier: &TaxonomyClassifier, path: P) -> Result<()> {
    let format = ModelFormat::from_path(&path);
    save_classifier_as(classifier, path, format)
}

/// Write `classifier` to `path` in `format`. Untrained classifiers are refused.
pub fn save_classifier_as<P: AsRef<Path>>(
    classifier: &TaxonomyClassifier,
    path: P,
    format: ModelFormat,
) -> Result<()> {
    if !classifier.is_trained() {
        return Err(TaxoclassError::NotTrained);
    }

    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    match format {
        ModelFormat::Json => serde_json::to_writer(&mut writer, classifier)?,
        ModelFormat::Bincode => bincode::serialize_into(&mut writer, classifier)?,
    }
    writer.flush()?;

    info!(
        "saved {} classifier to {} ({:?})",
        classifier.strategy(),
        path.display(),
        format
    );
    Ok(())
}

/// Read a classifier from `path`, choosing the format from the extension.
pub fn load_classifier<P: AsRef<Path>>(path: P) -> Result<TaxonomyClassifier> {
    let format = ModelFormat::from_path(&path);
    load_classifier_as(path, format)
}

/// Read a classifier from `path` in `format`.
///
/// Decoding checks that the stored matrix, labels and weight tables agree
/// with each other and with the vocabulary, so a loaded classifier never
/// indexes out of bounds.
pub fn load_classifier_as<P: AsRef<Path>>(
    path: P,
    format: ModelFormat,
) -> Result<TaxonomyClassifier> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    let classifier: TaxonomyClassifier = match format {
        ModelFormat::Json => serde_json::from_reader(reader)?,
        ModelFormat::Bincode => bincode::deserialize_from(reader)?,
    };
    if !classifier.is_trained() {
        return Err(TaxoclassError::model(format!(
            "model file {} holds an untrained classifier",
            path.as_ref().display()
        )));
    }
    Ok(classifier)
}
