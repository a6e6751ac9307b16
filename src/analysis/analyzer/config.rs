//! Serializable analyzer configuration.
//!
//! A fitted transform stores this configuration instead of the analyzer
//! itself, and rebuilds the exact same pipeline after deserialization.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::PipelineAnalyzer;
use crate::analysis::token_filter::{LowercaseFilter, StopFilter};
use crate::analysis::tokenizer::RegexTokenizer;
use crate::analysis::tokenizer::regex::DEFAULT_TOKEN_PATTERN;
use crate::error::Result;

/// Which stop words to drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StopWords {
    /// The built-in English list.
    #[default]
    English,
    /// Keep every token.
    None,
    /// A caller-supplied list.
    Custom(Vec<String>),
}

/// Configuration for the text analysis pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Regex whose matches become tokens.
    pub token_pattern: String,
    /// Lowercase tokens before stop word removal.
    pub lowercase: bool,
    /// Stop word list. Custom words are lowercased too when `lowercase` is set.
    pub stop_words: StopWords,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            token_pattern: DEFAULT_TOKEN_PATTERN.to_string(),
            lowercase: true,
            stop_words: StopWords::English,
        }
    }
}

impl AnalyzerConfig {
    /// Build the pipeline this configuration describes.
    pub fn build(&self) -> Result<PipelineAnalyzer> {
        let tokenizer = Arc::new(RegexTokenizer::with_pattern(&self.token_pattern)?);
        let mut analyzer = PipelineAnalyzer::new(tokenizer);

        if self.lowercase {
            analyzer = analyzer.add_filter(Arc::new(LowercaseFilter::new()));
        }

        match &self.stop_words {
            StopWords::English => {
                analyzer = analyzer.add_filter(Arc::new(StopFilter::new()));
            }
            StopWords::Custom(words) if self.lowercase => {
                let words = words.iter().map(|word| word.to_lowercase());
                analyzer = analyzer.add_filter(Arc::new(StopFilter::from_words(words)));
            }
            StopWords::Custom(words) => {
                analyzer = analyzer.add_filter(Arc::new(StopFilter::from_words(words.clone())));
            }
            StopWords::None => {}
        }

        Ok(analyzer)
    }
}
