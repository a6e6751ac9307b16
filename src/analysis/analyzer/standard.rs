//! Standard analyzer for English product text.
//!
//! # Pipeline
//!
//! 1. RegexTokenizer (`\w+`)
//! 2. LowercaseFilter
//! 3. StopFilter (318 English stop words)

use crate::analysis::analyzer::{Analyzer, AnalyzerConfig, PipelineAnalyzer};
use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Analyzer built from an [`AnalyzerConfig`], the default one unless told
/// otherwise.
#[derive(Clone)]
pub struct StandardAnalyzer {
    config: AnalyzerConfig,
    inner: PipelineAnalyzer,
}

impl StandardAnalyzer {
    /// Create a new standard analyzer with default settings.
    pub fn new() -> Result<Self> {
        Self::from_config(AnalyzerConfig::default())
    }

    /// Create an analyzer for the given configuration.
    pub fn from_config(config: AnalyzerConfig) -> Result<Self> {
        let inner = config.build()?;
        Ok(StandardAnalyzer { config, inner })
    }

    /// The configuration this analyzer was built from.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }
}

impl Analyzer for StandardAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "standard"
    }
}

impl std::fmt::Debug for StandardAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StandardAnalyzer")
            .field("config", &self.config)
            .field("inner", &self.inner)
            .finish()
    }
}
