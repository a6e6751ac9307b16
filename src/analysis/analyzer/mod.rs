//! Analyzer implementations that combine tokenizers and filters.

mod analyzer;
mod config;
mod pipeline;
mod standard;

pub use analyzer::Analyzer;
pub use config::{AnalyzerConfig, StopWords};
pub use pipeline::PipelineAnalyzer;
pub use standard::StandardAnalyzer;
