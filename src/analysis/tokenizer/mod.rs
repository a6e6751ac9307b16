//! Splitting raw description text into tokens.

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Turns text into a stream of positioned tokens.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Short identifier shown in `Debug` output of a pipeline.
    fn name(&self) -> &'static str;
}

pub mod regex;

pub use regex::RegexTokenizer;
