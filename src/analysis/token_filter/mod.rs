//! Filters applied to a token stream after tokenization.
//!
//! Product descriptions go through [`LowercaseFilter`] and then
//! [`StopFilter`], so `"The"` and `"the"` are both dropped.

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// A stage that rewrites or drops tokens.
pub trait Filter: Send + Sync {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Short identifier shown in `Debug` output of a pipeline.
    fn name(&self) -> &'static str;
}

pub mod lowercase;
pub mod stop;

pub use lowercase::LowercaseFilter;
pub use stop::StopFilter;
