//! Text analysis for product descriptions.
//!
//! Raw text is split by a [`Tokenizer`], then passed through a chain of
//! [`Filter`]s, all wrapped up as an [`Analyzer`]. The feature transform only
//! ever sees the final token texts.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::*;
pub use token::*;
pub use token_filter::*;
pub use tokenizer::*;
