//! Token filters applied between the tokenizer and the noun extractor.

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod part_of_speech;
pub mod stop;

pub use part_of_speech::NounFilter;
pub use stop::StopFilter;
