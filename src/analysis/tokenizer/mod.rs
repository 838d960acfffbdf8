//! Tokenizers that split text into morphemes with part-of-speech features.
//!
//! The rest of the crate only talks to morphological analysis through the
//! [`Tokenizer`] trait, so the noun extractor can be driven by the lindera
//! backed [`LinderaTokenizer`] in production and by a [`ScriptedTokenizer`]
//! in tests.

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into feature-tagged tokens.
///
/// Implementations own whatever analyzer resources they need and release
/// them when dropped.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    ///
    /// An empty input yields an empty stream, not an error.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod lindera;
pub mod scripted;

pub use lindera::LinderaTokenizer;
pub use scripted::ScriptedTokenizer;
