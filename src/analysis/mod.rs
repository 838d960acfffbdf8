//! Text analysis for kumo.
//!
//! Morphological analysis ([`tokenizer`]), token filtering ([`token_filter`])
//! and the noun extractor that ties them together ([`extractor`]).

pub mod extractor;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-export commonly used types
pub use extractor::NounExtractor;
pub use token::*;
pub use token_filter::*;
pub use tokenizer::*;
