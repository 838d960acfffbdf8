//! Token types produced by morphological analysis.
//!
//! A [`Token`] is one morpheme reported by the analyzer: its surface text,
//! where it sits in the input, and the part-of-speech feature tags the
//! dictionary assigned to it. Tokens only live for a single pass over one
//! text span; the extractor consumes them and keeps nothing but accepted
//! surface forms.
//!
//! # Examples
//!
//! ```
//! use kumo::analysis::token::Token;
//!
//! let token = Token::new("東京", 0).with_features(["名詞", "固有名詞", "地域", "一般"]);
//! assert_eq!(token.text, "東京");
//! assert_eq!(token.major_class(), "名詞");
//! assert_eq!(token.subclass(), "固有名詞");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single morpheme with its surface text and feature tags.
///
/// # Fields
///
/// - `text` - The surface form as it appears in the source text
/// - `position` - Position in the token stream (0-based)
/// - `start_offset` / `end_offset` - Byte offsets in the original text
/// - `features` - Analyzer-defined tags; the first is the major part-of-speech
///   class and the second its subclass
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The surface text of the token
    pub text: String,

    /// The position of the token in the original token stream (0-based)
    pub position: usize,

    /// The byte offset where this token starts in the original text
    pub start_offset: usize,

    /// The byte offset where this token ends in the original text
    pub end_offset: usize,

    /// Part-of-speech feature tags, most general first
    pub features: Vec<String>,
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset: 0,
            end_offset: 0,
            features: Vec::new(),
        }
    }

    /// Create a new token with text, position, and byte offsets.
    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset,
            end_offset,
            features: Vec::new(),
        }
    }

    /// Attach feature tags to this token.
    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }

    /// Get the feature tag at `index`, or `""` if the analyzer reported fewer tags.
    pub fn feature(&self, index: usize) -> &str {
        self.features.get(index).map(String::as_str).unwrap_or("")
    }

    /// The major part-of-speech class (first feature tag).
    pub fn major_class(&self) -> &str {
        self.feature(0)
    }

    /// The part-of-speech subclass (second feature tag).
    pub fn subclass(&self) -> &str {
        self.feature(1)
    }

    /// Get the length of the token text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.text, self.features.join(","))
    }
}

/// A token stream is the lazy sequence handed from a tokenizer to its consumers.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;

/// Trait for types that can produce a token stream.
pub trait IntoTokenStream {
    /// Convert this type into a token stream.
    fn into_token_stream(self) -> TokenStream;
}

impl IntoTokenStream for Vec<Token> {
    fn into_token_stream(self) -> TokenStream {
        Box::new(self.into_iter())
    }
}
