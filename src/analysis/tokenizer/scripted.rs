//! An in-memory tokenizer driven by a fixed lexicon.
//!
//! Useful for exercising the extraction pipeline deterministically without
//! loading a real dictionary. Input is segmented by greedy longest match
//! against the lexicon; characters that match no entry become single
//! character tokens tagged `記号,一般`.
//!
//! # Examples
//!
//! ```
//! use kumo::analysis::tokenizer::{ScriptedTokenizer, Tokenizer};
//!
//! let tokenizer = ScriptedTokenizer::new()
//!     .with_entry("猫", "名詞,一般,*,*")
//!     .with_entry("が", "助詞,格助詞,一般,*");
//!
//! let tokens: Vec<_> = tokenizer.tokenize("猫が猫").unwrap().collect();
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(tokens[2].subclass(), "一般");
//! ```

use ahash::AHashMap;

use crate::analysis::token::{Token, TokenStream};
use crate::error::{KumoError, Result};

use super::Tokenizer;

const UNKNOWN_FEATURES: &str = "記号,一般,*,*";

/// Tokenizer that segments text using a caller-supplied lexicon.
#[derive(Clone, Debug, Default)]
pub struct ScriptedTokenizer {
    /// Surface form -> comma-delimited feature tags
    lexicon: AHashMap<String, String>,
    /// Longest surface form in the lexicon, in chars
    max_len: usize,
    /// When set, every call fails with this parse error
    failure: Option<String>,
}

impl ScriptedTokenizer {
    /// Create a tokenizer with an empty lexicon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tokenizer that rejects every input with a parse error.
    pub fn failing<S: Into<String>>(message: S) -> Self {
        ScriptedTokenizer {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Add a surface form and its comma-delimited feature tags.
    pub fn with_entry<S: Into<String>>(mut self, surface: S, features: &str) -> Self {
        let surface = surface.into();
        self.max_len = self.max_len.max(surface.chars().count());
        self.lexicon.insert(surface, features.to_string());
        self
    }

    /// Add several entries at once.
    pub fn with_entries<'a, I>(self, entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        entries
            .into_iter()
            .fold(self, |tokenizer, (surface, features)| {
                tokenizer.with_entry(surface, features)
            })
    }
}

impl Tokenizer for ScriptedTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        if let Some(message) = &self.failure {
            return Err(KumoError::parse(message.clone()));
        }

        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();

        let mut tokens = Vec::new();
        let mut start = 0;
        while start + 1 < boundaries.len() {
            let longest = (1..=self.max_len.min(boundaries.len() - 1 - start))
                .rev()
                .find_map(|width| {
                    let surface = &text[boundaries[start]..boundaries[start + width]];
                    self.lexicon
                        .get(surface)
                        .map(|features| (width, features.as_str()))
                });
            let (width, features) = longest.unwrap_or((1, UNKNOWN_FEATURES));

            let (byte_start, byte_end) = (boundaries[start], boundaries[start + width]);
            tokens.push(
                Token::with_offsets(&text[byte_start..byte_end], tokens.len(), byte_start, byte_end)
                    .with_features(features.split(',')),
            );
            start += width;
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenizer() -> ScriptedTokenizer {
        ScriptedTokenizer::new().with_entries([
            ("東京", "名詞,固有名詞,地域,一般"),
            ("東", "名詞,一般,*,*"),
            ("猫", "名詞,一般,*,*"),
            ("に", "助詞,格助詞,一般,*"),
        ])
    }

    #[test]
    fn test_longest_match() {
        let tokens: Vec<Token> = tokenizer().tokenize("東京に猫").unwrap().collect();

        let surfaces: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(surfaces, vec!["東京", "に", "猫"]);
        assert_eq!(tokens[0].subclass(), "固有名詞");
        assert_eq!(tokens[2].position, 2);
        assert_eq!(tokens[2].start_offset, "東京に".len());
    }

    #[test]
    fn test_unknown_characters() {
        let tokens: Vec<Token> = tokenizer().tokenize("猫!").unwrap().collect();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].text, "!");
        assert_eq!(tokens[1].major_class(), "記号");
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(tokenizer().tokenize("").unwrap().count(), 0);
    }

    #[test]
    fn test_failing_tokenizer() {
        let result = ScriptedTokenizer::failing("broken").tokenize("猫");

        assert!(matches!(result, Err(KumoError::Parse(_))));
    }
}
