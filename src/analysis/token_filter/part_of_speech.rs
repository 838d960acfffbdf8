//! Part-of-speech filter that keeps the tokens counted as nouns.
//!
//! The acceptance rule is
//! `(major == "名詞" && sub == "一般") || sub == "固有名詞"`.
//! The second branch does not look at the major class, so any token whose
//! subclass is `固有名詞` is kept whatever its first tag says.

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Major class tag for nouns.
pub const NOUN: &str = "名詞";
/// Subclass tag for general (common) nouns.
pub const GENERAL: &str = "一般";
/// Subclass tag for proper nouns.
pub const PROPER_NOUN: &str = "固有名詞";

/// Returns `true` if `token` counts as a noun for word-cloud purposes.
pub fn is_countable_noun(token: &Token) -> bool {
    (token.major_class() == NOUN && token.subclass() == GENERAL) || token.subclass() == PROPER_NOUN
}

/// A filter that drops every token except common and proper nouns.
#[derive(Clone, Copy, Debug, Default)]
pub struct NounFilter;

impl NounFilter {
    pub fn new() -> Self {
        NounFilter
    }
}

impl Filter for NounFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(tokens.filter(is_countable_noun)))
    }

    fn name(&self) -> &'static str {
        "noun"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(text: &str, features: &str) -> Token {
        Token::new(text, 0).with_features(features.split(','))
    }

    #[test]
    fn test_common_noun_accepted() {
        assert!(is_countable_noun(&token("猫", "名詞,一般,*,*")));
    }

    #[test]
    fn test_proper_noun_accepted() {
        assert!(is_countable_noun(&token("東京", "名詞,固有名詞,地域,一般")));
    }

    #[test]
    fn test_proper_noun_subclass_accepted_under_any_major_class() {
        assert!(is_countable_noun(&token("X", "記号,固有名詞")));
    }

    #[test]
    fn test_other_nouns_rejected() {
        assert!(!is_countable_noun(&token("こと", "名詞,非自立,一般,*")));
        assert!(!is_countable_noun(&token("三", "名詞,数,*,*")));
        assert!(!is_countable_noun(&token("彼", "名詞,代名詞,一般,*")));
    }

    #[test]
    fn test_general_subclass_requires_noun() {
        assert!(!is_countable_noun(&token("、", "記号,一般,*,*")));
        assert!(!is_countable_noun(&token("が", "助詞,格助詞,一般,*")));
    }

    #[test]
    fn test_short_feature_list_rejected() {
        assert!(!is_countable_noun(&token("猫", "名詞")));
        assert!(!is_countable_noun(&Token::new("猫", 0)));
    }

    #[test]
    fn test_noun_filter() {
        let tokens = vec![
            token("吾輩", "名詞,代名詞,一般,*"),
            token("猫", "名詞,一般,*,*"),
            token("で", "助動詞,*,*,*"),
            token("漱石", "名詞,固有名詞,人名,名"),
        ];

        let result: Vec<Token> = NounFilter::new()
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .collect();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].text, "猫");
        assert_eq!(result[1].text, "漱石");
        assert_eq!(NounFilter::new().name(), "noun");
    }
}
