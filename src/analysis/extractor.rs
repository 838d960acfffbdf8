//! Noun extraction from raw text.
//!
//! [`NounExtractor`] runs the tokenizer and keeps the tokens that
//! [`is_countable_noun`](crate::analysis::token_filter::part_of_speech::is_countable_noun)
//! accepts. It has two output modes, and they deliberately differ in whether
//! stop words are removed:
//!
//! | mode                                          | output         | stop words |
//! |-----------------------------------------------|----------------|------------|
//! | [`extract_words`](NounExtractor::extract_words)             | `Vec<String>`  | removed    |
//! | [`extract_frequencies`](NounExtractor::extract_frequencies) | [`FrequencyMap`] | kept     |
//!
//! The word-list mode feeds per-document aggregation; the frequency mode
//! counts a whole corpus in one pass.

use std::fmt::{Debug, Formatter};

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::analysis::token_filter::part_of_speech::NounFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;
use crate::frequency::FrequencyMap;

/// Extracts common and proper nouns from text.
///
/// The extractor owns its tokenizer; dropping the extractor releases the
/// analyzer and its dictionary.
///
/// # Examples
///
/// ```
/// use kumo::analysis::NounExtractor;
/// use kumo::analysis::tokenizer::ScriptedTokenizer;
///
/// let tokenizer = ScriptedTokenizer::new()
///     .with_entry("猫", "名詞,一般,*,*")
///     .with_entry("こと", "名詞,一般,*,*");
/// let extractor = NounExtractor::new(Box::new(tokenizer));
///
/// // stop words are dropped from the word list...
/// assert_eq!(extractor.extract_words("猫こと猫").unwrap(), vec!["猫", "猫"]);
///
/// // ...but counted by the frequency mode.
/// let counts = extractor.extract_frequencies("猫こと猫").unwrap();
/// assert_eq!(counts.get("猫"), 2);
/// assert_eq!(counts.get("こと"), 1);
/// ```
pub struct NounExtractor {
    tokenizer: Box<dyn Tokenizer>,
    noun_filter: NounFilter,
    stop_filter: StopFilter,
}

impl NounExtractor {
    /// Create an extractor with the default Japanese stop words.
    pub fn new(tokenizer: Box<dyn Tokenizer>) -> Self {
        NounExtractor {
            tokenizer,
            noun_filter: NounFilter::new(),
            stop_filter: StopFilter::japanese(),
        }
    }

    /// Replace the stop word list used by [`extract_words`](Self::extract_words).
    pub fn with_stop_filter(mut self, stop_filter: StopFilter) -> Self {
        self.stop_filter = stop_filter;
        self
    }

    /// The stop filter applied in word-list mode.
    pub fn stop_filter(&self) -> &StopFilter {
        &self.stop_filter
    }

    fn nouns(&self, text: &str) -> Result<TokenStream> {
        let tokens = self.tokenizer.tokenize(text)?;
        self.noun_filter.filter(tokens)
    }

    /// Accepted nouns of `text` in order, duplicates kept, stop words removed.
    pub fn extract_words(&self, text: &str) -> Result<Vec<String>> {
        let nouns = self.nouns(text)?;
        let kept = self.stop_filter.filter(nouns)?;
        Ok(kept.map(|token| token.text).collect())
    }

    /// Count every accepted noun of `text`. Stop words are not removed.
    pub fn extract_frequencies(&self, text: &str) -> Result<FrequencyMap> {
        let mut counts = FrequencyMap::new();
        for token in self.nouns(text)? {
            counts.increment(&token.text);
        }
        Ok(counts)
    }
}

impl Debug for NounExtractor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NounExtractor")
            .field("tokenizer", &self.tokenizer.name())
            .field("stop_words", &self.stop_filter.len())
            .finish()
    }
}
