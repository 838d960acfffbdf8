//! Stop filter implementation.
//!
//! Removes Japanese noise words (pronouns, formal nouns, counters and the
//! like) that would otherwise dominate a noun frequency ranking. The default
//! list is process-wide constant data built once on first use.
//!
//! # Examples
//!
//! ```
//! use kumo::analysis::token_filter::Filter;
//! use kumo::analysis::token_filter::stop::StopFilter;
//! use kumo::analysis::token::Token;
//!
//! let filter = StopFilter::japanese();
//! let tokens = vec![Token::new("これ", 0), Token::new("猫", 1)];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(result.len(), 1);
//! assert_eq!(result[0].text, "猫");
//! ```

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

const DEFAULT_JAPANESE_STOP_WORDS: &[&str] = &[
    // particles and auxiliaries that the analyzer occasionally tags as nouns
    "の", "に", "は", "を", "た", "が", "で", "て", "と", "し", "れ", "さ", "ある", "いる", "も",
    "する", "から", "な", "こと", "として", "い", "や", "れる", "など", "なっ", "ない", "この",
    "ため", "その", "あっ", "よう", "また", "もの", "という", "あり", "まで", "られ", "なる",
    "へ", "か", "だ", "これ", "によって", "により", "おり", "より", "による", "ず", "なり",
    "られる", "において", "ば", "なかっ", "なく", "しかし", "について", "せ", "だっ", "その後",
    "できる", "それ", "う", "ので", "なお", "のみ", "でき", "き", "つ", "における", "および",
    "いう", "さらに", "でも", "ら", "たり", "その他", "に関する", "たち", "ます", "ん", "なら",
    "に対して", "特に", "せる", "及び", "これら", "とき", "では", "にて", "ほか", "ながら", "うち",
    "そして", "とともに", "ただし", "かつて", "それぞれ", "または", "お", "ほど", "ものの",
    "に対する", "ほとんど", "と共に", "といった", "です", "とも", "ところ", "ここ",
    // demonstratives and formal nouns
    "あそこ", "あっち", "あちら", "あれ", "あなた", "あたり", "こっち", "こちら",
    "そこ", "そっち", "そちら", "そちら側", "どこ", "どっち", "どちら", "どれ", "なに", "なん",
    "わけ", "はず", "まま", "みんな", "ほう", "やつ", "わたし", "私", "僕", "自分", "彼", "彼女",
    // counters, units and generic nouns
    "今", "時", "時間", "年", "月", "日", "週", "分", "秒", "回", "度", "個", "人", "方",
    "者", "中", "上", "下", "前", "後", "外", "内", "間", "他", "等", "的", "性", "化", "系",
    "側", "以上", "以下", "以外", "全部", "一つ", "感じ", "気", "所", "物", "事", "為", "様",
];

/// Default Japanese stop words as a HashSet.
pub static DEFAULT_JAPANESE_STOP_WORDS_SET: LazyLock<HashSet<String>> = LazyLock::new(|| {
    DEFAULT_JAPANESE_STOP_WORDS
        .iter()
        .map(|&s| s.to_string())
        .collect()
});

/// A filter that removes stop words from the token stream.
///
/// Comparison is on the exact surface form: no case folding or width
/// normalization is applied.
#[derive(Clone, Debug)]
pub struct StopFilter {
    /// The set of stop words to remove
    stop_words: Arc<HashSet<String>>,
}

impl StopFilter {
    /// Create a new stop filter with the default Japanese stop words.
    ///
    /// # Examples
    ///
    /// ```
    /// use kumo::analysis::token_filter::stop::StopFilter;
    ///
    /// let filter = StopFilter::japanese();
    /// assert!(filter.is_stop_word("こと"));
    /// assert!(!filter.is_stop_word("東京"));
    /// ```
    pub fn japanese() -> Self {
        Self::with_stop_words(DEFAULT_JAPANESE_STOP_WORDS_SET.clone())
    }

    /// Create a new stop filter with custom stop words.
    pub fn with_stop_words(stop_words: HashSet<String>) -> Self {
        StopFilter {
            stop_words: Arc::new(stop_words),
        }
    }

    /// Create a new stop filter from a list of stop words.
    ///
    /// ```
    /// use kumo::analysis::token_filter::stop::StopFilter;
    ///
    /// let filter = StopFilter::from_words(vec!["もの", "こと"]);
    /// assert_eq!(filter.len(), 2);
    /// ```
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let stop_words = words.into_iter().map(|s| s.into()).collect();
        Self::with_stop_words(stop_words)
    }

    /// Check if a word is a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Get the number of stop words.
    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    /// Check if the stop word set is empty.
    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

impl Default for StopFilter {
    fn default() -> Self {
        Self::japanese()
    }
}

impl Filter for StopFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let stop_words = Arc::clone(&self.stop_words);
        Ok(Box::new(
            tokens.filter(move |token| !stop_words.contains(&token.text)),
        ))
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}
