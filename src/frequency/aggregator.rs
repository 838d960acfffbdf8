//! Merging extracted words into a single corpus-wide [`FrequencyMap`].
//!
//! Two shapes are supported:
//!
//! - **Per-document**: each document's word list is deduplicated first, so a
//!   word adds at most 1 per document no matter how often it repeats there.
//! - **Whole-corpus**: counts from one extraction pass are taken as they are,
//!   every raw occurrence included.

use log::debug;

use crate::frequency::FrequencyMap;
use crate::frequency::dedup::dedup_words;

/// Accumulates word counts across the documents of one run.
#[derive(Debug, Default)]
pub struct FrequencyAggregator {
    counts: FrequencyMap,
    documents: usize,
}

impl FrequencyAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one document's accepted words, counting each distinct word once.
    pub fn add_document<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let unique = dedup_words(words);
        debug!(
            "document {}: {} distinct words",
            self.documents,
            unique.len()
        );
        self.counts.extend(unique);
        self.documents += 1;
    }

    /// Add counts from a whole-corpus extraction pass without capping.
    pub fn add_corpus(&mut self, counts: &FrequencyMap) {
        self.counts.merge(counts);
        self.documents += 1;
    }

    /// Number of documents (or corpus passes) merged so far.
    pub fn documents(&self) -> usize {
        self.documents
    }

    /// Consume the aggregator and return the merged counts.
    pub fn finish(self) -> FrequencyMap {
        self.counts
    }
}

/// Merge per-document word lists, each contributing at most 1 per word.
///
/// ```
/// use kumo::frequency::merge_documents;
///
/// let map = merge_documents(vec![
///     vec!["猫", "猫", "東京"],
///     vec!["猫"],
/// ]);
/// assert_eq!(map.get("猫"), 2);
/// assert_eq!(map.get("東京"), 1);
/// ```
pub fn merge_documents<D, I, S>(documents: D) -> FrequencyMap
where
    D: IntoIterator<Item = I>,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut aggregator = FrequencyAggregator::new();
    for words in documents {
        aggregator.add_document(words);
    }
    aggregator.finish()
}

/// Take a whole-corpus extraction result as the final counts.
pub fn merge_corpus(counts: FrequencyMap) -> FrequencyMap {
    counts
}
