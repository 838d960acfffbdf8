//! Word frequency counting, per-document deduplication, and top-K ranking.
//!
//! [`FrequencyMap`] is the artifact every stage in this module produces or
//! consumes. It maps a surface form to its occurrence count and remembers
//! the order in which keys were first seen, so ranking ties are broken the
//! same way on every run.

use std::collections::hash_map::Entry;
use std::fmt;

use ahash::AHashMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

pub mod aggregator;
pub mod dedup;
pub mod ranking;

pub use aggregator::{FrequencyAggregator, merge_corpus, merge_documents};
pub use dedup::dedup_words;
pub use ranking::{
    DEFAULT_TOP_K, LogRankObserver, RankObserver, RankedEntry, RankedList, select_top_k,
    select_top_k_with_observer,
};

/// Mapping from surface form to occurrence count.
///
/// Every stored count is at least 1. Iteration follows key discovery order.
///
/// # Examples
///
/// ```
/// use kumo::frequency::FrequencyMap;
///
/// let mut map = FrequencyMap::new();
/// map.increment("猫");
/// map.increment("東京");
/// map.increment("猫");
///
/// assert_eq!(map.get("猫"), 2);
/// assert_eq!(map.get("犬"), 0);
/// let words: Vec<&str> = map.iter().map(|(word, _)| word).collect();
/// assert_eq!(words, vec!["猫", "東京"]);
/// ```
#[derive(Clone, Default)]
pub struct FrequencyMap {
    counts: AHashMap<String, usize>,
    order: Vec<String>,
}

impl FrequencyMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one occurrence of `word`.
    pub fn increment(&mut self, word: &str) {
        self.add(word, 1);
    }

    /// Add `count` occurrences of `word`. Adding zero leaves the map unchanged.
    pub fn add(&mut self, word: &str, count: usize) {
        if count == 0 {
            return;
        }
        match self.counts.entry(word.to_string()) {
            Entry::Occupied(mut entry) => *entry.get_mut() += count,
            Entry::Vacant(entry) => {
                self.order.push(entry.key().clone());
                entry.insert(count);
            }
        }
    }

    /// Occurrence count of `word`, zero when absent.
    pub fn get(&self, word: &str) -> usize {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Check whether `word` has been counted.
    pub fn contains(&self, word: &str) -> bool {
        self.counts.contains_key(word)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check whether no word has been counted.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Iterate `(word, count)` pairs in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.order
            .iter()
            .map(|word| (word.as_str(), self.counts[word]))
    }

    /// Add every count of `other` into this map.
    ///
    /// Words new to this map are appended in `other`'s discovery order.
    pub fn merge(&mut self, other: &FrequencyMap) {
        for (word, count) in other.iter() {
            self.add(word, count);
        }
    }
}

impl PartialEq for FrequencyMap {
    /// Two maps are equal when they hold the same words with the same counts,
    /// regardless of discovery order.
    fn eq(&self, other: &Self) -> bool {
        *self.counts == *other.counts
    }
}

impl Eq for FrequencyMap {}

impl fmt::Debug for FrequencyMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<S: AsRef<str>> FromIterator<(S, usize)> for FrequencyMap {
    fn from_iter<I: IntoIterator<Item = (S, usize)>>(iter: I) -> Self {
        let mut map = FrequencyMap::new();
        for (word, count) in iter {
            map.add(word.as_ref(), count);
        }
        map
    }
}

impl<S: AsRef<str>> Extend<S> for FrequencyMap {
    /// Count one occurrence per item.
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for word in iter {
            self.increment(word.as_ref());
        }
    }
}

impl Serialize for FrequencyMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (word, count) in self.iter() {
            map.serialize_entry(word, &count)?;
        }
        map.end()
    }
}
