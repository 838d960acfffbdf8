//! Top-K selection over a [`FrequencyMap`].
//!
//! Entries are ordered by count, highest first. Equal counts keep the map's
//! discovery order (the sort is stable over [`FrequencyMap::iter`]), which
//! makes the ranking reproducible for a given input.

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{KumoError, Result};
use crate::frequency::FrequencyMap;

/// Default number of words kept for rendering.
pub const DEFAULT_TOP_K: usize = 300;

/// One ranked word and its count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub word: String,
    pub count: usize,
}

/// Words sorted by descending count, capped at `top_k` entries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedList {
    entries: Vec<RankedEntry>,
}

impl RankedList {
    pub fn entries(&self) -> &[RankedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RankedEntry> {
        self.entries.iter()
    }

    /// Highest count in the list, if any.
    pub fn max_count(&self) -> Option<usize> {
        self.entries.first().map(|e| e.count)
    }

    /// Lowest count in the list, if any.
    pub fn min_count(&self) -> Option<usize> {
        self.entries.last().map(|e| e.count)
    }

    /// The ranked words as a frequency map restricted to the kept entries.
    pub fn to_frequency_map(&self) -> FrequencyMap {
        self.entries
            .iter()
            .map(|e| (e.word.as_str(), e.count))
            .collect()
    }
}

impl IntoIterator for RankedList {
    type Item = RankedEntry;
    type IntoIter = std::vec::IntoIter<RankedEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Receives each selected entry as the ranking is produced.
pub trait RankObserver {
    /// Called once per kept entry, `rank` starting at 1.
    fn on_entry(&mut self, rank: usize, entry: &RankedEntry);

    /// Called after the last entry with the final list length.
    fn on_complete(&mut self, len: usize);
}

/// Observer that writes a `word count` line per entry to the log.
#[derive(Debug, Default)]
pub struct LogRankObserver;

impl RankObserver for LogRankObserver {
    fn on_entry(&mut self, _rank: usize, entry: &RankedEntry) {
        info!("{:<7} {}", entry.word, entry.count);
    }

    fn on_complete(&mut self, len: usize) {
        info!("{}", len);
    }
}

/// Rank `counts` and keep the `top_k` most frequent words.
///
/// ```
/// use kumo::frequency::{FrequencyMap, select_top_k};
///
/// let counts: FrequencyMap = [("a", 5), ("b", 3), ("c", 3), ("d", 1)].into_iter().collect();
/// let ranked = select_top_k(&counts, 2).unwrap();
///
/// assert_eq!(ranked.len(), 2);
/// assert_eq!(ranked.entries()[0].word, "a");
/// assert_eq!(ranked.entries()[1].count, 3);
/// ```
pub fn select_top_k(counts: &FrequencyMap, top_k: usize) -> Result<RankedList> {
    select_top_k_with_observer(counts, top_k, &mut LogRankObserver)
}

/// Same as [`select_top_k`], reporting each kept entry to `observer`.
pub fn select_top_k_with_observer(
    counts: &FrequencyMap,
    top_k: usize,
    observer: &mut dyn RankObserver,
) -> Result<RankedList> {
    if top_k == 0 {
        return Err(KumoError::invalid_argument("top_k must be at least 1"));
    }

    let mut entries: Vec<RankedEntry> = counts
        .iter()
        .map(|(word, count)| RankedEntry {
            word: word.to_string(),
            count,
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries.truncate(top_k);

    for (i, entry) in entries.iter().enumerate() {
        observer.on_entry(i + 1, entry);
    }
    observer.on_complete(entries.len());

    Ok(RankedList { entries })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        lines: Vec<String>,
        completed: Option<usize>,
    }

    impl RankObserver for Recorder {
        fn on_entry(&mut self, rank: usize, entry: &RankedEntry) {
            self.lines.push(format!("{rank} {} {}", entry.word, entry.count));
        }

        fn on_complete(&mut self, len: usize) {
            self.completed = Some(len);
        }
    }

    fn sample() -> FrequencyMap {
        [("a", 5), ("b", 3), ("c", 3), ("d", 1)].into_iter().collect()
    }

    #[test]
    fn test_top_two_with_tie() {
        let ranked = select_top_k(&sample(), 2).unwrap();

        assert_eq!(ranked.len(), 2);
        assert_eq!(
            ranked.entries()[0],
            RankedEntry {
                word: "a".to_string(),
                count: 5
            }
        );
        assert_eq!(ranked.entries()[1].count, 3);
    }

    #[test]
    fn test_ties_follow_discovery_order() {
        let counts: FrequencyMap = [("x", 1), ("y", 2), ("z", 2)].into_iter().collect();

        let ranked = select_top_k(&counts, 10).unwrap();

        let words: Vec<&str> = ranked.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["y", "z", "x"]);
    }

    #[test]
    fn test_length_is_min_of_k_and_distinct() {
        for k in 1..=6 {
            let ranked = select_top_k(&sample(), k).unwrap();
            assert_eq!(ranked.len(), k.min(4));
        }
    }

    #[test]
    fn test_non_increasing_counts() {
        let counts: FrequencyMap = [("p", 2), ("q", 9), ("r", 4), ("s", 4), ("t", 7)]
            .into_iter()
            .collect();

        let ranked = select_top_k(&counts, 5).unwrap();

        assert!(ranked.entries().windows(2).all(|w| w[0].count >= w[1].count));
        assert_eq!(ranked.max_count(), Some(9));
        assert_eq!(ranked.min_count(), Some(2));
    }

    #[test]
    fn test_empty_map() {
        let ranked = select_top_k(&FrequencyMap::new(), 150).unwrap();

        assert!(ranked.is_empty());
        assert_eq!(ranked.max_count(), None);
    }

    #[test]
    fn test_zero_k_rejected() {
        let result = select_top_k(&sample(), 0);

        assert!(matches!(result, Err(KumoError::InvalidArgument(_))));
    }

    #[test]
    fn test_observer_sees_every_kept_entry() {
        let mut recorder = Recorder::default();

        select_top_k_with_observer(&sample(), 3, &mut recorder).unwrap();

        assert_eq!(recorder.lines, vec!["1 a 5", "2 b 3", "3 c 3"]);
        assert_eq!(recorder.completed, Some(3));
    }

    #[test]
    fn test_to_frequency_map() {
        let ranked = select_top_k(&sample(), 2).unwrap();

        let map = ranked.to_frequency_map();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), 5);
        assert_eq!(map.get("d"), 0);
    }
}
