use ahash::AHashSet;

/// Keep only the first occurrence of each surface form, preserving order.
///
/// Used to cap a single document's contribution to one per word before the
/// per-document merge. Applying it twice gives the same result as once.
///
/// ```
/// use kumo::frequency::dedup_words;
///
/// let words = dedup_words(["猫", "東京", "猫", "犬", "東京"]);
/// assert_eq!(words, vec!["猫", "東京", "犬"]);
/// ```
pub fn dedup_words<I, S>(words: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = AHashSet::new();
    words
        .into_iter()
        .map(Into::into)
        .filter(|word: &String| seen.insert(word.clone()))
        .collect()
}
