use std::collections::HashMap;
use std::hash::Hash;

/// Occurrence counts of every contiguous `n`-token window, keyed by the
/// window itself.
pub type NgramCounts<'a, T> = HashMap<&'a [T], usize>;

/// Count the n-grams of `tokens`. A sequence shorter than `n` (or `n == 0`)
/// yields an empty map.
pub fn ngram_counts<T: Eq + Hash>(tokens: &[T], n: usize) -> NgramCounts<'_, T> {
    let mut counts = HashMap::new();
    if n == 0 {
        return counts;
    }
    for window in tokens.windows(n) {
        *counts.entry(window).or_insert(0) += 1;
    }
    counts
}

/// Number of n-gram windows in a sequence of `len` tokens.
pub fn ngram_count(len: usize, n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    (len + 1).saturating_sub(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_repeated_windows() {
        let tokens = "the cat is on the mat".split(' ').collect::<Vec<_>>();
        let unigrams = ngram_counts(&tokens, 1);
        assert_eq!(unigrams[&["the"][..]], 2);
        assert_eq!(unigrams.len(), 5);

        let bigrams = ngram_counts(&tokens, 2);
        assert_eq!(bigrams.len(), 5);
        assert_eq!(bigrams[&["on", "the"][..]], 1);
    }

    #[test]
    fn windows_differing_in_one_position_are_distinct() {
        let tokens = ["a", "b", "a", "c"];
        let bigrams = ngram_counts(&tokens, 2);
        assert_eq!(bigrams.len(), 3);
        assert!(bigrams.contains_key(&["a", "b"][..]));
        assert!(bigrams.contains_key(&["a", "c"][..]));
    }

    #[test]
    fn short_sequence_is_empty() {
        let tokens = ["only", "two"];
        assert!(ngram_counts(&tokens, 3).is_empty());
        assert!(ngram_counts(&tokens, 0).is_empty());
        assert!(ngram_counts::<&str>(&[], 1).is_empty());
    }

    #[test]
    fn window_totals() {
        assert_eq!(ngram_count(14, 1), 14);
        assert_eq!(ngram_count(14, 4), 11);
        assert_eq!(ngram_count(2, 3), 0);
        assert_eq!(ngram_count(3, 3), 1);
        assert_eq!(ngram_count(0, 1), 0);
        assert_eq!(ngram_count(5, 0), 0);
    }
}
