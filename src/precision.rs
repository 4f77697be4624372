use std::collections::HashMap;
use std::hash::Hash;

use log::trace;

use crate::fraction::Fraction;
use crate::ngram::ngram_counts;

/// Modified n-gram precision of `hypothesis` against `references`.
///
/// Each hypothesis n-gram is credited at most as many times as it occurs in
/// any single reference, so repeating a common word cannot inflate the score:
///
/// ```
/// use bleu::modified_precision;
///
/// let references = [
///     "the cat is on the mat".split(' ').collect::<Vec<_>>(),
///     "there is a cat on the mat".split(' ').collect::<Vec<_>>(),
/// ];
/// let hypothesis = ["the"; 7];
/// let p = modified_precision(&references, &hypothesis, 1);
/// assert_eq!((p.numerator(), p.denominator()), (2, 7));
/// ```
///
/// The result is left as a fraction so that corpus scoring can sum
/// numerators and denominators before dividing. A hypothesis with no
/// n-grams of this order gives `0/1`.
pub fn modified_precision<T, R>(references: &[R], hypothesis: &[T], n: usize) -> Fraction
where
    T: Eq + Hash,
    R: AsRef<[T]>,
{
    let counts = ngram_counts(hypothesis, n);
    if counts.is_empty() {
        return Fraction::zero();
    }

    let mut max_counts: HashMap<&[T], usize> = HashMap::with_capacity(counts.len());
    for reference in references {
        let reference_counts = ngram_counts(reference.as_ref(), n);
        for ngram in counts.keys() {
            let seen = reference_counts.get(*ngram).copied().unwrap_or(0);
            let best = max_counts.entry(*ngram).or_insert(0);
            *best = (*best).max(seen);
        }
    }

    let mut clipped = 0usize;
    let mut total = 0usize;
    for (ngram, &count) in &counts {
        clipped += count.min(max_counts.get(*ngram).copied().unwrap_or(0));
        total += count;
    }

    let precision = Fraction::new(clipped as u64, total as u64);
    trace!("order {} precision {} ({}/{} clipped)", n, precision, clipped, total);
    precision
}
