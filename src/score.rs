use std::hash::Hash;

use log::{debug, trace};

use crate::brevity::{brevity_penalty, closest_ref_length};
use crate::config::BleuConfig;
use crate::error::{BleuError, Result};
use crate::fraction::Fraction;
use crate::precision::modified_precision;
use crate::smoothing::Smoothing;

/// Uniform weights over unigrams to 4-grams.
pub const DEFAULT_WEIGHTS: [f64; 4] = [0.25; 4];

/// Sentence-level BLEU of `hypothesis` against `references`.
///
/// One n-gram order is scored per entry of `weights`. Fails only when
/// `references` is empty.
///
/// ```
/// use bleu::{sentence_bleu, DEFAULT_WEIGHTS};
///
/// let reference = "the cat sat on the mat".split(' ').collect::<Vec<_>>();
/// let score = sentence_bleu(&[&reference], &reference, &DEFAULT_WEIGHTS, None).unwrap();
/// assert_eq!(score, 1.0);
/// ```
pub fn sentence_bleu<T, R>(
    references: &[R],
    hypothesis: &[T],
    weights: &[f64],
    smoothing: Option<&Smoothing>,
) -> Result<f64>
where
    T: Eq + Hash,
    R: AsRef<[T]>,
{
    let hyp_len = hypothesis.len();
    let closest_ref_len = closest_ref_length::<T, R>(references, hyp_len)?;
    let bp = brevity_penalty(closest_ref_len, hyp_len);
    debug!(
        "hyp_len={} closest_ref_len={} bp={:.6}",
        hyp_len, closest_ref_len, bp
    );

    let p_n: Vec<Fraction> = (1..=weights.len())
        .map(|n| modified_precision(references, hypothesis, n))
        .collect();

    let precisions = match smoothing {
        Some(smoothing) => smoothing.apply(&p_n, references, hypothesis, hyp_len),
        None => p_n.iter().map(|p| p.to_f64()).collect(),
    };

    Ok(combine(bp, weights, &precisions))
}

/// Corpus-level BLEU over paired `list_of_references` and `hypotheses`.
///
/// Clipped matches and n-gram totals are summed over the whole corpus before
/// dividing, and a single brevity penalty is computed from the summed
/// hypothesis and closest-reference lengths. This is not the mean of the
/// sentence scores.
///
/// Smoothing runs once on the aggregated precisions. Strategies that need a
/// sentence (length-scaled, triple-average, prior-interpolated, combined)
/// are given the last pair of the corpus and its length, which keeps scores
/// identical to the reference metric.
pub fn corpus_bleu<T, R, L, H>(
    list_of_references: &[L],
    hypotheses: &[H],
    weights: &[f64],
    smoothing: Option<&Smoothing>,
) -> Result<f64>
where
    T: Eq + Hash,
    R: AsRef<[T]>,
    L: AsRef<[R]>,
    H: AsRef<[T]>,
{
    if list_of_references.len() != hypotheses.len() {
        return Err(BleuError::ShapeMismatch {
            references: list_of_references.len(),
            hypotheses: hypotheses.len(),
        });
    }

    let mut numerators = vec![0u64; weights.len()];
    let mut denominators = vec![0u64; weights.len()];
    let mut hyp_lengths = 0usize;
    let mut ref_lengths = 0usize;
    let mut last = None;

    for (index, (references, hypothesis)) in list_of_references.iter().zip(hypotheses).enumerate() {
        let references: &[R] = references.as_ref();
        let hypothesis: &[T] = hypothesis.as_ref();
        let hyp_len = hypothesis.len();

        ref_lengths += closest_ref_length::<T, R>(references, hyp_len)
            .map_err(|_| BleuError::InvalidReferences { pair: Some(index) })?;
        hyp_lengths += hyp_len;

        for (i, n) in (1..=weights.len()).enumerate() {
            let p = modified_precision(references, hypothesis, n);
            numerators[i] += p.numerator();
            denominators[i] += p.denominator();
        }
        last = Some((references, hypothesis));
    }

    let Some((references, hypothesis)) = last else {
        debug!("empty corpus, score 0");
        return Ok(0.0);
    };

    let bp = brevity_penalty(ref_lengths, hyp_lengths);
    debug!(
        "corpus of {} pairs: hyp_len={} ref_len={} bp={:.6}",
        hypotheses.len(),
        hyp_lengths,
        ref_lengths,
        bp
    );

    let p_n: Vec<Fraction> = numerators
        .iter()
        .zip(&denominators)
        .map(|(&numerator, &denominator)| Fraction::new(numerator, denominator))
        .collect();
    trace!(
        "corpus precisions {:?}",
        p_n.iter().map(|p| p.to_string()).collect::<Vec<_>>()
    );

    let precisions = match smoothing {
        Some(smoothing) => smoothing.apply(&p_n, references, hypothesis, hypothesis.len()),
        None => p_n.iter().map(|p| p.to_f64()).collect(),
    };

    Ok(combine(bp, weights, &precisions))
}

/// `bp * exp(sum(w_i * ln p_i))`, with zero precisions contributing nothing
/// to the sum. When every precision is zero the score is 0.
fn combine(bp: f64, weights: &[f64], precisions: &[f64]) -> f64 {
    if !precisions.is_empty() && precisions.iter().all(|&p| p == 0.0) {
        debug!("all precisions are zero, score 0");
        return 0.0;
    }

    let log_sum: f64 = weights
        .iter()
        .zip(precisions)
        .filter(|(_, &p)| p != 0.0)
        .map(|(w, p)| w * p.ln())
        .sum();

    let score = bp * log_sum.exp();
    debug!("score={:.6}", score);
    if score.is_finite() {
        score.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// A reusable scorer holding an immutable [`BleuConfig`].
#[derive(Debug, Clone, Default)]
pub struct Bleu {
    config: BleuConfig,
}

impl Bleu {
    pub fn new(config: BleuConfig) -> Self {
        Bleu { config }
    }

    pub fn from_env() -> Self {
        Bleu::new(BleuConfig::from_env())
    }

    pub fn with_smoothing(smoothing: Smoothing) -> Self {
        Bleu::new(BleuConfig {
            smoothing: Some(smoothing),
            ..BleuConfig::default()
        })
    }

    pub fn config(&self) -> &BleuConfig {
        &self.config
    }

    pub fn sentence_score<T, R>(&self, references: &[R], hypothesis: &[T]) -> Result<f64>
    where
        T: Eq + Hash,
        R: AsRef<[T]>,
    {
        sentence_bleu(
            references,
            hypothesis,
            &self.config.weights,
            self.config.smoothing.as_ref(),
        )
    }

    pub fn corpus_score<T, R, L, H>(&self, list_of_references: &[L], hypotheses: &[H]) -> Result<f64>
    where
        T: Eq + Hash,
        R: AsRef<[T]>,
        L: AsRef<[R]>,
        H: AsRef<[T]>,
    {
        corpus_bleu(
            list_of_references,
            hypotheses,
            &self.config.weights,
            self.config.smoothing.as_ref(),
        )
    }
}
