//! Smoothing for sentence-level BLEU.
//!
//! The strategies follow Chen & Cherry (2014), "A Systematic Comparison of
//! Smoothing Techniques for Sentence-Level BLEU". Each one takes the
//! per-order precision fractions and returns adjusted values; none of them
//! modifies its input.

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BleuError;
use crate::fraction::Fraction;
use crate::ngram::ngram_count;
use crate::precision::modified_precision;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmoothingMethod {
    /// Precision values pass through unchanged.
    #[default]
    None,
    /// Zero precisions become `epsilon / denominator`.
    AddEpsilon,
    /// Every precision becomes `(numerator + 1) / (denominator + 1)`.
    AddOne,
    /// The j-th zero precision becomes `1 / (2^j * denominator)`.
    NistGeometric,
    /// The j-th zero precision becomes `j * k / ln(hyp_len)`.
    LengthScaled,
    /// Each order averages the previous adjusted order with the raw values
    /// at this order and the next one.
    TripleAverage,
    /// Orders from trigrams up are interpolated with a prior extrapolated
    /// from the two preceding orders.
    PriorInterpolated,
    /// Length-scaled, then triple-average.
    Combined,
}

impl SmoothingMethod {
    pub const ALL: [SmoothingMethod; 8] = [
        SmoothingMethod::None,
        SmoothingMethod::AddEpsilon,
        SmoothingMethod::AddOne,
        SmoothingMethod::NistGeometric,
        SmoothingMethod::LengthScaled,
        SmoothingMethod::TripleAverage,
        SmoothingMethod::PriorInterpolated,
        SmoothingMethod::Combined,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SmoothingMethod::None => "none",
            SmoothingMethod::AddEpsilon => "add_epsilon",
            SmoothingMethod::AddOne => "add_one",
            SmoothingMethod::NistGeometric => "nist_geometric",
            SmoothingMethod::LengthScaled => "length_scaled",
            SmoothingMethod::TripleAverage => "triple_average",
            SmoothingMethod::PriorInterpolated => "prior_interpolated",
            SmoothingMethod::Combined => "combined",
        }
    }
}

impl fmt::Display for SmoothingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SmoothingMethod {
    type Err = BleuError;

    /// Accepts the snake_case names and the numbered aliases `method0` to
    /// `method7`, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        if let Some(index) = key.strip_prefix("method") {
            return index
                .parse::<usize>()
                .ok()
                .and_then(|i| SmoothingMethod::ALL.get(i).copied())
                .ok_or_else(|| BleuError::UnknownSmoothing(s.to_string()));
        }
        SmoothingMethod::ALL
            .iter()
            .find(|method| method.name() == key)
            .copied()
            .ok_or_else(|| BleuError::UnknownSmoothing(s.to_string()))
    }
}

/// Numeric parameters shared by the smoothing strategies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingParams {
    /// Count added to zero-match orders by [`SmoothingMethod::AddEpsilon`].
    pub epsilon: f64,
    /// Prior weight used by [`SmoothingMethod::PriorInterpolated`].
    pub alpha: f64,
    /// Scale used by [`SmoothingMethod::LengthScaled`].
    pub k: f64,
}

impl Default for SmoothingParams {
    fn default() -> Self {
        SmoothingParams {
            epsilon: 0.1,
            alpha: 5.0,
            k: 5.0,
        }
    }
}

/// A configured smoothing strategy. Immutable once built; can be shared
/// freely between scoring calls and threads.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Smoothing {
    pub method: SmoothingMethod,
    #[serde(default)]
    pub params: SmoothingParams,
}

impl Smoothing {
    pub fn new(method: SmoothingMethod) -> Self {
        Smoothing {
            method,
            params: SmoothingParams::default(),
        }
    }

    pub fn with_params(method: SmoothingMethod, params: SmoothingParams) -> Self {
        Smoothing { method, params }
    }

    /// Adjust the precision vector `p_n` (index 0 = unigrams).
    ///
    /// `references`, `hypothesis` and `hyp_len` describe the sentence the
    /// precisions came from; only the length- and order-aware strategies
    /// read them.
    pub fn apply<T, R>(
        &self,
        p_n: &[Fraction],
        references: &[R],
        hypothesis: &[T],
        hyp_len: usize,
    ) -> Vec<f64>
    where
        T: Eq + Hash,
        R: AsRef<[T]>,
    {
        match self.method {
            SmoothingMethod::None => to_floats(p_n),
            SmoothingMethod::AddEpsilon => self.add_epsilon(p_n),
            SmoothingMethod::AddOne => add_one(p_n),
            SmoothingMethod::NistGeometric => nist_geometric(p_n),
            SmoothingMethod::LengthScaled => self.length_scaled(&to_floats(p_n), hyp_len),
            SmoothingMethod::TripleAverage => {
                let next = modified_precision(references, hypothesis, p_n.len() + 1);
                triple_average(&to_floats(p_n), next.to_f64())
            }
            SmoothingMethod::PriorInterpolated => {
                self.prior_interpolated(&to_floats(p_n), hypothesis.len())
            }
            SmoothingMethod::Combined => {
                let next = modified_precision(references, hypothesis, p_n.len() + 1);
                let scaled = self.length_scaled(&to_floats(p_n), hyp_len);
                triple_average(&scaled, next.to_f64())
            }
        }
    }

    fn add_epsilon(&self, p_n: &[Fraction]) -> Vec<f64> {
        p_n.iter()
            .map(|p| {
                if p.is_zero() {
                    self.params.epsilon / p.denominator() as f64
                } else {
                    p.to_f64()
                }
            })
            .collect()
    }

    fn length_scaled(&self, p_n: &[f64], hyp_len: usize) -> Vec<f64> {
        let mut smoothed = p_n.to_vec();
        // ln(0) and ln(1) leave nothing sensible to divide by.
        if hyp_len <= 1 {
            return smoothed;
        }
        let log_len = (hyp_len as f64).ln();
        let mut j = 1.0;
        for p in smoothed.iter_mut().filter(|p| **p == 0.0) {
            *p = j * self.params.k / log_len;
            j += 1.0;
        }
        smoothed
    }

    fn prior_interpolated(&self, p_n: &[f64], hyp_len: usize) -> Vec<f64> {
        let alpha = self.params.alpha;
        let mut smoothed = p_n.to_vec();
        for i in 2..smoothed.len() {
            let prior = if smoothed[i - 2] == 0.0 {
                0.0
            } else {
                smoothed[i - 1].powi(2) / smoothed[i - 2]
            };
            let windows = ngram_count(hyp_len, i + 1) as f64;
            let denominator = windows + alpha;
            smoothed[i] = if denominator == 0.0 {
                0.0
            } else {
                (smoothed[i] + alpha * prior) / denominator
            };
        }
        smoothed
    }
}

fn to_floats(p_n: &[Fraction]) -> Vec<f64> {
    p_n.iter().map(|p| p.to_f64()).collect()
}

fn add_one(p_n: &[Fraction]) -> Vec<f64> {
    p_n.iter()
        .map(|p| Fraction::new(p.numerator() + 1, p.denominator() + 1).to_f64())
        .collect()
}

fn nist_geometric(p_n: &[Fraction]) -> Vec<f64> {
    let mut j = 1;
    p_n.iter()
        .map(|p| {
            if !p.is_zero() {
                return p.to_f64();
            }
            let smoothed = 1.0 / (2f64.powi(j) * p.denominator() as f64);
            j += 1;
            smoothed
        })
        .collect()
}

/// `next` is the raw precision one order above the last entry of `p_n`.
fn triple_average(p_n: &[f64], next: f64) -> Vec<f64> {
    let Some(&first) = p_n.first() else {
        return Vec::new();
    };
    let mut smoothed = Vec::with_capacity(p_n.len());
    let mut previous = first + 1.0;
    for (i, &p) in p_n.iter().enumerate() {
        let following = p_n.get(i + 1).copied().unwrap_or(next);
        let averaged = (previous + p + following) / 3.0;
        smoothed.push(averaged);
        previous = averaged;
    }
    smoothed
}
