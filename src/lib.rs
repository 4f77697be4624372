//! BLEU (Bilingual Evaluation Understudy) scores for tokenised text.
//!
//! Papineni, Roukos, Ward and Zhu (2002), "BLEU: a method for automatic
//! evaluation of machine translation". Tokens can be anything hashable; the
//! crate does no tokenisation of its own.
//!
//! ```
//! use bleu::{corpus_bleu, sentence_bleu, Smoothing, SmoothingMethod, DEFAULT_WEIGHTS};
//!
//! let reference = "the cat is on the mat".split(' ').collect::<Vec<_>>();
//! let hypothesis = "the cat is on a mat".split(' ').collect::<Vec<_>>();
//!
//! let smoothing = Smoothing::new(SmoothingMethod::NistGeometric);
//! let sentence = sentence_bleu(&[&reference], &hypothesis, &DEFAULT_WEIGHTS, Some(&smoothing))?;
//! assert!(sentence > 0.0 && sentence < 1.0);
//!
//! let corpus = corpus_bleu(&[vec![&reference]], &[&hypothesis], &DEFAULT_WEIGHTS, None)?;
//! assert!(corpus <= 1.0);
//! # Ok::<(), bleu::BleuError>(())
//! ```

pub mod brevity;
pub mod config;
pub mod error;
pub mod fraction;
pub mod ngram;
pub mod precision;
pub mod score;
pub mod smoothing;

pub use brevity::{brevity_penalty, closest_ref_length};
pub use config::BleuConfig;
pub use error::{BleuError, Result};
pub use fraction::Fraction;
pub use ngram::{ngram_count, ngram_counts, NgramCounts};
pub use precision::modified_precision;
pub use score::{corpus_bleu, sentence_bleu, Bleu, DEFAULT_WEIGHTS};
pub use smoothing::{Smoothing, SmoothingMethod, SmoothingParams};
