use log::warn;

use crate::error::{BleuError, Result};

/// Length of the reference closest to `hyp_len`. Ties in distance go to the
/// shorter reference.
pub fn closest_ref_length<T, R>(references: &[R], hyp_len: usize) -> Result<usize>
where
    R: AsRef<[T]>,
{
    references
        .iter()
        .map(|reference| reference.as_ref().len())
        .min_by_key(|&ref_len| (ref_len.abs_diff(hyp_len), ref_len))
        .ok_or(BleuError::InvalidReferences { pair: None })
}

/// Brevity penalty for a hypothesis (or corpus) of `hyp_len` tokens against
/// a closest reference length of `closest_ref_len`.
///
/// An empty hypothesis is fully penalised (0) rather than dividing by zero.
pub fn brevity_penalty(closest_ref_len: usize, hyp_len: usize) -> f64 {
    if hyp_len > closest_ref_len {
        return 1.0;
    }
    if hyp_len == 0 {
        warn!(
            "zero-length hypothesis against reference length {}, using penalty 0",
            closest_ref_len
        );
        return 0.0;
    }
    (1.0 - closest_ref_len as f64 / hyp_len as f64).exp()
}
