use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BleuError {
    #[error("number of hypotheses ({hypotheses}) and reference lists ({references}) differ")]
    ShapeMismatch { references: usize, hypotheses: usize },

    #[error("at least one reference is required{}", pair_suffix(.pair))]
    InvalidReferences { pair: Option<usize> },

    #[error("unknown smoothing method: {0}")]
    UnknownSmoothing(String),

    #[error("invalid weights: {0}")]
    InvalidWeights(String),
}

fn pair_suffix(pair: &Option<usize>) -> String {
    match pair {
        Some(index) => format!(" (pair {})", index),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, BleuError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = BleuError::ShapeMismatch {
            references: 3,
            hypotheses: 2,
        };
        assert_eq!(
            err.to_string(),
            "number of hypotheses (2) and reference lists (3) differ"
        );

        let err = BleuError::InvalidReferences { pair: Some(4) };
        assert_eq!(err.to_string(), "at least one reference is required (pair 4)");

        let err = BleuError::InvalidReferences { pair: None };
        assert_eq!(err.to_string(), "at least one reference is required");

        let err = BleuError::InvalidWeights("-1 is not a finite non-negative number".into());
        assert_eq!(
            err.to_string(),
            "invalid weights: -1 is not a finite non-negative number"
        );
    }
}
