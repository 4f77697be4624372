use std::env;
use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{BleuError, Result};
use crate::score::DEFAULT_WEIGHTS;
use crate::smoothing::{Smoothing, SmoothingMethod, SmoothingParams};

/// Scoring configuration: one weight per n-gram order (index 0 = unigrams)
/// and an optional smoothing strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BleuConfig {
    #[serde(deserialize_with = "deserialize_weights")]
    pub weights: Vec<f64>,
    pub smoothing: Option<Smoothing>,
}

impl Default for BleuConfig {
    fn default() -> Self {
        BleuConfig {
            weights: DEFAULT_WEIGHTS.to_vec(),
            smoothing: None,
        }
    }
}

impl BleuConfig {
    /// Read `BLEU_WEIGHTS`, `BLEU_SMOOTHING`, `BLEU_EPSILON`, `BLEU_ALPHA`
    /// and `BLEU_K`. Missing or malformed values fall back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let weights = lookup("BLEU_WEIGHTS")
            .and_then(|raw| match parse_weights(&raw) {
                Ok(weights) => Some(weights),
                Err(err) => {
                    warn!("ignoring BLEU_WEIGHTS {:?}: {}", raw, err);
                    None
                }
            })
            .unwrap_or_else(|| DEFAULT_WEIGHTS.to_vec());

        let defaults = SmoothingParams::default();
        let params = SmoothingParams {
            epsilon: parse_or(&lookup, "BLEU_EPSILON", defaults.epsilon),
            alpha: parse_or(&lookup, "BLEU_ALPHA", defaults.alpha),
            k: parse_or(&lookup, "BLEU_K", defaults.k),
        };

        let smoothing = lookup("BLEU_SMOOTHING").and_then(|raw| {
            match raw.parse::<SmoothingMethod>() {
                Ok(method) => Some(Smoothing::with_params(method, params)),
                Err(err) => {
                    warn!("{}, scoring without smoothing", err);
                    None
                }
            }
        });

        BleuConfig { weights, smoothing }
    }

    /// Check that every weight is finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        check_weights(&self.weights)
    }
}

fn check_weights(weights: &[f64]) -> Result<()> {
    match weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
        Some(w) => Err(BleuError::InvalidWeights(format!(
            "{} is not a finite non-negative number",
            w
        ))),
        None => Ok(()),
    }
}

fn parse_weights(raw: &str) -> Result<Vec<f64>> {
    let weights = raw
        .split(',')
        .map(|w| {
            w.trim()
                .parse::<f64>()
                .map_err(|_| BleuError::InvalidWeights(format!("cannot parse {:?}", w.trim())))
        })
        .collect::<Result<Vec<_>>>()?;
    check_weights(&weights)?;
    Ok(weights)
}

fn deserialize_weights<'de, D>(deserializer: D) -> std::result::Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let weights = Vec::<f64>::deserialize(deserializer)?;
    check_weights(&weights).map_err(serde::de::Error::custom)?;
    Ok(weights)
}

fn parse_or<F, V>(lookup: &F, key: &str, default: V) -> V
where
    F: Fn(&str) -> Option<String>,
    V: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("ignoring malformed {} {:?}", key, raw);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_variables() {
        let config = BleuConfig::from_lookup(lookup(&[]));
        assert_eq!(config, BleuConfig::default());
        assert_eq!(config.weights, vec![0.25; 4]);
        assert!(config.smoothing.is_none());
    }

    #[test]
    fn reads_all_variables() {
        let config = BleuConfig::from_lookup(lookup(&[
            ("BLEU_WEIGHTS", "0.5, 0.5"),
            ("BLEU_SMOOTHING", "method1"),
            ("BLEU_EPSILON", "0.01"),
            ("BLEU_ALPHA", "3"),
            ("BLEU_K", "2.5"),
        ]));
        assert_eq!(config.weights, vec![0.5, 0.5]);
        let smoothing = config.smoothing.unwrap();
        assert_eq!(smoothing.method, SmoothingMethod::AddEpsilon);
        assert_eq!(smoothing.params.epsilon, 0.01);
        assert_eq!(smoothing.params.alpha, 3.0);
        assert_eq!(smoothing.params.k, 2.5);
    }

    #[test]
    fn malformed_values_fall_back() {
        let _ = env_logger::builder().is_test(true).try_init();
        let config = BleuConfig::from_lookup(lookup(&[
            ("BLEU_WEIGHTS", "0.5,abc"),
            ("BLEU_SMOOTHING", "add_one"),
            ("BLEU_EPSILON", "tiny"),
        ]));
        assert_eq!(config.weights, DEFAULT_WEIGHTS.to_vec());
        let smoothing = config.smoothing.unwrap();
        assert_eq!(smoothing.method, SmoothingMethod::AddOne);
        assert_eq!(smoothing.params.epsilon, 0.1);

        let config = BleuConfig::from_lookup(lookup(&[
            ("BLEU_WEIGHTS", "0.5,-0.5"),
            ("BLEU_SMOOTHING", "laplace"),
        ]));
        assert_eq!(config.weights, DEFAULT_WEIGHTS.to_vec());
        assert!(config.smoothing.is_none());
    }

    #[test]
    fn deserializes_partial_json() {
        let config: BleuConfig = serde_json::from_str(
            r#"{"smoothing": {"method": "nist_geometric", "params": {"k": 3.0}}}"#,
        )
        .unwrap();
        assert_eq!(config.weights, vec![0.25; 4]);
        let smoothing = config.smoothing.unwrap();
        assert_eq!(smoothing.method, SmoothingMethod::NistGeometric);
        assert_eq!(smoothing.params.k, 3.0);
        assert_eq!(smoothing.params.epsilon, 0.1);

        let json = serde_json::to_string(&BleuConfig::default()).unwrap();
        assert!(BleuConfig::default().validate().is_ok());
        assert_eq!(json, r#"{"weights":[0.25,0.25,0.25,0.25],"smoothing":null}"#);
    }

    #[test]
    fn json_and_env_reject_the_same_weights() {
        let err = serde_json::from_str::<BleuConfig>(r#"{"weights": [0.5, -0.5]}"#).unwrap_err();
        assert!(err.to_string().contains("invalid weights"), "{}", err);

        let config = BleuConfig::from_lookup(lookup(&[("BLEU_WEIGHTS", "0.5,-0.5")]));
        assert_eq!(config.weights, DEFAULT_WEIGHTS.to_vec());

        assert_eq!(
            parse_weights("0.5,-0.5"),
            Err(BleuError::InvalidWeights(
                "-0.5 is not a finite non-negative number".to_string()
            ))
        );
        assert_eq!(parse_weights(" 0.5 , 0.5 "), Ok(vec![0.5, 0.5]));

        let config = BleuConfig {
            weights: vec![0.25, f64::NAN],
            smoothing: None,
        };
        assert!(matches!(config.validate(), Err(BleuError::InvalidWeights(_))));
    }
}
