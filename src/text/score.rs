//! Completion-suggestion weight from term-set length statistics

use crate::error::{Error, Result};

/// Tunable constants of the scoring formula.
///
/// The defaults reproduce the historically used values; both the divisor
/// and the long-mean penalty are empirical and can be overridden through
/// configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreWeights {
    /// Numerator of the final `ceil(divisor / mean)` step
    pub divisor: f64,
    /// Mean character length above which the penalty applies
    pub long_mean_threshold: f64,
    /// Added to the mean when it exceeds the threshold
    pub long_mean_penalty: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            divisor: 1000.0,
            long_mean_threshold: 40.0,
            long_mean_penalty: 10.0,
        }
    }
}

/// Score a concept's term set for ranking boosts: higher means shorter,
/// more suggestion-friendly terms.
///
/// Computes the mean character length, penalizes long means, and returns
/// `ceil(divisor / adjusted_mean)`.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for an empty term set, and for a set
/// whose terms are all empty (the mean would divide by zero). Callers must
/// gate zero-term concepts before scoring.
pub fn score(terms: &[String], weights: &ScoreWeights) -> Result<u32> {
    if terms.is_empty() {
        return Err(Error::invalid_input("cannot score an empty term set"));
    }

    let total_chars: usize = terms.iter().map(|t| t.chars().count()).sum();
    let mut mean = total_chars as f64 / terms.len() as f64;

    if mean == 0.0 {
        return Err(Error::invalid_input("term set has zero mean length"));
    }

    if mean > weights.long_mean_threshold {
        mean += weights.long_mean_penalty;
    }

    Ok((weights.divisor / mean).ceil() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(terms: &[&str]) -> Vec<String> {
        terms.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_short_terms_score_higher() {
        let weights = ScoreWeights::default();
        let short = score(&owned(&["flu", "cold"]), &weights).unwrap();
        let long = score(&owned(&["influenza infection", "common cold syndrome"]), &weights).unwrap();
        assert!(short > long);
    }

    #[test]
    fn test_known_value() {
        // Mean length 4 → ceil(1000 / 4) = 250
        let weights = ScoreWeights::default();
        assert_eq!(score(&owned(&["abcd", "wxyz"]), &weights).unwrap(), 250);
    }

    #[test]
    fn test_ceiling_applied() {
        // Mean length 3 → 1000/3 = 333.33… → 334
        let weights = ScoreWeights::default();
        assert_eq!(score(&owned(&["abc"]), &weights).unwrap(), 334);
    }

    #[test]
    fn test_long_mean_penalty() {
        let weights = ScoreWeights::default();
        let term = "x".repeat(50);
        // Mean 50 exceeds 40 → adjusted 60 → ceil(1000/60) = 17
        assert_eq!(score(&[term], &weights).unwrap(), 17);
    }

    #[test]
    fn test_monotonic_for_equal_counts() {
        let weights = ScoreWeights::default();
        let smaller = score(&owned(&["ab", "cd"]), &weights).unwrap();
        let larger = score(&owned(&["abcde", "fghij"]), &weights).unwrap();
        assert!(smaller >= larger);
    }

    #[test]
    fn test_char_length_not_byte_length() {
        let weights = ScoreWeights::default();
        // "éééé" is 4 chars (8 bytes); must score like "abcd"
        assert_eq!(
            score(&owned(&["éééé"]), &weights).unwrap(),
            score(&owned(&["abcd"]), &weights).unwrap()
        );
    }

    #[test]
    fn test_empty_set_is_an_error() {
        let err = score(&[], &ScoreWeights::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_zero_mean_is_an_error() {
        let err = score(&owned(&["", ""]), &ScoreWeights::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_custom_weights() {
        let weights = ScoreWeights {
            divisor: 100.0,
            long_mean_threshold: 2.0,
            long_mean_penalty: 1.0,
        };
        // Mean 4 > 2 → adjusted 5 → ceil(100/5) = 20
        assert_eq!(score(&owned(&["abcd"]), &weights).unwrap(), 20);
    }
}
