//! Deduplication of display terms by normalized key

use std::collections::HashSet;

use rayon::prelude::*;

use super::normalize;

/// Batch size above which normalized keys are computed in parallel.
const PARALLEL_NORMALIZE_THRESHOLD: usize = 1000;

/// Drop terms that normalize to a key already seen earlier in the list.
///
/// Order and surface form of the retained terms are preserved: the
/// first-seen spelling wins, later variants differing only in diacritics,
/// case, or punctuation are discarded.
pub fn dedupe(terms: Vec<String>) -> Vec<String> {
    let keys: Vec<String> = if terms.len() > PARALLEL_NORMALIZE_THRESHOLD {
        terms.par_iter().map(|t| normalize(t)).collect()
    } else {
        terms.iter().map(|t| normalize(t)).collect()
    };

    let mut seen = HashSet::with_capacity(terms.len());

    terms
        .into_iter()
        .zip(keys)
        .filter_map(|(term, key)| seen.insert(key).then_some(term))
        .collect()
}
