//! Bucketing of synonym candidates by label or language

use crate::types::{SynonymCandidate, TermGroups};

use super::dedupe;

/// Language codes as they appear in the dictionary source, mapped to the
/// bucket names shown to users. Codes outside this table fall through to
/// [`CUSTOM_BUCKET`].
pub const LANGUAGE_NAMES: &[(&str, &str)] = &[("ENG", "english"), ("DUT", "dutch")];

/// Bucket for candidates with no usable label or language tag.
pub const CUSTOM_BUCKET: &str = "custom";

/// Look up the bucket name for a language code.
pub fn language_name(code: &str) -> Option<&'static str> {
    LANGUAGE_NAMES
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, name)| *name)
}

/// Partition a candidate stream into named term buckets.
///
/// Bucket key priority per candidate: non-empty curated label (lowercased),
/// else mapped language name, else [`CUSTOM_BUCKET`]. Within a bucket,
/// terms are deduplicated on normalized keys (first occurrence wins, so
/// index-origin terms must precede user contributions in the input) and
/// sorted ascending by character length. Buckets left empty are dropped.
pub fn group(candidates: Vec<SynonymCandidate>) -> TermGroups {
    let mut buckets = TermGroups::new();

    for candidate in candidates {
        if candidate.text.trim().is_empty() {
            continue;
        }

        buckets
            .entry(bucket_key(&candidate))
            .or_default()
            .push(candidate.text);
    }

    buckets
        .into_iter()
        .filter_map(|(key, terms)| {
            let mut unique = dedupe(terms);
            if unique.is_empty() {
                return None;
            }
            unique.sort_by_key(|t| t.chars().count());
            Some((key, unique))
        })
        .collect()
}

fn bucket_key(candidate: &SynonymCandidate) -> String {
    if let Some(label) = candidate.label.as_deref() {
        if !label.trim().is_empty() {
            return label.to_lowercase();
        }
    }

    if let Some(code) = candidate.lang.as_deref() {
        if let Some(name) = language_name(code) {
            return name.to_string();
        }
    }

    CUSTOM_BUCKET.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_language_and_custom_buckets() {
        let groups = group(vec![
            SynonymCandidate::with_lang("pijn", "DUT"),
            SynonymCandidate::with_label("pain", "preferred"),
            SynonymCandidate::plain("ache"),
        ]);

        assert_eq!(groups.len(), 3);
        assert_eq!(groups["preferred"], vec!["pain"]);
        assert_eq!(groups["dutch"], vec!["pijn"]);
        assert_eq!(groups["custom"], vec!["ache"]);
    }

    #[test]
    fn test_label_outranks_language() {
        let mut candidate = SynonymCandidate::with_lang("pain", "ENG");
        candidate.label = Some("Abbreviation".to_string());

        let groups = group(vec![candidate]);
        assert_eq!(groups["abbreviation"], vec!["pain"]);
        assert!(!groups.contains_key("english"));
    }

    #[test]
    fn test_blank_label_falls_through_to_language() {
        let mut candidate = SynonymCandidate::with_lang("pijn", "DUT");
        candidate.label = Some("  ".to_string());

        let groups = group(vec![candidate]);
        assert_eq!(groups["dutch"], vec!["pijn"]);
    }

    #[test]
    fn test_unmapped_language_goes_to_custom() {
        let groups = group(vec![SynonymCandidate::with_lang("douleur", "FRE")]);
        assert_eq!(groups["custom"], vec!["douleur"]);
    }

    #[test]
    fn test_terms_sorted_by_length_within_bucket() {
        let groups = group(vec![
            SynonymCandidate::plain("myocardial infarction"),
            SynonymCandidate::plain("MI"),
            SynonymCandidate::plain("heart attack"),
        ]);

        assert_eq!(
            groups["custom"],
            vec!["MI", "heart attack", "myocardial infarction"]
        );
    }

    #[test]
    fn test_index_origin_wins_on_duplicate_keys() {
        // Index-stored terms come first in the merged stream
        let groups = group(vec![
            SynonymCandidate::plain("Cancer"),
            SynonymCandidate::plain("cancer"),
        ]);

        assert_eq!(groups["custom"], vec!["Cancer"]);
    }

    #[test]
    fn test_blank_texts_dropped_and_no_empty_buckets() {
        let groups = group(vec![
            SynonymCandidate::with_label("", "preferred"),
            SynonymCandidate::with_label("   ", "preferred"),
        ]);

        assert!(groups.is_empty());
    }

    #[test]
    fn test_language_code_lookup_is_case_insensitive() {
        assert_eq!(language_name("dut"), Some("dutch"));
        assert_eq!(language_name("ENG"), Some("english"));
        assert_eq!(language_name("GER"), None);
    }
}
