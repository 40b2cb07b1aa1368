//! Synonym candidates, vote aggregates, and term groups

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Named buckets of unique display terms, sorted ascending by length.
pub type TermGroups = BTreeMap<String, Vec<String>>;

/// A display term with optional provenance tags.
///
/// `label` is a curated classification ("preferred", "abbreviation");
/// `lang` is the source language code. Bucket-key derivation checks the
/// label first, then the language, then falls back to the custom bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynonymCandidate {
    #[serde(rename = "str")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl SynonymCandidate {
    /// Candidate with no provenance tags
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: None,
            lang: None,
        }
    }

    /// Candidate carrying a curated label
    pub fn with_label(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: Some(label.into()),
            lang: None,
        }
    }

    /// Candidate carrying a source language code
    pub fn with_lang(text: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: None,
            lang: Some(lang.into()),
        }
    }
}

/// Community downvote aggregate for a (concept, synonym) pair.
///
/// Read-only here; the graph store owns the vote records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DislikedSynonym {
    pub term: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub votes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_deserializes_from_store_row() {
        let candidate: SynonymCandidate =
            serde_json::from_str(r#"{"str": "pijn", "lang": "DUT"}"#).unwrap();
        assert_eq!(candidate.text, "pijn");
        assert_eq!(candidate.lang.as_deref(), Some("DUT"));
        assert!(candidate.label.is_none());
    }

    #[test]
    fn test_absent_tags_not_serialized() {
        let json = serde_json::to_string(&SynonymCandidate::plain("ache")).unwrap();
        assert_eq!(json, r#"{"str":"ache"}"#);
    }
}
