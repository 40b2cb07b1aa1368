//! Concept records and index document shapes

use serde::{Deserialize, Serialize};

/// Row from the relational projection: concept code plus semantic type.
#[derive(Debug, Clone)]
pub struct ConceptCode {
    pub cui: String,
    pub sty: String,
}

/// Completion-suggester payload on an indexed term document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionField {
    /// Suggestion inputs: the raw surface form plus cleaned variants
    pub input: Vec<String>,
    /// Ranking boost from the concept's term-set score
    pub weight: u32,
}

/// Document stored per display term in the autocomplete index.
///
/// Field names are the index's stored-field names (`cui`, `str`, ...), so
/// the same struct serializes straight into bulk uploads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermDocument {
    pub cui: String,
    /// Preferred display term of the concept
    pub pref: String,
    /// Display term in its original surface form
    #[serde(rename = "str")]
    pub term: String,
    /// Normalized key for exact-term lookups
    pub exact: String,
    pub lang: String,
    /// Source vocabulary the term came from
    pub source: String,
    pub types: Vec<String>,
    pub suggest: CompletionField,
}

/// Stored fields returned by a by-code index lookup.
///
/// Only the requested `_source` fields are present; the rest default.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredTerm {
    #[serde(rename = "str")]
    pub term: String,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub pref: Option<String>,
}

/// Coarse UI category per semantic type.
///
/// The population run restricts itself to these semantic types, so every
/// indexed concept resolves to one of the listed categories.
pub const SEMANTIC_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "medication",
        &["Pharmacologic Substance", "Antibiotic", "Organic Chemical"],
    ),
    (
        "condition",
        &[
            "Sign or Symptom",
            "Disease or Syndrome",
            "Mental or Behavioral Dysfunction",
            "Neoplastic Process",
            "Cell or Molecular Dysfunction",
            "Injury or Poisoning",
        ],
    ),
];

/// Map a concept's semantic types to its display category.
///
/// The first category with a matching semantic type wins; concepts with
/// only unknown types get an empty category.
pub fn category_for(types: &[String]) -> &'static str {
    for (category, semantic_types) in SEMANTIC_CATEGORIES {
        if types
            .iter()
            .any(|t| semantic_types.iter().any(|s| s.eq_ignore_ascii_case(t)))
        {
            return category;
        }
    }

    ""
}
