//! Index-population batch pipeline
//!
//! Walks a concept-code range in the relational dictionary, runs every
//! concept's display terms through the normalization/dedup/stripping
//! pipeline, and bulk-uploads one document per surviving term. A rejected
//! bulk batch aborts the whole run.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};

use crate::clients::{RelationalSource, SearchIndexClient, TermRow};
use crate::error::Result;
use crate::text::{dedupe, normalize, score, strip_appendix, ScoreWeights};
use crate::types::{CompletionField, TermDocument};

/// Semantic types eligible for the autocomplete index.
pub const SEMANTIC_TYPES: &[&str] = &[
    "Pharmacologic Substance",
    "Antibiotic",
    "Organic Chemical",
    "Sign or Symptom",
    "Disease or Syndrome",
    "Mental or Behavioral Dysfunction",
    "Neoplastic Process",
    "Cell or Molecular Dysfunction",
    "Injury or Poisoning",
];

/// Source vocabularies for English display terms.
pub const ENGLISH_VOCABULARIES: &[&str] = &["SNOMEDCT_US"];

/// Source vocabularies for alternate-language (Dutch) display terms.
pub const ALTERNATE_VOCABULARIES: &[&str] = &["MDRDUT", "MSHDUT", "ICD10DUT", "ICD9"];

pub const ENGLISH_TERM_LIMIT: u32 = 20;
pub const ALTERNATE_TERM_LIMIT: u32 = 30;

/// Documents per bulk upload request.
const BULK_BATCH_SIZE: usize = 500;

/// Outcome of one population run.
#[derive(Debug, Clone)]
pub struct PopulateSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Concepts that produced at least one document
    pub concepts: usize,
    /// Concepts skipped for lack of usable English terms
    pub skipped_concepts: usize,
    pub documents: usize,
}

/// Render a bare digit range bound as a concept code (`120000` → `C0120000`).
pub fn digit_to_cui(digits: u64) -> String {
    format!("C{digits:07}")
}

/// Whether a raw display term is worth indexing.
///
/// Filters dictionary noise: out-of-range lengths, digit-only and Roman-
/// numeral-only entries, "not otherwise specified" suffixes, and dotted
/// abbreviation garbage like `Pat.mo.dnt`.
pub fn is_indexable_term(term: &str) -> bool {
    let length = term.chars().count();
    if length < 2 || length > 30 {
        return false;
    }

    if term.matches('.').count() >= 3 || term.matches(':').count() >= 3 {
        return false;
    }

    if term.contains('.') && term.contains('^') {
        return false;
    }

    let key = normalize(term);
    if key.is_empty() {
        return false;
    }

    if key == "nos" || key.ends_with(" nos") {
        return false;
    }

    if key.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    if key.chars().all(|c| matches!(c, 'i' | 'v' | 'x')) {
        return false;
    }

    true
}

/// Populate the autocomplete index from a concept-code range.
pub async fn run(
    source: &RelationalSource,
    index: &SearchIndexClient,
    weights: &ScoreWeights,
    from: u64,
    to: u64,
) -> Result<PopulateSummary> {
    let started_at = Utc::now();
    let from_cui = digit_to_cui(from);
    let to_cui = digit_to_cui(to);

    let codes = source
        .concept_codes(&from_cui, &to_cui, SEMANTIC_TYPES)
        .await?;

    if codes.is_empty() {
        tracing::warn!(%from_cui, %to_cui, "no concept codes found in range");
        return Ok(PopulateSummary {
            started_at,
            finished_at: Utc::now(),
            concepts: 0,
            skipped_concepts: 0,
            documents: 0,
        });
    }

    // One row per (cui, semantic type); fold into types per concept.
    let mut types_by_cui: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for code in codes {
        let types = types_by_cui.entry(code.cui).or_default();
        if !types.contains(&code.sty) {
            types.push(code.sty);
        }
    }

    tracing::info!(
        concepts = types_by_cui.len(),
        %from_cui,
        %to_cui,
        "starting index population"
    );

    let mut bulk: Vec<TermDocument> = Vec::with_capacity(BULK_BATCH_SIZE);
    let mut concepts = 0usize;
    let mut skipped_concepts = 0usize;
    let mut documents = 0usize;

    for (cui, types) in &types_by_cui {
        let english = usable_terms(
            source
                .display_terms(cui, ENGLISH_VOCABULARIES, ENGLISH_TERM_LIMIT)
                .await?,
        );

        if english.terms.is_empty() {
            skipped_concepts += 1;
            continue;
        }

        let alternate = usable_terms(
            source
                .display_terms(cui, ALTERNATE_VOCABULARIES, ALTERNATE_TERM_LIMIT)
                .await?,
        );

        let all_terms: Vec<String> = english
            .terms
            .iter()
            .chain(alternate.terms.iter())
            .cloned()
            .collect();
        let weight = score(&all_terms, weights)?;
        let preferred = english.terms[0].clone();

        concepts += 1;

        for (terms, lang) in [(&english, "ENG"), (&alternate, "DUT")] {
            for term in &terms.terms {
                bulk.push(build_document(
                    cui, &preferred, term, lang, terms, types, weight,
                ));
            }
        }

        if bulk.len() >= BULK_BATCH_SIZE {
            documents += index.bulk_index(&bulk).await?;
            tracing::info!(documents, "uploaded batch");
            bulk.clear();
        }
    }

    documents += index.bulk_index(&bulk).await?;

    let summary = PopulateSummary {
        started_at,
        finished_at: Utc::now(),
        concepts,
        skipped_concepts,
        documents,
    };

    tracing::info!(
        concepts = summary.concepts,
        skipped = summary.skipped_concepts,
        documents = summary.documents,
        "population run complete"
    );

    Ok(summary)
}

/// Filtered, deduplicated terms with their first-seen source vocabularies.
struct UsableTerms {
    terms: Vec<String>,
    source_by_key: HashMap<String, String>,
}

fn usable_terms(rows: Vec<TermRow>) -> UsableTerms {
    let rows: Vec<TermRow> = rows
        .into_iter()
        .filter(|row| is_indexable_term(&row.text))
        .collect();

    let mut source_by_key = HashMap::with_capacity(rows.len());
    for row in &rows {
        source_by_key
            .entry(normalize(&row.text))
            .or_insert_with(|| row.source.clone());
    }

    let terms = dedupe(rows.into_iter().map(|row| row.text).collect());

    UsableTerms {
        terms,
        source_by_key,
    }
}

fn build_document(
    cui: &str,
    preferred: &str,
    term: &str,
    lang: &str,
    terms: &UsableTerms,
    types: &[String],
    weight: u32,
) -> TermDocument {
    let exact = normalize(term);
    let source = terms
        .source_by_key
        .get(&exact)
        .cloned()
        .unwrap_or_default();

    // Suggest on the raw surface form and, when it differs, the
    // appendix-stripped variant; the stored `str` keeps the original.
    let mut input = vec![term.to_string()];
    let stripped = strip_appendix(term);
    if stripped != term {
        input.push(stripped);
    }

    TermDocument {
        cui: cui.to_string(),
        pref: preferred.to_string(),
        term: term.to_string(),
        exact,
        lang: lang.to_string(),
        source,
        types: types.to_vec(),
        suggest: CompletionField { input, weight },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_to_cui_pads_to_seven() {
        assert_eq!(digit_to_cui(120000), "C0120000");
        assert_eq!(digit_to_cui(42), "C0000042");
        assert_eq!(digit_to_cui(1234567), "C1234567");
    }

    #[test]
    fn test_indexable_term_length_bounds() {
        assert!(!is_indexable_term("x"));
        assert!(!is_indexable_term(&"x".repeat(31)));
        assert!(is_indexable_term("flu"));
    }

    #[test]
    fn test_digit_and_roman_only_terms_rejected() {
        assert!(!is_indexable_term("1234"));
        assert!(!is_indexable_term("III"));
        assert!(!is_indexable_term("IV"));
        assert!(is_indexable_term("B12 deficiency"));
    }

    #[test]
    fn test_nos_terms_rejected() {
        assert!(!is_indexable_term("NOS"));
        assert!(!is_indexable_term("Anemia NOS"));
        assert!(is_indexable_term("Nosebleed"));
    }

    #[test]
    fn test_dotted_abbreviations_rejected() {
        assert!(!is_indexable_term("Pat.mo.dnt."));
        assert!(!is_indexable_term("a:b:c:d"));
        assert!(is_indexable_term("St. John's wort"));
    }

    #[test]
    fn test_punctuation_only_terms_rejected() {
        assert!(!is_indexable_term("--"));
    }

    #[test]
    fn test_usable_terms_dedupes_and_tracks_sources() {
        let rows = vec![
            TermRow {
                text: "Heart attack".to_string(),
                source: "SNOMEDCT_US".to_string(),
            },
            TermRow {
                text: "heart-attack".to_string(),
                source: "ICD9".to_string(),
            },
            TermRow {
                text: "Myocardial infarction".to_string(),
                source: "SNOMEDCT_US".to_string(),
            },
        ];

        let usable = usable_terms(rows);
        assert_eq!(usable.terms, vec!["Heart attack", "Myocardial infarction"]);
        assert_eq!(
            usable.source_by_key.get("heart attack").map(String::as_str),
            Some("SNOMEDCT_US")
        );
    }

    #[test]
    fn test_build_document_adds_stripped_suggest_input() {
        let usable = usable_terms(vec![TermRow {
            text: "Carcinoma stage IV".to_string(),
            source: "SNOMEDCT_US".to_string(),
        }]);

        let doc = build_document(
            "C0007097",
            "Carcinoma",
            "Carcinoma stage IV",
            "ENG",
            &usable,
            &["Neoplastic Process".to_string()],
            25,
        );

        assert_eq!(doc.term, "Carcinoma stage IV");
        assert_eq!(doc.exact, "carcinoma stage iv");
        assert_eq!(doc.suggest.input, vec!["Carcinoma stage IV", "Carcinoma"]);
        assert_eq!(doc.suggest.weight, 25);
        assert_eq!(doc.source, "SNOMEDCT_US");
    }

    #[test]
    fn test_build_document_skips_duplicate_suggest_input() {
        let usable = usable_terms(vec![TermRow {
            text: "Influenza".to_string(),
            source: "SNOMEDCT_US".to_string(),
        }]);

        let doc = build_document(
            "C0021400",
            "Influenza",
            "Influenza",
            "ENG",
            &usable,
            &[],
            100,
        );

        assert_eq!(doc.suggest.input, vec!["Influenza"]);
    }
}
