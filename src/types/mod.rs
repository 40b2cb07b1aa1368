//! Data types for the terminology service
//!
//! This module contains the core data structures shared between the
//! population pipeline, the store clients, and the HTTP handlers.

mod concept;
mod synonym;

pub use concept::{
    category_for, CompletionField, ConceptCode, StoredTerm, TermDocument, SEMANTIC_CATEGORIES,
};
pub use synonym::{DislikedSynonym, SynonymCandidate, TermGroups};
