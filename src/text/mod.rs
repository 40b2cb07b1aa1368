//! Term normalization, deduplication, and ranking pipeline
//!
//! Shared between the index-population batch job and the request-time
//! expansion handlers. All functions here are pure: no I/O, no state beyond
//! the static lookup tables, safe to call from any task.

mod appendix;
mod dedupe;
mod group;
mod normalize;
mod score;

pub use appendix::{strip_appendix, NumeralKind, QUALIFIER_KEYWORDS};
pub use dedupe::dedupe;
pub use group::{group, language_name, CUSTOM_BUCKET, LANGUAGE_NAMES};
pub use normalize::{normalize, normalize_bytes, DIACRITIC_FOLDS};
pub use score::{score, ScoreWeights};
