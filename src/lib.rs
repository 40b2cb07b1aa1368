//! Termcomplete
//!
//! A medical-terminology autocomplete and synonym-expansion service on top
//! of a search index (fuzzy/prefix lookup), a graph store (community
//! synonym votes), and a relational dictionary source (index population).
//!
//! # Modules
//!
//! - `text`: term normalization, dedup, qualifier stripping, scoring,
//!   grouping - the pipeline shared by population and expansion
//! - `types`: core data structures (candidates, documents, term groups)
//! - `clients`: search index, graph store, and relational source clients
//! - `populate`: the index-population batch pipeline
//! - `api`: axum router and REST handlers
//! - `config`: environment-driven runtime configuration
//!
//! # Example
//!
//! ```
//! use termcomplete::text::{group, strip_appendix};
//! use termcomplete::types::SynonymCandidate;
//!
//! assert_eq!(strip_appendix("Carcinoma stage IV"), "Carcinoma");
//!
//! let groups = group(vec![
//!     SynonymCandidate::with_label("pain", "preferred"),
//!     SynonymCandidate::with_lang("pijn", "DUT"),
//! ]);
//! assert_eq!(groups["preferred"], vec!["pain"]);
//! ```

pub mod api;
pub mod clients;
pub mod config;
pub mod error;
pub mod populate;
pub mod text;
pub mod types;

// Re-export commonly used items at crate root
pub use config::Config;
pub use error::{Error, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
