//! Clients for the external stores
//!
//! The search index, graph store, and relational dictionary source are
//! external collaborators; these clients own the wire formats and return
//! plain domain types. Each request builds its own immutable query value,
//! so clients are safe to share across handler tasks.

mod graph;
mod relational;
mod search;

pub use graph::GraphStoreClient;
pub use relational::{RelationalSource, TermRow};
pub use search::{SearchIndexClient, Suggestion};
