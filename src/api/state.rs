//! Shared application state

use crate::clients::{GraphStoreClient, SearchIndexClient};
use crate::config::Config;

/// State shared by all request handlers.
///
/// Clients are cheap to clone and hold no per-request state; the whole
/// struct lives behind an `Arc` in the router.
pub struct AppState {
    pub search: SearchIndexClient,
    /// Absent when no graph store is configured; expansion then runs
    /// without vote signals
    pub graph: Option<GraphStoreClient>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let search = SearchIndexClient::new(config.index_url.as_str(), config.index_name.as_str());
        let graph = config.graph.as_ref().map(GraphStoreClient::new);

        Self {
            search,
            graph,
            config,
        }
    }
}
