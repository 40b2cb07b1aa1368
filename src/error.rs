//! Error types shared across the service

use thiserror::Error;

/// Result type for all fallible operations in this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Crate-wide error type
#[derive(Debug, Error)]
pub enum Error {
    /// A caller violated an input contract (e.g. scoring an empty term set)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The search index rejected a request or returned an unusable response
    #[error("search index error: {0}")]
    SearchIndex(String),

    /// The graph store rejected a request or returned an unusable response
    #[error("graph store error: {0}")]
    GraphStore(String),

    /// Missing or malformed runtime configuration
    #[error("configuration error: {0}")]
    Config(String),

    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("relational source error: {0}")]
    Relational(#[from] sqlx::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn search_index(message: impl Into<String>) -> Self {
        Self::SearchIndex(message.into())
    }

    pub fn graph_store(message: impl Into<String>) -> Self {
        Self::GraphStore(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
