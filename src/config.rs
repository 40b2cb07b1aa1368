//! Environment-driven runtime configuration
//!
//! Both binaries call `Config::from_env` once at startup; nothing re-reads
//! the environment afterwards. `.env` files are honored when present.

use std::env;

use crate::error::{Error, Result};
use crate::text::ScoreWeights;

/// Graph-store connection settings.
///
/// The graph store is optional: without it the service still answers
/// suggestions and expansions, just without community vote signals.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    pub url: String,
    pub user: String,
    pub password: String,
    pub database: String,
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address for the HTTP server
    pub bind_addr: String,
    /// Base URL of the search index
    pub index_url: String,
    /// Name of the autocomplete index
    pub index_name: String,
    /// Graph store settings, when vote signals are enabled
    pub graph: Option<GraphConfig>,
    /// Relational source DSN, required by the population binary only
    pub relational_url: Option<String>,
    /// Secret for decoding bearer tokens; unset disables user context
    pub jwt_secret: Option<String>,
    /// Queries with at most this many tokens use the completion suggester;
    /// longer queries fall back to phrase search
    pub phrase_token_threshold: usize,
    /// Scoring constants for completion weights
    pub score_weights: ScoreWeights,
}

impl Config {
    pub const DEFAULT_BIND_ADDR: &'static str = "127.0.0.1:3000";
    pub const DEFAULT_INDEX_URL: &'static str = "http://localhost:9200";
    pub const DEFAULT_INDEX_NAME: &'static str = "autocomplete";
    pub const DEFAULT_PHRASE_TOKEN_THRESHOLD: usize = 1;

    /// Build the configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let bind_addr =
            env::var("TERM_BIND_ADDR").unwrap_or_else(|_| Self::DEFAULT_BIND_ADDR.to_string());
        let index_url =
            env::var("TERM_INDEX_URL").unwrap_or_else(|_| Self::DEFAULT_INDEX_URL.to_string());
        let index_name =
            env::var("TERM_INDEX_NAME").unwrap_or_else(|_| Self::DEFAULT_INDEX_NAME.to_string());

        let graph = match env::var("TERM_GRAPH_URL") {
            Ok(url) => Some(GraphConfig {
                url,
                user: env::var("TERM_GRAPH_USER").unwrap_or_else(|_| "neo4j".to_string()),
                password: env::var("TERM_GRAPH_PASSWORD").unwrap_or_default(),
                database: env::var("TERM_GRAPH_DATABASE").unwrap_or_else(|_| "neo4j".to_string()),
            }),
            Err(_) => None,
        };

        let relational_url = env::var("TERM_RELATIONAL_URL").ok();
        let jwt_secret = env::var("TERM_JWT_SECRET").ok();

        let phrase_token_threshold = parse_var(
            "TERM_PHRASE_TOKEN_THRESHOLD",
            Self::DEFAULT_PHRASE_TOKEN_THRESHOLD,
        )?;

        let defaults = ScoreWeights::default();
        let score_weights = ScoreWeights {
            divisor: parse_var("TERM_SCORE_DIVISOR", defaults.divisor)?,
            long_mean_threshold: parse_var(
                "TERM_SCORE_LONG_MEAN_THRESHOLD",
                defaults.long_mean_threshold,
            )?,
            long_mean_penalty: parse_var(
                "TERM_SCORE_LONG_MEAN_PENALTY",
                defaults.long_mean_penalty,
            )?,
        };

        Ok(Self {
            bind_addr,
            index_url,
            index_name,
            graph,
            relational_url,
            jwt_secret,
            phrase_token_threshold,
            score_weights,
        })
    }

    /// Relational DSN, or a config error naming the missing variable.
    pub fn require_relational_url(&self) -> Result<&str> {
        self.relational_url
            .as_deref()
            .ok_or_else(|| Error::config("TERM_RELATIONAL_URL is not set"))
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| Error::config(format!("{name} has an unparsable value: {raw:?}"))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_var_rejects_garbage() {
        std::env::set_var("TERM_TEST_UNPARSABLE", "not-a-number");
        let result: Result<usize> = parse_var("TERM_TEST_UNPARSABLE", 5);
        assert!(result.is_err());
        std::env::remove_var("TERM_TEST_UNPARSABLE");
    }

    #[test]
    fn test_parse_var_uses_default_when_unset() {
        let value: usize = parse_var("TERM_TEST_DEFINITELY_UNSET", 7).unwrap();
        assert_eq!(value, 7);
    }
}
