//! Graph-store client for community synonym votes
//!
//! Reads two aggregates over the vote graph: synonyms the current user
//! liked for a concept, and synonyms the community disliked more than a
//! vote threshold. Vote writes happen elsewhere; this client is read-only.

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::config::GraphConfig;
use crate::error::{Error, Result};
use crate::types::{DislikedSynonym, SynonymCandidate};

const LIKED_SYNONYMS: &str = "MATCH (s:Synonym {cui: $cui})<-[:LIKES]-(:User {id: $user, env: $env}) \
     RETURN s.str AS str, s.label AS label";

const DISLIKED_SYNONYMS: &str = "MATCH (s:Synonym {cui: $cui})<-[r:DISLIKES]-(:User) \
     WITH s, count(r) AS votes WHERE votes > $min_votes \
     RETURN s.str AS term, s.label AS label, votes";

/// One Cypher statement with its parameters.
///
/// Built fresh per request; statements are never reused or mutated, so
/// concurrent requests cannot interfere through shared query state.
#[derive(Debug, Serialize)]
struct CypherStatement {
    statement: &'static str,
    parameters: Value,
}

/// HTTP client for the vote graph's transactional Cypher endpoint.
#[derive(Debug, Clone)]
pub struct GraphStoreClient {
    http: reqwest::Client,
    url: String,
    user: String,
    password: String,
    database: String,
}

impl GraphStoreClient {
    pub fn new(config: &GraphConfig) -> Self {
        let mut url = config.url.clone();
        while url.ends_with('/') {
            url.pop();
        }

        Self {
            http: reqwest::Client::new(),
            url,
            user: config.user.clone(),
            password: config.password.clone(),
            database: config.database.clone(),
        }
    }

    /// Synonyms this user liked for the concept, as grouping candidates.
    pub async fn find_liked_synonyms(
        &self,
        cui: &str,
        user_id: &str,
        user_env: &str,
    ) -> Result<Vec<SynonymCandidate>> {
        let statement = CypherStatement {
            statement: LIKED_SYNONYMS,
            parameters: json!({
                "cui": cui,
                "user": user_id,
                "env": user_env,
            }),
        };

        let rows = self.run(statement).await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| serde_json::from_value(Value::Object(row)).ok())
            .collect())
    }

    /// Synonyms with more than `min_votes` distinct dislikes for the concept.
    pub async fn find_disliked_synonyms(
        &self,
        cui: &str,
        min_votes: u64,
    ) -> Result<Vec<DislikedSynonym>> {
        let statement = CypherStatement {
            statement: DISLIKED_SYNONYMS,
            parameters: json!({
                "cui": cui,
                "min_votes": min_votes,
            }),
        };

        let rows = self.run(statement).await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| serde_json::from_value(Value::Object(row)).ok())
            .collect())
    }

    async fn run(&self, statement: CypherStatement) -> Result<Vec<Map<String, Value>>> {
        let url = format!("{}/db/{}/tx/commit", self.url, self.database);
        let body = json!({ "statements": [statement] });

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.user, Some(&self.password))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let body: Value = response.json().await?;

        if !status.is_success() {
            return Err(Error::graph_store(format!(
                "cypher request failed with status {status}: {body}"
            )));
        }

        if let Some(errors) = body["errors"].as_array() {
            if !errors.is_empty() {
                return Err(Error::graph_store(format!(
                    "cypher request reported errors: {}",
                    Value::Array(errors.clone())
                )));
            }
        }

        Ok(rows_as_objects(&body))
    }
}

/// Re-key result rows by their column names.
fn rows_as_objects(body: &Value) -> Vec<Map<String, Value>> {
    let Some(result) = body["results"].get(0) else {
        return Vec::new();
    };

    let columns: Vec<&str> = result["columns"]
        .as_array()
        .map(|cols| cols.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    result["data"]
        .as_array()
        .map(|rows| {
            rows.iter()
                .filter_map(|entry| {
                    let row = entry["row"].as_array()?;
                    let mut object = Map::new();
                    for (column, value) in columns.iter().zip(row) {
                        object.insert(column.to_string(), value.clone());
                    }
                    Some(object)
                })
                .collect()
        })
        .unwrap_or_default()
}
