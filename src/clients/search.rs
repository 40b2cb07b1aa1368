//! Search-index client: completion suggestions, term lookups, bulk upload

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::types::{StoredTerm, TermDocument};

/// Name of the completion suggester in suggest requests and responses.
const SUGGESTER: &str = "term-suggest";

/// A completion hit: concept code plus the suggested display term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub cui: String,
    #[serde(rename = "str")]
    pub text: String,
}

/// HTTP client for the autocomplete search index.
#[derive(Debug, Clone)]
pub struct SearchIndexClient {
    http: reqwest::Client,
    base_url: String,
    index: String,
}

impl SearchIndexClient {
    pub fn new(base_url: impl Into<String>, index: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: trim_trailing_slash(base_url.into()),
            index: index.into(),
        }
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    /// Fuzzy prefix completion against the `suggest` field.
    pub async fn suggest(&self, prefix: &str, size: usize) -> Result<Vec<Suggestion>> {
        let body = json!({
            "suggest": {
                SUGGESTER: {
                    "prefix": prefix.trim(),
                    "completion": {
                        "field": "suggest",
                        "size": size,
                        "fuzzy": {
                            "prefix_length": 3,
                            "fuzziness": "AUTO"
                        }
                    }
                }
            }
        });

        let response = self.search_request(&body).await?;
        Ok(parse_suggestions(&response))
    }

    /// Phrase match on stored display terms, excluding already-selected
    /// concept codes.
    pub async fn search_phrase(
        &self,
        phrase: &str,
        exclude_cuis: &[String],
        size: usize,
    ) -> Result<Vec<Suggestion>> {
        let body = json!({
            "size": size,
            "_source": ["cui", "str"],
            "query": {
                "bool": {
                    "must": { "match_phrase": { "str": phrase.trim() } },
                    "must_not": { "terms": { "cui": exclude_cuis } }
                }
            }
        });

        let response = self.search_request(&body).await?;
        Ok(parse_sources(&response))
    }

    /// All stored documents for a concept code, restricted to the given
    /// stored fields.
    pub async fn search_by_code(&self, cui: &str, fields: &[&str]) -> Result<Vec<StoredTerm>> {
        let body = json!({
            "size": 100,
            "_source": fields,
            "query": {
                "term": { "cui": cui }
            }
        });

        let response = self.search_request(&body).await?;
        Ok(parse_sources(&response))
    }

    /// Upload a batch of term documents.
    ///
    /// Any item failure fails the whole batch; callers abort their run
    /// instead of continuing with a partially applied upload.
    pub async fn bulk_index(&self, documents: &[TermDocument]) -> Result<usize> {
        if documents.is_empty() {
            return Ok(0);
        }

        let mut payload = String::new();
        for document in documents {
            payload.push_str("{\"index\":{}}\n");
            payload.push_str(&serde_json::to_string(document)?);
            payload.push('\n');
        }

        let url = format!("{}/{}/_bulk", self.base_url, self.index);
        let response = self
            .http
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/x-ndjson")
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        let body: Value = response.json().await?;

        if !status.is_success() {
            return Err(Error::search_index(format!(
                "bulk upload rejected with status {status}: {body}"
            )));
        }

        if body["errors"].as_bool().unwrap_or(false) {
            return Err(Error::search_index(format!(
                "bulk upload reported item failures: {}",
                first_bulk_error(&body)
            )));
        }

        Ok(documents.len())
    }

    /// Create the autocomplete index with its completion mapping.
    ///
    /// Succeeds quietly when the index already exists.
    pub async fn ensure_index(&self) -> Result<()> {
        let url = format!("{}/{}", self.base_url, self.index);
        let response = self.http.put(&url).json(&index_mapping()).send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        if body.contains("resource_already_exists_exception") {
            return Ok(());
        }

        Err(Error::search_index(format!(
            "index creation failed with status {status}: {body}"
        )))
    }

    /// Drop the autocomplete index; absent indices are fine.
    pub async fn delete_index(&self) -> Result<()> {
        let url = format!("{}/{}", self.base_url, self.index);
        let response = self.http.delete(&url).send().await?;

        let status = response.status();
        if status.is_success() || status == reqwest::StatusCode::NOT_FOUND {
            return Ok(());
        }

        Err(Error::search_index(format!(
            "index deletion failed with status {status}"
        )))
    }

    async fn search_request(&self, body: &Value) -> Result<Value> {
        let url = format!("{}/{}/_search", self.base_url, self.index);
        let response = self.http.post(&url).json(body).send().await?;

        let status = response.status();
        let body: Value = response.json().await?;

        if !status.is_success() {
            return Err(Error::search_index(format!(
                "search request failed with status {status}: {body}"
            )));
        }

        Ok(body)
    }
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

/// Completion mapping for the autocomplete index.
fn index_mapping() -> Value {
    json!({
        "mappings": {
            "properties": {
                "cui":    { "type": "keyword" },
                "pref":   { "type": "keyword" },
                "str":    { "type": "text" },
                "exact":  { "type": "keyword" },
                "lang":   { "type": "keyword" },
                "source": { "type": "keyword" },
                "types":  { "type": "keyword" },
                "suggest": { "type": "completion" }
            }
        }
    })
}

/// Pull suggestions out of a completion-suggester response.
fn parse_suggestions(body: &Value) -> Vec<Suggestion> {
    body["suggest"][SUGGESTER][0]["options"]
        .as_array()
        .map(|options| {
            options
                .iter()
                .filter_map(|option| {
                    let cui = option["_source"]["cui"].as_str()?;
                    // Prefer the stored surface form over the echoed text
                    let text = option["_source"]["str"]
                        .as_str()
                        .or_else(|| option["text"].as_str())?;
                    Some(Suggestion {
                        cui: cui.to_string(),
                        text: text.to_string(),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Deserialize every hit's `_source` into `T`, skipping malformed hits.
fn parse_sources<T: serde::de::DeserializeOwned>(body: &Value) -> Vec<T> {
    body["hits"]["hits"]
        .as_array()
        .map(|hits| {
            hits.iter()
                .filter_map(|hit| serde_json::from_value(hit["_source"].clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

fn first_bulk_error(body: &Value) -> String {
    body["items"]
        .as_array()
        .into_iter()
        .flatten()
        .find_map(|item| {
            item["index"]["error"]
                .as_object()
                .map(|error| Value::Object(error.clone()).to_string())
        })
        .unwrap_or_else(|| "unknown item error".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_suggestions() {
        let body = json!({
            "suggest": {
                "term-suggest": [{
                    "text": "diab",
                    "options": [
                        { "text": "Diabetes mellitus", "_source": { "cui": "C0011849", "str": "Diabetes mellitus" } },
                        { "text": "Diabetes insipidus", "_source": { "cui": "C0011848", "str": "Diabetes insipidus" } }
                    ]
                }]
            }
        });

        let suggestions = parse_suggestions(&body);
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].cui, "C0011849");
        assert_eq!(suggestions[0].text, "Diabetes mellitus");
    }

    #[test]
    fn test_parse_suggestions_skips_options_without_source() {
        let body = json!({
            "suggest": {
                "term-suggest": [{
                    "options": [ { "text": "orphan option" } ]
                }]
            }
        });

        assert!(parse_suggestions(&body).is_empty());
    }

    #[test]
    fn test_parse_sources_into_stored_terms() {
        let body = json!({
            "hits": {
                "total": { "value": 2 },
                "hits": [
                    { "_source": { "str": "Diabetes mellitus", "lang": "ENG", "types": ["Disease or Syndrome"] } },
                    { "_source": { "str": "Suikerziekte", "lang": "DUT" } }
                ]
            }
        });

        let terms: Vec<StoredTerm> = parse_sources(&body);
        assert_eq!(terms.len(), 2);
        assert_eq!(terms[0].term, "Diabetes mellitus");
        assert_eq!(terms[1].lang.as_deref(), Some("DUT"));
        assert!(terms[1].types.is_empty());
    }

    #[test]
    fn test_parse_sources_on_empty_response() {
        let terms: Vec<StoredTerm> = parse_sources(&json!({}));
        assert!(terms.is_empty());
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = SearchIndexClient::new("http://localhost:9200/", "autocomplete");
        assert_eq!(client.base_url, "http://localhost:9200");
    }
}
