//! Suggestion endpoint

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::api::state::AppState;
use crate::clients::Suggestion;

/// Completion suggester result size.
const COMPLETION_SIZE: usize = 10;
/// Phrase search result size.
const PHRASE_SIZE: usize = 12;

#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    /// Text typed so far
    pub query: String,
    /// Concept codes already picked by the user, excluded from phrase hits
    #[serde(default, rename = "selectedIds")]
    pub selected_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    /// Round-trip time in milliseconds
    pub took: u128,
    pub hits: Vec<Suggestion>,
}

/// POST /api/suggest - Complete the text typed so far
///
/// Short queries (at most the configured token threshold) go through the
/// index's fuzzy completion suggester; longer queries run as a phrase
/// search that skips already-selected concepts.
pub async fn suggest(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SuggestRequest>,
) -> impl IntoResponse {
    if request.query.trim().is_empty() {
        let error = ApiError::bad_request("Field 'query' is required");
        return (StatusCode::BAD_REQUEST, Json(error)).into_response();
    }

    let started = Instant::now();
    let tokens = request.query.split_whitespace().count();

    let result = if tokens <= state.config.phrase_token_threshold {
        state.search.suggest(&request.query, COMPLETION_SIZE).await
    } else {
        state
            .search
            .search_phrase(&request.query, &request.selected_ids, PHRASE_SIZE)
            .await
    };

    match result {
        Ok(hits) => {
            let response = SuggestResponse {
                took: started.elapsed().as_millis(),
                hits,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(error) => {
            tracing::error!(%error, "suggestion lookup failed");
            let error = ApiError::upstream(error.to_string());
            (StatusCode::BAD_GATEWAY, Json(error)).into_response()
        }
    }
}
