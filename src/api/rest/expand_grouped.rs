//! Grouped expansion endpoint with community vote signals

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::api::auth::{decode_user, UserContext};
use crate::api::state::AppState;
use crate::text::group;
use crate::types::{category_for, DislikedSynonym, SynonymCandidate, TermGroups};

/// A synonym needs more than this many distinct dislikes before it is
/// surfaced as unchecked.
const MIN_DISLIKE_VOTES: u64 = 1;

#[derive(Debug, Deserialize)]
pub struct ExpandGroupedRequest {
    /// Concept code to expand
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct ExpandGroupedResponse {
    pub category: String,
    pub terms: TermGroups,
    pub uncheck: Vec<DislikedSynonym>,
}

/// POST /api/expand/grouped - Synonyms grouped by label/language
///
/// The index lookup and the two vote reads run concurrently. Vote-store
/// failures degrade the response (votes are supplementary); an index
/// failure fails the request.
pub async fn expand_grouped(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<ExpandGroupedRequest>,
) -> impl IntoResponse {
    if request.query.trim().is_empty() {
        let error = ApiError::bad_request("Field 'query' is required");
        return (StatusCode::BAD_REQUEST, Json(error)).into_response();
    }

    let cui = request.query.trim();
    let user = state
        .config
        .jwt_secret
        .as_deref()
        .and_then(|secret| decode_user(&headers, secret));

    let (stored, liked, uncheck) = tokio::join!(
        state.search.search_by_code(cui, &["str", "lang", "types"]),
        liked_synonyms(&state, cui, user.as_ref()),
        disliked_synonyms(&state, cui),
    );

    let stored = match stored {
        Ok(stored) => stored,
        Err(error) => {
            tracing::error!(%error, cui, "grouped expansion lookup failed");
            let error = ApiError::upstream(error.to_string());
            return (StatusCode::BAD_GATEWAY, Json(error)).into_response();
        }
    };

    let category = stored
        .first()
        .map(|hit| category_for(&hit.types))
        .unwrap_or_default()
        .to_string();

    // Index-stored terms first, user contributions after, so the index
    // surface form wins when both normalize identically.
    let mut candidates: Vec<SynonymCandidate> = stored
        .into_iter()
        .map(|hit| SynonymCandidate {
            text: hit.term,
            label: None,
            lang: hit.lang,
        })
        .collect();
    candidates.extend(liked);

    let response = ExpandGroupedResponse {
        category,
        terms: group(candidates),
        uncheck,
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// Synonyms the calling user liked; empty without a user or graph store.
async fn liked_synonyms(
    state: &AppState,
    cui: &str,
    user: Option<&UserContext>,
) -> Vec<SynonymCandidate> {
    let (Some(graph), Some(user)) = (state.graph.as_ref(), user) else {
        return Vec::new();
    };

    match graph.find_liked_synonyms(cui, &user.id, &user.env).await {
        Ok(liked) => liked,
        Err(error) => {
            tracing::warn!(%error, cui, "liked-synonym lookup failed, continuing without");
            Vec::new()
        }
    }
}

/// Community-disliked synonyms; empty without a graph store.
async fn disliked_synonyms(state: &AppState, cui: &str) -> Vec<DislikedSynonym> {
    let Some(graph) = state.graph.as_ref() else {
        return Vec::new();
    };

    match graph.find_disliked_synonyms(cui, MIN_DISLIKE_VOTES).await {
        Ok(disliked) => disliked,
        Err(error) => {
            tracing::warn!(%error, cui, "disliked-synonym lookup failed, continuing without");
            Vec::new()
        }
    }
}
