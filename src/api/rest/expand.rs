//! Flat expansion endpoint

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::api::state::AppState;
use crate::text::dedupe;
use crate::types::category_for;

#[derive(Debug, Deserialize)]
pub struct ExpandRequest {
    /// Concept code to expand
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct ExpandResponse {
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub terms: Vec<String>,
}

impl ExpandResponse {
    fn empty() -> Self {
        Self {
            kind: String::new(),
            category: String::new(),
            terms: Vec::new(),
        }
    }
}

/// POST /api/expand - All display terms stored for a concept code
pub async fn expand(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ExpandRequest>,
) -> impl IntoResponse {
    if request.query.trim().is_empty() {
        let error = ApiError::bad_request("Field 'query' is required");
        return (StatusCode::BAD_REQUEST, Json(error)).into_response();
    }

    let stored = match state
        .search
        .search_by_code(request.query.trim(), &["str", "types"])
        .await
    {
        Ok(stored) => stored,
        Err(error) => {
            tracing::error!(%error, cui = %request.query, "expansion lookup failed");
            let error = ApiError::upstream(error.to_string());
            return (StatusCode::BAD_GATEWAY, Json(error)).into_response();
        }
    };

    if stored.is_empty() {
        return (StatusCode::OK, Json(ExpandResponse::empty())).into_response();
    }

    let category = category_for(&stored[0].types).to_string();
    let terms = dedupe(stored.into_iter().map(|hit| hit.term).collect());

    let response = ExpandResponse {
        kind: "-".to_string(),
        category,
        terms,
    };

    (StatusCode::OK, Json(response)).into_response()
}
