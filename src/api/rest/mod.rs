//! REST handlers for the terminology endpoints
//!
//! - `POST /api/suggest` - completions as the user types
//! - `POST /api/expand` - flat synonym list for a concept code
//! - `POST /api/expand/grouped` - grouped synonyms with vote signals

pub mod expand;
pub mod expand_grouped;
pub mod suggest;

use serde::Serialize;

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "BAD_REQUEST".to_string(),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "UPSTREAM_ERROR".to_string(),
        }
    }
}
