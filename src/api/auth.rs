//! Bearer-token user context
//!
//! Vote lookups are scoped to the calling user's id and environment, which
//! arrive as claims in a bearer token issued elsewhere. Decoding is
//! lenient: a missing or invalid token just means no user context, since
//! vote signals are supplementary.

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Claims carried in the access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,
    /// Deployment environment the user belongs to
    #[serde(default = "default_env")]
    pub env: String,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

fn default_env() -> String {
    "production".to_string()
}

/// Identity of the calling user, as far as vote lookups need it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContext {
    pub id: String,
    pub env: String,
}

/// Decode the caller's identity from the `Authorization` header.
///
/// Returns `None` when the header is absent, not a bearer token, or the
/// token fails validation.
pub fn decode_user(headers: &HeaderMap, secret: &str) -> Option<UserContext> {
    let header = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?;

    let key = DecodingKey::from_secret(secret.as_bytes());
    match decode::<Claims>(token, &key, &Validation::default()) {
        Ok(data) => Some(UserContext {
            id: data.claims.sub,
            env: data.claims.env,
        }),
        Err(error) => {
            tracing::debug!(%error, "ignoring invalid bearer token");
            None
        }
    }
}
