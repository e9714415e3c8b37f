//! JWT authentication extractor
//!
//! `AuthUser` is the first stage of the access gate: it requires a valid
//! bearer token and attaches the verified identity to the request before any
//! handler logic runs. Role checks happen afterwards in [`crate::policy`].

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::jwt::Claims;
use crate::state::HasServices;

/// Verified caller identity extracted from the bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    /// Email from the verified claims; trusted as the caller's identity for
    /// the remainder of request handling
    pub email: String,
    /// Issued at (Unix timestamp)
    pub issued_at: i64,
    /// Expiration (Unix timestamp)
    pub expires_at: i64,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            email: claims.email,
            issued_at: claims.iat,
            expires_at: claims.exp,
        }
    }
}

/// Authentication errors. Variants exist for logging; the response body is
/// deliberately uniform so callers cannot tell which check failed.
#[derive(Debug, Clone)]
pub enum AuthError {
    /// No Authorization header present
    MissingToken,
    /// Invalid Authorization header format
    InvalidHeader(String),
    /// Token validation failed (bad signature, malformed, expired)
    InvalidToken(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("Authentication rejected: {:?}", self);
        let body = serde_json::json!({
            "error": "unauthorized",
            "message": "Unauthorized access"
        });
        (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response()
    }
}

/// Extract and validate Bearer token from Authorization header
fn extract_bearer_token(headers: &axum::http::HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidHeader("Invalid header encoding".to_string()))?;

    if !auth_header.starts_with("Bearer ") {
        return Err(AuthError::InvalidHeader(
            "Authorization header must use Bearer scheme".to_string(),
        ));
    }

    Ok(&auth_header[7..])
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: HasServices + Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers)?;

        let claims = state
            .jwt_manager()
            .verify(token)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        Ok(AuthUser::from(claims))
    }
}
