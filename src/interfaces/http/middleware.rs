//! Authentication middleware for Axum
//!
//! Tokens are read from `X-Api-Token` or `Authorization: Bearer <token>`.
//! The resolved user is stored in request extensions as [`AuthenticatedUser`].

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use super::common::ApiError;
use crate::application::IdentityService;
use crate::domain::User;

/// Header carrying the raw token
pub const API_TOKEN_HEADER: &str = "x-api-token";

#[derive(Clone)]
pub struct AuthState {
    pub identity: Arc<IdentityService>,
}

/// The caller, re-loaded from the user store after token verification.
///
/// Extract in handlers: `Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>`
#[derive(Clone, Debug)]
pub struct AuthenticatedUser(pub User);

fn extract_token(headers: &HeaderMap) -> Option<&str> {
    if let Some(token) = headers.get(API_TOKEN_HEADER).and_then(|h| h.to_str().ok()) {
        let token = token.trim();
        if !token.is_empty() {
            return Some(token);
        }
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Rejects requests without a valid token (401).
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(token) = extract_token(request.headers()) else {
        return ApiError::unauthorized("missing authentication token").into_response();
    };

    match auth_state.identity.authenticate(token).await {
        Ok(user) => {
            request.extensions_mut().insert(AuthenticatedUser(user));
            next.run(request).await
        }
        Err(e) => {
            debug!(error = %e, "Token rejected");
            ApiError::from(e).into_response()
        }
    }
}

/// Must run after [`auth_middleware`]; non-admins get a 403.
pub async fn admin_middleware(request: Request<Body>, next: Next) -> Response {
    let is_admin = request
        .extensions()
        .get::<AuthenticatedUser>()
        .is_some_and(|AuthenticatedUser(user)| user.is_admin());

    if !is_admin {
        return ApiError::forbidden("admin access required").into_response();
    }
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn token_header_takes_precedence() {
        let mut headers = HeaderMap::new();
        headers.insert(API_TOKEN_HEADER, HeaderValue::from_static("abc"));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer xyz"));
        assert_eq!(extract_token(&headers), Some("abc"));
    }

    #[test]
    fn bearer_header_is_accepted() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer xyz"));
        assert_eq!(extract_token(&headers), Some("xyz"));
    }

    #[test]
    fn other_schemes_are_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));
        assert_eq!(extract_token(&headers), None);

        headers.insert(API_TOKEN_HEADER, HeaderValue::from_static("  "));
        assert_eq!(extract_token(&headers), None);
    }
}
