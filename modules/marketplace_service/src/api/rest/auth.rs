//! Session extraction for REST handlers
//!
//! The token is read from `Authorization: Bearer <token>` or, failing that,
//! from the `session-token` cookie. Resolution is delegated to the domain
//! service so every transport verifies tokens the same way.

use super::error::Problem;
use crate::contract::Session;
use crate::domain::Service;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, StatusCode},
};
use std::sync::Arc;

const SESSION_COOKIES: [&str; 2] = ["session-token", "__Secure-session-token"];

/// The caller's session, if the request carried a valid one
#[derive(Debug, Clone)]
pub struct MaybeSession(pub Option<Session>);

impl<S> FromRequestParts<S> for MaybeSession
where
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let service = parts.extensions.get::<Arc<Service>>().cloned().ok_or_else(|| {
            tracing::error!(component = "auth", "Service extension missing from router");
            Problem::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
                .with_detail("An unexpected error occurred")
        })?;

        let token = session_token(&parts.headers);
        Ok(MaybeSession(service.get_session(token.as_deref())))
    }
}

/// Pull the raw session token out of request headers
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    bearer_token(headers).or_else(|| cookie_token(headers))
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

fn cookie_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| SESSION_COOKIES.contains(name) && !value.is_empty())
        .map(|(_, value)| value.to_string())
}
