//! HTTP Basic credentials extractor

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, StatusCode},
};
use base64::{engine::general_purpose::STANDARD, Engine};
use tracing::debug;

use crate::domain::AuthToken;

/// Username and token taken from `Authorization: Basic base64(username:token)`.
///
/// The pair is only parsed here; matching it against a stored user is up to
/// the controller. A missing or malformed header is answered with a bare 401.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub auth_token: AuthToken,
}

impl Credentials {
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
        Self::parse_basic(value)
    }

    /// Parse the value of an `Authorization` header
    pub fn parse_basic(value: &str) -> Option<Self> {
        let (scheme, encoded) = value.trim().split_once(' ')?;

        if !scheme.eq_ignore_ascii_case("basic") {
            return None;
        }

        let decoded = STANDARD.decode(encoded.trim()).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (username, token) = decoded.split_once(':')?;

        if username.is_empty() || token.is_empty() {
            return None;
        }

        Some(Self {
            username: username.to_string(),
            auth_token: AuthToken::new(token),
        })
    }
}

impl<S> FromRequestParts<S> for Credentials
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_headers(&parts.headers).ok_or_else(|| {
            debug!("Missing or malformed basic credentials");
            StatusCode::UNAUTHORIZED
        })
    }
}
