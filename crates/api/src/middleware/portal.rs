//! Partner portal login.
//!
//! The portal has no sessions. Each request carries the party's username and
//! access code in headers, checked against the ledger's stored credentials.

use axum::{extract::FromRequestParts, http::request::Parts};
use bahi_core::ledger::PortalCredentials;

use crate::error::ApiError;

/// Header carrying the portal username.
pub const PORTAL_USER_HEADER: &str = "x-portal-user";

/// Header carrying the portal access code.
pub const PORTAL_CODE_HEADER: &str = "x-portal-code";

/// Credentials presented by a portal caller.
#[derive(Debug, Clone)]
pub struct PortalLogin {
    username: String,
    access_code: String,
}

impl PortalLogin {
    /// Creates a login from presented values.
    pub fn new(username: impl Into<String>, access_code: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            access_code: access_code.into(),
        }
    }

    /// Username case is ignored; the access code must match exactly.
    pub fn matches(&self, stored: &PortalCredentials) -> bool {
        self.username.eq_ignore_ascii_case(stored.username.trim())
            && self.access_code == stored.access_code
    }
}

fn header<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

impl<S> FromRequestParts<S> for PortalLogin
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match (
            header(parts, PORTAL_USER_HEADER),
            header(parts, PORTAL_CODE_HEADER),
        ) {
            (Some(username), Some(access_code)) => Ok(Self::new(username, access_code)),
            _ => Err(ApiError::unauthorized(format!(
                "{PORTAL_USER_HEADER} and {PORTAL_CODE_HEADER} headers are required"
            ))),
        }
    }
}
