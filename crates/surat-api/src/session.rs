//! Per-request session extraction.
//!
//! With authentication enabled, the auth layer has already validated the
//! bearer token and stored an [`AuthenticatedUser`]; the session inherits its
//! token and expiry. In development mode (auth disabled) a raw bearer token
//! is accepted with a one-hour expiry so the Google calls still carry it.

use axum::extract::FromRequestParts;
use chrono::{DateTime, Duration, Utc};
use http::request::Parts;
use surat_auth::{AuthenticatedUser, bearer_token, user_from_parts};
use surat_core::{SessionContext, UserProfile};

use crate::error::ApiError;

/// Lifetime assumed for unvalidated development tokens.
const DEV_TOKEN_TTL_SECS: i64 = 3600;

/// Extractor yielding the request's [`SessionContext`].
#[derive(Debug, Clone)]
pub struct Session(pub SessionContext);

impl<S: Send + Sync> FromRequestParts<S> for Session {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = user_from_parts(parts) {
            return Ok(Session(from_user(user)));
        }
        match bearer_token(&parts.headers) {
            Some(token) => {
                let expires_at = Utc::now() + Duration::seconds(DEV_TOKEN_TTL_SECS);
                Ok(Session(SessionContext::new(token, expires_at, UserProfile::default())))
            }
            None => Err(surat_core::Error::NotAuthenticated.into()),
        }
    }
}

fn from_user(user: &AuthenticatedUser) -> SessionContext {
    let expires_at = i64::try_from(user.expires_at)
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .unwrap_or_default();
    let profile = UserProfile {
        sub: user.subject.clone(),
        email: user.email.clone(),
        email_verified: true,
        ..Default::default()
    };
    SessionContext::new(user.access_token.clone(), expires_at, profile)
}
