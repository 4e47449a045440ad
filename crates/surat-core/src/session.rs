//! Explicit session context and permission summary.
//!
//! A [`SessionContext`] is built per request from a validated bearer token
//! and dropped when the request ends. Expiry is checked on every use.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Profile snapshot from the identity provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub sub: String,
    pub email: String,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub family_name: Option<String>,
}

/// Token, expiry, and profile for one request.
#[derive(Debug, Clone)]
pub struct SessionContext {
    token: String,
    expires_at: DateTime<Utc>,
    profile: UserProfile,
}

impl SessionContext {
    pub fn new(token: impl Into<String>, expires_at: DateTime<Utc>, profile: UserProfile) -> Self {
        Self {
            token: token.into(),
            expires_at,
            profile,
        }
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Valid while a token is present and expiry lies after `now`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.token.is_empty() && self.expires_at > now
    }

    /// The bearer token, or [`Error::NotAuthenticated`] once expired.
    pub fn token(&self) -> Result<&str> {
        self.token_at(Utc::now())
    }

    pub fn token_at(&self, now: DateTime<Utc>) -> Result<&str> {
        if self.is_valid_at(now) {
            Ok(&self.token)
        } else {
            Err(Error::NotAuthenticated)
        }
    }
}

/// Coarse access classification for the signed-in account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    None,
    Partial,
    Full,
}

/// Result of probing the remote services with the session token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permissions {
    pub has_spreadsheet_access: bool,
    pub has_docs_access: bool,
    pub can_create_documents: bool,
}

impl Permissions {
    pub fn new(has_spreadsheet_access: bool, has_docs_access: bool) -> Self {
        Self {
            has_spreadsheet_access,
            has_docs_access,
            can_create_documents: has_docs_access,
        }
    }

    pub fn access_level(&self) -> AccessLevel {
        match (self.has_spreadsheet_access, self.has_docs_access) {
            (true, true) => AccessLevel::Full,
            (false, false) => AccessLevel::None,
            _ => AccessLevel::Partial,
        }
    }

    /// Guidance shown to the operator, `None` when access is complete.
    pub fn guidance(&self) -> Option<&'static str> {
        match self.access_level() {
            AccessLevel::Full => None,
            AccessLevel::None => Some(
                "Akun tidak memiliki akses ke Google Sheets maupun Google Docs. \
                 Hubungi administrator untuk membagikan spreadsheet dan dokumen template.",
            ),
            AccessLevel::Partial => Some(
                "Akses sebagian: beberapa fitur tidak tersedia. \
                 Pastikan spreadsheet dan dokumen template dibagikan ke akun ini.",
            ),
        }
    }
}
