//! Auth-specific error types.

/// Errors that can occur during authentication.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AuthError {
    /// No Authorization header or bearer token present.
    #[error("missing authentication token")]
    MissingToken,

    /// The provider did not recognise the token.
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// The provider answered with something we could not read.
    #[error("invalid token info: {0}")]
    InvalidFormat(String),

    /// Token has expired.
    #[error("token has expired")]
    Expired,

    /// Token audience doesn't match configured client ID.
    #[error("invalid audience")]
    InvalidAudience,

    /// Token domain doesn't match configured domain.
    #[error("invalid domain: got '{domain}', expected '{expected}'")]
    InvalidDomain { domain: String, expected: String },

    /// Token carries no email, or an unverified one.
    #[error("token missing verified email")]
    MissingEmail,

    /// The identity provider could not be reached.
    #[error("token validation request failed: {0}")]
    ProviderUnavailable(String),
}

impl AuthError {
    /// Whether this error should result in a 401 (vs. a 500).
    pub fn is_client_error(&self) -> bool {
        !matches!(self, AuthError::ProviderUnavailable(_))
    }
}
