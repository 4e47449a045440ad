//! Authenticated user identity and extraction helpers.

/// An authenticated user, extracted from a validated bearer token.
///
/// Stored in HTTP request extensions by the auth middleware. The access
/// token is kept so handlers can call Google APIs on the user's behalf.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The user's email address.
    pub email: String,
    /// The user's unique subject identifier.
    pub subject: String,
    /// The bearer token that was validated.
    pub access_token: String,
    /// Token expiry, seconds since the Unix epoch.
    pub expires_at: u64,
}

/// Extract the `AuthenticatedUser` from HTTP request `Parts`, if present.
pub fn user_from_parts(parts: &http::request::Parts) -> Option<&AuthenticatedUser> {
    parts.extensions.get::<AuthenticatedUser>()
}
