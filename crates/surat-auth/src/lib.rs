//! Bearer-token authentication primitives for Surat.
//!
//! Provides:
//! - [`AuthenticatedUser`]: identity and access token from a validated bearer token
//! - [`TokenValidator`]: trait for async token validation, implemented per provider
//! - [`AuthLayer`] / [`AuthService`]: Tower middleware parameterised over `TokenValidator`
//! - [`AuthConfig`]: configuration for the auth layer
//! - [`AuthError`]: auth-specific error types

#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod error;
mod middleware;
mod user;

pub use error::AuthError;
pub use middleware::{AuthLayer, AuthService, bearer_token};
pub use user::{AuthenticatedUser, user_from_parts};

/// Configuration for the auth middleware.
#[derive(Clone, Debug, Default)]
pub struct AuthConfig {
    /// Whether authentication is enabled. When false, all requests pass through.
    pub enabled: bool,
    /// Expected audience (OAuth client ID). Empty accepts any.
    pub audience: String,
    /// Allowed email domain. Empty string means any domain.
    pub domain: String,
}

/// Trait for validating tokens and extracting user identity.
///
/// The middleware calls `validate()` with the bearer token and stores the
/// returned user in request extensions.
pub trait TokenValidator: Send + Sync + 'static {
    /// Validate a token and return the authenticated user.
    fn validate(
        &self,
        token: &str,
        config: &AuthConfig,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<AuthenticatedUser, AuthError>> + Send + '_>,
    >;
}
