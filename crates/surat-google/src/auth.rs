//! Access-token validation against Google's tokeninfo endpoint.
//!
//! Bearer tokens are opaque OAuth access tokens, so validation is a remote
//! lookup rather than a signature check. The endpoint reports numbers as
//! strings (`"exp": "1760000000"`), so fields are read leniently.

use std::future::Future;
use std::pin::Pin;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use reqwest::{StatusCode, Url};
use serde_json::Value;
use surat_auth::{AuthConfig, AuthError, AuthenticatedUser, TokenValidator};
use surat_core::config::GoogleSettings;

/// `TokenValidator` backed by `oauth2.googleapis.com/tokeninfo`.
#[derive(Debug, Clone)]
pub struct GoogleTokenValidator {
    http: reqwest::Client,
    tokeninfo_url: String,
}

impl GoogleTokenValidator {
    pub fn new(settings: &GoogleSettings) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs.max(1)))
            .build()?;
        Ok(Self {
            http,
            tokeninfo_url: settings.tokeninfo_url.clone(),
        })
    }

    async fn lookup(&self, token: &str) -> Result<Value, AuthError> {
        let url = Url::parse(&self.tokeninfo_url)
            .map_err(|e| AuthError::ProviderUnavailable(format!("invalid tokeninfo URL: {e}")))?;

        // Form body keeps the token out of URLs and access logs.
        let response = self
            .http
            .post(url)
            .form(&[("access_token", token)])
            .send()
            .await
            .map_err(|e| AuthError::ProviderUnavailable(e.to_string()))?;

        let status = response.status();
        if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
            return Err(AuthError::ProviderUnavailable(format!("tokeninfo returned {status}")));
        }
        if !status.is_success() {
            return Err(AuthError::InvalidToken(format!("tokeninfo returned {status}")));
        }

        response
            .json()
            .await
            .map_err(|e| AuthError::InvalidFormat(e.to_string()))
    }
}

impl TokenValidator for GoogleTokenValidator {
    fn validate(
        &self,
        token: &str,
        config: &AuthConfig,
    ) -> Pin<Box<dyn Future<Output = Result<AuthenticatedUser, AuthError>> + Send + '_>> {
        let token = token.to_string();
        let config = config.clone();
        Box::pin(async move {
            let info = self.lookup(&token).await?;
            check_token_info(&info, &token, &config, unix_now())
        })
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// String field that may arrive as a JSON string, number, or bool.
fn field(info: &Value, key: &str) -> Option<String> {
    match info.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Apply expiry, audience, email, and domain checks to a tokeninfo body.
pub fn check_token_info(
    info: &Value,
    token: &str,
    config: &AuthConfig,
    now: u64,
) -> Result<AuthenticatedUser, AuthError> {
    let expires_at: u64 = field(info, "exp")
        .ok_or_else(|| AuthError::InvalidFormat("missing exp".to_string()))?
        .parse()
        .map_err(|_| AuthError::InvalidFormat("exp is not a number".to_string()))?;
    if expires_at <= now {
        return Err(AuthError::Expired);
    }

    if !config.audience.is_empty() {
        let matches = ["aud", "azp"]
            .iter()
            .any(|k| field(info, k).as_deref() == Some(config.audience.as_str()));
        if !matches {
            return Err(AuthError::InvalidAudience);
        }
    }

    let email = field(info, "email")
        .filter(|e| !e.is_empty())
        .ok_or(AuthError::MissingEmail)?;
    if field(info, "email_verified").as_deref() == Some("false") {
        return Err(AuthError::MissingEmail);
    }

    if !config.domain.is_empty() {
        let domain = email.rsplit_once('@').map(|(_, d)| d).unwrap_or_default();
        if !domain.eq_ignore_ascii_case(&config.domain) {
            return Err(AuthError::InvalidDomain {
                domain: domain.to_string(),
                expected: config.domain.clone(),
            });
        }
    }

    Ok(AuthenticatedUser {
        email,
        subject: field(info, "sub").unwrap_or_default(),
        access_token: token.to_string(),
        expires_at,
    })
}
