//! Shared HTTP client for the Google REST APIs.
//!
//! Every call carries the session's bearer token and a bounded timeout.
//! Response statuses map onto the domain taxonomy: 401 is
//! `NotAuthenticated`, 403 is `AccessDenied`, anything else unsuccessful is
//! `FetchFailed` carrying the response body.

use std::time::Duration;

use reqwest::{Response, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use surat_core::config::GoogleSettings;

use crate::error::Result;

/// Longest slice of an error body kept in messages.
const MAX_ERROR_BODY: usize = 512;

/// Which Google API a request targets.
#[derive(Debug, Clone, Copy)]
pub enum Api {
    Sheets,
    Docs,
    Drive,
}

/// reqwest client bound to configurable Google endpoints.
#[derive(Debug, Clone)]
pub struct GoogleClient {
    http: reqwest::Client,
    settings: GoogleSettings,
}

impl GoogleClient {
    pub fn new(settings: &GoogleSettings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs.max(1)))
            .build()?;
        Ok(Self {
            http,
            settings: settings.clone(),
        })
    }

    pub fn settings(&self) -> &GoogleSettings {
        &self.settings
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Build `<base>/<segments...>`, percent-encoding each segment.
    pub fn url(&self, api: Api, segments: &[&str]) -> Result<Url> {
        let base = match api {
            Api::Sheets => &self.settings.sheets_base_url,
            Api::Docs => &self.settings.docs_base_url,
            Api::Drive => &self.settings.drive_base_url,
        };
        join_url(base, segments)
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        token: &str,
        resource: &str,
    ) -> Result<T> {
        let response = self.http.get(url).bearer_auth(token).send().await?;
        let response = check_status(response, resource).await?;
        Ok(response.json().await?)
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: Url,
        token: &str,
        body: &B,
        resource: &str,
    ) -> Result<T> {
        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        let response = check_status(response, resource).await?;
        Ok(response.json().await?)
    }

    pub async fn get_bytes(&self, url: Url, token: &str, resource: &str) -> Result<Vec<u8>> {
        let response = self.http.get(url).bearer_auth(token).send().await?;
        let response = check_status(response, resource).await?;
        Ok(response.bytes().await?.to_vec())
    }

    pub async fn delete(&self, url: Url, token: &str, resource: &str) -> Result<()> {
        let response = self.http.delete(url).bearer_auth(token).send().await?;
        check_status(response, resource).await?;
        Ok(())
    }

    /// GET that only cares whether the caller may read the resource.
    pub async fn probe(&self, url: Url, token: &str, resource: &str) -> Result<()> {
        let response = self.http.get(url).bearer_auth(token).send().await?;
        check_status(response, resource).await?;
        Ok(())
    }
}

/// Join path segments onto a base URL.
pub fn join_url(base: &str, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(base)
        .map_err(|e| surat_core::Error::config(format!("invalid base URL '{base}': {e}")))?;
    url.path_segments_mut()
        .map_err(|_| surat_core::Error::config(format!("base URL '{base}' cannot take a path")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Map a non-success response onto the domain error taxonomy.
pub async fn check_status(response: Response, resource: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::debug!(%status, resource, "Google API call failed");

    let err = match status {
        StatusCode::UNAUTHORIZED => surat_core::Error::NotAuthenticated,
        StatusCode::FORBIDDEN => surat_core::Error::access_denied(resource),
        _ => surat_core::Error::fetch_failed(format!(
            "{resource}: HTTP {status}: {}",
            truncate(body.trim(), MAX_ERROR_BODY)
        )),
    };
    Err(err.into())
}

fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
