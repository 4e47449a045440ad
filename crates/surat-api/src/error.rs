//! Error types for surat-api

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde_json::json;
use thiserror::Error;

/// Result type alias for surat-api operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while starting or running the server
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from surat-core
    #[error("Core error: {0}")]
    Core(#[from] surat_core::Error),

    /// Error from surat-google
    #[error("Google error: {0}")]
    Google(#[from] surat_google::Error),

    /// Could not bind the listener
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The server loop exited with an error
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// A failed request, rendered as `{"error": {"category", "code", "message"}}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub category: &'static str,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, category: &'static str, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            category,
            code,
            message: message.into(),
        }
    }
}

impl From<surat_core::Error> for ApiError {
    fn from(err: surat_core::Error) -> Self {
        use surat_core::Error as E;
        let (status, category) = match &err {
            E::NotAuthenticated => (StatusCode::UNAUTHORIZED, "authentication"),
            E::AccessDenied { .. } => (StatusCode::FORBIDDEN, "access_denied"),
            E::TemplateNotFound { .. } | E::ResidentNotFound { .. } => {
                (StatusCode::NOT_FOUND, "not_found")
            }
            E::Validation { .. } => (StatusCode::BAD_REQUEST, "validation"),
            E::FetchFailed { .. } => (StatusCode::BAD_GATEWAY, "upstream"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        };
        let message = if err.is_user_visible() {
            err.to_string()
        } else {
            tracing::error!(code = err.code(), "{err}");
            "internal server error".to_string()
        };
        Self::new(status, category, err.code(), message)
    }
}

impl From<surat_google::Error> for ApiError {
    fn from(err: surat_google::Error) -> Self {
        match err {
            surat_google::Error::Core(core) => core.into(),
            other => {
                let status = if other.code() == "TIMEOUT" {
                    StatusCode::GATEWAY_TIMEOUT
                } else {
                    StatusCode::BAD_GATEWAY
                };
                Self::new(status, "upstream", other.code(), other.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(code = self.code, "{}", self.message);
        } else {
            tracing::debug!(code = self.code, "{}", self.message);
        }
        let body = json!({
            "error": {
                "category": self.category,
                "code": self.code,
                "message": self.message,
            }
        });
        let mut response = (self.status, Json(body)).into_response();
        if self.status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                http::header::WWW_AUTHENTICATE,
                http::HeaderValue::from_static("Bearer"),
            );
        }
        response
    }
}
