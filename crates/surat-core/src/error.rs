//! Error types for surat-core.
//!
//! The taxonomy mirrors how failures are reported to the operator: a missing
//! session, a rejected grant on a remote document, a generic remote failure,
//! an unknown letter type, and a best-effort cleanup that did not go through.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for surat-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating letters.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// No valid session token is available.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The remote service rejected the request because of a missing grant.
    #[error("access denied to {resource}")]
    AccessDenied {
        /// The remote resource that refused access.
        resource: String,
    },

    /// A remote call returned a non-success response.
    #[error("fetch failed: {message}")]
    FetchFailed {
        /// Underlying message, suitable for display.
        message: String,
    },

    /// The requested letter type has no catalog entry.
    #[error("letter type not found: {id}")]
    TemplateNotFound {
        /// Letter type identifier.
        id: String,
    },

    /// No resident with the given NIK exists in the registry.
    #[error("resident not found: {nik}")]
    ResidentNotFound {
        /// National identity number that was looked up.
        nik: String,
    },

    /// Deleting a processed document failed. Logged, never shown to the user.
    #[error("cleanup failed for document {document_id}: {message}")]
    CleanupFailed {
        /// Identifier of the document that could not be deleted.
        document_id: String,
        /// Underlying message.
        message: String,
    },

    /// Input failed validation.
    #[error("Validation error: {message}")]
    Validation {
        /// What went wrong.
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic.
        message: String,
    },

    /// A remote payload could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error tied to a path.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Source error.
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Creates an access-denied error for a resource.
    pub fn access_denied<S: Into<String>>(resource: S) -> Self {
        Error::AccessDenied {
            resource: resource.into(),
        }
    }

    /// Creates a generic fetch failure.
    pub fn fetch_failed<S: Into<String>>(message: S) -> Self {
        Error::FetchFailed {
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::Validation {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Wraps an I/O error with the path it concerns.
    pub fn io_with_path(source: std::io::Error, path: &Path) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Error::NotAuthenticated => "NOT_AUTHENTICATED",
            Error::AccessDenied { .. } => "ACCESS_DENIED",
            Error::FetchFailed { .. } => "FETCH_FAILED",
            Error::TemplateNotFound { .. } => "TEMPLATE_NOT_FOUND",
            Error::ResidentNotFound { .. } => "RESIDENT_NOT_FOUND",
            Error::CleanupFailed { .. } => "CLEANUP_FAILED",
            Error::Validation { .. } => "VALIDATION",
            Error::Config { .. } => "CONFIG",
            Error::Serialization(_) => "SERIALIZATION",
            Error::Io { .. } => "IO",
        }
    }

    /// Whether the operator must grant document or sheet permissions.
    pub fn is_access_denied(&self) -> bool {
        matches!(self, Error::AccessDenied { .. })
    }

    /// Whether the message may be shown to the user as is.
    ///
    /// Cleanup failures are only logged. Configuration, decoding and I/O
    /// failures describe server internals.
    pub fn is_user_visible(&self) -> bool {
        !matches!(
            self,
            Error::CleanupFailed { .. }
                | Error::Config { .. }
                | Error::Serialization(_)
                | Error::Io { .. }
        )
    }
}
