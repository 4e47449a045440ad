//! Error types for surat-google

use thiserror::Error;

/// Result type alias for surat-google operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to Google APIs
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Domain error from surat-core (status-mapped remote failures included)
    #[error(transparent)]
    Core(#[from] surat_core::Error),

    /// Transport-level HTTP failure: connect, timeout, body read
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Core(e) => e.code(),
            Error::Http(e) if e.is_timeout() => "TIMEOUT",
            Error::Http(_) => "HTTP",
        }
    }

    /// The domain error, if this is one.
    pub fn as_core(&self) -> Option<&surat_core::Error> {
        match self {
            Error::Core(e) => Some(e),
            Error::Http(_) => None,
        }
    }

    pub fn is_access_denied(&self) -> bool {
        self.as_core().is_some_and(surat_core::Error::is_access_denied)
    }

    pub fn is_not_authenticated(&self) -> bool {
        matches!(self.as_core(), Some(surat_core::Error::NotAuthenticated))
    }
}
