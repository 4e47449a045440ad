//! Google Sheets, Docs, and Drive integration for Surat.
//!
//! - [`client`]: shared reqwest client and status mapping
//! - [`sheets`]: residents and the letter-type catalog
//! - [`docs`]: template fetch and remote placeholder replacement
//! - [`drive`]: copy, export, delete
//! - [`materializer`]: processed-document lifecycle
//! - [`permissions`]: access probe and profile lookup
//! - [`auth`]: [`surat_auth::TokenValidator`] backed by tokeninfo
//! - [`service`]: the letter operations exposed over HTTP

#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod auth;
pub mod client;
pub mod docs;
pub mod drive;
pub mod error;
pub mod materializer;
pub mod permissions;
pub mod service;
pub mod sheets;

pub use auth::GoogleTokenValidator;
pub use client::{Api, GoogleClient};
pub use error::{Error, Result};
pub use materializer::Materializer;
pub use service::{
    DEFAULT_PER_PAGE, LetterForm, LetterPreview, LetterRequest, LetterService, SessionSummary,
};
