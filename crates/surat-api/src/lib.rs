//! # surat-api
//!
//! HTTP API server for Surat letter generation.
//!
//! - [`server`]: router assembly and the listener
//! - [`handlers`]: one handler per route
//! - [`session`]: per-request [`surat_core::SessionContext`] extraction
//! - [`error`]: error taxonomy to HTTP status mapping

#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod handlers;
pub mod server;
pub mod session;
pub mod state;

pub use error::{ApiError, Error, Result};
pub use server::{Server, router};
pub use session::Session;
pub use state::AppState;
