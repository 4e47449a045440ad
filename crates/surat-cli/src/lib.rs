//! # surat-cli
//!
//! Command-line entry point for Surat.
//!
//! - `surat serve`: run the HTTP API
//! - `surat config {path,get,set,init,export}`: inspect and edit configuration

#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config_handlers;
pub mod logging;

pub use cli::{Cli, Command, ConfigAction};
