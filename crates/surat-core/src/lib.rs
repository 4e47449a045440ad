//! Surat Core: domain types, variable mapping, and placeholder substitution.
//!
//! This crate holds everything about letter generation that does not talk to
//! the network. It has no internal Surat dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error taxonomy and Result alias
//! - [`resident`]: Resident records, search, and pagination
//! - [`letter_type`]: Letter-type catalog entries and the built-in fallback catalog
//! - [`variables`]: The variable mapper and its alias table
//! - [`placeholder`]: `{{key}}` substitution and extraction
//! - [`forms`]: Declarative field descriptors for catalog-driven forms
//! - [`session`]: Explicit session context and permission summary
//! - [`document`]: Processed-document handles and export formats
//! - [`dates`]: Indonesian date formatting
//! - [`config`]: Service configuration

#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod config;
pub mod dates;
pub mod document;
pub mod error;
pub mod forms;
pub mod letter_type;
pub mod placeholder;
pub mod resident;
pub mod session;
pub mod variables;

// Re-export key types at crate root for convenience
pub use config::SuratConfig;
pub use document::{ExportFormat, ExportedFile, ProcessedDocumentHandle};
pub use error::{Error, Result};
pub use forms::{FieldDescriptor, FieldKind};
pub use letter_type::LetterType;
pub use placeholder::{extract_placeholders, substitute};
pub use resident::Resident;
pub use session::{AccessLevel, Permissions, SessionContext, UserProfile};
pub use variables::{Organization, VariableMap, build_variables};
