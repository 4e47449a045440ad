//! Structured document model and HTML conversion for Surat templates.
//!
//! Letter templates live as Google Docs. This crate turns the Docs API
//! document resource into the two forms the service needs: plain text (for
//! placeholder discovery) and semantic HTML (for previews).
//!
//! # Modules
//!
//! - [`docs`]: Document model, HTML conversion, text extraction
//! - [`template`]: [`RenderedTemplate`], the normalized result of a fetch
//!
//! # Example
//!
//! ```rust
//! use surat_content::RenderedTemplate;
//!
//! let json = r#"{"title": "Surat", "body": {"content": [
//!     {"paragraph": {
//!         "elements": [{"textRun": {"content": "Total", "textStyle": {"bold": true}}}],
//!         "paragraphStyle": {"alignment": "CENTER"}
//!     }}
//! ]}}"#;
//!
//! let template = RenderedTemplate::from_json("doc-1", json).unwrap();
//! assert_eq!(template.html, r#"<p class="mb-4 text-center"><strong>Total</strong></p>"#);
//! ```

#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod docs;
pub mod template;

pub use docs::{Document, plain_text, to_html};
pub use template::{RenderedTemplate, UNTITLED};
