//! Google Docs document model and conversions.
//!
//! - [`model`]: serde types for the document resource
//! - [`html`]: block tree to semantic HTML
//! - [`text`]: plain-text extraction

pub mod html;
pub mod model;
pub mod text;

pub use html::{alignment_class, color_css, escape_text, paragraph_to_html, table_to_html, text_run_to_html, to_html};
pub use model::{Alignment, Document, StructuralElement};
pub use text::{full_text, plain_text};
