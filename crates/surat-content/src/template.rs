//! Rendered templates.

use serde::{Deserialize, Serialize};
use surat_core::{Result, VariableMap, substitute};

use crate::docs::{self, Document, escape_text};

/// Title used when the remote document has none.
pub const UNTITLED: &str = "Untitled Document";

/// A fetched template normalized into text and HTML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedTemplate {
    pub document_id: String,
    pub title: String,
    pub plain_text: String,
    pub html: String,
    /// Text of every paragraph including table cells, used to find
    /// placeholder tokens for remote replacement.
    #[serde(skip)]
    pub full_text: String,
}

impl RenderedTemplate {
    /// Normalize a parsed document fetched under `document_id`.
    pub fn from_document(document_id: &str, document: &Document) -> Self {
        let content = document.content();
        let title = document
            .title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(UNTITLED)
            .to_string();
        log::debug!(
            "Rendered template {document_id} ({} block nodes)",
            content.len()
        );
        Self {
            document_id: document_id.to_string(),
            title,
            plain_text: docs::plain_text(content),
            html: docs::to_html(content),
            full_text: docs::full_text(content),
        }
    }

    /// Parse a raw document resource and normalize it.
    pub fn from_json(document_id: &str, json: &str) -> Result<Self> {
        let document: Document = serde_json::from_str(json)?;
        Ok(Self::from_document(document_id, &document))
    }

    /// HTML with every placeholder replaced by its escaped value.
    ///
    /// Values are escaped the same way template text is, so data from the
    /// registry or the form never reaches the page as markup.
    pub fn render_html(&self, variables: &VariableMap) -> String {
        let escaped: VariableMap = variables
            .iter()
            .map(|(key, value)| (key, escape_text(value)))
            .collect();
        substitute(&self.html, &escaped)
    }
}
