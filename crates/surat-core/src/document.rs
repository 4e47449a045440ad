//! Processed-document handles and export formats.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Base URL for opening a document in the editor.
pub const DOCUMENT_URL_BASE: &str = "https://docs.google.com/document/d/";

/// A server-side copy of a template created for one download request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedDocumentHandle {
    pub document_id: String,
    pub title: String,
    pub url: String,
}

impl ProcessedDocumentHandle {
    pub fn new(document_id: impl Into<String>, title: impl Into<String>) -> Self {
        let document_id = document_id.into();
        let url = format!("{DOCUMENT_URL_BASE}{document_id}");
        Self {
            document_id,
            title: title.into(),
            url,
        }
    }
}

/// Download format for a processed document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Pdf,
    Docx,
}

impl ExportFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "docx" | "word" => Ok(ExportFormat::Docx),
            other => Err(Error::validation(format!("unsupported export format: {other}"))),
        }
    }
}

/// Exported document bytes ready to hand to a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub file_name: String,
}

/// Base download name: `<title>_<resident name>`, whitespace runs to `_`.
pub fn download_file_name(title: &str, resident_name: &str) -> String {
    let raw = format!("{title}_{resident_name}");
    raw.split_whitespace().collect::<Vec<_>>().join("_")
}
