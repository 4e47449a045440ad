//! Document materializer: copy, fill, export, dispose.
//!
//! A processed document lives for one download request. `create` copies the
//! template and fills it from the same resolved variable map the preview
//! used, `export` pulls bytes in the requested format, and `dispose` deletes
//! the copy without ever failing the caller.

use chrono::NaiveDate;
use surat_core::dates;
use surat_core::placeholder::replacement_plan;
use surat_core::{Error as CoreError, ExportFormat, ExportedFile, ProcessedDocumentHandle, VariableMap};

use crate::client::GoogleClient;
use crate::error::Result;

/// Remote-document half of letter generation.
#[derive(Debug, Clone)]
pub struct Materializer {
    client: GoogleClient,
}

impl Materializer {
    pub fn new(client: GoogleClient) -> Self {
        Self { client }
    }

    /// Copy `template_id` and replace every placeholder in the copy.
    ///
    /// `template_text` is the template's plain text; its raw tokens join the
    /// replacement plan so spellings outside the alias table still resolve.
    /// The copy is named `<file_name> - <d/m/yyyy>`.
    #[tracing::instrument(skip(self, token, variables, template_text))]
    pub async fn create(
        &self,
        token: &str,
        template_id: &str,
        file_name: &str,
        variables: &VariableMap,
        template_text: &str,
        date: NaiveDate,
    ) -> Result<ProcessedDocumentHandle> {
        let name = copy_name(file_name, date);
        let copy = self.client.copy_file(token, template_id, &name).await?;
        tracing::info!(document_id = %copy.id, "Created document copy");

        let plan = replacement_plan(variables, template_text);
        if let Err(e) = self.client.batch_replace(token, &copy.id, &plan).await {
            self.dispose(token, &copy.id).await;
            return Err(e);
        }

        let title = if copy.name.is_empty() { name } else { copy.name };
        Ok(ProcessedDocumentHandle::new(copy.id, title))
    }

    /// Export a processed document as `<file_name>.<ext>`.
    #[tracing::instrument(skip(self, token))]
    pub async fn export(
        &self,
        token: &str,
        document_id: &str,
        format: ExportFormat,
        file_name: &str,
    ) -> Result<ExportedFile> {
        let bytes = self
            .client
            .export_file(token, document_id, format.mime_type())
            .await?;
        tracing::debug!(size = bytes.len(), "Exported document");
        Ok(ExportedFile {
            bytes,
            content_type: format.mime_type().to_string(),
            file_name: format!("{file_name}.{}", format.extension()),
        })
    }

    /// Best-effort delete. Failures are logged and never returned.
    pub async fn dispose(&self, token: &str, document_id: &str) {
        if let Err(e) = self.client.delete_file(token, document_id).await {
            let err = CoreError::CleanupFailed {
                document_id: document_id.to_string(),
                message: e.to_string(),
            };
            tracing::warn!(error = %err, "Document cleanup failed");
        } else {
            tracing::debug!(document_id, "Deleted document copy");
        }
    }
}

/// Name of the working copy: `<file_name> - <d/m/yyyy>`.
pub fn copy_name(file_name: &str, date: NaiveDate) -> String {
    format!("{file_name} - {}", dates::format_short(date))
}
