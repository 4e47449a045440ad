//! Google Drive: copy, export, delete, and the account probe.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::{Api, GoogleClient};
use crate::error::Result;

/// The file resource returned by a copy.
#[derive(Debug, Clone, Deserialize)]
pub struct DriveFile {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Serialize)]
struct CopyRequest<'a> {
    name: &'a str,
}

impl GoogleClient {
    /// Copy a file under a new name.
    pub async fn copy_file(&self, token: &str, file_id: &str, name: &str) -> Result<DriveFile> {
        let url = self.url(Api::Drive, &["files", file_id, "copy"])?;
        self.post_json(
            url,
            token,
            &CopyRequest { name },
            &format!("template {file_id}"),
        )
        .await
    }

    /// Export a Docs file to the given MIME type.
    pub async fn export_file(&self, token: &str, file_id: &str, mime_type: &str) -> Result<Vec<u8>> {
        let mut url = self.url(Api::Drive, &["files", file_id, "export"])?;
        url.query_pairs_mut().append_pair("mimeType", mime_type);
        self.get_bytes(url, token, &format!("document {file_id}"))
            .await
    }

    pub async fn delete_file(&self, token: &str, file_id: &str) -> Result<()> {
        let url = self.url(Api::Drive, &["files", file_id])?;
        self.delete(url, token, &format!("document {file_id}")).await
    }

    /// Whether Drive answers for this account at all.
    pub async fn drive_accessible(&self, token: &str) -> Result<()> {
        let mut url = self.url(Api::Drive, &["about"])?;
        url.query_pairs_mut().append_pair("fields", "user");
        let _: Value = self.get_json(url, token, "drive").await?;
        Ok(())
    }
}
