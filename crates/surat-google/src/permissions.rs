//! Permission probe for the signed-in account.

use surat_core::{Permissions, UserProfile};

use crate::client::GoogleClient;
use crate::error::{Error, Result};

impl GoogleClient {
    /// Probe spreadsheet and Drive access concurrently.
    ///
    /// A rejected token fails the whole probe; any other failure only marks
    /// that capability as missing.
    pub async fn check_permissions(&self, token: &str, spreadsheet_id: &str) -> Result<Permissions> {
        let (sheet, drive) = tokio::join!(
            self.spreadsheet_accessible(token, spreadsheet_id),
            self.drive_accessible(token)
        );
        let has_spreadsheet_access = granted(sheet, "spreadsheet")?;
        let has_docs_access = granted(drive, "drive")?;
        Ok(Permissions::new(has_spreadsheet_access, has_docs_access))
    }

    /// Profile of the token's owner from the userinfo endpoint.
    pub async fn fetch_profile(&self, token: &str) -> Result<UserProfile> {
        let url = reqwest::Url::parse(&self.settings().userinfo_url).map_err(|e| {
            surat_core::Error::config(format!("invalid userinfo URL: {e}"))
        })?;
        self.get_json(url, token, "userinfo").await
    }
}

fn granted(result: Result<()>, what: &str) -> Result<bool> {
    match result {
        Ok(()) => Ok(true),
        Err(e) if e.is_not_authenticated() => Err(e),
        Err(e) => {
            tracing::debug!(error = %e, what, "Access probe failed");
            Ok(false)
        }
    }
}
