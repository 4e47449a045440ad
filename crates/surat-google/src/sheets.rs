//! Google Sheets: residents and the letter-type catalog.

use serde::Deserialize;
use serde_json::Value;
use surat_core::letter_type::letter_types_from_rows;
use surat_core::resident::residents_from_rows;
use surat_core::{LetterType, Resident};

use crate::client::{Api, GoogleClient};
use crate::error::Result;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ValueRange {
    values: Vec<Vec<Value>>,
}

/// Render a cell as the string the sheet displays.
fn cell_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl GoogleClient {
    /// Read a values range as rows of strings.
    pub async fn fetch_values(
        &self,
        token: &str,
        spreadsheet_id: &str,
        range: &str,
    ) -> Result<Vec<Vec<String>>> {
        let url = self.url(
            Api::Sheets,
            &["spreadsheets", spreadsheet_id, "values", range],
        )?;
        let resource = format!("spreadsheet {spreadsheet_id}");
        let body: ValueRange = self.get_json(url, token, &resource).await?;
        tracing::debug!(spreadsheet_id, range, rows = body.values.len(), "Fetched sheet values");
        Ok(body
            .values
            .iter()
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect())
    }

    /// Residents from the registry range; the first row is a header.
    pub async fn fetch_residents(
        &self,
        token: &str,
        spreadsheet_id: &str,
        range: &str,
    ) -> Result<Vec<Resident>> {
        let rows = self.fetch_values(token, spreadsheet_id, range).await?;
        Ok(residents_from_rows(&rows))
    }

    /// Letter types from the catalog range (no header).
    pub async fn fetch_letter_types(
        &self,
        token: &str,
        spreadsheet_id: &str,
        range: &str,
    ) -> Result<Vec<LetterType>> {
        let rows = self.fetch_values(token, spreadsheet_id, range).await?;
        Ok(letter_types_from_rows(&rows))
    }

    /// Whether the spreadsheet metadata is readable with this token.
    pub async fn spreadsheet_accessible(&self, token: &str, spreadsheet_id: &str) -> Result<()> {
        let mut url = self.url(Api::Sheets, &["spreadsheets", spreadsheet_id])?;
        url.query_pairs_mut().append_pair("fields", "spreadsheetId");
        self.probe(url, token, &format!("spreadsheet {spreadsheet_id}"))
            .await
    }
}
