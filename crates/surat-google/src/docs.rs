//! Google Docs: template fetch and remote placeholder replacement.

use serde::Serialize;
use serde_json::Value;
use surat_content::{Document, RenderedTemplate};
use surat_core::placeholder::Replacement;

use crate::client::{Api, GoogleClient};
use crate::error::Result;

#[derive(Debug, Serialize)]
struct BatchUpdate<'a> {
    requests: Vec<Request<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Request<'a> {
    replace_all_text: ReplaceAllText<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplaceAllText<'a> {
    contains_text: ContainsText<'a>,
    replace_text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ContainsText<'a> {
    text: &'a str,
    match_case: bool,
}

fn batch_update(plan: &[Replacement]) -> BatchUpdate<'_> {
    BatchUpdate {
        requests: plan
            .iter()
            .map(|r| Request {
                replace_all_text: ReplaceAllText {
                    contains_text: ContainsText {
                        text: &r.find,
                        match_case: false,
                    },
                    replace_text: &r.replace,
                },
            })
            .collect(),
    }
}

impl GoogleClient {
    /// Fetch a template document and normalize it to text and HTML.
    pub async fn fetch_template(&self, token: &str, doc_id: &str) -> Result<RenderedTemplate> {
        let url = self.url(Api::Docs, &["documents", doc_id])?;
        let document: Document = self
            .get_json(url, token, &format!("document {doc_id}"))
            .await?;
        Ok(RenderedTemplate::from_document(doc_id, &document))
    }

    /// Apply find/replace pairs to a document in one batch.
    pub async fn batch_replace(
        &self,
        token: &str,
        document_id: &str,
        plan: &[Replacement],
    ) -> Result<()> {
        if plan.is_empty() {
            return Ok(());
        }
        let segment = format!("{document_id}:batchUpdate");
        let url = self.url(Api::Docs, &["documents", &segment])?;
        let _: Value = self
            .post_json(
                url,
                token,
                &batch_update(plan),
                &format!("document {document_id}"),
            )
            .await?;
        tracing::debug!(document_id, requests = plan.len(), "Replaced placeholders");
        Ok(())
    }
}
