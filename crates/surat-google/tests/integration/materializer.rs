//! Integration tests for the document materializer lifecycle.

use chrono::NaiveDate;
use serde_json::{Value, json};
use surat_core::{ExportFormat, VariableMap};
use surat_google::Materializer;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{COPY_DOC, TEMPLATE_DOC, TOKEN, TestHarness};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn variables() -> VariableMap {
    [("nama", "Siti Aminah"), ("keperluan", "Sekolah")]
        .into_iter()
        .collect()
}

async fn mount_copy(harness: &TestHarness, status: u16) {
    Mock::given(method("POST"))
        .and(path("/drive/v3/files/template-doc/copy"))
        .and(body_partial_json(json!({ "name": "Surat_Siti - 19/10/2026" })))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_json(json!({ "id": COPY_DOC, "name": "Surat_Siti - 19/10/2026" })),
        )
        .expect(1)
        .mount(&harness.server)
        .await;
}

#[tokio::test]
async fn test_create_copies_then_replaces() {
    let harness = TestHarness::start().await;
    mount_copy(&harness, 200).await;
    Mock::given(method("POST"))
        .and(path("/docs/v1/documents/copy-doc:batchUpdate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "replies": [] })))
        .expect(1)
        .mount(&harness.server)
        .await;

    let materializer = Materializer::new(harness.client());
    let handle = materializer
        .create(TOKEN, TEMPLATE_DOC, "Surat_Siti", &variables(), "{{nama}}", date())
        .await
        .unwrap();

    assert_eq!(handle.document_id, COPY_DOC);
    assert_eq!(handle.title, "Surat_Siti - 19/10/2026");
    assert_eq!(handle.url, "https://docs.google.com/document/d/copy-doc");

    assert_eq!(
        harness.request_log().await,
        vec![
            "POST /drive/v3/files/template-doc/copy".to_string(),
            "POST /docs/v1/documents/copy-doc:batchUpdate".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_batch_update_sends_both_spacings_case_insensitive() {
    let harness = TestHarness::start().await;
    mount_copy(&harness, 200).await;
    Mock::given(method("POST"))
        .and(path("/docs/v1/documents/copy-doc:batchUpdate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&harness.server)
        .await;

    Materializer::new(harness.client())
        .create(TOKEN, TEMPLATE_DOC, "Surat_Siti", &variables(), "", date())
        .await
        .unwrap();

    let requests = harness.server.received_requests().await.unwrap();
    let body: Value = requests[1].body_json().unwrap();
    let replacements: Vec<(String, String, bool)> = body["requests"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| {
            let op = &r["replaceAllText"];
            (
                op["containsText"]["text"].as_str().unwrap().to_string(),
                op["replaceText"].as_str().unwrap().to_string(),
                op["containsText"]["matchCase"].as_bool().unwrap(),
            )
        })
        .collect();

    assert!(replacements.contains(&("{{nama}}".into(), "Siti Aminah".into(), false)));
    assert!(replacements.contains(&("{{ nama }}".into(), "Siti Aminah".into(), false)));
    assert!(replacements.contains(&("{{pemohon}}".into(), "Siti Aminah".into(), false)));
    assert!(replacements.contains(&("{{ keperluan }}".into(), "Sekolah".into(), false)));
}

#[tokio::test]
async fn test_copy_forbidden_stops_before_batch_update() {
    let harness = TestHarness::start().await;
    mount_copy(&harness, 403).await;
    Mock::given(method("POST"))
        .and(path("/docs/v1/documents/copy-doc:batchUpdate"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&harness.server)
        .await;

    let err = Materializer::new(harness.client())
        .create(TOKEN, TEMPLATE_DOC, "Surat_Siti", &variables(), "", date())
        .await
        .unwrap_err();

    assert!(err.is_access_denied());
}

#[tokio::test]
async fn test_failed_replace_disposes_copy() {
    let harness = TestHarness::start().await;
    mount_copy(&harness, 200).await;
    Mock::given(method("POST"))
        .and(path("/docs/v1/documents/copy-doc:batchUpdate"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
        .mount(&harness.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/drive/v3/files/copy-doc"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&harness.server)
        .await;

    let err = Materializer::new(harness.client())
        .create(TOKEN, TEMPLATE_DOC, "Surat_Siti", &variables(), "", date())
        .await
        .unwrap_err();

    assert_eq!(err.code(), "FETCH_FAILED");
}

#[tokio::test]
async fn test_export_pdf() {
    let harness = TestHarness::start().await;
    Mock::given(method("GET"))
        .and(path("/drive/v3/files/copy-doc/export"))
        .and(query_param("mimeType", "application/pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.7".to_vec()))
        .expect(1)
        .mount(&harness.server)
        .await;

    let file = Materializer::new(harness.client())
        .export(TOKEN, COPY_DOC, ExportFormat::Pdf, "Surat_Siti")
        .await
        .unwrap();

    assert_eq!(file.bytes, b"%PDF-1.7");
    assert_eq!(file.content_type, "application/pdf");
    assert_eq!(file.file_name, "Surat_Siti.pdf");
}

#[tokio::test]
async fn test_export_docx_forbidden() {
    let harness = TestHarness::start().await;
    Mock::given(method("GET"))
        .and(path("/drive/v3/files/copy-doc/export"))
        .and(query_param("mimeType", ExportFormat::Docx.mime_type()))
        .respond_with(ResponseTemplate::new(403))
        .mount(&harness.server)
        .await;

    let err = Materializer::new(harness.client())
        .export(TOKEN, COPY_DOC, ExportFormat::Docx, "Surat_Siti")
        .await
        .unwrap_err();

    assert!(err.is_access_denied());
}

#[tokio::test]
async fn test_dispose_swallows_failures() {
    let harness = TestHarness::start().await;
    Mock::given(method("DELETE"))
        .and(path("/drive/v3/files/copy-doc"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&harness.server)
        .await;

    Materializer::new(harness.client()).dispose(TOKEN, COPY_DOC).await;
}
