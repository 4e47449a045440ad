//! Integration tests for the template fetcher.

use surat_core::Error as CoreError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{TOKEN, TEMPLATE_DOC, TestHarness, template_document};

#[tokio::test]
async fn test_fetch_template_renders_html_and_text() {
    let harness = TestHarness::start().await;
    Mock::given(method("GET"))
        .and(path("/docs/v1/documents/template-doc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(template_document()))
        .mount(&harness.server)
        .await;

    let template = harness.client().fetch_template(TOKEN, TEMPLATE_DOC).await.unwrap();

    assert_eq!(template.document_id, TEMPLATE_DOC);
    assert_eq!(template.title, "Template Domisili");
    assert!(template.html.starts_with(
        r#"<p class="mb-4 text-center"><strong>SURAT KETERANGAN DOMISILI</strong></p>"#
    ));
    assert!(template.html.contains("<table"));
    assert!(template.plain_text.contains("{{nomor_surat}}"));
    assert!(!template.plain_text.contains("{{keperluan}}"));
    assert!(template.full_text.contains("{{keperluan}}"));
}

#[tokio::test]
async fn test_fetch_template_forbidden_is_access_denied() {
    let harness = TestHarness::start().await;
    Mock::given(method("GET"))
        .and(path("/docs/v1/documents/template-doc"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&harness.server)
        .await;

    let err = harness.client().fetch_template(TOKEN, TEMPLATE_DOC).await.unwrap_err();

    assert!(err.is_access_denied());
    assert_eq!(err.code(), "ACCESS_DENIED");
}

#[tokio::test]
async fn test_fetch_template_server_error_carries_body() {
    let harness = TestHarness::start().await;
    Mock::given(method("GET"))
        .and(path("/docs/v1/documents/template-doc"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
        .mount(&harness.server)
        .await;

    let err = harness.client().fetch_template(TOKEN, TEMPLATE_DOC).await.unwrap_err();

    match err.as_core() {
        Some(CoreError::FetchFailed { message }) => {
            assert!(message.contains("500"));
            assert!(message.contains("backend exploded"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_template_untitled() {
    let harness = TestHarness::start().await;
    Mock::given(method("GET"))
        .and(path("/docs/v1/documents/template-doc"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "documentId": TEMPLATE_DOC })),
        )
        .mount(&harness.server)
        .await;

    let template = harness.client().fetch_template(TOKEN, TEMPLATE_DOC).await.unwrap();
    assert_eq!(template.title, surat_content::UNTITLED);
    assert!(template.html.is_empty());
}
