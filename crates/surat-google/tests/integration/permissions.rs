//! Integration tests for the permission probe and profile lookup.

use serde_json::json;
use surat_core::AccessLevel;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{TOKEN, TestHarness, session};

async fn mount_probes(harness: &TestHarness, sheet: u16, drive: u16) {
    Mock::given(method("GET"))
        .and(path("/sheets/v4/spreadsheets/residents-sheet"))
        .and(query_param("fields", "spreadsheetId"))
        .respond_with(
            ResponseTemplate::new(sheet).set_body_json(json!({ "spreadsheetId": "residents-sheet" })),
        )
        .mount(&harness.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/drive/v3/about"))
        .and(query_param("fields", "user"))
        .respond_with(
            ResponseTemplate::new(drive)
                .set_body_json(json!({ "user": { "emailAddress": "operator@desa-ngabeyan.id" } })),
        )
        .mount(&harness.server)
        .await;
}

#[tokio::test]
async fn test_full_access() {
    let harness = TestHarness::start().await;
    mount_probes(&harness, 200, 200).await;

    let permissions = harness.service().permissions(&session()).await.unwrap();

    assert!(permissions.has_spreadsheet_access);
    assert!(permissions.has_docs_access);
    assert!(permissions.can_create_documents);
    assert_eq!(permissions.access_level(), AccessLevel::Full);
    assert!(permissions.guidance().is_none());
}

#[tokio::test]
async fn test_partial_access() {
    let harness = TestHarness::start().await;
    mount_probes(&harness, 200, 403).await;

    let permissions = harness.service().permissions(&session()).await.unwrap();

    assert!(permissions.has_spreadsheet_access);
    assert!(!permissions.can_create_documents);
    assert_eq!(permissions.access_level(), AccessLevel::Partial);
    assert!(permissions.guidance().is_some());
}

#[tokio::test]
async fn test_no_access() {
    let harness = TestHarness::start().await;
    mount_probes(&harness, 404, 500).await;

    let permissions = harness.service().permissions(&session()).await.unwrap();
    assert_eq!(permissions.access_level(), AccessLevel::None);
}

#[tokio::test]
async fn test_rejected_token_fails_probe() {
    let harness = TestHarness::start().await;
    mount_probes(&harness, 401, 200).await;

    let err = harness.service().permissions(&session()).await.unwrap_err();
    assert!(err.is_not_authenticated());
}

#[tokio::test]
async fn test_session_summary() {
    let harness = TestHarness::start().await;
    mount_probes(&harness, 200, 403).await;

    let summary = harness.service().session_summary(&session()).await.unwrap();

    assert_eq!(summary.profile.email, "operator@desa-ngabeyan.id");
    assert_eq!(summary.access_level, AccessLevel::Partial);
    assert_eq!(summary.guidance, summary.permissions.guidance());
}

#[tokio::test]
async fn test_fetch_profile() {
    let harness = TestHarness::start().await;
    Mock::given(method("GET"))
        .and(path("/oauth2/v3/userinfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sub": "1234567890",
            "email": "operator@desa-ngabeyan.id",
            "email_verified": true,
            "name": "Operator Desa",
            "picture": "https://example.com/p.png"
        })))
        .mount(&harness.server)
        .await;

    let profile = harness.client().fetch_profile(TOKEN).await.unwrap();

    assert_eq!(profile.sub, "1234567890");
    assert!(profile.email_verified);
    assert_eq!(profile.picture.as_deref(), Some("https://example.com/p.png"));
    assert!(profile.given_name.is_none());
}
