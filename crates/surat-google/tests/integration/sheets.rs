//! Integration tests for resident and catalog reads.

use serde_json::json;
use surat_core::Error as CoreError;
use wiremock::matchers::{bearer_token, method, path_regex};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{TOKEN, TestHarness, catalog_values, expired_session, resident_values, session};

async fn mount_residents(harness: &TestHarness) {
    Mock::given(method("GET"))
        .and(path_regex(r"^/sheets/v4/spreadsheets/residents-sheet/values/.+$"))
        .and(bearer_token(TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(resident_values()))
        .mount(&harness.server)
        .await;
}

#[tokio::test]
async fn test_residents_skip_header_and_stringify_cells() {
    let harness = TestHarness::start().await;
    mount_residents(&harness).await;

    let residents = harness.service().residents(&session()).await.unwrap();

    assert_eq!(residents.len(), 2);
    let siti = &residents[0];
    assert_eq!(siti.no, "1");
    assert_eq!(siti.nik, "1234");
    assert_eq!(siti.nama_lengkap, "Siti Aminah");
    assert_eq!(siti.umur, "35");
    assert_eq!(siti.ayah, "Ahmad");
    assert_eq!(siti.shdk, "ISTRI");
}

#[tokio::test]
async fn test_search_and_lookup() {
    let harness = TestHarness::start().await;
    mount_residents(&harness).await;
    let service = harness.service();

    let page = service.search(&session(), "melati", 1, 10).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].nama_lengkap, "Budi Santoso");

    let resident = service.resident(&session(), "1234").await.unwrap();
    assert_eq!(resident.nama_lengkap, "Siti Aminah");

    let err = service.resident(&session(), "0000").await.unwrap_err();
    assert!(matches!(err.as_core(), Some(CoreError::ResidentNotFound { .. })));
}

#[tokio::test]
async fn test_empty_sheet_yields_no_residents() {
    let harness = TestHarness::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/sheets/v4/spreadsheets/residents-sheet/values/.+$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "range": "A1:Y1" })))
        .mount(&harness.server)
        .await;

    let residents = harness.service().residents(&session()).await.unwrap();
    assert!(residents.is_empty());
}

#[tokio::test]
async fn test_catalog_from_sheet() {
    let harness = TestHarness::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/sheets/v4/spreadsheets/catalog-sheet/values/.+$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_values()))
        .mount(&harness.server)
        .await;

    let catalog = harness.service().letter_types(&session()).await.unwrap();

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog[0].id, "DOMISILI");
    assert_eq!(catalog[0].letter_code, "KET-DOM");
    assert_eq!(
        catalog[0].variables,
        vec!["nama", "nik", "alamat-lengkap", "keperluan"]
    );
    assert_eq!(catalog[1].effective_letter_code(), "KET-UMU");
}

#[tokio::test]
async fn test_catalog_falls_back_when_sheet_is_forbidden() {
    let harness = TestHarness::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/sheets/v4/spreadsheets/catalog-sheet/values/.+$"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&harness.server)
        .await;

    let catalog = harness.service().letter_types(&session()).await.unwrap();

    assert_eq!(catalog.len(), 7);
    assert!(catalog.iter().any(|lt| lt.id == "DOMISILI"));
    assert!(catalog.iter().all(|lt| !lt.has_template()));
}

#[tokio::test]
async fn test_catalog_rejected_token_is_not_masked() {
    let harness = TestHarness::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/sheets/v4/spreadsheets/catalog-sheet/values/.+$"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&harness.server)
        .await;

    let err = harness.service().letter_types(&session()).await.unwrap_err();
    assert!(err.is_not_authenticated());
}

#[tokio::test]
async fn test_expired_session_makes_no_remote_call() {
    let harness = TestHarness::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(resident_values()))
        .expect(0)
        .mount(&harness.server)
        .await;

    let err = harness.service().residents(&expired_session()).await.unwrap_err();
    assert!(err.is_not_authenticated());
}
