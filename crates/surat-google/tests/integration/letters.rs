//! Integration tests for preview and materialization through the service.

use std::collections::BTreeMap;

use serde_json::{Value, json};
use surat_core::Error as CoreError;
use surat_google::LetterRequest;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{
    COPY_DOC, TestHarness, catalog_values, resident_values, session, template_document,
};

async fn mount_sources(harness: &TestHarness) {
    Mock::given(method("GET"))
        .and(path_regex(r"^/sheets/v4/spreadsheets/residents-sheet/values/.+$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(resident_values()))
        .mount(&harness.server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/sheets/v4/spreadsheets/catalog-sheet/values/.+$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_values()))
        .mount(&harness.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/docs/v1/documents/template-doc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(template_document()))
        .mount(&harness.server)
        .await;
}

fn request() -> LetterRequest {
    LetterRequest {
        letter_type: "DOMISILI".into(),
        nik: "1234".into(),
        form_data: BTreeMap::from([("keperluan".to_string(), "Pendaftaran sekolah".to_string())]),
        file_name: None,
    }
}

#[tokio::test]
async fn test_preview_substitutes_template() {
    let harness = TestHarness::start().await;
    mount_sources(&harness).await;

    let preview = harness.service().preview(&session(), &request()).await.unwrap();

    assert_eq!(preview.title, "Template Domisili");
    assert_eq!(preview.file_name, "Surat_Keterangan_Domisili_Siti_Aminah");
    assert!(preview.html.contains("Nama: Siti Aminah, alamat Jl. Mawar RT 01 RW 02"));
    assert!(preview.html.contains("Keperluan: Pendaftaran sekolah"));
    assert!(preview.html.contains(&format!("Nomor: {}", preview.letter_number)));
    assert!(preview.letter_number.contains("/KET-DOM/"));
    assert!(!preview.html.contains("{{"));
    assert_eq!(preview.variables.get("rtrw"), Some("01/02"));
}

#[tokio::test]
async fn test_preview_escapes_form_markup() {
    let harness = TestHarness::start().await;
    mount_sources(&harness).await;

    let mut req = request();
    req.form_data
        .insert("keperluan".into(), "<b onclick=x>Sekolah</b>".into());
    let preview = harness.service().preview(&session(), &req).await.unwrap();

    assert!(preview.html.contains("Keperluan: &lt;b onclick=x&gt;Sekolah&lt;/b&gt;"));
    assert!(!preview.html.contains("<b onclick"));
    assert_eq!(
        preview.variables.get("keperluan"),
        Some("<b onclick=x>Sekolah</b>")
    );
}

#[tokio::test]
async fn test_materialized_document_matches_preview() {
    let harness = TestHarness::start().await;
    mount_sources(&harness).await;
    Mock::given(method("POST"))
        .and(path("/drive/v3/files/template-doc/copy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": COPY_DOC })))
        .expect(1)
        .mount(&harness.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/docs/v1/documents/copy-doc:batchUpdate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&harness.server)
        .await;

    let service = harness.service();
    let preview = service.preview(&session(), &request()).await.unwrap();

    // Post the previewed number back, as the client does.
    let mut materialize = request();
    materialize
        .form_data
        .insert("nomor_surat".into(), preview.letter_number.clone());
    let handle = service.materialize(&session(), &materialize).await.unwrap();
    assert_eq!(handle.document_id, COPY_DOC);
    assert!(handle.title.starts_with("Surat_Keterangan_Domisili_Siti_Aminah - "));

    let requests = harness.server.received_requests().await.unwrap();
    let batch = requests
        .iter()
        .find(|r| r.url.path().ends_with(":batchUpdate"))
        .unwrap();
    let body: Value = batch.body_json().unwrap();
    let replacements: BTreeMap<String, String> = body["requests"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| {
            let op = &r["replaceAllText"];
            (
                op["containsText"]["text"].as_str().unwrap().to_string(),
                op["replaceText"].as_str().unwrap().to_string(),
            )
        })
        .collect();

    for token in ["{{nomor_surat}}", "{{ nama }}", "{{alamatLengkap}}", "{{keperluan}}"] {
        let key = token.trim_matches(|c| c == '{' || c == '}').trim();
        assert_eq!(
            replacements.get(token).map(String::as_str),
            preview.variables.get(key),
            "{token} diverged from preview"
        );
    }
}

#[tokio::test]
async fn test_preview_without_template_document() {
    let harness = TestHarness::start().await;
    mount_sources(&harness).await;

    let mut req = request();
    req.letter_type = "USAHA".into();
    let err = harness.service().preview(&session(), &req).await.unwrap_err();

    assert!(matches!(err.as_core(), Some(CoreError::TemplateNotFound { id }) if id == "USAHA"));
}

#[tokio::test]
async fn test_preview_unknown_letter_type() {
    let harness = TestHarness::start().await;
    mount_sources(&harness).await;

    let mut req = request();
    req.letter_type = "NOPE".into();
    let err = harness.service().preview(&session(), &req).await.unwrap_err();

    assert_eq!(err.code(), "TEMPLATE_NOT_FOUND");
}

#[tokio::test]
async fn test_preview_requires_nik() {
    let harness = TestHarness::start().await;

    let mut req = request();
    req.nik = " ".into();
    let err = harness.service().preview(&session(), &req).await.unwrap_err();

    assert_eq!(err.code(), "VALIDATION");
}

#[tokio::test]
async fn test_form_prefilled_for_resident() {
    let harness = TestHarness::start().await;
    mount_sources(&harness).await;

    let form = harness
        .service()
        .form(&session(), "DOMISILI", Some("1234"))
        .await
        .unwrap();

    assert_eq!(form.letter_type.id, "DOMISILI");
    let names: Vec<&str> = form.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["nama", "nik", "alamat-lengkap", "keperluan"]);

    let nama = &form.fields[0];
    assert!(nama.read_only);
    assert_eq!(nama.value.as_deref(), Some("Siti Aminah"));

    let keperluan = &form.fields[3];
    assert!(!keperluan.read_only);
    assert_eq!(keperluan.kind, surat_core::FieldKind::Textarea);
}
