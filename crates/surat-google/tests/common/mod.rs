//! Common test utilities and harness for surat-google integration tests.

use chrono::{Duration, Utc};
use serde_json::{Value, json};
use surat_core::{SessionContext, SuratConfig, UserProfile};
use surat_google::{GoogleClient, LetterService};
use wiremock::MockServer;

pub const TOKEN: &str = "ya29.test-token";
pub const RESIDENTS_SHEET: &str = "residents-sheet";
pub const CATALOG_SHEET: &str = "catalog-sheet";
pub const TEMPLATE_DOC: &str = "template-doc";
pub const COPY_DOC: &str = "copy-doc";

/// Mock server plus a config pointing every Google endpoint at it.
pub struct TestHarness {
    pub server: MockServer,
    pub config: SuratConfig,
}

impl TestHarness {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let base = server.uri();

        let mut config = SuratConfig::default();
        config.google.sheets_base_url = format!("{base}/sheets/v4");
        config.google.docs_base_url = format!("{base}/docs/v1");
        config.google.drive_base_url = format!("{base}/drive/v3");
        config.google.userinfo_url = format!("{base}/oauth2/v3/userinfo");
        config.google.tokeninfo_url = format!("{base}/tokeninfo");
        config.google.timeout_secs = 5;
        config.sources.residents_spreadsheet_id = RESIDENTS_SHEET.to_string();
        config.sources.catalog_spreadsheet_id = CATALOG_SHEET.to_string();

        Self { server, config }
    }

    pub fn service(&self) -> LetterService {
        LetterService::new(&self.config).unwrap()
    }

    pub fn client(&self) -> GoogleClient {
        GoogleClient::new(&self.config.google).unwrap()
    }

    /// Requests the server saw, in arrival order, as `METHOD path`.
    pub async fn request_log(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|r| format!("{} {}", r.method.as_str(), r.url.path()))
            .collect()
    }
}

pub fn session() -> SessionContext {
    SessionContext::new(TOKEN, Utc::now() + Duration::hours(1), operator())
}

pub fn expired_session() -> SessionContext {
    SessionContext::new(TOKEN, Utc::now() - Duration::minutes(1), operator())
}

pub fn operator() -> UserProfile {
    UserProfile {
        sub: "1234567890".into(),
        email: "operator@desa-ngabeyan.id".into(),
        email_verified: true,
        name: "Operator Desa".into(),
        ..Default::default()
    }
}

/// Values response for the resident sheet: a header and two residents.
pub fn resident_values() -> Value {
    let header: Vec<&str> = vec![
        "NO", "NIK", "NO KK", "NAMA LENGKAP", "ALAMAT", "RT", "RW", "TEMPAT LAHIR",
        "TGL LAHIR", "JK", "STATUS", "PENDIDIKAN", "AGAMA", "PEKERJAAN", "UMUR", "RTRW",
        "STATUS DATA", "PINDAH", "DATANG", "LAHIR", "MATI", "STATUS DATA 2", "AYAH", "IBU",
        "SHDK",
    ];
    json!({
        "range": "'Daftar Penduduk'!A1:Y4000",
        "majorDimension": "ROWS",
        "values": [
            header,
            [
                1, "1234", "5678", "Siti Aminah", "Jl. Mawar", "01", "02", "Klaten",
                "12-05-1990", "PR", "K", "SMA", "Islam", "Petani", 35, "01/02",
                "", "", "", "", "", "", "Ahmad", "Aisyah", "ISTRI"
            ],
            [
                2, "9876", "5678", "Budi Santoso", "Jl. Melati", "03", "04", "Klaten",
                "01-01-1985", "LK", "K", "S1", "Islam", "Guru", 40, "03/04",
                "", "", "", "", "", "", "Slamet", "Sri", "KEPALA KELUARGA"
            ]
        ]
    })
}

/// Values response for the catalog sheet.
pub fn catalog_values() -> Value {
    json!({
        "values": [
            ["DOMISILI", "Surat Keterangan Domisili", "Domisili penduduk", "KET-DOM", TEMPLATE_DOC, "nama, nik, alamat-lengkap, keperluan"],
            ["USAHA", "Surat Keterangan Usaha", "Usaha penduduk", "", "", "nama, jenis-usaha"]
        ]
    })
}

/// A template document with placeholders in a paragraph and a table cell.
pub fn template_document() -> Value {
    json!({
        "documentId": TEMPLATE_DOC,
        "title": "Template Domisili",
        "body": { "content": [
            { "sectionBreak": {} },
            { "paragraph": {
                "elements": [ { "textRun": {
                    "content": "SURAT KETERANGAN DOMISILI",
                    "textStyle": { "bold": true }
                } } ],
                "paragraphStyle": { "alignment": "CENTER" }
            } },
            { "paragraph": {
                "elements": [ { "textRun": { "content": "Nomor: {{nomor_surat}}" } } ]
            } },
            { "paragraph": {
                "elements": [ { "textRun": { "content": "Nama: {{ nama }}, alamat {{alamatLengkap}}" } } ]
            } },
            { "table": { "tableRows": [ { "tableCells": [
                { "content": [ { "paragraph": {
                    "elements": [ { "textRun": { "content": "Keperluan: {{keperluan}}" } } ]
                } } ] }
            ] } ] } }
        ] }
    })
}
