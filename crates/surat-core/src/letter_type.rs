//! Letter-type catalog entries.
//!
//! The catalog is read from a spreadsheet where each row holds
//! `id, title, description, letter code, template doc id, variables` and the
//! variable list is comma-separated.

use serde::{Deserialize, Serialize};

/// Letter code used when a catalog row leaves the code column empty.
pub const DEFAULT_LETTER_CODE: &str = "KET-UMU";

/// A named template category with its remote document and expected placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LetterType {
    pub id: String,
    pub title: String,
    pub description: String,
    pub letter_code: String,
    pub doc_id: String,
    pub variables: Vec<String>,
}

impl LetterType {
    /// Map one catalog row onto a letter type.
    pub fn from_row(row: &[String]) -> Self {
        let cell = |i: usize| row.get(i).cloned().unwrap_or_default();
        Self {
            id: cell(0),
            title: cell(1),
            description: cell(2),
            letter_code: cell(3),
            doc_id: cell(4),
            variables: parse_variable_list(&cell(5)),
        }
    }

    /// Letter code to use in numbering, falling back to [`DEFAULT_LETTER_CODE`].
    pub fn effective_letter_code(&self) -> &str {
        if self.letter_code.trim().is_empty() {
            DEFAULT_LETTER_CODE
        } else {
            self.letter_code.trim()
        }
    }

    /// Whether a remote template document is configured.
    pub fn has_template(&self) -> bool {
        !self.doc_id.trim().is_empty()
    }
}

/// Split a comma-separated variable list, trimming each entry.
pub fn parse_variable_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

/// Convert catalog rows (no header) into letter types.
pub fn letter_types_from_rows(rows: &[Vec<String>]) -> Vec<LetterType> {
    rows.iter().map(|row| LetterType::from_row(row)).collect()
}

/// Find a letter type by id.
pub fn find<'a>(catalog: &'a [LetterType], id: &str) -> Option<&'a LetterType> {
    catalog.iter().find(|lt| lt.id == id)
}

const PERSON_FIELDS: &[&str] = &[
    "nomor_surat",
    "nama",
    "nik",
    "tempat-tanggal-lahir",
    "jenis-kelamin",
    "agama",
    "pekerjaan",
    "alamat-lengkap",
];

fn entry(id: &str, title: &str, description: &str, extra: &[&str]) -> LetterType {
    LetterType {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        letter_code: String::new(),
        doc_id: String::new(),
        variables: PERSON_FIELDS
            .iter()
            .chain(extra)
            .map(|v| v.to_string())
            .collect(),
    }
}

/// Built-in catalog used when the catalog sheet cannot be read.
///
/// These entries carry no template document, so they can drive forms but
/// not previews or downloads.
pub fn fallback_catalog() -> Vec<LetterType> {
    vec![
        entry(
            "USULAN_PESERTA",
            "Surat Keterangan Usulan Peserta",
            "Surat untuk mengusulkan seseorang sebagai peserta program",
            &["notlp", "keterangan-lain"],
        ),
        entry(
            "TIDAK_MAMPU",
            "Surat Keterangan Tidak Mampu",
            "Surat yang menerangkan ketidakmampuan ekonomi seseorang",
            &["kewarganegaraan", "keperluan"],
        ),
        entry(
            "JALUR_AFIRMASI",
            "Surat Keterangan Jalur Afirmasi (Tidak Mampu)",
            "Surat untuk jalur afirmasi pendidikan bagi yang tidak mampu",
            &[
                "nama-anak",
                "nama-sekolah",
                "idjtg",
                "tempat-tanggal-lahir-anak",
                "nik-anak",
                "alamat-anak",
            ],
        ),
        entry(
            "KEHILANGAN_KK",
            "Surat Keterangan Kehilangan Kartu Keluarga (KK)",
            "Surat keterangan kehilangan kartu keluarga",
            &["nokk", "barang-hilang", "lokasi-hilang"],
        ),
        entry(
            "PENGANTAR",
            "Surat Pengantar",
            "Surat pengantar untuk berbagai keperluan",
            &["keterangan-lain", "surat-diperlukan"],
        ),
        entry(
            "DOMISILI",
            "Surat Keterangan Domisili Tempat Tinggal",
            "Surat yang menerangkan domisili seseorang",
            &[
                "bin",
                "kewarganegaraan",
                "alamat-domisili",
                "lama-tinggal",
                "keperluan",
            ],
        ),
        entry(
            "USAHA",
            "Surat Keterangan Usaha",
            "Surat keterangan untuk kepemilikan usaha",
            &["bidang-usaha", "lokasi-usaha", "keperluan", "masa-berlaku"],
        ),
    ]
}
