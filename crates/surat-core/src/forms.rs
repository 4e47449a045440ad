//! Declarative field descriptors for catalog-driven forms.
//!
//! A letter type lists its placeholder names; each one becomes a
//! [`FieldDescriptor`] telling a client how to render and whether the value
//! is filled from the registry.

use serde::{Deserialize, Serialize};

use crate::letter_type::LetterType;
use crate::variables::{VariableMap, is_read_only};

/// Input widget for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Textarea,
    Select,
    Date,
    Tel,
    Email,
}

/// One form field derived from a letter type's variable list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub read_only: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    pub placeholder: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

const LABELS: &[(&str, &str)] = &[
    ("nomor_surat", "Nomor Surat"),
    ("nama", "Nama Lengkap"),
    ("tempat-tanggal-lahir", "Tempat, Tanggal Lahir"),
    ("tempat-lahir", "Tempat Lahir"),
    ("tanggal-lahir", "Tanggal Lahir"),
    ("kewarganegaraan", "Kewarganegaraan"),
    ("pekerjaan", "Pekerjaan"),
    ("nokk", "No. Kartu Keluarga"),
    ("nik", "NIK"),
    ("jenis-kelamin", "Jenis Kelamin"),
    ("alamat", "Alamat"),
    ("alamat-lengkap", "Alamat Lengkap"),
    ("alamat-domisili", "Alamat Domisili"),
    ("status-kawin", "Status Perkawinan"),
    ("status-perkawinan", "Status Perkawinan"),
    ("pendidikan", "Pendidikan"),
    ("umur", "Umur"),
    ("ayah", "Nama Ayah"),
    ("ibu", "Nama Ibu"),
    ("nama-ayah", "Nama Ayah"),
    ("nama-ibu", "Nama Ibu"),
    ("shdk", "Status Hubungan dalam Keluarga"),
    ("status-hubungan", "Status Hubungan dalam Keluarga"),
    ("rtrw", "RT/RW"),
    ("keperluan", "Keperluan"),
    ("masa-berlaku", "Masa Berlaku"),
    ("rw", "RW"),
    ("rt", "RT"),
    ("nomor-tanggal-surat", "Nomor & Tanggal Surat RW"),
    ("tanggal-nomor-surat", "Tanggal & Nomor Surat RW"),
    ("bidang-usaha", "Bidang Usaha"),
    ("lokasi-usaha", "Lokasi Usaha"),
    ("lama-usaha", "Lama Usaha (tahun)"),
    ("surat-diperlukan", "Surat Diperlukan Untuk"),
    ("pemohon", "Nama Pemohon"),
    ("date", "Tanggal"),
    ("kepala-desa", "Nama Kepala Desa"),
    ("keterangan-lain", "Keterangan Lain"),
    ("barang-hilang", "Barang yang Hilang"),
    ("hilang-oleh", "Barang Hilang Oleh"),
    ("lokasi-hilang", "Lokasi Kehilangan"),
    ("bin", "Bin/Binti"),
    ("dukuh", "Dukuh/Dusun"),
    ("lama-tinggal", "Lama Tinggal"),
    ("camat", "Nama Camat"),
    ("nip-camat", "NIP Camat"),
    ("agama", "Agama"),
    ("nama-sekolah", "Nama Sekolah"),
    ("nama-anak", "Nama Anak"),
    ("idjtg", "ID JTG/Nomor Identitas"),
    ("tempat-tanggal-lahir-anak", "Tempat, Tanggal Lahir Anak"),
    ("nik-anak", "NIK Anak"),
    ("alamat-anak", "Alamat Anak"),
    ("notlp", "No. Telepon"),
    ("desa", "Desa"),
    ("kecamatan", "Kecamatan"),
    ("kabupaten", "Kabupaten"),
    ("provinsi", "Provinsi"),
];

const TEXTAREA_FIELDS: &[&str] = &["keperluan", "keterangan-lain", "surat-diperlukan"];

/// Human label for a variable, title-casing unknown names.
pub fn field_label(name: &str) -> String {
    if let Some((_, label)) = LABELS.iter().find(|(key, _)| *key == name) {
        return (*label).to_string();
    }
    title_case(&name.replace('-', " "))
}

fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_word = false;
    for c in s.chars() {
        let word = c.is_alphanumeric() || c == '_';
        if word && !prev_word {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        prev_word = word;
    }
    out
}

/// Widget kind for a variable.
pub fn field_kind(name: &str) -> FieldKind {
    if TEXTAREA_FIELDS.contains(&name) {
        return FieldKind::Textarea;
    }
    if !select_options(name).is_empty() {
        return FieldKind::Select;
    }
    if (name.contains("tanggal") || name == "date")
        && !is_read_only(name)
        && name != "tempat-tanggal-lahir-anak"
    {
        return FieldKind::Date;
    }
    if name.contains("telp") || name.contains("phone") {
        return FieldKind::Tel;
    }
    if name.contains("email") {
        return FieldKind::Email;
    }
    FieldKind::Text
}

/// Fixed choices for select fields; empty for free text.
pub fn select_options(name: &str) -> Vec<String> {
    let options: &[&str] = match name {
        "jenis-kelamin" => &["Laki-laki", "Perempuan"],
        "status-kawin" | "status-perkawinan" => &["Belum Kawin", "Kawin", "Janda", "Duda"],
        _ => &[],
    };
    options.iter().map(|s| s.to_string()).collect()
}

fn field_placeholder(name: &str, read_only: bool) -> String {
    match name {
        "nomor-tanggal-surat" => "Contoh: 001/RW-01/III/2024, 15 Maret 2024".to_string(),
        "tanggal-nomor-surat" => "Contoh: 15 Maret 2024, 001/RW-01/III/2024".to_string(),
        "masa-berlaku" => "Contoh: 15 Januari 2024 - 15 Januari 2025".to_string(),
        _ if read_only => "Terisi otomatis".to_string(),
        _ => format!("Masukkan {}", field_label(name).to_lowercase()),
    }
}

/// Describe one variable, pre-filling from `values` when given.
pub fn describe_field(name: &str, values: Option<&VariableMap>) -> FieldDescriptor {
    let read_only = is_read_only(name);
    FieldDescriptor {
        name: name.to_string(),
        label: field_label(name),
        kind: field_kind(name),
        read_only,
        options: select_options(name),
        placeholder: field_placeholder(name, read_only),
        value: values.and_then(|v| v.get(name)).map(str::to_string),
    }
}

/// Describe every variable of a letter type, in catalog order.
pub fn describe_fields(letter_type: &LetterType, values: Option<&VariableMap>) -> Vec<FieldDescriptor> {
    letter_type
        .variables
        .iter()
        .map(|name| describe_field(name, values))
        .collect()
}
