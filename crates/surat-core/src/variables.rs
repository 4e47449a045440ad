//! The variable mapper.
//!
//! Templates in the wild spell the same logical field several ways
//! (`alamat-lengkap`, `alamatLengkap`, `ALAMAT_LENGKAP` via case folding).
//! [`VariableMap`] stores one canonical key per field and resolves every
//! alias through a static table on both insert and lookup, so two spellings
//! of one field can never hold different values.
//!
//! [`build_variables`] layers the map in three passes:
//!
//! 1. editable defaults (letter number, citizenship, signatories);
//! 2. user-entered form data;
//! 3. locked fields derived from the resident, the letter date, and the
//!    village identity, which always win.

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::dates;
use crate::letter_type::LetterType;
use crate::resident::Resident;

/// Free-form user input keyed by placeholder name.
pub type FormData = BTreeMap<String, String>;

// ============================================================================
// Alias table
// ============================================================================

/// Canonical key followed by every other spelling that resolves to it.
const ALIAS_GROUPS: &[(&str, &[&str])] = &[
    ("nama", &["namaLengkap", "nama-lengkap", "nama_lengkap", "pemohon"]),
    ("nokk", &["noKK", "no-kk", "no_kk"]),
    ("tempat-lahir", &["tempatLahir", "tempat_lahir"]),
    ("tanggal-lahir", &["tanggalLahir", "tglLahir", "tgl-lahir"]),
    ("tempat-tanggal-lahir", &["tempatTanggalLahir", "ttl"]),
    ("jenis-kelamin", &["jenisKelamin", "jenis_kelamin"]),
    (
        "status-kawin",
        &["statusKawin", "status-perkawinan", "statusPerkawinan"],
    ),
    ("alamat-lengkap", &["alamatLengkap", "alamat_lengkap"]),
    ("alamat-domisili", &["alamatDomisili"]),
    ("nama-ayah", &["ayah", "namaAyah"]),
    ("nama-ibu", &["ibu", "namaIbu"]),
    ("status-hubungan", &["shdk", "statusHubungan"]),
    ("date", &["tanggalSurat", "tanggal-surat"]),
    ("nomor_surat", &["nomor-surat", "nomorSurat"]),
    ("bin", &["binBinti", "bin-binti"]),
    ("kepala-desa", &["kepalaDesa"]),
    ("nip-camat", &["nipCamat"]),
];

/// Lowercased alias -> canonical key.
static ALIASES: LazyLock<HashMap<String, &'static str>> = LazyLock::new(|| {
    ALIAS_GROUPS
        .iter()
        .flat_map(|(canonical, aliases)| {
            aliases
                .iter()
                .map(move |alias| (alias.to_lowercase(), *canonical))
        })
        .collect()
});

/// Resolve any spelling of a key to its canonical, lowercased form.
pub fn canonical_key(key: &str) -> String {
    let lower = key.trim().to_lowercase();
    match ALIASES.get(&lower) {
        Some(canonical) => (*canonical).to_string(),
        None => lower,
    }
}

/// Every known spelling of a canonical key, canonical first.
pub fn spellings(canonical: &str) -> Vec<&str> {
    let mut out = vec![canonical];
    if let Some((_, aliases)) = ALIAS_GROUPS.iter().find(|(c, _)| *c == canonical) {
        out.extend(aliases.iter().copied());
    }
    out
}

// ============================================================================
// VariableMap
// ============================================================================

/// Placeholder name to value, case-insensitive and alias-aware.
///
/// Values never contain `{{` or `}}`: [`literal_value`] splits doubled
/// braces on insert, so a substituted value cannot form a new placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, String>",
    into = "BTreeMap<String, String>"
)]
pub struct VariableMap {
    values: BTreeMap<String, String>,
}

impl VariableMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value under the canonical form of `key`.
    pub fn insert(&mut self, key: impl AsRef<str>, value: impl Into<String>) {
        let key = canonical_key(key.as_ref());
        if key.is_empty() {
            return;
        }
        self.values.insert(key, literal_value(&value.into()));
    }

    /// Look up any spelling of a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(&canonical_key(key)).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Canonical keys and values in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Every spelling of every key with its value.
    ///
    /// Remote substitution cannot consult the alias table, so it needs each
    /// spelling listed explicitly.
    pub fn entries(&self) -> Vec<(String, String)> {
        self.values
            .iter()
            .flat_map(|(key, value)| {
                spellings(key)
                    .into_iter()
                    .map(move |s| (s.to_string(), value.clone()))
            })
            .collect()
    }

    /// Copy every entry of `other` into this map, overwriting.
    pub fn extend_from(&mut self, other: &FormData) {
        for (k, v) in other {
            self.insert(k, v.as_str());
        }
    }
}

impl From<BTreeMap<String, String>> for VariableMap {
    fn from(values: BTreeMap<String, String>) -> Self {
        values.into_iter().collect()
    }
}

impl From<VariableMap> for BTreeMap<String, String> {
    fn from(map: VariableMap) -> Self {
        map.values
    }
}

/// Break up `{{` and `}}` runs with a space.
pub fn literal_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev = None;
    for c in value.chars() {
        if matches!(c, '{' | '}') && prev == Some(c) {
            out.push(' ');
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for VariableMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

// ============================================================================
// Organization defaults
// ============================================================================

/// Village identity and signatories printed on every letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Organization {
    pub kepala_desa: String,
    pub camat: String,
    pub nip_camat: String,
    pub desa: String,
    pub kecamatan: String,
    pub kabupaten: String,
    pub provinsi: String,
}

impl Default for Organization {
    fn default() -> Self {
        Self {
            kepala_desa: "SUPRIYADI".to_string(),
            camat: "Joko Hanoyo HS, S.STP, M.Si".to_string(),
            nip_camat: "197806171998021002".to_string(),
            desa: "Ngabeyan".to_string(),
            kecamatan: "Karanganom".to_string(),
            kabupaten: "Klaten".to_string(),
            provinsi: "Jawa Tengah".to_string(),
        }
    }
}

// ============================================================================
// Display helpers
// ============================================================================

/// `LK` -> `Laki-laki`, `PR` -> `Perempuan`, anything else unchanged.
pub fn gender_display(code: &str) -> String {
    match code.to_uppercase().as_str() {
        "LK" => "Laki-laki".to_string(),
        "PR" => "Perempuan".to_string(),
        _ => code.to_string(),
    }
}

/// Registry marital codes to display text, anything else unchanged.
pub fn marital_status_display(code: &str) -> String {
    match code.to_uppercase().as_str() {
        "JD" => "Janda".to_string(),
        "DD" => "Duda".to_string(),
        "K" => "Kawin".to_string(),
        "BK" => "Belum Kawin".to_string(),
        _ => code.to_string(),
    }
}

/// Patronymic phrase: `binti <father>` for women, `bin <father>` otherwise.
pub fn bin_binti(gender_code: &str, father: &str) -> String {
    if gender_code.eq_ignore_ascii_case("PR") {
        format!("binti {father}")
    } else {
        format!("bin {father}")
    }
}

/// `alamat RT rt RW rw`.
pub fn full_address(resident: &Resident) -> String {
    format!(
        "{} RT {} RW {}",
        resident.alamat, resident.rt, resident.rw
    )
}

/// Place and date of birth joined by a comma, skipping empty parts.
pub fn place_and_date_of_birth(resident: &Resident) -> String {
    [resident.tempat_lahir.trim(), resident.tgl_lahir.trim()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Letter number `NNN/CODE/ROMAN/YEAR` with a random sequence in 1..=999.
///
/// The sequence is not checked against previously issued numbers.
pub fn generate_letter_number<R: Rng + ?Sized>(
    letter_code: &str,
    date: NaiveDate,
    rng: &mut R,
) -> String {
    let sequence: u32 = rng.gen_range(1..=999);
    let code = if letter_code.trim().is_empty() {
        crate::letter_type::DEFAULT_LETTER_CODE
    } else {
        letter_code.trim()
    };
    format!(
        "{sequence:03}/{code}/{}/{}",
        dates::roman_month(date.month()),
        date.year()
    )
}

// ============================================================================
// Mapping
// ============================================================================

/// Resolve the full variable set for one letter.
///
/// Pure apart from the letter-number sequence, which is random unless the
/// form data already carries a `nomor_surat`.
pub fn build_variables(
    resident: &Resident,
    letter_type: &LetterType,
    form_data: &FormData,
    org: &Organization,
    date: NaiveDate,
) -> VariableMap {
    let mut map = VariableMap::new();

    // Editable defaults
    map.insert(
        "nomor_surat",
        generate_letter_number(
            letter_type.effective_letter_code(),
            date,
            &mut rand::thread_rng(),
        ),
    );
    map.insert("kewarganegaraan", "Indonesia");
    map.insert("bin", bin_binti(&resident.jenis_kelamin, &resident.ayah));
    map.insert("kepala-desa", org.kepala_desa.as_str());
    map.insert("camat", org.camat.as_str());
    map.insert("nip-camat", org.nip_camat.as_str());

    map.extend_from(form_data);

    // Locked fields
    for (key, value) in locked_fields(resident, org, date) {
        map.insert(key, value);
    }

    map
}

/// Fields the user cannot override.
pub fn locked_fields(
    resident: &Resident,
    org: &Organization,
    date: NaiveDate,
) -> Vec<(&'static str, String)> {
    vec![
        ("date", dates::format_long(date)),
        ("tanggal", date.day().to_string()),
        ("bulan", dates::month_name(date.month()).to_string()),
        ("tahun", date.year().to_string()),
        ("nama", resident.nama_lengkap.clone()),
        ("nik", resident.nik.clone()),
        ("nokk", resident.no_kk.clone()),
        ("jenis-kelamin", gender_display(&resident.jenis_kelamin)),
        ("tempat-lahir", resident.tempat_lahir.clone()),
        ("tanggal-lahir", resident.tgl_lahir.clone()),
        ("tempat-tanggal-lahir", place_and_date_of_birth(resident)),
        ("alamat", resident.alamat.clone()),
        ("alamat-lengkap", full_address(resident)),
        ("alamat-domisili", full_address(resident)),
        ("rt", resident.rt.clone()),
        ("rw", resident.rw.clone()),
        ("rtrw", format!("{}/{}", resident.rt, resident.rw)),
        ("agama", resident.agama.clone()),
        ("pekerjaan", resident.pekerjaan.clone()),
        ("status-kawin", marital_status_display(&resident.status_kawin)),
        ("pendidikan", resident.pendidikan.clone()),
        ("umur", resident.umur.clone()),
        ("nama-ayah", resident.ayah.clone()),
        ("nama-ibu", resident.ibu.clone()),
        ("status-hubungan", resident.shdk.clone()),
        ("desa", org.desa.clone()),
        ("kecamatan", org.kecamatan.clone()),
        ("kabupaten", org.kabupaten.clone()),
        ("provinsi", org.provinsi.clone()),
    ]
}

/// Whether a field is filled from the registry and cannot be edited.
///
/// The letter number is not in this set: it is an editable default, so a
/// client can post back the number it was shown in the preview.
pub fn is_read_only(key: &str) -> bool {
    let canonical = canonical_key(key);
    READ_ONLY.contains(&canonical.as_str())
}

const READ_ONLY: &[&str] = &[
    "date",
    "tanggal",
    "bulan",
    "tahun",
    "nama",
    "nik",
    "nokk",
    "jenis-kelamin",
    "tempat-tanggal-lahir",
    "tempat-lahir",
    "tanggal-lahir",
    "alamat",
    "alamat-lengkap",
    "alamat-domisili",
    "rt",
    "rw",
    "rtrw",
    "agama",
    "pekerjaan",
    "status-kawin",
    "pendidikan",
    "umur",
    "nama-ayah",
    "nama-ibu",
    "status-hubungan",
    "desa",
    "kecamatan",
    "kabupaten",
    "provinsi",
];
