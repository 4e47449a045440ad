//! Resident records from the village population registry.
//!
//! Rows come from a spreadsheet range whose first row is a header; data rows
//! map positionally onto the 25 fields below (columns A..Y). Missing trailing
//! cells are treated as empty strings.

use serde::{Deserialize, Serialize};

/// Number of columns a registry row is expected to carry.
pub const RESIDENT_COLUMNS: usize = 25;

/// A person record from the population registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Resident {
    pub no: String,
    pub nik: String,
    #[serde(rename = "noKK")]
    pub no_kk: String,
    pub nama_lengkap: String,
    pub alamat: String,
    pub rt: String,
    pub rw: String,
    pub tempat_lahir: String,
    pub tgl_lahir: String,
    pub jenis_kelamin: String,
    pub status_kawin: String,
    pub pendidikan: String,
    pub agama: String,
    pub pekerjaan: String,
    pub umur: String,
    pub rtrw: String,
    pub status_data: String,
    pub pindah: String,
    pub datang: String,
    pub lahir: String,
    pub mati: String,
    pub status_data2: String,
    pub ayah: String,
    pub ibu: String,
    pub shdk: String,
}

impl Resident {
    /// Map one spreadsheet row onto a resident by fixed column index.
    pub fn from_row(row: &[String]) -> Self {
        let cell = |i: usize| row.get(i).cloned().unwrap_or_default();
        Self {
            no: cell(0),
            nik: cell(1),
            no_kk: cell(2),
            nama_lengkap: cell(3),
            alamat: cell(4),
            rt: cell(5),
            rw: cell(6),
            tempat_lahir: cell(7),
            tgl_lahir: cell(8),
            jenis_kelamin: cell(9),
            status_kawin: cell(10),
            pendidikan: cell(11),
            agama: cell(12),
            pekerjaan: cell(13),
            umur: cell(14),
            rtrw: cell(15),
            status_data: cell(16),
            pindah: cell(17),
            datang: cell(18),
            lahir: cell(19),
            mati: cell(20),
            status_data2: cell(21),
            ayah: cell(22),
            ibu: cell(23),
            shdk: cell(24),
        }
    }

    /// Whether the resident matches a free-text query.
    ///
    /// Name, address, and occupation match case-insensitively; NIK and KK
    /// numbers match as plain substrings.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return true;
        }
        let lower = query.to_lowercase();
        self.nama_lengkap.to_lowercase().contains(&lower)
            || self.nik.contains(query)
            || self.no_kk.contains(query)
            || self.alamat.to_lowercase().contains(&lower)
            || self.pekerjaan.to_lowercase().contains(&lower)
    }
}

/// Convert a full sheet read (header row included) into residents.
///
/// Fewer than two rows means there is no data.
pub fn residents_from_rows(rows: &[Vec<String>]) -> Vec<Resident> {
    if rows.len() < 2 {
        return Vec::new();
    }
    rows[1..].iter().map(|row| Resident::from_row(row)).collect()
}

/// Find a resident by NIK.
pub fn find_by_nik<'a>(residents: &'a [Resident], nik: &str) -> Option<&'a Resident> {
    residents.iter().find(|r| r.nik == nik)
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

/// Slice `items` into a 1-based page. Pages past the end are empty.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let page = page.max(1);
    let total = items.len();
    let total_pages = total.div_ceil(per_page);
    let start = (page - 1).saturating_mul(per_page).min(total);
    let end = start.saturating_add(per_page).min(total);

    Page {
        items: items[start..end].to_vec(),
        page,
        per_page,
        total,
        total_pages,
    }
}

/// Filter residents by `query` and return the requested page.
pub fn search(residents: &[Resident], query: &str, page: usize, per_page: usize) -> Page<Resident> {
    let filtered: Vec<Resident> = residents
        .iter()
        .filter(|r| r.matches(query))
        .cloned()
        .collect();
    paginate(&filtered, page, per_page)
}
