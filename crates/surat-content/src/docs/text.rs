//! Plain-text extraction.

use super::model::StructuralElement;

/// Concatenated text of every top-level paragraph.
///
/// Table contents are skipped; use [`full_text`] to include them.
pub fn plain_text(content: &[StructuralElement]) -> String {
    content
        .iter()
        .filter_map(|e| e.paragraph.as_ref())
        .flat_map(|p| p.text_runs())
        .map(|r| r.content.as_str())
        .collect()
}

/// Text of every paragraph, descending into table cells.
pub fn full_text(content: &[StructuralElement]) -> String {
    let mut out = String::new();
    collect_text(content, &mut out);
    out
}

fn collect_text(content: &[StructuralElement], out: &mut String) {
    for element in content {
        if let Some(paragraph) = &element.paragraph {
            for run in paragraph.text_runs() {
                out.push_str(&run.content);
            }
        } else if let Some(table) = &element.table {
            for cell in table.table_rows.iter().flat_map(|r| &r.table_cells) {
                collect_text(&cell.content, out);
            }
        }
    }
}
