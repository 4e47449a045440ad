//! Structured document to HTML.
//!
//! Output uses utility classes (`mb-4`, `text-center`, `border-gray-300`) so a
//! client stylesheet controls spacing. Text content is escaped; `{` and `}`
//! pass through untouched so placeholders survive conversion.

use super::model::{
    Alignment, OptionalColor, Paragraph, StructuralElement, Table, TextRun, TextStyle,
};

const TABLE_OPEN: &str = r#"<table class="w-full border-collapse border border-gray-300 mb-4">"#;
const CELL_OPEN: &str = r#"<td class="border border-gray-300 p-2">"#;

/// Convert a sequence of block nodes to HTML.
pub fn to_html(content: &[StructuralElement]) -> String {
    let mut html = String::new();
    for element in content {
        push_element(&mut html, element);
    }
    html
}

fn push_element(html: &mut String, element: &StructuralElement) {
    if let Some(paragraph) = &element.paragraph {
        html.push_str(&paragraph_to_html(paragraph));
    } else if let Some(table) = &element.table {
        html.push_str(&table_to_html(table));
    }
}

/// Paragraph with its alignment class. Empty when the paragraph has no text runs.
pub fn paragraph_to_html(paragraph: &Paragraph) -> String {
    let runs: String = paragraph.text_runs().map(text_run_to_html).collect();
    if paragraph.text_runs().next().is_none() {
        return String::new();
    }
    format!(
        r#"<p class="mb-4 {}">{runs}</p>"#,
        alignment_class(paragraph.alignment())
    )
}

/// Styled run, wrapped innermost-first: bold, italic, underline, size, color.
pub fn text_run_to_html(run: &TextRun) -> String {
    let mut html = escape_text(&run.content);
    let Some(style) = &run.text_style else {
        return html;
    };

    if style.bold {
        html = format!("<strong>{html}</strong>");
    }
    if style.italic {
        html = format!("<em>{html}</em>");
    }
    if style.underline {
        html = format!("<u>{html}</u>");
    }
    if let Some(size) = font_size_pt(style) {
        html = format!(r#"<span style="font-size: {size}pt;">{html}</span>"#);
    }
    if let Some(color) = style.foreground_color.as_ref().and_then(color_css) {
        html = format!(r#"<span style="color: {color};">{html}</span>"#);
    }
    html
}

fn font_size_pt(style: &TextStyle) -> Option<i64> {
    let magnitude = style.font_size.as_ref()?.magnitude?;
    if magnitude == 0.0 || magnitude.is_nan() {
        return None;
    }
    Some(magnitude.round() as i64)
}

/// CSS color for a foreground color, `None` when no color object is set.
///
/// A color object without RGB channels renders black.
pub fn color_css(color: &OptionalColor) -> Option<String> {
    let color = color.color.as_ref()?;
    Some(match &color.rgb_color {
        Some(rgb) => format!(
            "rgb({}, {}, {})",
            channel(rgb.red),
            channel(rgb.green),
            channel(rgb.blue)
        ),
        None => "#000000".to_string(),
    })
}

fn channel(value: Option<f64>) -> u8 {
    (value.unwrap_or(0.0).clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Tailwind-style text alignment class.
pub fn alignment_class(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Center => "text-center",
        Alignment::End => "text-right",
        Alignment::Justified => "text-justify",
        Alignment::Start | Alignment::Unspecified => "text-left",
    }
}

/// Table with one `<td>` per cell; cell content converts recursively.
pub fn table_to_html(table: &Table) -> String {
    let mut html = String::from(TABLE_OPEN);
    for row in &table.table_rows {
        html.push_str("<tr>");
        for cell in &row.table_cells {
            html.push_str(CELL_OPEN);
            for element in &cell.content {
                push_element(&mut html, element);
            }
            html.push_str("</td>");
        }
        html.push_str("</tr>");
    }
    html.push_str("</table>");
    html
}

/// Escape `&`, `<`, and `>`.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
