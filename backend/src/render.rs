//! HTML rendering of a normalized table.
//!
//! Missing values show the `—` glyph with an "Information unavailable!"
//! tooltip. Tables without records render to nothing, like the page
//! which only shows the table once data is loaded.

use std::fmt::Write as _;

use crate::normalize::{Table, SENTINEL};

/// Tooltip on missing cells.
pub const UNAVAILABLE_TOOLTIP: &str = "Information unavailable!";

/// Escape text for use in HTML content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn placeholder_cell() -> String {
    format!(
        r#"<span class="placeholder" title="{}">{}</span>"#,
        UNAVAILABLE_TOOLTIP, SENTINEL
    )
}

/// Render the `<table>` element, or an empty string for an empty table.
pub fn render_table(table: &Table) -> String {
    if table.is_empty() {
        return String::new();
    }

    let mut html = String::from("<table class=\"data-table\">\n  <thead>\n    <tr>");
    for header in table.headers() {
        let _ = write!(html, "<th>{}</th>", escape_html(header));
    }
    html.push_str("</tr>\n  </thead>\n  <tbody>\n");

    for record in table.records() {
        html.push_str("    <tr>");
        for i in 0..table.headers().len() {
            let content = match record.cell(i) {
                Some(value) => escape_html(value),
                None => placeholder_cell(),
            };
            let _ = write!(html, "<td>{}</td>", content);
        }
        html.push_str("</tr>\n");
    }

    html.push_str("  </tbody>\n</table>\n");
    html
}

const PAGE_STYLE: &str = "\
body { background: #fffbeb; font-family: sans-serif; padding: 3rem 1.5rem; }
h1 { font-weight: 300; color: #1f2937; border-bottom: 2px solid #fde68a; display: inline-block; }
.data-table { min-width: 100%; border-collapse: collapse; }
.data-table th { text-align: left; color: #78350f; padding: 1.25rem; }
.data-table td { color: #374151; padding: 1.25rem; }
.data-table tr:nth-child(even) { background: #fef9ee; }
.placeholder { color: #9ca3af; cursor: help; }
";

/// Render a standalone HTML document around the table.
pub fn render_page(table: &Table, title: &str) -> String {
    let title = escape_html(title);
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>\n{style}</style>\n</head>\n<body>\n\
         <h1>{title}</h1>\n{table}</body>\n</html>\n",
        title = title,
        style = PAGE_STYLE,
        table = render_table(table),
    )
}
