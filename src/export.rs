//! Rendering of extraction results
//!
//! JSON output is the serde form of [`DocumentModel`]. The text report is the
//! human-readable summary printed by the command-line tool.

use std::fmt::Write;

use unicode_segmentation::UnicodeSegmentation;

use crate::document::{DocumentModel, Table};

/// Output format options
#[derive(clap::ValueEnum, serde::Serialize, serde::Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn to_json(model: &DocumentModel, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(model)
    } else {
        serde_json::to_string(model)
    }
}

pub fn to_text(model: &DocumentModel) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "=== Word Document Extraction Result ===");
    let _ = writeln!(out, "Paragraph Count: {}", model.paragraph_count());
    let _ = writeln!(out, "Table Count: {}", model.table_count());

    let _ = writeln!(out, "\n=== Metadata ===");
    for (key, value) in model.metadata().entries() {
        let _ = writeln!(out, "{key}: {}", value.as_deref().unwrap_or("None"));
    }

    let _ = writeln!(out, "\n=== Text Content ===");
    let _ = writeln!(out, "{}", model.text_content());

    if !model.tables().is_empty() {
        let _ = writeln!(out, "\n=== Tables ===");
        for (index, table) in model.tables().iter().enumerate() {
            let _ = writeln!(out, "Table {}:", index + 1);
            render_table(&mut out, table);
        }
    }

    out
}

fn render_table(out: &mut String, table: &Table) {
    let widths = column_widths(table);

    for row in table {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let cell = cell.replace('\n', " ");
                let padding = widths[i].saturating_sub(display_width(&cell));
                format!("{cell}{}", " ".repeat(padding))
            })
            .collect();
        let _ = writeln!(out, "  | {} |", cells.join(" | "));
    }
}

/// Widest cell per column; rows may have differing lengths.
fn column_widths(table: &Table) -> Vec<usize> {
    let mut widths: Vec<usize> = Vec::new();
    for row in table {
        for (i, cell) in row.iter().enumerate() {
            let width = display_width(&cell.replace('\n', " "));
            match widths.get_mut(i) {
                Some(current) => *current = (*current).max(width),
                None => widths.push(width),
            }
        }
    }
    widths
}

fn display_width(text: &str) -> usize {
    text.graphemes(true).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::CoreMetadata;

    fn sample() -> DocumentModel {
        DocumentModel::assemble(
            vec!["Hello".to_string(), String::new(), "World".to_string()],
            vec![vec![
                vec!["Name".to_string(), "Qty".to_string()],
                vec!["Café".to_string(), "12".to_string()],
                vec!["x".to_string()],
            ]],
            CoreMetadata {
                title: Some("Report".to_string()),
                ..CoreMetadata::default()
            },
        )
    }

    #[test]
    fn test_text_report() {
        let text = to_text(&sample());

        assert!(text.starts_with("=== Word Document Extraction Result ===\n"));
        assert!(text.contains("Paragraph Count: 2\n"));
        assert!(text.contains("Table Count: 1\n"));
        assert!(text.contains("title: Report\n"));
        assert!(text.contains("author: None\n"));
        assert!(text.contains("=== Text Content ===\nHello\nWorld\n"));
        assert!(text.contains("Table 1:\n"));
        assert!(text.contains("  | Name | Qty |\n"));
        assert!(text.contains("  | Café | 12  |\n"));
        assert!(text.contains("  | x    |\n"));
    }

    #[test]
    fn test_no_tables_section_without_tables() {
        let model = DocumentModel::assemble(vec!["a".to_string()], vec![], CoreMetadata::default());
        assert!(!to_text(&model).contains("=== Tables ==="));
    }

    #[test]
    fn test_json_round_trip() {
        let model = sample();
        let compact = to_json(&model, false).unwrap();
        let pretty = to_json(&model, true).unwrap();

        assert!(!compact.contains('\n'));
        assert!(pretty.contains('\n'));
        let back: DocumentModel = serde_json::from_str(&pretty).unwrap();
        assert_eq!(back, model);
    }
}
