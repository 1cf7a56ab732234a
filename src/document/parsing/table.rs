//! Table extraction
//!
//! Every table in the main document part is reported, including tables
//! nested inside cells. Nesting is flattened: a nested table appears as its
//! own entry right after the table that contains it, in the order the opening
//! elements occur in the document.

use super::super::models::{Row, Table};
use super::super::xml::Node;
use super::paragraph::collect_paragraphs;
use super::{ElementKind, is_wml};

/// Extract every table in document order.
pub(crate) fn extract_tables(root: &Node) -> Vec<Table> {
    let mut tables = Vec::new();
    collect_tables(root, &mut tables);
    tables
}

fn collect_tables(node: &Node, out: &mut Vec<Table>) {
    match ElementKind::of(node) {
        ElementKind::Fallback => return,
        ElementKind::Table => out.push(extract_table_data(node)),
        _ => {}
    }
    for child in &node.children {
        collect_tables(child, out);
    }
}

/// Rows of cell text for a single table element.
///
/// Rows keep whatever number of cells the markup has; merged cells are not
/// expanded and short rows are not padded.
pub(crate) fn extract_table_data(table: &Node) -> Table {
    let mut rows = Vec::new();
    for_each_structural_child(table, ElementKind::Row, &mut |row| {
        let mut cells: Row = Vec::new();
        for_each_structural_child(row, ElementKind::Cell, &mut |cell| {
            cells.push(cell_text(cell));
        });
        rows.push(cells);
    });
    rows
}

/// A cell's paragraphs joined by newlines, trimmed as a whole.
fn cell_text(cell: &Node) -> String {
    let mut paragraphs = Vec::new();
    for child in &cell.children {
        collect_paragraphs(child, &mut paragraphs);
    }
    paragraphs.join("\n").trim().to_string()
}

/// Visit the children of `parent` with the wanted kind, looking through
/// content-control and custom XML wrappers.
fn for_each_structural_child<F>(parent: &Node, wanted: ElementKind, visit: &mut F)
where
    F: FnMut(&Node),
{
    for child in &parent.children {
        let kind = ElementKind::of(child);
        if kind == wanted {
            visit(child);
        } else if is_transparent_wrapper(child) {
            for_each_structural_child(child, wanted, visit);
        }
    }
}

fn is_transparent_wrapper(node: &Node) -> bool {
    is_wml(node, "sdt") || is_wml(node, "sdtContent") || is_wml(node, "customXml")
}
