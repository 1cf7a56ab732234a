//! Paragraph text extraction
//!
//! Walks the main document tree and produces one string per body paragraph,
//! in document order. Paragraphs that live inside tables are left to the
//! table extractor so cell text is never reported twice.

use super::super::xml::Node;
use super::{ElementKind, is_wml, wml_attribute};

/// Collect the text of every paragraph outside of tables, in document order.
pub(crate) fn extract_paragraphs(root: &Node) -> Vec<String> {
    let mut paragraphs = Vec::new();
    collect_paragraphs(root, &mut paragraphs);
    paragraphs
}

/// Pre-order walk that records paragraphs and stops at tables.
///
/// Also used by the table extractor on a single cell, where stopping at
/// tables keeps nested table content out of the outer cell.
pub(crate) fn collect_paragraphs(node: &Node, out: &mut Vec<String>) {
    match ElementKind::of(node) {
        ElementKind::Table | ElementKind::Fallback => {}
        ElementKind::Paragraph => {
            out.push(paragraph_text(node));
            // Text boxes carry paragraphs of their own inside the host paragraph.
            for child in &node.children {
                collect_paragraphs(child, out);
            }
        }
        _ => {
            for child in &node.children {
                collect_paragraphs(child, out);
            }
        }
    }
}

/// Concatenated run content of one paragraph, excluding nested paragraphs.
pub(crate) fn paragraph_text(paragraph: &Node) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        push_runs(child, &mut text);
    }
    text
}

fn push_runs(node: &Node, text: &mut String) {
    match ElementKind::of(node) {
        ElementKind::Run => push_run_content(node, text),
        ElementKind::Paragraph | ElementKind::Table | ElementKind::Fallback => {}
        _ => {
            // Hyperlinks, insertions, fields, smart tags and content controls
            // wrap runs without changing the text.
            for child in &node.children {
                push_runs(child, text);
            }
        }
    }
}

fn push_run_content(run: &Node, text: &mut String) {
    for child in &run.children {
        if is_wml(child, "t") {
            text.push_str(&child.text);
        } else if is_wml(child, "tab") || is_wml(child, "ptab") {
            text.push('\t');
        } else if is_wml(child, "br") {
            if !matches!(wml_attribute(child, "type"), Some("page" | "column")) {
                text.push('\n');
            }
        } else if is_wml(child, "cr") {
            text.push('\n');
        } else if is_wml(child, "noBreakHyphen") {
            text.push('-');
        }
    }
}
