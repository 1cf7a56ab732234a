//! Core data structures for the extraction result
//!
//! [`DocumentModel`] is the only value the engine hands back to callers. It is
//! assembled once and never modified afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cell texts of one table row, in column order.
pub type Row = Vec<String>;
/// Rows of one table, in document order.
pub type Table = Vec<Row>;

/// Document metadata from the core properties part.
///
/// Every field is independently optional: a part that omits one property (or
/// carries an unreadable timestamp) still yields the others.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
    pub subject: Option<String>,
    pub keywords: Option<String>,
}

impl CoreMetadata {
    /// Field names and display values, in serialization order.
    pub fn entries(&self) -> [(&'static str, Option<String>); 6] {
        [
            ("title", self.title.clone()),
            ("author", self.author.clone()),
            ("created", self.created.map(|dt| dt.to_rfc3339())),
            ("modified", self.modified.map(|dt| dt.to_rfc3339())),
            ("subject", self.subject.clone()),
            ("keywords", self.keywords.clone()),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.entries().iter().all(|(_, value)| value.is_none())
    }
}

/// The normalized extraction result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentModel {
    text_content: String,
    paragraph_count: usize,
    table_count: usize,
    tables: Vec<Table>,
    metadata: CoreMetadata,
}

impl DocumentModel {
    /// Combine extractor output into the final model.
    ///
    /// Paragraphs whose trimmed text is empty are dropped from both the joined
    /// text and the count; surviving paragraphs are joined untrimmed. Tables
    /// are kept as they are, empty or not.
    pub fn assemble(paragraphs: Vec<String>, tables: Vec<Table>, metadata: CoreMetadata) -> Self {
        let included: Vec<String> = paragraphs
            .into_iter()
            .filter(|p| !p.trim().is_empty())
            .collect();

        Self {
            text_content: included.join("\n"),
            paragraph_count: included.len(),
            table_count: tables.len(),
            tables,
            metadata,
        }
    }

    /// Non-empty paragraphs joined by newlines.
    pub fn text_content(&self) -> &str {
        &self.text_content
    }

    pub fn paragraph_count(&self) -> usize {
        self.paragraph_count
    }

    pub fn table_count(&self) -> usize {
        self.table_count
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn metadata(&self) -> &CoreMetadata {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_filters_empty_paragraphs() {
        let model = DocumentModel::assemble(
            vec![
                "First".to_string(),
                String::new(),
                "   ".to_string(),
                "\tSecond ".to_string(),
            ],
            vec![],
            CoreMetadata::default(),
        );

        assert_eq!(model.text_content(), "First\n\tSecond ");
        assert_eq!(model.paragraph_count(), 2);
        assert_eq!(model.table_count(), 0);
    }

    #[test]
    fn test_assemble_keeps_empty_tables() {
        let model = DocumentModel::assemble(
            vec![],
            vec![vec![], vec![vec![String::new()]]],
            CoreMetadata::default(),
        );

        assert_eq!(model.text_content(), "");
        assert_eq!(model.paragraph_count(), 0);
        assert_eq!(model.table_count(), 2);
        assert_eq!(model.tables()[1], vec![vec![String::new()]]);
    }

    #[test]
    fn test_serialized_shape() {
        let model = DocumentModel::assemble(
            vec!["Hello".to_string()],
            vec![vec![vec!["A".to_string()]]],
            CoreMetadata {
                title: Some("T".to_string()),
                ..CoreMetadata::default()
            },
        );
        let value = serde_json::to_value(&model).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "text_content": "Hello",
                "paragraph_count": 1,
                "table_count": 1,
                "tables": [[["A"]]],
                "metadata": {
                    "title": "T",
                    "author": null,
                    "created": null,
                    "modified": null,
                    "subject": null,
                    "keywords": null
                }
            })
        );
    }

    #[test]
    fn test_metadata_entries() {
        let metadata = CoreMetadata {
            author: Some("A".to_string()),
            created: DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z")
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            ..CoreMetadata::default()
        };

        let entries = metadata.entries();
        assert_eq!(entries[1], ("author", Some("A".to_string())));
        assert_eq!(entries[2], ("created", Some("2024-01-15T10:30:00+00:00".to_string())));
        assert!(!metadata.is_empty());
        assert!(CoreMetadata::default().is_empty());
    }
}
