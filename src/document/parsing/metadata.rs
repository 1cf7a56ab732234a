//! Core properties extraction
//!
//! Core properties live in `docProps/core.xml` and use Dublin Core element
//! names plus a few OPC-specific ones:
//!
//! ```xml
//! <cp:coreProperties xmlns:cp="..." xmlns:dc="..." xmlns:dcterms="...">
//!   <dc:title>Quarterly Report</dc:title>
//!   <dc:creator>Jane Doe</dc:creator>
//!   <dcterms:created xsi:type="dcterms:W3CDTF">2024-01-15T10:30:00Z</dcterms:created>
//! </cp:coreProperties>
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::super::models::CoreMetadata;
use super::super::xml::Node;
use super::namespace::{CORE_PROPERTIES, DUBLIN_CORE, DUBLIN_CORE_TERMS};

/// Map the known core property elements onto a [`CoreMetadata`] record.
///
/// A missing part yields the all-absent record. Unknown elements are ignored
/// and an unparsable timestamp only drops that one field.
pub(crate) fn extract_metadata(core: Option<&Node>) -> CoreMetadata {
    let mut metadata = CoreMetadata::default();
    let Some(core) = core else {
        return metadata;
    };

    for element in &core.children {
        let name = &element.name;
        if name.is(DUBLIN_CORE, "title") {
            metadata.title = text_value(element);
        } else if name.is(DUBLIN_CORE, "creator") {
            metadata.author = text_value(element);
        } else if name.is(DUBLIN_CORE, "subject") {
            metadata.subject = text_value(element);
        } else if name.is(CORE_PROPERTIES, "keywords") {
            metadata.keywords = text_value(element);
        } else if name.is(DUBLIN_CORE_TERMS, "created") {
            metadata.created = date_value(element);
        } else if name.is(DUBLIN_CORE_TERMS, "modified") {
            metadata.modified = date_value(element);
        }
    }

    metadata
}

fn text_value(element: &Node) -> Option<String> {
    let text = element.text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

fn date_value(element: &Node) -> Option<DateTime<Utc>> {
    let text = text_value(element)?;
    let parsed = parse_w3cdtf(&text);
    if parsed.is_none() {
        log::warn!(
            "ignoring unparsable timestamp {text:?} in core property '{}'",
            element.name.local
        );
    }
    parsed
}

/// Parse a W3CDTF timestamp, the ISO 8601 profile used by core properties.
///
/// Supports:
/// - 2024-01-15T10:30:00Z, 2024-01-15T10:30:00.123+02:00 (RFC 3339)
/// - 2024-01-15T10:30:00 and 2024-01-15T10:30 (no offset, taken as UTC)
/// - 2024-01-15, 2024-01 and 2024 (midnight UTC on the first day)
pub(crate) fn parse_w3cdtf(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    // Offset-less forms; a trailing Z without seconds is also seen in the wild.
    let naive = s.strip_suffix('Z').unwrap_or(s);
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, format) {
            return Some(dt.and_utc());
        }
    }

    let date = match s.len() {
        10 => NaiveDate::parse_from_str(s, "%Y-%m-%d").ok(),
        7 => NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d").ok(),
        4 if s.bytes().all(|b| b.is_ascii_digit()) => {
            NaiveDate::parse_from_str(&format!("{s}-01-01"), "%Y-%m-%d").ok()
        }
        _ => None,
    }?;

    date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc())
}
