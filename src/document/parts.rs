//! Part resolution
//!
//! Locates the main document part and the core properties part inside the
//! container. Conventional paths are tried first; the package relationships
//! part (`_rels/.rels`) is consulted only when a conventional path is absent.

use super::io::Archive;
use super::parsing::namespace::RELATIONSHIPS;
use super::xml::{self, Node};
use crate::error::{Error, Result};

pub const MAIN_DOCUMENT_PART: &str = "word/document.xml";
pub const CORE_PROPERTIES_PART: &str = "docProps/core.xml";
pub const PACKAGE_RELATIONSHIPS_PART: &str = "_rels/.rels";

/// Relationship type URIs the resolver follows.
mod relationship_type {
    pub const OFFICE_DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const OFFICE_DOCUMENT_STRICT: &str =
        "http://purl.oclc.org/ooxml/officeDocument/relationships/officeDocument";
    pub const CORE_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
    // Emitted by some older producers.
    pub const CORE_PROPERTIES_LEGACY: &str =
        "http://schemas.openxmlformats.org/officedocument/2006/relationships/metadata/core-properties";
}

/// Archive entry names of the parts the extractors need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolvedParts {
    pub main_document: String,
    pub core_properties: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Relationship {
    pub id: String,
    pub reltype: String,
    pub target: String,
    pub external: bool,
}

/// Find the main document and core properties parts.
pub(crate) fn resolve(archive: &mut Archive<'_>) -> Result<ResolvedParts> {
    let mut package_rels: Option<Vec<Relationship>> = None;

    let main_document = if archive.contains(MAIN_DOCUMENT_PART) {
        MAIN_DOCUMENT_PART.to_string()
    } else {
        let rels = load_package_relationships(archive)?;
        let target = find_target(
            &rels,
            &[
                relationship_type::OFFICE_DOCUMENT,
                relationship_type::OFFICE_DOCUMENT_STRICT,
            ],
        )
        .filter(|target| archive.contains(target))
        .ok_or_else(|| Error::MissingContentPart {
            part: MAIN_DOCUMENT_PART.to_string(),
        })?;
        log::debug!("main document part resolved through relationships: {target}");
        package_rels = Some(rels);
        target
    };

    let core_properties = if archive.contains(CORE_PROPERTIES_PART) {
        Some(CORE_PROPERTIES_PART.to_string())
    } else {
        let rels = match package_rels {
            Some(rels) => rels,
            None => load_package_relationships(archive).unwrap_or_else(|err| {
                log::warn!("ignoring unreadable package relationships: {err}");
                Vec::new()
            }),
        };
        find_target(
            &rels,
            &[
                relationship_type::CORE_PROPERTIES,
                relationship_type::CORE_PROPERTIES_LEGACY,
            ],
        )
        .filter(|target| archive.contains(target))
    };

    if core_properties.is_none() {
        log::debug!("document has no core properties part");
    }

    Ok(ResolvedParts {
        main_document,
        core_properties,
    })
}

/// Read and parse `_rels/.rels`; a package without one has no relationships.
fn load_package_relationships(archive: &mut Archive<'_>) -> Result<Vec<Relationship>> {
    if !archive.contains(PACKAGE_RELATIONSHIPS_PART) {
        return Ok(Vec::new());
    }

    let bytes = archive.read(PACKAGE_RELATIONSHIPS_PART)?;
    let root = xml::parse(&bytes).map_err(|e| Error::MalformedXml {
        part: PACKAGE_RELATIONSHIPS_PART.to_string(),
        reason: e.to_string(),
    })?;

    Ok(parse_relationships(&root))
}

pub(crate) fn parse_relationships(root: &Node) -> Vec<Relationship> {
    root.children_named(RELATIONSHIPS, "Relationship")
        .filter_map(|rel| {
            Some(Relationship {
                id: rel.attribute(None, "Id")?.to_string(),
                reltype: rel.attribute(None, "Type")?.to_string(),
                target: rel.attribute(None, "Target")?.to_string(),
                external: rel.attribute(None, "TargetMode") == Some("External"),
            })
        })
        .collect()
}

/// First internal target among relationships of the given types, as a
/// package-relative entry name.
fn find_target(rels: &[Relationship], reltypes: &[&str]) -> Option<String> {
    rels.iter()
        .filter(|rel| !rel.external)
        .find(|rel| reltypes.contains(&rel.reltype.as_str()))
        .map(|rel| {
            log::debug!("following relationship {} to '{}'", rel.id, rel.target);
            normalize_target(&rel.target)
        })
}

/// Resolve a package-level relationship target to an archive entry name.
///
/// Package relationships are relative to the package root, so `.` and `..`
/// segments collapse against `/` and the leading slash is dropped.
pub(crate) fn normalize_target(target: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_target() {
        assert_eq!(normalize_target("word/document.xml"), "word/document.xml");
        assert_eq!(normalize_target("/word/document.xml"), "word/document.xml");
        assert_eq!(normalize_target("./word/../content/main.xml"), "content/main.xml");
        assert_eq!(normalize_target("../../word//doc.xml"), "word/doc.xml");
    }

    #[test]
    fn test_parse_relationships() {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
            <Relationships xmlns="{RELATIONSHIPS}">
              <Relationship Id="rId1" Type="{}" Target="word/document.xml"/>
              <Relationship Id="rId2" Type="http://example.com/link" Target="http://example.com" TargetMode="External"/>
              <Relationship Id="rId3" Type="incomplete"/>
            </Relationships>"#,
            relationship_type::OFFICE_DOCUMENT
        );
        let root = xml::parse(xml.as_bytes()).unwrap();
        let rels = parse_relationships(&root);

        assert_eq!(rels.len(), 2);
        assert_eq!(rels[0].id, "rId1");
        assert!(!rels[0].external);
        assert!(rels[1].external);
        assert_eq!(
            find_target(&rels, &[relationship_type::OFFICE_DOCUMENT]),
            Some("word/document.xml".to_string())
        );
        assert_eq!(find_target(&rels, &["http://example.com/link"]), None);
    }
}
