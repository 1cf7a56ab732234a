//! Content extractors over the parsed part trees
//!
//! Each extractor walks the structural tree produced by [`super::xml`] and
//! dispatches on [`ElementKind`], the closed set of WordprocessingML elements
//! the engine cares about.

pub(crate) mod metadata;
pub(crate) mod paragraph;
pub(crate) mod table;

use super::xml::Node;

/// XML namespaces used by the parts the engine reads.
pub mod namespace {
    /// WordprocessingML main namespace (transitional).
    pub const WML: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
    /// WordprocessingML main namespace (strict).
    pub const WML_STRICT: &str = "http://purl.oclc.org/ooxml/wordprocessingml/main";
    pub const MARKUP_COMPATIBILITY: &str =
        "http://schemas.openxmlformats.org/markup-compatibility/2006";
    pub const CORE_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/package/2006/metadata/core-properties";
    pub const DUBLIN_CORE: &str = "http://purl.org/dc/elements/1.1/";
    pub const DUBLIN_CORE_TERMS: &str = "http://purl.org/dc/terms/";
    pub const RELATIONSHIPS: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships";
}

/// Structural role of an element in the main document part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ElementKind {
    Paragraph,
    Table,
    Row,
    Cell,
    Run,
    /// `mc:Fallback`, which repeats the content of its `mc:Choice` sibling.
    Fallback,
    Other,
}

impl ElementKind {
    pub(crate) fn of(node: &Node) -> Self {
        match node.name.namespace.as_deref() {
            Some(namespace::WML | namespace::WML_STRICT) => match node.name.local.as_str() {
                "p" => ElementKind::Paragraph,
                "tbl" => ElementKind::Table,
                "tr" => ElementKind::Row,
                "tc" => ElementKind::Cell,
                "r" => ElementKind::Run,
                _ => ElementKind::Other,
            },
            Some(namespace::MARKUP_COMPATIBILITY) if node.name.local == "Fallback" => {
                ElementKind::Fallback
            }
            _ => ElementKind::Other,
        }
    }
}

/// Whether `node` is the WordprocessingML element `local`, in either namespace.
pub(crate) fn is_wml(node: &Node, local: &str) -> bool {
    node.name.local == local
        && matches!(
            node.name.namespace.as_deref(),
            Some(namespace::WML | namespace::WML_STRICT)
        )
}

/// WordprocessingML attribute lookup, in either namespace.
pub(crate) fn wml_attribute<'a>(node: &'a Node, local: &str) -> Option<&'a str> {
    node.attribute(Some(namespace::WML), local)
        .or_else(|| node.attribute(Some(namespace::WML_STRICT), local))
}
