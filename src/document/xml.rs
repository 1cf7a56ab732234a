//! Namespace-aware XML structural parser
//!
//! Builds a small element tree from a part's XML. Elements and attributes are
//! keyed by (namespace URI, local name) rather than by their prefixed names,
//! because producers are free to pick any prefix. Text is kept verbatim so the
//! extractors can decide how to trim.

use std::fmt;

use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{QName, ResolveResult};
use thiserror::Error;

/// Deepest element nesting accepted before the document is rejected.
pub const MAX_DEPTH: usize = 1024;

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Reasons a part is rejected as malformed XML.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} (at byte {position})")]
pub struct XmlError {
    pub message: String,
    pub position: usize,
}

/// A namespace-qualified name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    /// Namespace URI, or `None` for names in no namespace.
    pub namespace: Option<String>,
    pub local: String,
}

impl QualifiedName {
    pub fn is(&self, namespace: &str, local: &str) -> bool {
        self.local == local && self.namespace.as_deref() == Some(namespace)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{ns}}}{}", self.local),
            None => write!(f, "{}", self.local),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: QualifiedName,
    pub value: String,
}

/// One parsed element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub name: QualifiedName,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
    /// Concatenation of the element's own text and CDATA children.
    pub text: String,
}

impl Node {
    fn new(name: QualifiedName, attributes: Vec<Attribute>) -> Self {
        Self {
            name,
            attributes,
            children: Vec::new(),
            text: String::new(),
        }
    }

    /// Look up an attribute value by qualified name.
    pub fn attribute(&self, namespace: Option<&str>, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.local == local && a.name.namespace.as_deref() == namespace)
            .map(|a| a.value.as_str())
    }

    /// Child elements with the given qualified name.
    pub fn children_named<'a>(
        &'a self,
        namespace: &'a str,
        local: &'a str,
    ) -> impl Iterator<Item = &'a Node> + 'a {
        self.children.iter().filter(move |c| c.name.is(namespace, local))
    }
}

/// Parse a complete XML document into its root element.
pub fn parse(bytes: &[u8]) -> Result<Node, XmlError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

    let mut reader = NsReader::from_reader(bytes);
    reader.trim_text(false);
    reader.check_end_names(true);

    let mut buf = Vec::new();
    let mut stack: Vec<Node> = Vec::new();
    let mut root: Option<Node> = None;
    let mut first_event = true;

    loop {
        let position = reader.buffer_position();
        let fail = |message: String| XmlError { message, position };

        let event = reader.read_event_into(&mut buf);
        let at_start = std::mem::replace(&mut first_event, false);

        match event {
            Ok(Event::Start(e)) => {
                if root.is_some() {
                    return Err(fail("multiple root elements".to_string()));
                }
                if stack.len() >= MAX_DEPTH {
                    return Err(fail(format!("elements nested deeper than {MAX_DEPTH}")));
                }
                let node = open_element(&reader, &e).map_err(fail)?;
                stack.push(node);
            }
            Ok(Event::Empty(e)) => {
                if root.is_some() {
                    return Err(fail("multiple root elements".to_string()));
                }
                let node = open_element(&reader, &e).map_err(fail)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(node),
                    None => root = Some(node),
                }
            }
            Ok(Event::End(e)) => {
                let Some(node) = stack.pop() else {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    return Err(fail(format!("unexpected closing tag </{name}>")));
                };
                match stack.last_mut() {
                    Some(parent) => parent.children.push(node),
                    None => root = Some(node),
                }
            }
            Ok(Event::Text(e)) => {
                if contains(&e, b"]]>") {
                    return Err(fail("']]>' in character data".to_string()));
                }
                let text = e
                    .unescape()
                    .map_err(|err| fail(format!("invalid character data: {err}")))?;
                check_chars(&text).map_err(fail)?;
                match stack.last_mut() {
                    Some(node) => node.text.push_str(&text),
                    None if text.trim().is_empty() => {}
                    None => return Err(fail("text outside the root element".to_string())),
                }
            }
            Ok(Event::CData(e)) => {
                let inner = e.into_inner();
                let text = std::str::from_utf8(&inner)
                    .map_err(|err| fail(format!("invalid UTF-8 in CDATA: {err}")))?;
                check_chars(text).map_err(fail)?;
                match stack.last_mut() {
                    Some(node) => node.text.push_str(text),
                    None => return Err(fail("CDATA outside the root element".to_string())),
                }
            }
            Ok(Event::Decl(_)) if !at_start => {
                return Err(fail("XML declaration after the start of the document".to_string()));
            }
            Ok(Event::Eof) => break,
            Ok(_) => {
                // Declarations, comments, processing instructions and DTDs
                // carry no content.
            }
            Err(e) => return Err(fail(e.to_string())),
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(XmlError {
            message: format!("unterminated element <{}>", open.name),
            position: reader.buffer_position(),
        });
    }

    root.ok_or_else(|| XmlError {
        message: "document has no root element".to_string(),
        position: reader.buffer_position(),
    })
}

fn open_element(reader: &NsReader<&[u8]>, start: &BytesStart<'_>) -> Result<Node, String> {
    check_qname(start.name())?;
    let (resolved, local) = reader.resolve_element(start.name());
    let name = qualified_name(resolved, local.as_ref(), start.name())?;

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| format!("invalid attribute: {e}"))?;
        check_qname(attr.key)?;
        if attr.value.contains(&b'<') {
            return Err(format!(
                "'<' in value of attribute '{}'",
                String::from_utf8_lossy(attr.key.as_ref())
            ));
        }
        let key = attr.key.as_ref();
        if key == b"xmlns" || key.starts_with(b"xmlns:") {
            continue;
        }

        let (resolved, local) = reader.resolve_attribute(attr.key);
        let name = qualified_name(resolved, local.as_ref(), attr.key)?;
        let value = attr
            .unescape_value()
            .map_err(|e| format!("invalid attribute value: {e}"))?;
        check_chars(&value)?;

        if attributes.iter().any(|a: &Attribute| a.name == name) {
            return Err(format!("duplicate attribute {name}"));
        }
        attributes.push(Attribute {
            name,
            value: value.into_owned(),
        });
    }

    Ok(Node::new(name, attributes))
}

fn qualified_name(
    resolved: ResolveResult<'_>,
    local: &[u8],
    raw: QName<'_>,
) -> Result<QualifiedName, String> {
    let namespace = match resolved {
        ResolveResult::Bound(ns) => Some(
            std::str::from_utf8(ns.as_ref())
                .map_err(|e| format!("invalid UTF-8 in namespace URI: {e}"))?
                .to_string(),
        ),
        ResolveResult::Unbound => None,
        // The `xml` prefix is bound by definition and never declared.
        ResolveResult::Unknown(prefix) if prefix == b"xml" => Some(XML_NAMESPACE.to_string()),
        ResolveResult::Unknown(prefix) => {
            return Err(format!(
                "undeclared namespace prefix '{}' on '{}'",
                String::from_utf8_lossy(&prefix),
                String::from_utf8_lossy(raw.as_ref())
            ));
        }
    };

    let local = std::str::from_utf8(local)
        .map_err(|e| format!("invalid UTF-8 in name: {e}"))?
        .to_string();

    Ok(QualifiedName { namespace, local })
}

/// Require `prefix:local` or `local`, both parts being NCNames.
fn check_qname(name: QName<'_>) -> Result<(), String> {
    let raw = name.as_ref();
    let valid = std::str::from_utf8(raw).is_ok_and(|name| {
        let mut parts = name.split(':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(local), None, _) => is_ncname(local),
            (Some(prefix), Some(local), None) => is_ncname(prefix) && is_ncname(local),
            _ => false,
        }
    });
    if valid {
        Ok(())
    } else {
        Err(format!("invalid name '{}'", String::from_utf8_lossy(raw)))
    }
}

fn is_ncname(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(is_name_start_char) && chars.all(is_name_char)
}

fn is_name_start_char(c: char) -> bool {
    matches!(c,
        'A'..='Z' | '_' | 'a'..='z'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}'
            | '\u{300}'..='\u{36F}'
            | '\u{203F}'..='\u{2040}')
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

/// Reject characters outside the XML 1.0 `Char` production.
fn check_chars(text: &str) -> Result<(), String> {
    match text.chars().find(|&c| !is_xml_char(c)) {
        Some(c) => Err(format!("invalid character U+{:04X}", c as u32)),
        None => Ok(()),
    }
}

fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\u{9}' | '\u{A}' | '\u{D}'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}
