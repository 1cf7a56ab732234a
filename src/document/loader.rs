//! Extraction orchestration
//!
//! This module contains the entry points that run the whole pipeline:
//! 1. Open the byte buffer as a zip container
//! 2. Resolve the main document and core properties parts
//! 3. Parse each part into a structural tree
//! 4. Run the paragraph, table and metadata extractors
//! 5. Assemble the immutable [`DocumentModel`]
//!
//! Every call owns its own archive and trees, so extractions can run on any
//! number of threads at once.

use super::io::{Archive, DEFAULT_MAX_PART_SIZE};
use super::models::DocumentModel;
use super::parsing::metadata::extract_metadata;
use super::parsing::paragraph::extract_paragraphs;
use super::parsing::table::extract_tables;
use super::parts::resolve;
use super::xml::{self, Node};
use crate::error::{Error, Result};
use crate::transport::decode_base64_payload;

/// Tunables for a single extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Largest uncompressed part size accepted, in bytes.
    pub max_part_size: u64,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_part_size: DEFAULT_MAX_PART_SIZE,
        }
    }
}

/// Extract text, tables and core metadata from .docx bytes.
pub fn extract(bytes: &[u8]) -> Result<DocumentModel> {
    extract_with_options(bytes, &ExtractOptions::default())
}

/// Decode a base64 payload (optionally a `data:` URI) and extract from it.
pub fn extract_base64(payload: &str) -> Result<DocumentModel> {
    let bytes = decode_base64_payload(payload)?;
    extract(&bytes)
}

pub fn extract_with_options(bytes: &[u8], options: &ExtractOptions) -> Result<DocumentModel> {
    let mut archive = Archive::open(bytes, options.max_part_size)?;
    let parts = resolve(&mut archive)?;

    let body = read_xml_part(&mut archive, &parts.main_document)?;
    let core = match parts.core_properties.as_deref() {
        Some(name) => read_optional_xml_part(&mut archive, name)?,
        None => None,
    };

    let paragraphs = extract_paragraphs(&body);
    let tables = extract_tables(&body);
    let metadata = extract_metadata(core.as_ref());

    let model = DocumentModel::assemble(paragraphs, tables, metadata);
    log::debug!(
        "extracted {} paragraphs and {} tables from '{}'",
        model.paragraph_count(),
        model.table_count(),
        parts.main_document
    );
    Ok(model)
}

fn read_xml_part(archive: &mut Archive<'_>, name: &str) -> Result<Node> {
    let bytes = archive.read(name)?;
    parse_part(name, &bytes)
}

/// Like [`read_xml_part`], but a part with no content is treated as absent.
fn read_optional_xml_part(archive: &mut Archive<'_>, name: &str) -> Result<Option<Node>> {
    let bytes = archive.read(name)?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        log::debug!("part '{name}' is empty");
        return Ok(None);
    }
    parse_part(name, &bytes).map(Some)
}

fn parse_part(name: &str, bytes: &[u8]) -> Result<Node> {
    xml::parse(bytes).map_err(|e| Error::MalformedXml {
        part: name.to_string(),
        reason: e.to_string(),
    })
}
