//! In-memory .docx fixtures for the integration tests

#![allow(dead_code)]

use std::io::{Cursor, Write};

use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

pub const WML: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub const WML_STRICT: &str = "http://purl.oclc.org/ooxml/wordprocessingml/main";
pub const OFFICE_DOCUMENT_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
pub const CORE_PROPERTIES_REL: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/></Types>"#;

/// Builder for a zip container shaped like a .docx package.
pub struct DocxBuilder {
    entries: Vec<(String, Vec<u8>, CompressionMethod)>,
}

impl DocxBuilder {
    /// An archive with no entries at all.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// A minimal package whose body holds `body_inner` (the children of `w:body`).
    pub fn with_body(body_inner: &str) -> Self {
        Self::empty()
            .part("[Content_Types].xml", CONTENT_TYPES)
            .part("_rels/.rels", &package_rels("word/document.xml", Some("docProps/core.xml")))
            .part("word/document.xml", &document_xml(body_inner))
    }

    pub fn part(self, name: &str, content: &str) -> Self {
        self.part_bytes(name, content.as_bytes(), CompressionMethod::Deflated)
    }

    pub fn stored_part(self, name: &str, content: &str) -> Self {
        self.part_bytes(name, content.as_bytes(), CompressionMethod::Stored)
    }

    pub fn part_bytes(mut self, name: &str, content: &[u8], method: CompressionMethod) -> Self {
        self.entries.retain(|(existing, _, _)| existing != name);
        self.entries.push((name.to_string(), content.to_vec(), method));
        self
    }

    pub fn without(mut self, name: &str) -> Self {
        self.entries.retain(|(existing, _, _)| existing != name);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content, method) in &self.entries {
            let options = SimpleFileOptions::default().compression_method(*method);
            writer.start_file(name.as_str(), options).unwrap();
            writer.write_all(content).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }
}

pub fn document_xml(body_inner: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{WML}" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><w:body>{body_inner}<w:sectPr/></w:body></w:document>"#
    )
}

pub fn package_rels(main_target: &str, core_target: Option<&str>) -> String {
    let core = core_target
        .map(|target| {
            format!(r#"<Relationship Id="rId2" Type="{CORE_PROPERTIES_REL}" Target="{target}"/>"#)
        })
        .unwrap_or_default();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="{OFFICE_DOCUMENT_REL}" Target="{main_target}"/>{core}</Relationships>"#
    )
}

pub fn core_xml(inner: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">{inner}</cp:coreProperties>"#
    )
}

pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// A paragraph with a single run.
pub fn paragraph(text: &str) -> String {
    format!(
        r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
        escape(text)
    )
}

/// A table with one single-paragraph cell per string.
pub fn table(rows: &[&[&str]]) -> String {
    let rows: String = rows
        .iter()
        .map(|cells| {
            let cells: String = cells
                .iter()
                .map(|text| format!("<w:tc><w:tcPr/>{}</w:tc>", paragraph(text)))
                .collect();
            format!("<w:tr>{cells}</w:tr>")
        })
        .collect();
    format!("<w:tbl><w:tblPr/><w:tblGrid/>{rows}</w:tbl>")
}
