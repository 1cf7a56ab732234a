//! docxtract: content extraction for Word .docx documents
//!
//! This library opens a .docx container from raw bytes, parses its main
//! document and core properties parts, and returns the body text, tables and
//! metadata as a serializable [`DocumentModel`].

pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod transport;

// Re-export commonly used types
pub use document::{
    CoreMetadata, DocumentModel, ExtractOptions, Row, Table, extract, extract_base64,
    extract_with_options,
};
pub use error::{Error, ErrorKind, Result};
pub use transport::decode_base64_payload;
