//! Document extraction engine
//!
//! This module turns the raw bytes of a Word (.docx) document into a
//! [`DocumentModel`]: the body paragraphs, the tables and the core metadata.

pub(crate) mod io;
pub mod loader;
pub mod models;
pub(crate) mod parsing;
pub(crate) mod parts;
pub mod xml;

pub use io::DEFAULT_MAX_PART_SIZE;
pub use loader::{ExtractOptions, extract, extract_base64, extract_with_options};
pub use models::*;
pub use parts::{CORE_PROPERTIES_PART, MAIN_DOCUMENT_PART};
