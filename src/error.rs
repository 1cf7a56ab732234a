//! Error taxonomy for document extraction
//!
//! Every failure aborts the whole extraction call; no partial document model
//! is ever returned alongside an error.

use thiserror::Error;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the extraction engine and its transport decoder.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The textual (base64) payload could not be decoded into bytes.
    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),

    /// The byte buffer is not a readable zip container.
    #[error("malformed archive: {0}")]
    MalformedArchive(String),

    /// The container has no resolvable main document part.
    #[error("missing content part: {part}")]
    MissingContentPart { part: String },

    /// A required part is not well-formed XML.
    #[error("malformed XML in part '{part}': {reason}")]
    MalformedXml { part: String, reason: String },
}

/// The bare error category, without any detail payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidEncoding,
    MalformedArchive,
    MissingContentPart,
    MalformedXml,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidEncoding(_) => ErrorKind::InvalidEncoding,
            Error::MalformedArchive(_) => ErrorKind::MalformedArchive,
            Error::MissingContentPart { .. } => ErrorKind::MissingContentPart,
            Error::MalformedXml { .. } => ErrorKind::MalformedXml,
        }
    }

    /// Name of the archive part the error refers to, when there is one.
    pub fn part(&self) -> Option<&str> {
        match self {
            Error::MissingContentPart { part } | Error::MalformedXml { part, .. } => Some(part),
            _ => None,
        }
    }
}
