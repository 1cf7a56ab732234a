//! In-memory container access
//!
//! A .docx file is a zip archive of named parts. This module opens the raw
//! bytes as an archive and hands out part contents by name; nothing is ever
//! staged on disk.

use std::io::{Cursor, Read};

use thiserror::Error;
use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::Error;

/// Default ceiling for the uncompressed size of a single part.
pub const DEFAULT_MAX_PART_SIZE: u64 = 256 * 1024 * 1024;

// Upper bound on the buffer reserved from a part's declared size.
const PREALLOCATE_LIMIT: u64 = 1024 * 1024;

#[derive(Error, Debug)]
pub(crate) enum ArchiveError {
    #[error("{0}")]
    Malformed(String),
    #[error("part not found: {0}")]
    MissingPart(String),
}

impl From<ArchiveError> for Error {
    fn from(err: ArchiveError) -> Self {
        match err {
            ArchiveError::Malformed(reason) => Error::MalformedArchive(reason),
            ArchiveError::MissingPart(part) => Error::MissingContentPart { part },
        }
    }
}

/// A zip container opened over a borrowed byte buffer.
pub(crate) struct Archive<'a> {
    zip: ZipArchive<Cursor<&'a [u8]>>,
    names: Vec<String>,
    max_part_size: u64,
}

impl<'a> Archive<'a> {
    /// Open `bytes` as a zip archive, validating its central directory.
    pub(crate) fn open(bytes: &'a [u8], max_part_size: u64) -> Result<Self, ArchiveError> {
        let zip = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| ArchiveError::Malformed(format!("not a valid zip container: {e}")))?;

        let names = zip
            .file_names()
            .map(str::to_string)
            .collect::<Vec<_>>();

        log::debug!("opened archive with {} entries", names.len());

        Ok(Self {
            zip,
            names,
            max_part_size,
        })
    }

    /// Whether a part with this name exists.
    pub(crate) fn contains(&self, name: &str) -> bool {
        self.entry_name(name).is_some()
    }

    /// Read the full uncompressed content of a part.
    pub(crate) fn read(&mut self, name: &str) -> Result<Vec<u8>, ArchiveError> {
        let entry = self
            .entry_name(name)
            .ok_or_else(|| ArchiveError::MissingPart(normalize_name(name).to_string()))?;
        let limit = self.max_part_size;

        let file = self.zip.by_name(&entry).map_err(|e| match e {
            ZipError::FileNotFound => ArchiveError::MissingPart(entry.clone()),
            other => ArchiveError::Malformed(format!("cannot open entry '{entry}': {other}")),
        })?;

        if file.size() > limit {
            return Err(ArchiveError::Malformed(format!(
                "entry '{entry}' declares {} bytes, above the {limit} byte limit",
                file.size()
            )));
        }

        // The declared size is not trusted; cap the actual read as well.
        let mut content = Vec::with_capacity(file.size().min(PREALLOCATE_LIMIT) as usize);
        file.take(limit.saturating_add(1))
            .read_to_end(&mut content)
            .map_err(|e| ArchiveError::Malformed(format!("cannot read entry '{entry}': {e}")))?;

        if content.len() as u64 > limit {
            return Err(ArchiveError::Malformed(format!(
                "entry '{entry}' exceeds the {limit} byte limit"
            )));
        }

        log::debug!("read part '{entry}' ({} bytes)", content.len());
        Ok(content)
    }

    /// Resolve a requested part name to the stored entry name.
    ///
    /// Exact matches win; otherwise part names compare ASCII
    /// case-insensitively, as OPC part names do.
    fn entry_name(&self, name: &str) -> Option<String> {
        let wanted = normalize_name(name);
        self.names
            .iter()
            .find(|n| n.as_str() == wanted)
            .or_else(|| self.names.iter().find(|n| n.eq_ignore_ascii_case(wanted)))
            .cloned()
    }
}

fn normalize_name(name: &str) -> &str {
    name.trim_start_matches('/')
}
