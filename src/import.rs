//! Import entry points.
//!
//! A file is sniffed by MIME type and name: ZIP exports go through
//! [`crate::archive`], anything else is read as JSON text. Each call is
//! stateless; the archive index lives only for the duration of one parse.

use std::path::{Path, PathBuf};

use crate::archive::read_archive;
use crate::block::ParseResult;
use crate::error::{ImportError, Result};
use crate::extract::parse_json_text;

const ZIP_MIME_TYPES: [&str; 2] = ["application/zip", "application/x-zip-compressed"];

/// Name and declared MIME type of an uploaded file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSource {
    pub name: String,
    pub mime: Option<String>,
}

impl FileSource {
    pub fn new(name: impl Into<String>, mime: Option<String>) -> Self {
        Self {
            name: name.into(),
            mime,
        }
    }

    /// Describe a file on disk. The MIME type is left undeclared.
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { name, mime: None }
    }

    /// Whether this file should be opened as a ZIP archive.
    pub fn is_archive(&self) -> bool {
        let zip_mime = self.mime.as_deref().is_some_and(|mime| {
            let mime = mime.split(';').next().unwrap_or(mime).trim().to_lowercase();
            ZIP_MIME_TYPES.contains(&mime.as_str())
        });
        zip_mime || self.name.to_lowercase().ends_with(".zip")
    }
}

/// Per-call import policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportOptions {
    /// Reject files larger than this many bytes. `None` means unlimited.
    pub max_file_bytes: Option<u64>,
    /// Declared MIME type, checked in addition to name-based sniffing.
    pub mime: Option<String>,
}

/// Fail with [`ImportError::FileTooLarge`] if `size` exceeds `limit`.
pub fn check_size(size: u64, limit: Option<u64>) -> Result<()> {
    match limit {
        Some(limit) if size > limit => Err(ImportError::FileTooLarge { size, limit }),
        _ => Ok(()),
    }
}

/// Parse an in-memory file.
pub fn parse_bytes(bytes: Vec<u8>, source: &FileSource) -> Result<ParseResult> {
    let result = if source.is_archive() {
        tracing::debug!("Parsing {} as ZIP archive", source.name);
        read_archive(bytes)?
    } else {
        tracing::debug!("Parsing {} as JSON", source.name);
        parse_json_text(&String::from_utf8_lossy(&bytes))?
    };

    tracing::info!(
        "Parsed {}: {} blocks, profile {}",
        source.name,
        result.blocks.len(),
        if result.profile.is_empty() { "absent" } else { "present" }
    );
    Ok(result)
}

/// Read and parse a file from disk.
///
/// Reading is async; decompression and extraction run on the blocking pool.
pub async fn parse_file(path: impl Into<PathBuf>, options: &ImportOptions) -> Result<ParseResult> {
    let path = path.into();

    let size = tokio::fs::metadata(&path).await?.len();
    check_size(size, options.max_file_bytes)?;

    let bytes = tokio::fs::read(&path).await?;
    let mut source = FileSource::from_path(&path);
    source.mime.clone_from(&options.mime);

    tokio::task::spawn_blocking(move || parse_bytes(bytes, &source))
        .await
        .map_err(|e| ImportError::Io(std::io::Error::other(e)))?
}
