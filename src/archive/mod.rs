//! ZIP export reading.
//!
//! One pass over the entry names partitions the archive into text, JSON and
//! image paths ([`ArchiveIndex`]). Exactly one data file is then consulted:
//!
//! 1. a `.txt` entry whose path mentions `profile` (legacy text format)
//! 2. otherwise a JSON entry, preferring well-known export file names
//! 3. otherwise the archive is rejected
//!
//! Image references in the result are then inlined by [`assets`].

pub mod assets;

use std::io::{Cursor, Read};

use zip::ZipArchive;

use crate::block::ParseResult;
use crate::error::{ImportError, Result};
use crate::extract::{legacy, parse_json_text};

/// File names preferred when an archive holds several JSON entries, in order.
pub const JSON_PRIORITY: [&str; 5] = [
    "data.json",
    "export.json",
    "bento.json",
    "profile.json",
    "backup.json",
];

const IMAGE_EXTENSIONS: [&str; 6] = [".png", ".jpg", ".jpeg", ".gif", ".webp", ".svg"];

/// Bucket an archive entry falls into, by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Text,
    Json,
    Image,
    Other,
}

impl EntryKind {
    /// Classify a path by its extension, ignoring case.
    pub fn of(path: &str) -> Self {
        let lower = path.to_lowercase();
        if lower.ends_with(".txt") {
            Self::Text
        } else if lower.ends_with(".json") {
            Self::Json
        } else if IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
            Self::Image
        } else {
            Self::Other
        }
    }
}

/// Entry paths of one archive, partitioned by kind. Archive order is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveIndex {
    pub text: Vec<String>,
    pub json: Vec<String>,
    pub images: Vec<String>,
}

impl ArchiveIndex {
    /// Partition entry paths in a single fold.
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        paths.into_iter().fold(Self::default(), |mut index, path| {
            let path = path.into();
            match EntryKind::of(&path) {
                EntryKind::Text => index.text.push(path),
                EntryKind::Json => index.json.push(path),
                EntryKind::Image => index.images.push(path),
                EntryKind::Other => {}
            }
            index
        })
    }

    /// First text entry whose path mentions `profile`.
    pub fn profile_text(&self) -> Option<&str> {
        self.text
            .iter()
            .find(|path| path.to_lowercase().contains("profile"))
            .map(String::as_str)
    }

    /// The JSON entry to read: first match of [`JSON_PRIORITY`], else the
    /// first JSON entry in the archive.
    pub fn primary_json(&self) -> Option<&str> {
        JSON_PRIORITY
            .iter()
            .find_map(|name| {
                self.json
                    .iter()
                    .find(|path| path.to_lowercase().ends_with(name))
            })
            .or_else(|| self.json.first())
            .map(String::as_str)
    }
}

/// Reads raw bytes of a named entry.
///
/// Implemented by [`ExportArchive`]; tests substitute an in-memory map.
pub trait EntryReader {
    fn read_entry(&mut self, path: &str) -> Result<Vec<u8>>;
}

/// An opened ZIP export plus its entry index.
pub struct ExportArchive {
    archive: ZipArchive<Cursor<Vec<u8>>>,
    index: ArchiveIndex,
}

impl ExportArchive {
    /// Open an archive held in memory and index its entries.
    pub fn open(bytes: Vec<u8>) -> Result<Self> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;

        let mut names = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let entry = archive.by_index(i)?;
            if entry.is_dir() {
                continue;
            }
            names.push(entry.name().to_string());
        }

        let index = ArchiveIndex::from_paths(names);
        tracing::debug!(
            "Archive entries: {} text, {} json, {} images",
            index.text.len(),
            index.json.len(),
            index.images.len()
        );

        Ok(Self { archive, index })
    }

    pub fn index(&self) -> &ArchiveIndex {
        &self.index
    }

    /// Read an entry as (lossy) UTF-8 text.
    pub fn read_text(&mut self, path: &str) -> Result<String> {
        let bytes = self.read_entry(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl EntryReader for ExportArchive {
    fn read_entry(&mut self, path: &str) -> Result<Vec<u8>> {
        let mut entry = self.archive.by_name(path)?;
        let mut buffer = Vec::new();
        entry.read_to_end(&mut buffer)?;
        Ok(buffer)
    }
}

/// Parse a ZIP export. Every failure is reported as an archive error.
pub fn read_archive(bytes: Vec<u8>) -> Result<ParseResult> {
    read_archive_inner(bytes).map_err(ImportError::in_archive)
}

fn read_archive_inner(bytes: Vec<u8>) -> Result<ParseResult> {
    let mut archive = ExportArchive::open(bytes)?;
    let images = archive.index().images.clone();

    if let Some(path) = archive.index().profile_text().map(str::to_owned) {
        let text = archive.read_text(&path)?;
        if !text.is_empty() {
            tracing::info!("Reading legacy profile text from {}", path);
            let result = legacy::extract_legacy_text(&text);
            return Ok(assets::resolve_images(result, &images, &mut archive));
        }
        tracing::debug!("{} is empty, trying JSON entries", path);
    }

    if let Some(path) = archive.index().primary_json().map(str::to_owned) {
        let text = archive.read_text(&path)?;
        if !text.is_empty() {
            tracing::info!("Reading JSON export from {}", path);
            let result = parse_json_text(&text)?;
            return Ok(assets::resolve_images(result, &images, &mut archive));
        }
    }

    Err(ImportError::NoDataFile)
}
