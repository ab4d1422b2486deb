//! Import error taxonomy.
//!
//! Shape- and archive-level failures surface here and end the parse.
//! Record-level gaps and unresolved images never do; those are absorbed
//! by the extractors and the asset resolver.

use thiserror::Error;

/// Errors raised while turning an export file into a [`crate::ParseResult`].
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("No data provided")]
    NoData,

    #[error("Invalid data format - expected JSON object")]
    NotAnObject,

    #[error("Could not find blocks, items, widgets, or links in the export file")]
    UnrecognizedShape,

    /// The raw decoder diagnostic stays available as the source.
    #[error("Invalid JSON data. The export file may be corrupted.")]
    InvalidJson(#[source] serde_json::Error),

    #[error("No profile.txt or JSON data file found in the ZIP archive")]
    NoDataFile,

    #[error("{0}")]
    Zip(#[from] zip::result::ZipError),

    /// Wraps anything that went wrong while reading a ZIP export.
    #[error("Failed to parse ZIP file: {0}")]
    Archive(#[source] Box<ImportError>),

    #[error("File is {size} bytes, larger than the {limit} byte import limit")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ImportError {
    /// Wrap an error raised inside the archive path, without double-wrapping.
    pub(crate) fn in_archive(self) -> Self {
        match self {
            Self::Archive(_) => self,
            other => Self::Archive(Box::new(other)),
        }
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;
