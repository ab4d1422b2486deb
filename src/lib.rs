//! `bento-import` - link-in-bio profile export importer
//!
//! Turns a profile export (a ZIP archive or a bare JSON file) into a
//! normalized grid of content blocks plus profile fields.
//!
//! # Features
//!
//! - **Format sniffing**: ZIP vs JSON by MIME type and file name
//! - **Legacy text**: section-delimited `profile.txt` exports
//! - **Any-shape JSON**: `blocks`, `items`, `widgets`, `links`, or a bare array
//! - **Platform detection**: GitHub, YouTube, Spotify, Discord and more from bare URLs
//! - **Asset inlining**: archive images rewritten to `data:` URIs
//!
//! # Example
//!
//! ```rust,no_run
//! use bento_import::{parse_file, ImportOptions};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let result = parse_file("bento-export.zip", &ImportOptions::default()).await?;
//!     println!("Imported {} blocks", result.blocks.len());
//!     Ok(())
//! }
//! ```

pub mod archive;
pub mod block;
pub mod classify;
pub mod config;
pub mod error;
pub mod extract;
pub mod import;
pub mod normalize;
pub mod persist;

pub use archive::{read_archive, ArchiveIndex};
pub use block::{BlockType, NormalizedBlock, NormalizedProfile, ParseResult, Theme};
pub use classify::{classify, Classification, UrlClassifier};
pub use config::Config;
pub use error::{ImportError, Result};
pub use extract::{
    decode_json, legacy::extract_legacy_text, parse_json_text, structural::extract_structural,
    validate, ExportShape,
};
pub use import::{parse_bytes, parse_file, FileSource, ImportOptions};
pub use normalize::normalize;

/// Version of bento-import
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
