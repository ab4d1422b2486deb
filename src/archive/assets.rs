//! Inline archive images as `data:` URIs.
//!
//! References that already start with `http` or `data:` are left alone.
//! Local references are matched against the archive's image entries, first
//! success wins:
//!
//! 1. exact path
//! 2. path under `images/`
//! 3. any entry ending with the reference's file name (case-insensitive)
//! 4. any entry whose file name without extension matches (case-insensitive)
//!
//! A reference that matches nothing, or whose entry cannot be read, is kept
//! as-is so the caller can see it was not resolved.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use super::EntryReader;
use crate::block::ParseResult;

/// Directory the reference export format stores images under.
const IMAGES_DIR: &str = "images/";

/// Find the archive entry an image reference points at.
pub fn find_image<'a>(reference: &str, images: &'a [String]) -> Option<&'a str> {
    if let Some(path) = images.iter().find(|p| *p == reference) {
        return Some(path.as_str());
    }

    let prefixed = format!("{IMAGES_DIR}{reference}");
    if let Some(path) = images.iter().find(|p| **p == prefixed) {
        return Some(path.as_str());
    }

    let name = file_name(reference);
    if name.is_empty() {
        return None;
    }

    let lower_name = name.to_lowercase();
    if let Some(path) = images
        .iter()
        .find(|p| p.ends_with(name) || p.to_lowercase().ends_with(&lower_name))
    {
        return Some(path.as_str());
    }

    let stem = strip_extension(name).to_lowercase();
    if stem.is_empty() {
        return None;
    }
    images
        .iter()
        .find(|p| strip_extension(file_name(p)).to_lowercase() == stem)
        .map(String::as_str)
}

/// MIME type for an image path, defaulting to `image/png`.
pub fn mime_for(path: &str) -> &'static str {
    let extension = path.rsplit('.').next().unwrap_or(path).to_lowercase();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "image/png",
    }
}

/// Encode bytes as a `data:<mime>;base64,<data>` URI.
pub fn to_data_uri(bytes: &[u8], path: &str) -> String {
    format!("data:{};base64,{}", mime_for(path), STANDARD.encode(bytes))
}

/// Whether a reference points into the archive rather than at a remote or
/// already-inlined image.
pub fn is_local_reference(reference: &str) -> bool {
    !reference.is_empty() && !reference.starts_with("http") && !reference.starts_with("data:")
}

/// Resolve one reference to a data URI, or `None` if it cannot be resolved.
pub fn resolve_image(
    reference: &str,
    images: &[String],
    reader: &mut dyn EntryReader,
) -> Option<String> {
    let Some(path) = find_image(reference, images) else {
        tracing::warn!("No archive image matches {:?}", reference);
        return None;
    };

    match reader.read_entry(path) {
        Ok(bytes) => {
            tracing::debug!("Resolved {:?} to {} ({} bytes)", reference, path, bytes.len());
            Some(to_data_uri(&bytes, path))
        }
        Err(e) => {
            tracing::warn!("Failed to read image {}: {}", path, e);
            None
        }
    }
}

/// Rewrite every local block image and the profile avatar to inlined data.
pub fn resolve_images(
    mut result: ParseResult,
    images: &[String],
    reader: &mut dyn EntryReader,
) -> ParseResult {
    let mut resolve = |slot: &mut Option<String>| {
        let Some(reference) = slot.as_deref().filter(|r| is_local_reference(r)) else {
            return;
        };
        if let Some(data) = resolve_image(reference, images, reader) {
            *slot = Some(data);
        }
    };

    for block in &mut result.blocks {
        resolve(&mut block.image_url);
    }
    resolve(&mut result.profile.avatar);

    result
}

/// Last path segment.
fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Drop a trailing `.ext`; names without one (or ending in `.`) are unchanged.
fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) if dot + 1 < name.len() => &name[..dot],
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::block::{BlockType, NormalizedBlock};
    use crate::error::{ImportError, Result};

    struct MapReader(HashMap<String, Vec<u8>>);

    impl EntryReader for MapReader {
        fn read_entry(&mut self, path: &str) -> Result<Vec<u8>> {
            self.0
                .get(path)
                .cloned()
                .ok_or_else(|| ImportError::Io(std::io::Error::other(format!("missing {path}"))))
        }
    }

    fn paths(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn exact_path_wins() {
        let images = paths(&["images/a.png", "a.png"]);
        assert_eq!(find_image("a.png", &images), Some("a.png"));
    }

    #[test]
    fn images_prefix_beats_generic_suffix() {
        let images = paths(&["other/avatar.png", "images/avatar.png"]);
        assert_eq!(find_image("avatar.png", &images), Some("images/avatar.png"));
    }

    #[test]
    fn suffix_match_ignores_directories_and_case() {
        let images = paths(&["export/media/Photo.JPG"]);
        assert_eq!(find_image("/uploads/photo.jpg", &images), Some("export/media/Photo.JPG"));
    }

    #[test]
    fn stem_match_ignores_extension() {
        let images = paths(&["images/logo.webp"]);
        assert_eq!(find_image("assets/LOGO.png", &images), Some("images/logo.webp"));
    }

    #[test]
    fn unmatched_and_degenerate_references() {
        let images = paths(&["images/a.png"]);
        assert_eq!(find_image("b.png", &images), None);
        assert_eq!(find_image("dir/", &images), None);
    }

    #[test]
    fn mime_table_with_png_default() {
        assert_eq!(mime_for("a.png"), "image/png");
        assert_eq!(mime_for("a.JPG"), "image/jpeg");
        assert_eq!(mime_for("a.jpeg"), "image/jpeg");
        assert_eq!(mime_for("a.gif"), "image/gif");
        assert_eq!(mime_for("a.webp"), "image/webp");
        assert_eq!(mime_for("a.svg"), "image/svg+xml");
        assert_eq!(mime_for("a.bmp"), "image/png");
        assert_eq!(mime_for("noext"), "image/png");
    }

    #[test]
    fn data_uri_format() {
        assert_eq!(to_data_uri(b"hi", "x.svg"), "data:image/svg+xml;base64,aGk=");
    }

    #[test]
    fn only_local_references_are_resolved() {
        assert!(is_local_reference("images/a.png"));
        assert!(!is_local_reference("https://cdn.example/a.png"));
        assert!(!is_local_reference("http://cdn.example/a.png"));
        assert!(!is_local_reference("data:image/png;base64,AAAA"));
        assert!(!is_local_reference(""));
    }

    #[test]
    fn resolve_images_rewrites_local_refs_and_keeps_the_rest() {
        let images = paths(&["images/a.png"]);
        let mut reader = MapReader(HashMap::from([("images/a.png".to_string(), b"hi".to_vec())]));

        let mut local = NormalizedBlock::at_index(BlockType::Image, 0);
        local.image_url = Some("a.png".into());
        let mut remote = NormalizedBlock::at_index(BlockType::Image, 1);
        remote.image_url = Some("https://cdn.example/b.png".into());
        let mut missing = NormalizedBlock::at_index(BlockType::Image, 2);
        missing.image_url = Some("missing.png".into());

        let mut result = ParseResult {
            blocks: vec![local, remote, missing],
            ..ParseResult::default()
        };
        result.profile.avatar = Some("images/a.png".into());

        let result = resolve_images(result, &images, &mut reader);
        assert_eq!(result.blocks[0].image_url.as_deref(), Some("data:image/png;base64,aGk="));
        assert_eq!(result.blocks[1].image_url.as_deref(), Some("https://cdn.example/b.png"));
        assert_eq!(result.blocks[2].image_url.as_deref(), Some("missing.png"));
        assert_eq!(result.profile.avatar.as_deref(), Some("data:image/png;base64,aGk="));
    }

    #[test]
    fn unreadable_entry_leaves_reference_in_place() {
        let images = paths(&["images/a.png"]);
        let mut reader = MapReader(HashMap::new());
        assert_eq!(resolve_image("a.png", &images, &mut reader), None);
    }
}
