//! External block type tags mapped onto [`BlockType`].

use crate::block::BlockType;

/// Many-to-one mapping from export type tags to block types.
const TYPE_TABLE: &[(&str, BlockType)] = &[
    ("link", BlockType::Link),
    ("url", BlockType::Link),
    ("text", BlockType::Text),
    ("note", BlockType::Text),
    ("image", BlockType::Image),
    ("photo", BlockType::Image),
    ("map", BlockType::Map),
    ("location", BlockType::Map),
    ("spotify", BlockType::Spotify),
    ("music", BlockType::Spotify),
    ("youtube", BlockType::Youtube),
    ("video", BlockType::Youtube),
    ("github", BlockType::Github),
    ("twitter", BlockType::Twitter),
    ("x", BlockType::Twitter),
    ("instagram", BlockType::Instagram),
    ("linkedin", BlockType::Linkedin),
    ("social", BlockType::Link),
    ("custom", BlockType::Custom),
    ("embed", BlockType::Custom),
];

/// Normalize an arbitrary type tag. Unknown tags, including `""`, become
/// [`BlockType::Custom`]. Never fails.
pub fn normalize(raw_type: &str) -> BlockType {
    let key = raw_type.trim().to_lowercase();
    TYPE_TABLE
        .iter()
        .find(|(tag, _)| *tag == key)
        .map_or(BlockType::Custom, |(_, ty)| *ty)
}
