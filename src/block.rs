//! Normalized block and profile records produced by every import path.
//!
//! These types serialize with the camelCase field names the rest of the
//! profile system already uses (`gridX`, `imageUrl`, ...). Absent fields are
//! omitted rather than written as empty strings so callers can tell
//! "not provided" apart from "explicitly blank".

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Number of columns used for row-major auto placement.
pub const GRID_COLUMNS: usize = 4;

/// The fixed set of block kinds a profile grid can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockType {
    Link,
    Text,
    Image,
    Map,
    Spotify,
    Youtube,
    Github,
    Twitter,
    Instagram,
    Linkedin,
    Facebook,
    Steam,
    Discord,
    Custom,
}

impl BlockType {
    pub const ALL: [BlockType; 14] = [
        BlockType::Link,
        BlockType::Text,
        BlockType::Image,
        BlockType::Map,
        BlockType::Spotify,
        BlockType::Youtube,
        BlockType::Github,
        BlockType::Twitter,
        BlockType::Instagram,
        BlockType::Linkedin,
        BlockType::Facebook,
        BlockType::Steam,
        BlockType::Discord,
        BlockType::Custom,
    ];

    /// Wire name, e.g. `"GITHUB"`.
    pub fn as_str(self) -> &'static str {
        match self {
            BlockType::Link => "LINK",
            BlockType::Text => "TEXT",
            BlockType::Image => "IMAGE",
            BlockType::Map => "MAP",
            BlockType::Spotify => "SPOTIFY",
            BlockType::Youtube => "YOUTUBE",
            BlockType::Github => "GITHUB",
            BlockType::Twitter => "TWITTER",
            BlockType::Instagram => "INSTAGRAM",
            BlockType::Linkedin => "LINKEDIN",
            BlockType::Facebook => "FACEBOOK",
            BlockType::Steam => "STEAM",
            BlockType::Discord => "DISCORD",
            BlockType::Custom => "CUSTOM",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row-major placement for the `index`-th auto-positioned block.
///
/// Returns `(gridX, gridY)`. Distinct indices never collide.
pub fn auto_position(index: usize) -> (i64, i64) {
    let x = index % GRID_COLUMNS;
    let y = index / GRID_COLUMNS;
    (x as i64, y as i64)
}

/// One positioned content unit on a profile grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedBlock {
    #[serde(rename = "type")]
    pub block_type: BlockType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Free-form payload. Only `text` is populated today.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Remote URL, `data:` URI, or (before asset resolution) a path inside the archive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub grid_x: i64,
    pub grid_y: i64,
    pub grid_width: i64,
    pub grid_height: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<Number>,
}

impl NormalizedBlock {
    /// A 1x1 block of `block_type` at the auto position for `index`.
    pub fn at_index(block_type: BlockType, index: usize) -> Self {
        let (grid_x, grid_y) = auto_position(index);
        Self {
            block_type,
            title: None,
            content: None,
            url: None,
            image_url: None,
            grid_x,
            grid_y,
            grid_width: 1,
            grid_height: 1,
            background_color: None,
            text_color: None,
            border_radius: None,
        }
    }

    /// Text payload, if this block carries one.
    pub fn text(&self) -> Option<&str> {
        self.content.as_ref()?.get("text")?.as_str()
    }
}

/// Build a `{ "text": value }` content payload.
pub(crate) fn text_content(value: Value) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("text".to_string(), value);
    map
}

/// Profile fields recovered from an export. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl NormalizedProfile {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.username.is_none()
            && self.bio.is_none()
            && self.avatar.is_none()
            && self.location.is_none()
    }
}

/// Theme colors carried over from JSON exports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
}

/// Terminal artifact of one import: built once, then handed to persistence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    pub profile: NormalizedProfile,
    pub blocks: Vec<NormalizedBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
}
