//! Structural extraction of JSON exports.
//!
//! Never fails for shape reasons: a missing container yields no blocks, a
//! missing field yields its default, and a non-object entry is read as an
//! empty record. Only the container shape is checked, and that happens
//! upstream in [`super::validate`].

use serde_json::{json, Number, Value};

use super::ExportShape;
use crate::block::{auto_position, text_content, NormalizedBlock, NormalizedProfile, ParseResult, Theme};
use crate::normalize::normalize;

/// Convert a decoded JSON export into a [`ParseResult`].
pub fn extract_structural(parsed: &Value) -> ParseResult {
    let shape = ExportShape::detect(parsed);
    tracing::debug!("Export shape: {} ({} entries)", shape.label(), shape.len());

    let blocks = match shape {
        ExportShape::Blocks(entries)
        | ExportShape::Items(entries)
        | ExportShape::Widgets(entries)
        | ExportShape::BareArray(entries) => entries
            .iter()
            .enumerate()
            .map(|(index, raw)| parse_block(raw, index))
            .collect(),
        ExportShape::Links(entries) => entries
            .iter()
            .map(link_to_block)
            .enumerate()
            .map(|(index, raw)| parse_block(&raw, index))
            .collect(),
        ExportShape::Unrecognized => Vec::new(),
    };

    ParseResult {
        profile: extract_profile(parsed.get("profile")),
        blocks,
        theme: parsed
            .get("theme")
            .and_then(|theme| serde_json::from_value::<Theme>(theme.clone()).ok()),
    }
}

/// Lift a `{title, url, icon}` link entry into the block record shape.
fn link_to_block(link: &Value) -> Value {
    let field = |key: &str| link.get(key).cloned().unwrap_or(Value::Null);
    json!({
        "type": "link",
        "title": field("title"),
        "link": field("url"),
        "image": field("icon"),
    })
}

/// Map one raw record onto a [`NormalizedBlock`] at sequence `index`.
fn parse_block(raw: &Value, index: usize) -> NormalizedBlock {
    let raw_type = str_field(raw, "type").filter(|t| !t.is_empty()).unwrap_or("link");
    let mut block = NormalizedBlock::at_index(normalize(raw_type), index);

    block.title = str_field(raw, "title")
        .filter(|t| !t.is_empty())
        .or_else(|| str_field(raw, "subtitle"))
        .map(str::to_owned);
    block.content = raw
        .get("content")
        .filter(|c| is_truthy(c))
        .map(|c| text_content(c.clone()));
    block.url = str_field(raw, "link").map(str::to_owned);
    block.image_url = str_field(raw, "image").map(str::to_owned);

    if let Some(position) = raw.get("position") {
        let (auto_x, auto_y) = auto_position(index);
        block.grid_x = int_field(position, "x").unwrap_or(auto_x);
        block.grid_y = int_field(position, "y").unwrap_or(auto_y);
        block.grid_width = int_field(position, "w").unwrap_or(1);
        block.grid_height = int_field(position, "h").unwrap_or(1);
    }

    if let Some(style) = raw.get("style") {
        block.background_color = str_field(style, "backgroundColor").map(str::to_owned);
        block.text_color = str_field(style, "textColor").map(str::to_owned);
        block.border_radius = style.get("borderRadius").and_then(Value::as_number).cloned();
    }

    block
}

fn extract_profile(profile: Option<&Value>) -> NormalizedProfile {
    let Some(profile) = profile else {
        return NormalizedProfile::default();
    };
    let field = |key: &str| str_field(profile, key).map(str::to_owned);

    NormalizedProfile {
        name: field("name"),
        username: field("username"),
        bio: field("bio"),
        avatar: field("avatar"),
        location: field("location"),
    }
}

fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key)?.as_str()
}

/// Integer grid field; fractional values truncate toward zero.
#[allow(clippy::cast_possible_truncation)]
fn int_field(value: &Value, key: &str) -> Option<i64> {
    let n: &Number = value.get(key)?.as_number()?;
    n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
