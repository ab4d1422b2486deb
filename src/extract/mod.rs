//! Export document extraction.
//!
//! Exports come in two families:
//!
//! | Format | Extractor | Entry point |
//! |--------|-----------|-------------|
//! | JSON of unknown shape | [`structural`] | [`parse_json_text`] |
//! | Section-delimited `profile.txt` | [`legacy`] | [`legacy::extract_legacy_text`] |
//!
//! JSON documents go through [`validate`] first so that an unusable shape
//! fails with an actionable message instead of an empty result.

pub mod legacy;
pub mod structural;

use serde_json::Value;

use crate::block::ParseResult;
use crate::error::{ImportError, Result};

/// Leading U+FEFF written by some editors; not valid JSON.
pub(crate) const BYTE_ORDER_MARK: char = '\u{feff}';

/// Where the block list of a JSON export lives.
///
/// Container keys are probed in declaration order; the first key holding an
/// array wins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExportShape<'a> {
    Blocks(&'a [Value]),
    Items(&'a [Value]),
    Widgets(&'a [Value]),
    /// Simple `{title, url, icon}` entries.
    Links(&'a [Value]),
    /// The document itself is the block list.
    BareArray(&'a [Value]),
    Unrecognized,
}

impl<'a> ExportShape<'a> {
    /// Detect the shape of a decoded JSON document.
    pub fn detect(parsed: &'a Value) -> Self {
        match parsed {
            Value::Array(entries) => Self::BareArray(entries),
            Value::Object(map) => {
                let array = |key: &str| map.get(key).and_then(Value::as_array);

                if let Some(entries) = array("blocks") {
                    Self::Blocks(entries)
                } else if let Some(entries) = array("items") {
                    Self::Items(entries)
                } else if let Some(entries) = array("widgets") {
                    Self::Widgets(entries)
                } else if let Some(entries) = array("links") {
                    Self::Links(entries)
                } else {
                    Self::Unrecognized
                }
            }
            _ => Self::Unrecognized,
        }
    }

    /// Container label, for logs and CLI output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Blocks(_) => "blocks",
            Self::Items(_) => "items",
            Self::Widgets(_) => "widgets",
            Self::Links(_) => "links",
            Self::BareArray(_) => "array",
            Self::Unrecognized => "unrecognized",
        }
    }

    /// Number of raw entries in the container.
    pub fn len(&self) -> usize {
        match self {
            Self::Blocks(e) | Self::Items(e) | Self::Widgets(e) | Self::Links(e) | Self::BareArray(e) => {
                e.len()
            }
            Self::Unrecognized => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Gate a decoded document before structural extraction.
///
/// Rejects falsy values (`null`, `false`, `0`, `""`), other scalars, and
/// objects with no recognized container. An empty array is accepted.
pub fn validate(parsed: &Value) -> Result<ExportShape<'_>> {
    let falsy = match parsed {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    };
    if falsy {
        return Err(ImportError::NoData);
    }

    if !parsed.is_object() && !parsed.is_array() {
        return Err(ImportError::NotAnObject);
    }

    match ExportShape::detect(parsed) {
        ExportShape::Unrecognized => Err(ImportError::UnrecognizedShape),
        shape => Ok(shape),
    }
}

/// Decode JSON export text, ignoring a leading byte-order mark.
pub fn decode_json(text: &str) -> Result<Value> {
    let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
    serde_json::from_str(text).map_err(ImportError::InvalidJson)
}

/// Decode, validate, and structurally extract a JSON export.
pub fn parse_json_text(text: &str) -> Result<ParseResult> {
    let parsed = decode_json(text)?;
    validate(&parsed)?;
    Ok(structural::extract_structural(&parsed))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn validate_rejects_unusable_documents() {
        assert!(matches!(validate(&json!({})), Err(ImportError::UnrecognizedShape)));
        assert!(matches!(validate(&Value::Null), Err(ImportError::NoData)));
        assert!(matches!(validate(&json!("a string")), Err(ImportError::NotAnObject)));
        assert!(matches!(
            validate(&json!({ "foo": [1, 2, 3] })),
            Err(ImportError::UnrecognizedShape)
        ));
    }

    #[test]
    fn validate_treats_falsy_scalars_as_missing() {
        assert!(matches!(validate(&json!(false)), Err(ImportError::NoData)));
        assert!(matches!(validate(&json!(0)), Err(ImportError::NoData)));
        assert!(matches!(validate(&json!("")), Err(ImportError::NoData)));
        assert!(matches!(validate(&json!(true)), Err(ImportError::NotAnObject)));
        assert!(matches!(validate(&json!(42)), Err(ImportError::NotAnObject)));
    }

    #[test]
    fn validate_accepts_known_containers() {
        assert!(matches!(validate(&json!({ "blocks": [] })), Ok(ExportShape::Blocks(_))));
        assert!(matches!(
            validate(&json!({ "items": [{ "type": "link" }] })),
            Ok(ExportShape::Items(_))
        ));
        assert!(matches!(validate(&json!([])), Ok(ExportShape::BareArray(_))));
    }

    #[test]
    fn container_must_be_an_array() {
        let doc = json!({ "blocks": "nope", "widgets": [{}] });
        assert_eq!(ExportShape::detect(&doc).label(), "widgets");

        let doc = json!({ "blocks": { "0": {} } });
        assert_eq!(ExportShape::detect(&doc), ExportShape::Unrecognized);
    }

    #[test]
    fn blocks_key_takes_priority() {
        let doc = json!({
            "links": [{}, {}, {}],
            "widgets": [{}, {}],
            "items": [{}],
            "blocks": [],
        });
        let shape = ExportShape::detect(&doc);
        assert_eq!(shape.label(), "blocks");
        assert!(shape.is_empty());
    }

    #[test]
    fn parse_json_text_reports_corruption() {
        let err = parse_json_text("{\"blocks\": [").unwrap_err();
        assert!(matches!(err, ImportError::InvalidJson(_)));
        assert_eq!(
            err.to_string(),
            "Invalid JSON data. The export file may be corrupted."
        );
    }

    #[test]
    fn decode_json_ignores_leading_byte_order_mark() {
        let parsed = decode_json("\u{feff}{\"links\": []}").unwrap();
        assert_eq!(parsed, json!({ "links": [] }));
        assert!(matches!(decode_json("{\u{feff}}"), Err(ImportError::InvalidJson(_))));
    }

    #[test]
    fn parse_json_text_surfaces_shape_errors() {
        let err = parse_json_text("{\"version\": \"1\"}").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Could not find blocks, items, widgets, or links in the export file"
        );
    }

    #[test]
    fn parse_json_text_extracts_blocks() {
        let result = parse_json_text(r#"{"blocks": [{"type": "note", "content": "hi"}]}"#).unwrap();
        assert_eq!(result.blocks.len(), 1);
        assert_eq!(result.blocks[0].text(), Some("hi"));
    }
}
