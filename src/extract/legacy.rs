//! Line-oriented `profile.txt` exports.
//!
//! ```text
//! Intro ↯
//! =======
//! Text: Designer and photographer based in Oslo.
//!
//! Social Media ↯
//! ==============
//! https://github.com/alice
//! https://instagram.com/alice
//! ```
//!
//! Three productions are recognized per (trimmed) line:
//!
//! - **Section header**: contains `↯`, or is followed by a line made only of
//!   `=`/`-`. The underline, if any, is consumed with the header.
//! - **Text**: starts with `Text:`; the remainder becomes a 2x1 text block.
//! - **URL**: a bare `http://` or `https://` URL, classified by platform.
//!
//! Anything else is skipped. A section stays active until the next header.

use super::BYTE_ORDER_MARK;
use crate::block::{text_content, BlockType, NormalizedBlock, ParseResult};
use crate::classify;

/// Glyph marking a section header line.
pub const SECTION_MARKER: char = '↯';

const TEXT_PREFIX: &str = "Text:";

/// Parse a `profile.txt` document. Never fails; unrecognized lines are skipped.
pub fn extract_legacy_text(content: &str) -> ParseResult {
    let lines: Vec<&str> = content.split('\n').collect();
    let mut blocks = Vec::new();
    let mut current_section = String::new();

    let mut i = 0;
    while i < lines.len() {
        let line = trim_line(lines[i]);
        let underlined = lines.get(i + 1).is_some_and(|next| is_underline(trim_line(next)));
        i += 1;

        if line.is_empty() {
            continue;
        }

        if line.contains(SECTION_MARKER) || underlined {
            current_section = line.replacen(SECTION_MARKER, "", 1).trim().to_lowercase();
            if underlined {
                i += 1;
            }
            tracing::debug!("Section: {:?}", current_section);
            continue;
        }

        if is_underline(line) {
            continue;
        }

        if let Some(rest) = line.strip_prefix(TEXT_PREFIX) {
            let text = rest.trim();
            if !text.is_empty() {
                let mut block = NormalizedBlock::at_index(BlockType::Text, blocks.len());
                block.title = Some(section_text_title(&current_section).to_string());
                block.content = Some(text_content(text.into()));
                block.grid_width = 2;
                blocks.push(block);
            }
            continue;
        }

        if line.starts_with("http://") || line.starts_with("https://") {
            let classification = classify::classify(line, &current_section);
            let mut block = NormalizedBlock::at_index(classification.block_type, blocks.len());
            block.title = Some(classification.title);
            block.url = Some(line.to_string());
            blocks.push(block);
        }
    }

    ParseResult {
        blocks,
        ..ParseResult::default()
    }
}

/// Trim whitespace and stray byte-order marks from both ends.
fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK)
}

/// A non-empty run of `=` and `-`.
fn is_underline(line: &str) -> bool {
    !line.is_empty() && line.chars().all(|c| c == '=' || c == '-')
}

/// Title for a text block in `section`.
fn section_text_title(section: &str) -> &'static str {
    match section {
        "intro" => "About Me",
        "skills" => "Skills",
        "social media" => "Social",
        "for you" => "For You",
        "photo exhibit" => "Gallery",
        "outro" => "Contact",
        _ => "Info",
    }
}
