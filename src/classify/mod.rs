//! Platform detection for bare URLs.
//!
//! Infers which block type a URL should render as and derives a readable
//! title from its path. Used by the legacy text extractor, where every
//! link is just a URL on its own line.
//!
//! # Architecture
//!
//! - [`PlatformMatcher`]: one platform's domain check and title derivation
//! - [`UrlClassifier`]: checks matchers in a fixed order, first match wins
//! - [`Classification`]: the resulting type and title
//!
//! A URL no matcher accepts is a plain [`BlockType::Link`] titled after the
//! section it appeared in.
//!
//! # Example
//!
//! ```rust
//! use bento_import::classify::UrlClassifier;
//! use bento_import::BlockType;
//!
//! let classifier = UrlClassifier::new();
//! let c = classifier.classify("https://github.com/alice", "social media");
//! assert_eq!(c.block_type, BlockType::Github);
//! assert_eq!(c.title, "GitHub - alice");
//! ```

pub mod platforms;

use std::sync::LazyLock;

use crate::block::BlockType;

/// Result of classifying one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub block_type: BlockType,
    pub title: String,
}

impl Classification {
    pub fn new(block_type: BlockType, title: impl Into<String>) -> Self {
        Self {
            block_type,
            title: title.into(),
        }
    }
}

/// Domain check plus title derivation for a single platform.
pub trait PlatformMatcher: Send + Sync {
    /// Matcher name (e.g., "github", "discord").
    fn name(&self) -> &'static str;

    /// Check the lower-cased URL against this platform's domains.
    fn matches(&self, lower_url: &str) -> bool;

    /// Derive type and title. `url` keeps its original case; handle
    /// extraction that fails degrades to a generic platform title.
    fn classify(&self, url: &str, lower_url: &str) -> Classification;
}

/// Checks platform matchers in priority order.
///
/// Matching is by domain substring, not by confidence, so the order of
/// registration decides which platform a URL lands on.
pub struct UrlClassifier {
    matchers: Vec<Box<dyn PlatformMatcher>>,
}

impl UrlClassifier {
    /// Create a classifier with every supported platform.
    pub fn new() -> Self {
        let matchers: Vec<Box<dyn PlatformMatcher>> = vec![
            Box::new(platforms::GitHub),
            Box::new(platforms::Fixed::FIGMA),
            Box::new(platforms::Fixed::YOUTUBE),
            Box::new(platforms::Instagram),
            Box::new(platforms::Twitch),
            Box::new(platforms::Facebook),
            Box::new(platforms::Twitter),
            Box::new(platforms::Fixed::LINKEDIN),
            Box::new(platforms::Spotify),
            Box::new(platforms::Steam),
            Box::new(platforms::Discord),
            Box::new(platforms::Fixed::SHUTTERSTOCK),
            Box::new(platforms::Fixed::GOOGLE_MAPS),
        ];

        Self { matchers }
    }

    /// Classify `url`, using `section` (lower-cased section label) to
    /// title links that match no platform.
    pub fn classify(&self, url: &str, section: &str) -> Classification {
        let lower_url = url.to_lowercase();

        for matcher in &self.matchers {
            if matcher.matches(&lower_url) {
                tracing::debug!("Matched platform {} for {}", matcher.name(), url);
                return matcher.classify(url, &lower_url);
            }
        }

        Classification::new(BlockType::Link, section_link_title(section))
    }
}

impl Default for UrlClassifier {
    fn default() -> Self {
        Self::new()
    }
}

static DEFAULT_CLASSIFIER: LazyLock<UrlClassifier> = LazyLock::new(UrlClassifier::new);

/// Classify with the shared default classifier.
pub fn classify(url: &str, section: &str) -> Classification {
    DEFAULT_CLASSIFIER.classify(url, section)
}

/// Title for an unrecognized link, based on the section it sits in.
fn section_link_title(section: &str) -> &'static str {
    match section {
        "social media" => "Social Link",
        "skills" => "Portfolio",
        "photo exhibit" => "Gallery",
        _ => "Link",
    }
}
