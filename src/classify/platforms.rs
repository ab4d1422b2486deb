//! Per-platform matchers.
//!
//! Handle patterns run against the URL in its original case; domain checks
//! run against the lower-cased URL.

use std::sync::LazyLock;

use regex::Regex;

use super::{Classification, PlatformMatcher};
use crate::block::BlockType;

static GITHUB_USER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"github\.com/([^/?]+)").unwrap());
static INSTAGRAM_USER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"instagram\.com/([^/?]+)").unwrap());
static TWITCH_CHANNEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"twitch\.tv/([^/?]+)").unwrap());
static FACEBOOK_USER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"facebook\.com/(?:profile\.php\?id=)?([^/?&]+)").unwrap());
static TWITTER_USER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:twitter|x)\.com/([^/?]+)").unwrap());
static STEAM_VANITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"steamcommunity\.com/id/([^/?]+)").unwrap());
static STEAM_PROFILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"steamcommunity\.com/profiles/(\d+)").unwrap());
static DISCORD_INVITE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:discord\.gg|discord\.com/invite)/([^/?\s]+)").unwrap());
static DISCORD_USER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"discord\.com/users/(\d+)").unwrap());

/// First capture group of `re` in `url`.
fn capture<'a>(re: &Regex, url: &'a str) -> Option<&'a str> {
    re.captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Platform with a fixed type and title, no handle extraction.
pub struct Fixed {
    name: &'static str,
    domains: &'static [&'static str],
    block_type: BlockType,
    title: &'static str,
}

impl Fixed {
    pub const FIGMA: Fixed = Fixed {
        name: "figma",
        domains: &["figma.com"],
        block_type: BlockType::Link,
        title: "Figma",
    };

    pub const YOUTUBE: Fixed = Fixed {
        name: "youtube",
        domains: &["youtube.com", "youtu.be"],
        block_type: BlockType::Youtube,
        title: "YouTube",
    };

    pub const LINKEDIN: Fixed = Fixed {
        name: "linkedin",
        domains: &["linkedin.com"],
        block_type: BlockType::Linkedin,
        title: "LinkedIn",
    };

    pub const SHUTTERSTOCK: Fixed = Fixed {
        name: "shutterstock",
        domains: &["shutterstock.com"],
        block_type: BlockType::Link,
        title: "Shutterstock Portfolio",
    };

    pub const GOOGLE_MAPS: Fixed = Fixed {
        name: "google-maps",
        domains: &["google.com/maps", "maps.google"],
        block_type: BlockType::Map,
        title: "Location",
    };
}

impl PlatformMatcher for Fixed {
    fn name(&self) -> &'static str {
        self.name
    }

    fn matches(&self, lower_url: &str) -> bool {
        self.domains.iter().any(|d| lower_url.contains(d))
    }

    fn classify(&self, _url: &str, _lower_url: &str) -> Classification {
        Classification::new(self.block_type, self.title)
    }
}

pub struct GitHub;

impl PlatformMatcher for GitHub {
    fn name(&self) -> &'static str {
        "github"
    }

    fn matches(&self, lower_url: &str) -> bool {
        lower_url.contains("github.com")
    }

    fn classify(&self, url: &str, _lower_url: &str) -> Classification {
        let title = capture(&GITHUB_USER, url)
            .map_or_else(|| "GitHub".to_string(), |user| format!("GitHub - {user}"));
        Classification::new(BlockType::Github, title)
    }
}

pub struct Instagram;

impl PlatformMatcher for Instagram {
    fn name(&self) -> &'static str {
        "instagram"
    }

    fn matches(&self, lower_url: &str) -> bool {
        lower_url.contains("instagram.com")
    }

    fn classify(&self, url: &str, _lower_url: &str) -> Classification {
        let title = capture(&INSTAGRAM_USER, url)
            .map_or_else(|| "Instagram".to_string(), |user| format!("@{user}"));
        Classification::new(BlockType::Instagram, title)
    }
}

/// Twitch has no dedicated block; channels render as links.
pub struct Twitch;

impl PlatformMatcher for Twitch {
    fn name(&self) -> &'static str {
        "twitch"
    }

    fn matches(&self, lower_url: &str) -> bool {
        lower_url.contains("twitch.tv")
    }

    fn classify(&self, url: &str, _lower_url: &str) -> Classification {
        let title = capture(&TWITCH_CHANNEL, url)
            .map_or_else(|| "Twitch".to_string(), |channel| format!("Twitch - {channel}"));
        Classification::new(BlockType::Link, title)
    }
}

pub struct Facebook;

impl PlatformMatcher for Facebook {
    fn name(&self) -> &'static str {
        "facebook"
    }

    fn matches(&self, lower_url: &str) -> bool {
        lower_url.contains("facebook.com")
    }

    fn classify(&self, url: &str, _lower_url: &str) -> Classification {
        let title = capture(&FACEBOOK_USER, url).unwrap_or("Facebook");
        Classification::new(BlockType::Facebook, title)
    }
}

pub struct Twitter;

impl PlatformMatcher for Twitter {
    fn name(&self) -> &'static str {
        "twitter"
    }

    fn matches(&self, lower_url: &str) -> bool {
        lower_url.contains("twitter.com") || lower_url.contains("x.com")
    }

    fn classify(&self, url: &str, _lower_url: &str) -> Classification {
        let title = capture(&TWITTER_USER, url)
            .map_or_else(|| "Twitter".to_string(), |user| format!("@{user}"));
        Classification::new(BlockType::Twitter, title)
    }
}

pub struct Spotify;

impl PlatformMatcher for Spotify {
    fn name(&self) -> &'static str {
        "spotify"
    }

    fn matches(&self, lower_url: &str) -> bool {
        lower_url.contains("spotify.com")
    }

    fn classify(&self, _url: &str, lower_url: &str) -> Classification {
        let title = if lower_url.contains("/playlist/") {
            "Spotify Playlist"
        } else {
            "Spotify"
        };
        Classification::new(BlockType::Spotify, title)
    }
}

/// Vanity `/id/<name>` URLs win over numeric `/profiles/<id>` ones.
pub struct Steam;

impl PlatformMatcher for Steam {
    fn name(&self) -> &'static str {
        "steam"
    }

    fn matches(&self, lower_url: &str) -> bool {
        lower_url.contains("steamcommunity.com")
    }

    fn classify(&self, url: &str, _lower_url: &str) -> Classification {
        let title = capture(&STEAM_VANITY, url)
            .or_else(|| capture(&STEAM_PROFILE, url))
            .unwrap_or("Steam");
        Classification::new(BlockType::Steam, title)
    }
}

/// Invite codes (`discord.gg/<code>`, `discord.com/invite/<code>`) and
/// numeric user ids (`discord.com/users/<id>`) are disjoint patterns.
pub struct Discord;

impl PlatformMatcher for Discord {
    fn name(&self) -> &'static str {
        "discord"
    }

    fn matches(&self, lower_url: &str) -> bool {
        lower_url.contains("discord.com") || lower_url.contains("discord.gg")
    }

    fn classify(&self, url: &str, _lower_url: &str) -> Classification {
        let title = capture(&DISCORD_INVITE, url)
            .or_else(|| capture(&DISCORD_USER, url))
            .unwrap_or("Discord");
        Classification::new(BlockType::Discord, title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(matcher: &dyn PlatformMatcher, url: &str) -> Classification {
        let lower = url.to_lowercase();
        assert!(matcher.matches(&lower), "{} should match {url}", matcher.name());
        matcher.classify(url, &lower)
    }

    #[test]
    fn github_titles_with_user() {
        assert_eq!(run(&GitHub, "https://github.com/alice").title, "GitHub - alice");
        assert_eq!(
            run(&GitHub, "https://github.com/alice/repo?tab=readme").title,
            "GitHub - alice"
        );
    }

    #[test]
    fn github_degrades_without_user_segment() {
        assert_eq!(run(&GitHub, "https://github.com/").title, "GitHub");
        // Handle extraction is case-sensitive; the domain check is not
        assert_eq!(run(&GitHub, "https://GITHUB.COM/alice").title, "GitHub");
    }

    #[test]
    fn instagram_and_twitter_use_at_handles() {
        assert_eq!(run(&Instagram, "https://instagram.com/alice/").title, "@alice");
        assert_eq!(run(&Instagram, "https://instagram.com").title, "Instagram");
        assert_eq!(run(&Twitter, "https://x.com/alice").title, "@alice");
        assert_eq!(run(&Twitter, "https://twitter.com/bob?s=20").title, "@bob");
        assert_eq!(run(&Twitter, "https://x.com").title, "Twitter");
    }

    #[test]
    fn twitch_is_a_link() {
        let c = run(&Twitch, "https://www.twitch.tv/streamer");
        assert_eq!(c, Classification::new(BlockType::Link, "Twitch - streamer"));
        assert_eq!(run(&Twitch, "https://twitch.tv").title, "Twitch");
    }

    #[test]
    fn facebook_reads_vanity_and_profile_ids() {
        assert_eq!(run(&Facebook, "https://facebook.com/alice").title, "alice");
        assert_eq!(
            run(&Facebook, "https://www.facebook.com/profile.php?id=1000123&ref=x").title,
            "1000123"
        );
        assert_eq!(run(&Facebook, "https://facebook.com").title, "Facebook");
    }

    #[test]
    fn spotify_distinguishes_playlists() {
        assert_eq!(
            run(&Spotify, "https://open.spotify.com/playlist/37i9dQ").title,
            "Spotify Playlist"
        );
        assert_eq!(
            run(&Spotify, "https://open.spotify.com/artist/0OdUWJ").title,
            "Spotify"
        );
    }

    #[test]
    fn steam_prefers_vanity_name() {
        assert_eq!(run(&Steam, "https://steamcommunity.com/id/gaben").title, "gaben");
        assert_eq!(
            run(&Steam, "https://steamcommunity.com/profiles/76561197960287930").title,
            "76561197960287930"
        );
        assert_eq!(run(&Steam, "https://steamcommunity.com/market").title, "Steam");
    }

    #[test]
    fn discord_reads_invites_and_user_ids() {
        assert_eq!(run(&Discord, "https://discord.gg/rust-lang").title, "rust-lang");
        assert_eq!(run(&Discord, "https://discord.com/invite/abc123").title, "abc123");
        assert_eq!(run(&Discord, "https://discord.com/users/80351110224678912").title, "80351110224678912");
        assert_eq!(run(&Discord, "https://discord.com/channels/1/2").title, "Discord");
    }

    #[test]
    fn fixed_platforms_use_constant_titles() {
        assert_eq!(
            run(&Fixed::YOUTUBE, "https://youtu.be/abc"),
            Classification::new(BlockType::Youtube, "YouTube")
        );
        assert_eq!(
            run(&Fixed::GOOGLE_MAPS, "https://maps.google.com/?q=1"),
            Classification::new(BlockType::Map, "Location")
        );
        assert_eq!(run(&Fixed::SHUTTERSTOCK, "https://shutterstock.com/g/a").title, "Shutterstock Portfolio");
        assert_eq!(run(&Fixed::FIGMA, "https://figma.com/@a").title, "Figma");
        assert_eq!(run(&Fixed::LINKEDIN, "https://linkedin.com/in/a").title, "LinkedIn");
    }

    #[test]
    fn matchers_reject_other_domains() {
        let url = "https://example.com/page";
        assert!(!GitHub.matches(url));
        assert!(!Instagram.matches(url));
        assert!(!Twitch.matches(url));
        assert!(!Facebook.matches(url));
        assert!(!Twitter.matches(url));
        assert!(!Spotify.matches(url));
        assert!(!Steam.matches(url));
        assert!(!Discord.matches(url));
        assert!(!Fixed::YOUTUBE.matches(url));
    }
}
