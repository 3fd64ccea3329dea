//! Per-guild starboard configuration.

use crate::{ChannelId, GuildId};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// The default star emoji (white medium star).
pub const DEFAULT_STAR_EMOJI: &str = "\u{2B50}";

fn custom_emoji_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // <:name:id> or <a:name:id> for animated emoji
    RE.get_or_init(|| Regex::new(r"^<a?:\w+:(\d+)>$").expect("custom emoji regex"))
}

/// The emoji a guild counts as a star vote.
///
/// Chat platforms report reactions either as a unicode literal or as a
/// numeric custom-emoji ID, so the configuration is a tagged variant rather
/// than an untyped field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum StarEmoji {
    /// A unicode emoji, stored as its literal symbol.
    #[display("{}", _0)]
    Unicode(String),
    /// A platform custom emoji, stored by numeric ID.
    #[display("custom emoji {}", _0)]
    Custom(u64),
}

impl StarEmoji {
    /// Parse user configuration input: either a custom-emoji mention of the
    /// form `<:name:id>` / `<a:name:id>`, or any other string taken as a
    /// unicode literal. Returns `None` for empty input.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        if let Some(caps) = custom_emoji_regex().captures(input) {
            let id = caps[1].parse().ok()?;
            return Some(StarEmoji::Custom(id));
        }
        Some(StarEmoji::Unicode(input.to_string()))
    }

    /// Whether a reaction matches this emoji. Reactions carry a unicode name
    /// and, for custom emoji, a numeric ID; either may match.
    pub fn matches(&self, name: &str, id: Option<u64>) -> bool {
        match self {
            StarEmoji::Unicode(symbol) => symbol == name,
            StarEmoji::Custom(custom_id) => id == Some(*custom_id),
        }
    }
}

impl Default for StarEmoji {
    fn default() -> Self {
        StarEmoji::Unicode(DEFAULT_STAR_EMOJI.to_string())
    }
}

/// Starboard configuration for one guild.
///
/// # Examples
///
/// ```
/// use starling_core::GuildStarConfig;
///
/// let config = GuildStarConfig::new(1).with_starboard_channel(2);
/// assert_eq!(config.threshold, 1);
/// assert!(config.channel_allowed(99));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildStarConfig {
    /// Guild this configuration belongs to.
    pub guild_id: GuildId,
    /// Channel the mirrored posts go to. Absent means "not configured".
    pub starboard_channel_id: Option<ChannelId>,
    /// The emoji counted as a star vote.
    pub star_emoji: StarEmoji,
    /// Channels allowed to have messages starred. Empty means all channels.
    pub allowed_channel_ids: BTreeSet<ChannelId>,
    /// Minimum vote count for a mirrored post to exist. Always >= 1.
    pub threshold: u32,
}

impl GuildStarConfig {
    /// Create a configuration with defaults: default emoji, all channels
    /// allowed, threshold 1, no starboard channel attached yet.
    pub fn new(guild_id: GuildId) -> Self {
        Self {
            guild_id,
            starboard_channel_id: None,
            star_emoji: StarEmoji::default(),
            allowed_channel_ids: BTreeSet::new(),
            threshold: 1,
        }
    }

    /// Attach a starboard channel.
    pub fn with_starboard_channel(mut self, channel_id: ChannelId) -> Self {
        self.starboard_channel_id = Some(channel_id);
        self
    }

    /// Set the vote threshold, clamped to at least 1.
    pub fn with_threshold(mut self, threshold: u32) -> Self {
        self.threshold = threshold.max(1);
        self
    }

    /// Set the star emoji.
    pub fn with_emoji(mut self, emoji: StarEmoji) -> Self {
        self.star_emoji = emoji;
        self
    }

    /// Whether messages in the given channel may be starred.
    pub fn channel_allowed(&self, channel_id: ChannelId) -> bool {
        self.allowed_channel_ids.is_empty() || self.allowed_channel_ids.contains(&channel_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_unicode_emoji() {
        assert_eq!(
            StarEmoji::parse("⭐"),
            Some(StarEmoji::Unicode("⭐".to_string()))
        );
    }

    #[test]
    fn parse_custom_emoji_mention() {
        assert_eq!(
            StarEmoji::parse("<:goldstar:353997749341126657>"),
            Some(StarEmoji::Custom(353997749341126657))
        );
        assert_eq!(
            StarEmoji::parse("<a:spinstar:12345>"),
            Some(StarEmoji::Custom(12345))
        );
    }

    #[test]
    fn parse_empty_is_none() {
        assert_eq!(StarEmoji::parse("   "), None);
    }

    #[test]
    fn matches_by_name_or_id() {
        let unicode = StarEmoji::default();
        assert!(unicode.matches(DEFAULT_STAR_EMOJI, None));
        assert!(!unicode.matches("🌟", None));

        let custom = StarEmoji::Custom(42);
        assert!(custom.matches("goldstar", Some(42)));
        assert!(!custom.matches("goldstar", Some(43)));
        assert!(!custom.matches("goldstar", None));
    }

    #[test]
    fn threshold_clamped_to_one() {
        let config = GuildStarConfig::new(1).with_threshold(0);
        assert_eq!(config.threshold, 1);
    }

    #[test]
    fn empty_allow_list_allows_all() {
        let mut config = GuildStarConfig::new(1);
        assert!(config.channel_allowed(5));
        config.allowed_channel_ids.insert(7);
        assert!(config.channel_allowed(7));
        assert!(!config.channel_allowed(5));
    }
}
