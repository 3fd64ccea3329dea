//! Item types fetched from the chat host.

use crate::{ChannelId, GuildId, MessageId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity of a message being voted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{}/{}/{}", guild_id, channel_id, message_id)]
pub struct ItemRef {
    /// Guild the message belongs to.
    pub guild_id: GuildId,
    /// Channel the message lives in.
    pub channel_id: ChannelId,
    /// The message itself.
    pub message_id: MessageId,
}

/// A file attached to an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Where the attachment can be fetched from.
    pub url: String,
    /// Original filename.
    pub filename: String,
}

impl Attachment {
    /// Whether the attachment looks like an embeddable image.
    pub fn is_image(&self) -> bool {
        let lower = self.url.to_ascii_lowercase();
        ["png", "jpeg", "jpg", "gif", "webp"]
            .iter()
            .any(|ext| lower.ends_with(ext))
    }
}

/// A message as fetched from the chat host, with enough context to render a
/// mirrored post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Identity of the message.
    pub reference: ItemRef,
    /// Author of the message.
    pub author_id: UserId,
    /// Author display name, for the rendered post header.
    pub author_name: String,
    /// Author avatar URL, if any.
    pub author_icon_url: Option<String>,
    /// Message text.
    pub content: String,
    /// Attached files in platform order.
    pub attachments: Vec<Attachment>,
    /// When the message was created.
    pub timestamp: DateTime<Utc>,
}

/// Channel properties the engine cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelInfo {
    /// Whether the channel is marked NSFW.
    pub nsfw: bool,
}

/// Guild population, used to compute the vote ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildProfile {
    /// Total member count, bots included.
    pub member_count: u32,
    /// How many of those members are bots.
    pub bot_count: u32,
}

impl GuildProfile {
    /// Humans eligible to vote on an item: every non-bot member except the
    /// item's author, clamped to at least 1 to avoid division by zero.
    pub fn eligible_humans(&self) -> u32 {
        self.member_count
            .saturating_sub(self.bot_count)
            .saturating_sub(1)
            .max(1)
    }
}
