//! Collaborator traits at the chat-platform boundary.
//!
//! The engine never talks to a gateway or HTTP client directly. Everything
//! it needs from the platform is expressed here, so deployments wire in a
//! real client and tests wire in fakes.

use crate::render::StarPost;
use starling_core::{ChannelId, ChannelInfo, GuildId, GuildProfile, Item, MessageId, UserId};
use starling_error::HostResult;

/// Read access to messages, channels, and guild population.
#[async_trait::async_trait]
pub trait ItemSource: Send + Sync {
    /// Fetch a message with enough context to render a mirrored post.
    ///
    /// Fails with `NotFound` when the message is gone and `Forbidden` when
    /// the process may not read the channel.
    async fn fetch(&self, channel_id: ChannelId, message_id: MessageId) -> HostResult<Item>;

    /// Properties of a channel, or `None` when the channel no longer exists.
    async fn channel_info(&self, channel_id: ChannelId) -> HostResult<Option<ChannelInfo>>;

    /// Population of a guild, for the vote-ratio tier.
    async fn guild_profile(&self, guild_id: GuildId) -> HostResult<GuildProfile>;
}

/// Write access to the starboard channel.
#[async_trait::async_trait]
pub trait MirrorHost: Send + Sync {
    /// Create a mirrored post, returning the new post's message ID.
    async fn create_post(&self, channel_id: ChannelId, post: &StarPost) -> HostResult<MessageId>;

    /// Edit an existing mirrored post in place.
    async fn edit_post(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        post: &StarPost,
    ) -> HostResult<()>;

    /// Delete a mirrored post.
    async fn delete_post(&self, channel_id: ChannelId, message_id: MessageId) -> HostResult<()>;
}

/// Block-list policy and process identity.
#[async_trait::async_trait]
pub trait GuildPolicy: Send + Sync {
    /// Whether the guild is blocked. A blocked guild's events are dropped
    /// and its starboard configuration is deleted.
    async fn is_blocked_guild(&self, guild_id: GuildId) -> bool;

    /// Whether the user is blocked. A blocked user's reactions are dropped.
    async fn is_blocked_user(&self, user_id: UserId) -> bool;

    /// The system's own account, so its reactions are never redirected.
    fn self_user(&self) -> UserId;
}
