//! Identifier aliases for chat-platform snowflakes.
//!
//! IDs are opaque 64-bit values assigned by the chat platform. They are kept
//! as plain integers rather than newtypes so they serialize and compare the
//! same way the platform hands them out.

/// Identifier of a guild (community/workspace scope).
pub type GuildId = u64;

/// Identifier of a channel within a guild.
pub type ChannelId = u64;

/// Identifier of a message within a channel.
pub type MessageId = u64;

/// Identifier of a user.
pub type UserId = u64;
