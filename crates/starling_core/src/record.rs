//! Star records: one per (guild, starred message).

use crate::{ChannelId, GuildId, ItemRef, MessageId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Accumulated votes for one starred message.
///
/// The vote count is always derived from the starrer set; it is never stored
/// independently, so it cannot diverge. A record whose starrer set is empty
/// must not be persisted; callers delete it instead.
///
/// # Examples
///
/// ```
/// use starling_core::{ItemRef, StarRecord};
///
/// let item = ItemRef { guild_id: 1, channel_id: 2, message_id: 3 };
/// let mut record = StarRecord::new(item, 42);
/// assert!(record.add_starrer(7));
/// assert!(!record.add_starrer(7));
/// assert_eq!(record.count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarRecord {
    guild_id: GuildId,
    channel_id: ChannelId,
    message_id: MessageId,
    author_id: UserId,
    starrers: BTreeSet<UserId>,
    mirror_message_id: Option<MessageId>,
}

impl StarRecord {
    /// Create an empty record for an item. The identity fields are fixed for
    /// the life of the record.
    pub fn new(item: ItemRef, author_id: UserId) -> Self {
        Self {
            guild_id: item.guild_id,
            channel_id: item.channel_id,
            message_id: item.message_id,
            author_id,
            starrers: BTreeSet::new(),
            mirror_message_id: None,
        }
    }

    /// Guild the starred message belongs to.
    pub fn guild_id(&self) -> GuildId {
        self.guild_id
    }

    /// Channel the starred message lives in.
    pub fn channel_id(&self) -> ChannelId {
        self.channel_id
    }

    /// The starred message itself.
    pub fn message_id(&self) -> MessageId {
        self.message_id
    }

    /// Author of the starred message.
    pub fn author_id(&self) -> UserId {
        self.author_id
    }

    /// Reference to the starred item.
    pub fn item(&self) -> ItemRef {
        ItemRef {
            guild_id: self.guild_id,
            channel_id: self.channel_id,
            message_id: self.message_id,
        }
    }

    /// Users who have starred this message.
    pub fn starrers(&self) -> &BTreeSet<UserId> {
        &self.starrers
    }

    /// Current vote count, derived from the starrer set.
    pub fn count(&self) -> usize {
        self.starrers.len()
    }

    /// Add a voter. Returns `false` if the voter already starred the message.
    pub fn add_starrer(&mut self, user_id: UserId) -> bool {
        self.starrers.insert(user_id)
    }

    /// Remove a voter. Returns `false` if the voter had not starred the
    /// message.
    pub fn remove_starrer(&mut self, user_id: UserId) -> bool {
        self.starrers.remove(&user_id)
    }

    /// Whether the given voter has starred this message.
    pub fn has_starrer(&self, user_id: UserId) -> bool {
        self.starrers.contains(&user_id)
    }

    /// ID of the mirrored post, present only while one exists.
    pub fn mirror_message_id(&self) -> Option<MessageId> {
        self.mirror_message_id
    }

    /// Record the ID of a newly created mirrored post.
    pub fn set_mirror(&mut self, message_id: MessageId) {
        self.mirror_message_id = Some(message_id);
    }

    /// Forget the mirrored post after it has been deleted.
    pub fn clear_mirror(&mut self) {
        self.mirror_message_id = None;
    }
}
