//! Shared test fixture: an in-memory chat host and a wired-up engine.

#![allow(dead_code)]

use chrono::Utc;
use starling_board::Starboard;
use starling_board::host::{GuildPolicy, ItemSource, MirrorHost};
use starling_board::render::StarPost;
use starling_core::{
    Attachment, ChannelId, ChannelInfo, GuildId, GuildProfile, GuildStarConfig, Item, ItemRef,
    MessageId, UserId,
};
use starling_error::{HostError, HostErrorKind, HostResult};
use starling_storage::{ConfigStore, MemoryConfigStore, MemoryRecordStore};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Mutex;

pub const GUILD: GuildId = 1;
pub const CHAN: ChannelId = 10;
pub const BOARD: ChannelId = 20;
pub const AUTHOR: UserId = 100;
pub const SELF_USER: UserId = 999;

#[derive(Default)]
struct HostState {
    messages: HashMap<(ChannelId, MessageId), Item>,
    channels: HashMap<ChannelId, ChannelInfo>,
    profiles: HashMap<GuildId, GuildProfile>,
    blocked_guilds: HashSet<GuildId>,
    blocked_users: HashSet<UserId>,
    posts: HashMap<(ChannelId, MessageId), StarPost>,
    next_post_id: MessageId,
}

/// In-memory chat host standing in for the platform collaborators.
///
/// Mirrored posts created through [`MirrorHost`] are also registered as
/// fetchable messages (content = title) so the redirect resolver can read
/// them back, the same way a real platform would serve them.
pub struct TestHost {
    state: Mutex<HostState>,
}

impl TestHost {
    pub fn new() -> Self {
        let mut state = HostState::default();
        state.channels.insert(CHAN, ChannelInfo { nsfw: false });
        state.channels.insert(BOARD, ChannelInfo { nsfw: false });
        state.profiles.insert(
            GUILD,
            GuildProfile {
                member_count: 12,
                bot_count: 2,
            },
        );
        state.next_post_id = 9000;
        Self {
            state: Mutex::new(state),
        }
    }

    pub async fn add_message(&self, channel_id: ChannelId, message_id: MessageId, content: &str) {
        self.add_message_from(channel_id, message_id, AUTHOR, content)
            .await;
    }

    pub async fn add_message_from(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        author_id: UserId,
        content: &str,
    ) {
        let item = Item {
            reference: ItemRef {
                guild_id: GUILD,
                channel_id,
                message_id,
            },
            author_id,
            author_name: format!("user-{author_id}"),
            author_icon_url: None,
            content: content.to_string(),
            attachments: Vec::new(),
            timestamp: Utc::now(),
        };
        self.state
            .lock()
            .await
            .messages
            .insert((channel_id, message_id), item);
    }

    pub async fn edit_message(&self, channel_id: ChannelId, message_id: MessageId, content: &str) {
        let mut state = self.state.lock().await;
        if let Some(item) = state.messages.get_mut(&(channel_id, message_id)) {
            item.content = content.to_string();
        }
    }

    pub async fn attach(&self, channel_id: ChannelId, message_id: MessageId, attachment: Attachment) {
        let mut state = self.state.lock().await;
        if let Some(item) = state.messages.get_mut(&(channel_id, message_id)) {
            item.attachments.push(attachment);
        }
    }

    pub async fn set_channel(&self, channel_id: ChannelId, nsfw: bool) {
        self.state
            .lock()
            .await
            .channels
            .insert(channel_id, ChannelInfo { nsfw });
    }

    pub async fn remove_channel(&self, channel_id: ChannelId) {
        self.state.lock().await.channels.remove(&channel_id);
    }

    pub async fn set_profile(&self, guild_id: GuildId, member_count: u32, bot_count: u32) {
        self.state.lock().await.profiles.insert(
            guild_id,
            GuildProfile {
                member_count,
                bot_count,
            },
        );
    }

    pub async fn block_guild(&self, guild_id: GuildId) {
        self.state.lock().await.blocked_guilds.insert(guild_id);
    }

    pub async fn block_user(&self, user_id: UserId) {
        self.state.lock().await.blocked_users.insert(user_id);
    }

    pub async fn post(&self, channel_id: ChannelId, message_id: MessageId) -> Option<StarPost> {
        self.state
            .lock()
            .await
            .posts
            .get(&(channel_id, message_id))
            .cloned()
    }

    pub async fn post_count(&self, channel_id: ChannelId) -> usize {
        self.state
            .lock()
            .await
            .posts
            .keys()
            .filter(|(channel, _)| *channel == channel_id)
            .count()
    }
}

#[async_trait::async_trait]
impl ItemSource for TestHost {
    async fn fetch(&self, channel_id: ChannelId, message_id: MessageId) -> HostResult<Item> {
        self.state
            .lock()
            .await
            .messages
            .get(&(channel_id, message_id))
            .cloned()
            .ok_or_else(|| HostError::new(HostErrorKind::NotFound))
    }

    async fn channel_info(&self, channel_id: ChannelId) -> HostResult<Option<ChannelInfo>> {
        Ok(self.state.lock().await.channels.get(&channel_id).copied())
    }

    async fn guild_profile(&self, guild_id: GuildId) -> HostResult<GuildProfile> {
        self.state
            .lock()
            .await
            .profiles
            .get(&guild_id)
            .copied()
            .ok_or_else(|| HostError::new(HostErrorKind::NotFound))
    }
}

#[async_trait::async_trait]
impl MirrorHost for TestHost {
    async fn create_post(&self, channel_id: ChannelId, post: &StarPost) -> HostResult<MessageId> {
        let mut state = self.state.lock().await;
        if !state.channels.contains_key(&channel_id) {
            return Err(HostError::new(HostErrorKind::NotFound));
        }
        let message_id = state.next_post_id;
        state.next_post_id += 1;
        state.posts.insert((channel_id, message_id), post.clone());
        let mirror = Item {
            reference: ItemRef {
                guild_id: GUILD,
                channel_id,
                message_id,
            },
            author_id: SELF_USER,
            author_name: "starling".to_string(),
            author_icon_url: None,
            content: post.title.clone(),
            attachments: Vec::new(),
            timestamp: Utc::now(),
        };
        state.messages.insert((channel_id, message_id), mirror);
        Ok(message_id)
    }

    async fn edit_post(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        post: &StarPost,
    ) -> HostResult<()> {
        let mut state = self.state.lock().await;
        match state.posts.get_mut(&(channel_id, message_id)) {
            Some(existing) => {
                *existing = post.clone();
            }
            None => return Err(HostError::new(HostErrorKind::NotFound)),
        }
        if let Some(mirror) = state.messages.get_mut(&(channel_id, message_id)) {
            mirror.content = post.title.clone();
        }
        Ok(())
    }

    async fn delete_post(&self, channel_id: ChannelId, message_id: MessageId) -> HostResult<()> {
        let mut state = self.state.lock().await;
        state
            .posts
            .remove(&(channel_id, message_id))
            .ok_or_else(|| HostError::new(HostErrorKind::NotFound))?;
        state.messages.remove(&(channel_id, message_id));
        Ok(())
    }
}

#[async_trait::async_trait]
impl GuildPolicy for TestHost {
    async fn is_blocked_guild(&self, guild_id: GuildId) -> bool {
        self.state.lock().await.blocked_guilds.contains(&guild_id)
    }

    async fn is_blocked_user(&self, user_id: UserId) -> bool {
        self.state.lock().await.blocked_users.contains(&user_id)
    }

    fn self_user(&self) -> UserId {
        SELF_USER
    }
}

/// A fully wired engine over in-memory stores and the test host.
pub struct TestRig {
    pub board: Starboard,
    pub host: Arc<TestHost>,
    pub records: Arc<MemoryRecordStore>,
    pub configs: Arc<MemoryConfigStore>,
}

/// Engine with a default configuration: starboard attached, threshold 1.
pub async fn rig() -> TestRig {
    rig_with(GuildStarConfig::new(GUILD).with_starboard_channel(BOARD)).await
}

/// Engine with the given guild configuration already stored.
pub async fn rig_with(config: GuildStarConfig) -> TestRig {
    let host = Arc::new(TestHost::new());
    let records = Arc::new(MemoryRecordStore::new());
    let configs = Arc::new(MemoryConfigStore::new());
    configs.upsert(&config).await.unwrap();

    let board = Starboard::new(
        records.clone(),
        configs.clone(),
        host.clone(),
        host.clone(),
        host.clone(),
    );
    TestRig {
        board,
        host,
        records,
        configs,
    }
}

/// Reference to a message in the default guild.
pub fn item(channel_id: ChannelId, message_id: MessageId) -> ItemRef {
    ItemRef {
        guild_id: GUILD,
        channel_id,
        message_id,
    }
}

/// A star-emoji reaction event in the default guild.
pub fn star_reaction(
    channel_id: ChannelId,
    message_id: MessageId,
    user_id: UserId,
) -> starling_board::ReactionEvent {
    starling_board::ReactionEvent {
        guild_id: GUILD,
        channel_id,
        message_id,
        user_id,
        emoji_name: starling_core::DEFAULT_STAR_EMOJI.to_string(),
        emoji_id: None,
    }
}
