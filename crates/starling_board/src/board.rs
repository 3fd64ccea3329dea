//! The star aggregator: operations, threshold state machine, janitor.

use crate::guard::{GuildLocks, JanitorGate};
use crate::host::{GuildPolicy, ItemSource, MirrorHost};
use crate::render::{StarPost, render_post};
use crate::stats::{self, GuildStarStats};
use rand::Rng;
use starling_cache::ConfigCache;
use starling_core::{
    ChannelId, GuildId, GuildStarConfig, Item, ItemRef, MessageId, StarRecord, Tier, UserId,
    star_ratio,
};
use starling_error::{HostErrorKind, StarError, StarErrorKind, StarResult};
use starling_storage::{ConfigStore, RecordStore};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// The starboard engine.
///
/// Owns all mutation of star records. Every operation resolves the guild's
/// configuration, validates, and then runs the logically atomic sequence
/// validate → mutate → persist → display-update under the guild's exclusive
/// lock. The persisted record is the source of truth; the mirrored post is a
/// best-effort reflection of it, repaired on demand by [`Starboard::reload`].
pub struct Starboard {
    records: Arc<dyn RecordStore>,
    configs: ConfigCache,
    items: Arc<dyn ItemSource>,
    mirror: Arc<dyn MirrorHost>,
    policy: Arc<dyn GuildPolicy>,
    locks: GuildLocks,
    janitor: JanitorGate,
}

impl Starboard {
    /// Wire up the engine. The config store is fronted by a read-through
    /// cache; configuration writes must flow through [`Starboard::configs`]
    /// to keep it coherent.
    pub fn new(
        records: Arc<dyn RecordStore>,
        configs: Arc<dyn ConfigStore>,
        items: Arc<dyn ItemSource>,
        mirror: Arc<dyn MirrorHost>,
        policy: Arc<dyn GuildPolicy>,
    ) -> Self {
        Self {
            records,
            configs: ConfigCache::new(configs),
            items,
            mirror,
            policy,
            locks: GuildLocks::new(),
            janitor: JanitorGate::new(),
        }
    }

    /// The cached configuration store. The configuration command layer owns
    /// `GuildStarConfig` mutation and must write through this handle.
    pub fn configs(&self) -> &ConfigCache {
        &self.configs
    }

    pub(crate) fn policy(&self) -> &Arc<dyn GuildPolicy> {
        &self.policy
    }

    pub(crate) fn items(&self) -> &Arc<dyn ItemSource> {
        &self.items
    }

    /// Add a star to an item on behalf of `voter_id`.
    ///
    /// Returns the updated record. Validation failures (`SelfStar`,
    /// `AlreadyStarred`, `NsfwPolicyViolation`, ...) are raised before any
    /// mutation occurs.
    #[instrument(skip(self), fields(guild_id = item.guild_id))]
    pub async fn add_star(&self, item: ItemRef, voter_id: UserId) -> StarResult<StarRecord> {
        let _guard = self.locks.acquire(item.guild_id).await;

        let (config, starboard) = self.resolved_config(item.guild_id).await?;
        self.check_allowed(&config, item.channel_id)?;

        let fetched = self
            .items
            .fetch(item.channel_id, item.message_id)
            .await
            .map_err(StarError::from)?;
        if fetched.author_id == voter_id {
            return Err(StarError::new(StarErrorKind::SelfStar));
        }
        self.check_nsfw(item.guild_id, starboard, item.channel_id)
            .await?;

        let mut record = match self.records.get(item.guild_id, item.message_id).await? {
            Some(existing) => existing,
            None => StarRecord::new(item, fetched.author_id),
        };
        if !record.add_starrer(voter_id) {
            return Err(StarError::new(StarErrorKind::AlreadyStarred));
        }
        self.records.upsert(&record).await?;

        self.update_display(&config, starboard, &mut record, Some(&fetched))
            .await?;
        Ok(record)
    }

    /// Remove `voter_id`'s star from an item.
    ///
    /// Removing the last starrer deletes the record and retracts the
    /// mirrored post.
    #[instrument(skip(self), fields(guild_id = item.guild_id))]
    pub async fn remove_star(&self, item: ItemRef, voter_id: UserId) -> StarResult<StarRecord> {
        let _guard = self.locks.acquire(item.guild_id).await;

        let (config, starboard) = self.resolved_config(item.guild_id).await?;
        self.check_allowed(&config, item.channel_id)?;

        let mut record = self
            .records
            .get(item.guild_id, item.message_id)
            .await?
            .ok_or_else(|| StarError::new(StarErrorKind::NotStarred))?;
        if !record.remove_starrer(voter_id) {
            return Err(StarError::new(StarErrorKind::NotStarred));
        }

        if record.count() == 0 {
            // empty records are deleted, never kept
            self.records.delete(item.guild_id, item.message_id).await?;
            self.retract_display(item.guild_id, starboard, &record)
                .await?;
            record.clear_mirror();
            return Ok(record);
        }

        self.records.upsert(&record).await?;
        self.update_display(&config, starboard, &mut record, None)
            .await?;
        Ok(record)
    }

    /// Remove every star from an item (moderation/reset): deletes the record
    /// and retracts the mirrored post.
    #[instrument(skip(self), fields(guild_id = item.guild_id))]
    pub async fn remove_all(&self, item: ItemRef) -> StarResult<()> {
        let _guard = self.locks.acquire(item.guild_id).await;

        let (config, starboard) = self.resolved_config(item.guild_id).await?;
        self.check_allowed(&config, item.channel_id)?;
        let record = self
            .records
            .get(item.guild_id, item.message_id)
            .await?
            .ok_or_else(|| StarError::new(StarErrorKind::RecordNotFound))?;

        self.records.delete(item.guild_id, item.message_id).await?;
        self.retract_display(item.guild_id, starboard, &record)
            .await?;
        Ok(())
    }

    /// Re-render the mirrored post from the current record and live item
    /// content without changing the starrer set. Repairs drift after the
    /// original message was edited or a display update was lost.
    #[instrument(skip(self), fields(guild_id = item.guild_id))]
    pub async fn reload(&self, item: ItemRef) -> StarResult<()> {
        let _guard = self.locks.acquire(item.guild_id).await;

        let (config, starboard) = self.resolved_config(item.guild_id).await?;
        self.check_allowed(&config, item.channel_id)?;
        let mut record = self
            .records
            .get(item.guild_id, item.message_id)
            .await?
            .ok_or_else(|| StarError::new(StarErrorKind::RecordNotFound))?;
        let fetched = self
            .items
            .fetch(item.channel_id, item.message_id)
            .await
            .map_err(StarError::from)?;

        self.update_display(&config, starboard, &mut record, Some(&fetched))
            .await
    }

    /// Delete every star record for a guild.
    ///
    /// Admitted through the single-slot janitor gate: at most one purge runs
    /// process-wide, further callers queue. Ordinary star operations on
    /// other guilds are unaffected. Failures are logged and returned, never
    /// retried here.
    #[instrument(skip(self))]
    pub async fn purge_guild(&self, guild_id: GuildId) -> StarResult<u64> {
        let _permit = self.janitor.admit().await;

        warn!(guild_id, "janitor purging star records");
        match self.records.delete_all(guild_id).await {
            Ok(removed) => {
                info!(guild_id, removed, "janitor purge complete");
                Ok(removed)
            }
            Err(err) => {
                warn!(guild_id, %err, "janitor purge failed");
                Err(err.into())
            }
        }
    }

    /// Fetch the star record for an item, if one exists.
    pub async fn record(
        &self,
        guild_id: GuildId,
        message_id: MessageId,
    ) -> StarResult<Option<StarRecord>> {
        Ok(self.records.get(guild_id, message_id).await?)
    }

    /// The guild's most-starred records, capped at `limit`.
    pub async fn top_starred(
        &self,
        guild_id: GuildId,
        limit: usize,
    ) -> StarResult<Vec<StarRecord>> {
        Ok(self.records.top_starred(guild_id, limit).await?)
    }

    /// Aggregate starboard statistics for a guild.
    pub async fn guild_stats(&self, guild_id: GuildId) -> StarResult<GuildStarStats> {
        let records = self.records.for_guild(guild_id).await?;
        Ok(stats::compute(&records, 5))
    }

    /// A uniformly random star record from the guild.
    pub async fn random_record(&self, guild_id: GuildId) -> StarResult<StarRecord> {
        let records = self.records.for_guild(guild_id).await?;
        if records.is_empty() {
            return Err(StarError::new(StarErrorKind::RecordNotFound));
        }
        let index = rand::thread_rng().gen_range(0..records.len());
        Ok(records[index].clone())
    }

    /// Resolve the guild's configuration and its starboard channel, failing
    /// with `NotConfigured` when either is absent.
    pub(crate) async fn resolved_config(
        &self,
        guild_id: GuildId,
    ) -> StarResult<(GuildStarConfig, ChannelId)> {
        match self.configs.get(guild_id).await? {
            Some(config) => match config.starboard_channel_id {
                Some(starboard) => Ok((config, starboard)),
                None => Err(StarError::new(StarErrorKind::NotConfigured)),
            },
            None => Err(StarError::new(StarErrorKind::NotConfigured)),
        }
    }

    fn check_allowed(&self, config: &GuildStarConfig, channel_id: ChannelId) -> StarResult<()> {
        if config.channel_allowed(channel_id) {
            Ok(())
        } else {
            Err(StarError::new(StarErrorKind::ChannelNotAllowed))
        }
    }

    /// Content must not leak from a restricted channel to an unrestricted
    /// board. An NSFW starboard accepts anything.
    async fn check_nsfw(
        &self,
        guild_id: GuildId,
        starboard: ChannelId,
        item_channel: ChannelId,
    ) -> StarResult<()> {
        let Some(board_info) = self
            .items
            .channel_info(starboard)
            .await
            .map_err(StarError::from)?
        else {
            self.repair_missing_starboard(guild_id).await?;
            return Err(StarError::new(StarErrorKind::StarboardMissing));
        };
        if board_info.nsfw {
            return Ok(());
        }

        let item_nsfw = self
            .items
            .channel_info(item_channel)
            .await
            .map_err(StarError::from)?
            .map(|info| info.nsfw)
            .unwrap_or(false);
        if item_nsfw {
            return Err(StarError::new(StarErrorKind::NsfwPolicyViolation));
        }
        Ok(())
    }

    /// The configured starboard channel no longer exists: delete the
    /// configuration so the guild reads as unconfigured from here on.
    pub(crate) async fn repair_missing_starboard(&self, guild_id: GuildId) -> StarResult<()> {
        let removed = self.configs.delete(guild_id).await?;
        if removed {
            warn!(guild_id, "starboard channel gone, deleted configuration");
        }
        Ok(())
    }

    /// Threshold state machine, evaluated after every mutation.
    ///
    /// Unposted → Posted creates the mirrored post and stores its ID;
    /// Posted → Posted edits in place, re-sending the post if it was deleted
    /// externally; Posted → Unposted deletes the post and clears the stored
    /// ID but keeps the record. Mirror-host failures are logged and
    /// swallowed, since the persisted record already holds the truth. The
    /// exception is `StarboardMissing`, which deletes the configuration and
    /// propagates.
    async fn update_display(
        &self,
        config: &GuildStarConfig,
        starboard: ChannelId,
        record: &mut StarRecord,
        item: Option<&Item>,
    ) -> StarResult<()> {
        if self
            .items
            .channel_info(starboard)
            .await
            .map_err(StarError::from)?
            .is_none()
        {
            self.repair_missing_starboard(record.guild_id()).await?;
            return Err(StarError::new(StarErrorKind::StarboardMissing));
        }

        let above_threshold = record.count() as u32 >= config.threshold;
        match (record.mirror_message_id(), above_threshold) {
            (None, false) => {}
            (None, true) => {
                let Some(post) = self.rendered(record, item).await else {
                    return Ok(());
                };
                match self.mirror.create_post(starboard, &post).await {
                    Ok(mirror_id) => {
                        record.set_mirror(mirror_id);
                        self.records.upsert(record).await?;
                    }
                    Err(err) => warn!(%err, "failed to create mirrored post"),
                }
            }
            (Some(mirror_id), true) => {
                let Some(post) = self.rendered(record, item).await else {
                    return Ok(());
                };
                match self.mirror.edit_post(starboard, mirror_id, &post).await {
                    Ok(()) => {}
                    // the post was deleted externally; re-send instead of
                    // drifting until the next reload
                    Err(err) if err.kind == HostErrorKind::NotFound => {
                        warn!(%err, mirror_id, "mirrored post gone, re-posting");
                        match self.mirror.create_post(starboard, &post).await {
                            Ok(new_id) => {
                                record.set_mirror(new_id);
                                self.records.upsert(record).await?;
                            }
                            Err(err) => warn!(%err, "failed to re-create mirrored post"),
                        }
                    }
                    Err(err) => warn!(%err, "failed to edit mirrored post"),
                }
            }
            (Some(mirror_id), false) => {
                if let Err(err) = self.mirror.delete_post(starboard, mirror_id).await {
                    warn!(%err, "failed to delete mirrored post");
                }
                record.clear_mirror();
                self.records.upsert(record).await?;
            }
        }
        Ok(())
    }

    /// Terminal retraction: delete the mirrored post if one exists. The
    /// record itself has already been deleted by the caller.
    async fn retract_display(
        &self,
        guild_id: GuildId,
        starboard: ChannelId,
        record: &StarRecord,
    ) -> StarResult<()> {
        if self
            .items
            .channel_info(starboard)
            .await
            .map_err(StarError::from)?
            .is_none()
        {
            self.repair_missing_starboard(guild_id).await?;
            return Err(StarError::new(StarErrorKind::StarboardMissing));
        }
        if let Some(mirror_id) = record.mirror_message_id()
            && let Err(err) = self.mirror.delete_post(starboard, mirror_id).await
        {
            warn!(%err, "failed to delete mirrored post during retraction");
        }
        Ok(())
    }

    /// Render the mirrored post, fetching the item if the caller did not
    /// already have it. Render failures are display-phase failures: logged,
    /// never propagated.
    async fn rendered(&self, record: &StarRecord, item: Option<&Item>) -> Option<StarPost> {
        let fetched;
        let item = match item {
            Some(item) => item,
            None => match self
                .items
                .fetch(record.channel_id(), record.message_id())
                .await
            {
                Ok(live) => {
                    fetched = live;
                    &fetched
                }
                Err(err) => {
                    warn!(%err, "could not fetch item to render mirrored post");
                    return None;
                }
            },
        };

        let tier = match self.items.guild_profile(record.guild_id()).await {
            Ok(profile) => Tier::for_ratio(star_ratio(record.count(), profile.eligible_humans())),
            Err(err) => {
                warn!(%err, "could not fetch guild profile, using lowest tier");
                Tier::for_ratio(0.0)
            }
        };
        Some(render_post(record, item, tier))
    }
}
