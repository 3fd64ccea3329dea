//! Raw reaction-event dispatch and the starboard redirect resolver.
//!
//! Events arrive here exactly as the platform delivers them: a user reacted
//! to some message with some emoji. Dispatch filters out everything the
//! engine does not care about (blocked guilds and users, unconfigured
//! guilds, non-star emoji), resolves reactions placed on a mirrored post
//! back to the original item, and applies the vote. Expected star errors are
//! logged and swallowed; they originate from external content, not caller
//! error.

use crate::Starboard;
use regex::Regex;
use starling_core::{ChannelId, GuildId, GuildStarConfig, ItemRef, MessageId, UserId};
use starling_error::StarResult;
use starling_storage::ConfigStore;
use std::sync::OnceLock;
use tracing::{debug, info, instrument, warn};

fn id_run_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").expect("id run regex"))
}

/// A raw reaction event from the chat platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionEvent {
    /// Guild the reaction happened in.
    pub guild_id: GuildId,
    /// Channel holding the reacted-to message.
    pub channel_id: ChannelId,
    /// The reacted-to message.
    pub message_id: MessageId,
    /// Who reacted.
    pub user_id: UserId,
    /// Unicode name of the reaction emoji.
    pub emoji_name: String,
    /// Numeric ID when the reaction used a custom emoji.
    pub emoji_id: Option<u64>,
}

/// Recover the original (channel, message) pair from a mirrored post's
/// rendered title. The renderer puts the source channel mention before the
/// trailing message ID, so the last decimal run is the message and the one
/// before it is the channel.
pub(crate) fn parse_mirror_reference(content: &str) -> Option<(ChannelId, MessageId)> {
    let runs: Vec<&str> = id_run_regex()
        .find_iter(content)
        .map(|found| found.as_str())
        .collect();
    if runs.len() < 2 {
        return None;
    }
    let message_id = runs[runs.len() - 1].parse().ok()?;
    let channel_id = runs[runs.len() - 2].parse().ok()?;
    Some((channel_id, message_id))
}

impl Starboard {
    /// Handle a reaction being added. Applies [`Starboard::add_star`] to the
    /// resolved target; star errors are logged, not surfaced.
    #[instrument(skip(self, event), fields(guild_id = event.guild_id))]
    pub async fn handle_reaction_added(&self, event: &ReactionEvent) -> StarResult<()> {
        let Some(target) = self.admit_event(event).await? else {
            return Ok(());
        };
        if let Err(err) = self.add_star(target, event.user_id).await {
            warn!(%err, "reaction add dropped");
        }
        Ok(())
    }

    /// Handle a reaction being removed. Applies [`Starboard::remove_star`]
    /// to the resolved target; star errors are logged, not surfaced.
    #[instrument(skip(self, event), fields(guild_id = event.guild_id))]
    pub async fn handle_reaction_removed(&self, event: &ReactionEvent) -> StarResult<()> {
        let Some(target) = self.admit_event(event).await? else {
            return Ok(());
        };
        if let Err(err) = self.remove_star(target, event.user_id).await {
            warn!(%err, "reaction remove dropped");
        }
        Ok(())
    }

    /// Handle all reactions being cleared from a message: removes every star
    /// from the item.
    #[instrument(skip(self))]
    pub async fn handle_reactions_cleared(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> StarResult<()> {
        if self.drop_for_policy(guild_id, None).await? {
            return Ok(());
        }
        if self.configs().get(guild_id).await?.is_none() {
            return Ok(());
        }

        let item = ItemRef {
            guild_id,
            channel_id,
            message_id,
        };
        if let Err(err) = self.remove_all(item).await {
            warn!(%err, "reaction clear dropped");
        }
        Ok(())
    }

    /// Shared admission path for add/remove events: policy and emoji
    /// filters, then redirect resolution. Returns `None` when the event is
    /// to be dropped.
    async fn admit_event(&self, event: &ReactionEvent) -> StarResult<Option<ItemRef>> {
        if self.drop_for_policy(event.guild_id, Some(event.user_id)).await? {
            return Ok(None);
        }
        let Some(config) = self.configs().get(event.guild_id).await? else {
            return Ok(None);
        };
        if !config.star_emoji.matches(&event.emoji_name, event.emoji_id) {
            debug!("emoji does not match star configuration");
            return Ok(None);
        }
        self.resolve_target(&config, event).await
    }

    /// Consult the block lists. A blocked guild additionally loses its
    /// starboard configuration.
    async fn drop_for_policy(
        &self,
        guild_id: GuildId,
        user_id: Option<UserId>,
    ) -> StarResult<bool> {
        if self.policy().is_blocked_guild(guild_id).await {
            if self.configs().delete(guild_id).await? {
                info!(guild_id, "deleted starboard config of blocked guild");
            }
            return Ok(true);
        }
        if let Some(user_id) = user_id
            && self.policy().is_blocked_user(user_id).await
        {
            return Ok(true);
        }
        Ok(false)
    }

    /// Resolve where the vote actually lands.
    ///
    /// A reaction inside the starboard channel by anyone but the system's
    /// own account targets a mirrored post; the original (channel, message)
    /// pair is recovered from its rendered content. Exactly one indirection
    /// is supported: if the recovered pair still points into the starboard
    /// the event is dropped (fail closed, a mirror of a mirror is not a
    /// supported configuration). Unparseable content drops the event with a
    /// warning.
    async fn resolve_target(
        &self,
        config: &GuildStarConfig,
        event: &ReactionEvent,
    ) -> StarResult<Option<ItemRef>> {
        let passthrough = ItemRef {
            guild_id: event.guild_id,
            channel_id: event.channel_id,
            message_id: event.message_id,
        };

        let on_starboard = config.starboard_channel_id == Some(event.channel_id);
        if !on_starboard || event.user_id == self.policy().self_user() {
            return Ok(Some(passthrough));
        }

        let mirror = match self.items().fetch(event.channel_id, event.message_id).await {
            Ok(item) => item,
            Err(err) => {
                warn!(%err, "could not fetch mirrored post, dropping reaction");
                return Ok(None);
            }
        };
        let Some((channel_id, message_id)) = parse_mirror_reference(&mirror.content) else {
            warn!(
                message_id = event.message_id,
                "unparseable mirrored post, dropping reaction"
            );
            return Ok(None);
        };
        if config.starboard_channel_id == Some(channel_id) {
            warn!("mirrored post resolves back into the starboard, dropping reaction");
            return Ok(None);
        }

        Ok(Some(ItemRef {
            guild_id: event.guild_id,
            channel_id,
            message_id,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trailing_channel_and_message() {
        let title = "3 \u{2B50} <#77>, ID: 88";
        assert_eq!(parse_mirror_reference(title), Some((77, 88)));
    }

    #[test]
    fn count_does_not_shift_parsing() {
        // the leading count is a decimal run too; only the last two matter
        let title = "12 \u{1F31F} <#123456789>, ID: 987654321";
        assert_eq!(parse_mirror_reference(title), Some((123456789, 987654321)));
    }

    #[test]
    fn too_few_ids_is_none() {
        assert_eq!(parse_mirror_reference("just one 42"), None);
        assert_eq!(parse_mirror_reference("no ids at all"), None);
    }
}
