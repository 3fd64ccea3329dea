//! Guild starboard configuration persistence.

use starling_core::{GuildId, GuildStarConfig};
use starling_error::StorageResult;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::instrument;

/// Durable persistence for per-guild starboard configuration.
#[async_trait::async_trait]
pub trait ConfigStore: Send + Sync {
    /// Fetch a guild's configuration, if one exists.
    async fn get(&self, guild_id: GuildId) -> StorageResult<Option<GuildStarConfig>>;

    /// Insert or replace a guild's configuration.
    async fn upsert(&self, config: &GuildStarConfig) -> StorageResult<()>;

    /// Delete a guild's configuration. Returns whether one was removed.
    async fn delete(&self, guild_id: GuildId) -> StorageResult<bool>;
}

/// In-memory configuration store.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    configs: RwLock<HashMap<GuildId, GuildStarConfig>>,
}

impl MemoryConfigStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ConfigStore for MemoryConfigStore {
    #[instrument(skip(self))]
    async fn get(&self, guild_id: GuildId) -> StorageResult<Option<GuildStarConfig>> {
        let configs = self.configs.read().await;
        Ok(configs.get(&guild_id).cloned())
    }

    #[instrument(skip(self, config), fields(guild_id = config.guild_id))]
    async fn upsert(&self, config: &GuildStarConfig) -> StorageResult<()> {
        let mut configs = self.configs.write().await;
        configs.insert(config.guild_id, config.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, guild_id: GuildId) -> StorageResult<bool> {
        let mut configs = self.configs.write().await;
        Ok(configs.remove(&guild_id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn round_trip() {
        let store = MemoryConfigStore::new();
        assert!(store.get(1).await.unwrap().is_none());

        let config = GuildStarConfig::new(1).with_starboard_channel(9);
        store.upsert(&config).await.unwrap();
        assert_eq!(store.get(1).await.unwrap(), Some(config));

        assert!(store.delete(1).await.unwrap());
        assert!(!store.delete(1).await.unwrap());
        assert!(store.get(1).await.unwrap().is_none());
    }
}
