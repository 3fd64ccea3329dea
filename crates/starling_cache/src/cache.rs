//! Guild configuration cache implementation.

use starling_core::{GuildId, GuildStarConfig};
use starling_error::StorageResult;
use starling_storage::ConfigStore;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Read-through cache over a [`ConfigStore`], keyed by guild.
///
/// Both hits and misses are cached, since the common case for a busy process
/// is reaction traffic from guilds with no starboard at all. The cache is
/// only coherent if every configuration write flows through it; it
/// implements [`ConfigStore`] itself so callers can treat it as the store.
///
/// # Examples
///
/// ```
/// use starling_cache::ConfigCache;
/// use starling_storage::{ConfigStore, MemoryConfigStore};
/// use starling_core::GuildStarConfig;
/// use std::sync::Arc;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let cache = ConfigCache::new(Arc::new(MemoryConfigStore::new()));
/// cache.upsert(&GuildStarConfig::new(1).with_starboard_channel(2)).await?;
/// assert!(cache.get(1).await?.is_some());
/// # Ok(())
/// # }
/// ```
pub struct ConfigCache {
    store: Arc<dyn ConfigStore>,
    entries: RwLock<HashMap<GuildId, Option<GuildStarConfig>>>,
}

impl ConfigCache {
    /// Create an empty cache over the given store.
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self {
            store,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Drop the cached entry for a guild, forcing the next read through to
    /// the store.
    #[instrument(skip(self))]
    pub async fn invalidate(&self, guild_id: GuildId) {
        let mut entries = self.entries.write().await;
        if entries.remove(&guild_id).is_some() {
            debug!("invalidated cached config");
        }
    }

    /// Number of cached guilds (hits and misses both count).
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl ConfigStore for ConfigCache {
    #[instrument(skip(self))]
    async fn get(&self, guild_id: GuildId) -> StorageResult<Option<GuildStarConfig>> {
        {
            let entries = self.entries.read().await;
            if let Some(cached) = entries.get(&guild_id) {
                debug!(hit = cached.is_some(), "config cache hit");
                return Ok(cached.clone());
            }
        }

        let fetched = self.store.get(guild_id).await?;
        let mut entries = self.entries.write().await;
        entries.insert(guild_id, fetched.clone());
        debug!(found = fetched.is_some(), "config cache fill");
        Ok(fetched)
    }

    #[instrument(skip(self, config), fields(guild_id = config.guild_id))]
    async fn upsert(&self, config: &GuildStarConfig) -> StorageResult<()> {
        self.store.upsert(config).await?;
        let mut entries = self.entries.write().await;
        entries.insert(config.guild_id, Some(config.clone()));
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, guild_id: GuildId) -> StorageResult<bool> {
        let removed = self.store.delete(guild_id).await?;
        let mut entries = self.entries.write().await;
        entries.insert(guild_id, None);
        Ok(removed)
    }
}
