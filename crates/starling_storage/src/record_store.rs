//! Star record persistence.

use starling_core::{GuildId, MessageId, StarRecord};
use starling_error::StorageResult;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::instrument;

/// Durable persistence for star records, keyed by (guild, message).
///
/// Implementations must treat `(guild_id, message_id)` as the primary key:
/// `upsert` replaces any record under the same pair.
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch the record for a (guild, message) pair, if one exists.
    async fn get(
        &self,
        guild_id: GuildId,
        message_id: MessageId,
    ) -> StorageResult<Option<StarRecord>>;

    /// Insert or replace a record.
    async fn upsert(&self, record: &StarRecord) -> StorageResult<()>;

    /// Delete the record for a (guild, message) pair. Returns whether a
    /// record was removed.
    async fn delete(&self, guild_id: GuildId, message_id: MessageId) -> StorageResult<bool>;

    /// Delete every record for a guild. Returns how many were removed.
    async fn delete_all(&self, guild_id: GuildId) -> StorageResult<u64>;

    /// All records for a guild, in unspecified order.
    async fn for_guild(&self, guild_id: GuildId) -> StorageResult<Vec<StarRecord>>;

    /// Records for a guild sorted by vote count descending, capped at
    /// `limit`.
    async fn top_starred(&self, guild_id: GuildId, limit: usize) -> StorageResult<Vec<StarRecord>>;
}

/// In-memory record store backed by a `HashMap` behind an async `RwLock`.
///
/// Suitable for tests and single-process deployments that accept losing star
/// history on restart.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: RwLock<HashMap<(GuildId, MessageId), StarRecord>>,
}

impl MemoryRecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl RecordStore for MemoryRecordStore {
    #[instrument(skip(self))]
    async fn get(
        &self,
        guild_id: GuildId,
        message_id: MessageId,
    ) -> StorageResult<Option<StarRecord>> {
        let records = self.records.read().await;
        Ok(records.get(&(guild_id, message_id)).cloned())
    }

    #[instrument(skip(self, record), fields(guild_id = record.guild_id(), message_id = record.message_id()))]
    async fn upsert(&self, record: &StarRecord) -> StorageResult<()> {
        let mut records = self.records.write().await;
        records.insert((record.guild_id(), record.message_id()), record.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, guild_id: GuildId, message_id: MessageId) -> StorageResult<bool> {
        let mut records = self.records.write().await;
        Ok(records.remove(&(guild_id, message_id)).is_some())
    }

    #[instrument(skip(self))]
    async fn delete_all(&self, guild_id: GuildId) -> StorageResult<u64> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|(guild, _), _| *guild != guild_id);
        Ok((before - records.len()) as u64)
    }

    #[instrument(skip(self))]
    async fn for_guild(&self, guild_id: GuildId) -> StorageResult<Vec<StarRecord>> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|record| record.guild_id() == guild_id)
            .cloned()
            .collect())
    }

    #[instrument(skip(self))]
    async fn top_starred(&self, guild_id: GuildId, limit: usize) -> StorageResult<Vec<StarRecord>> {
        let mut records = self.for_guild(guild_id).await?;
        records.sort_by(|a, b| b.count().cmp(&a.count()));
        records.truncate(limit);
        Ok(records)
    }
}
