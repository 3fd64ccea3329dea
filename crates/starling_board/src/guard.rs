//! Concurrency guards: per-guild locks and the janitor admission gate.

use starling_core::GuildId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard, OwnedSemaphorePermit, Semaphore};
use tracing::debug;

/// One exclusive, non-reentrant lock per guild.
///
/// Locks are created lazily on first use and retained for the process
/// lifetime; the map only ever grows. Operations on the same guild are
/// strictly serialized, operations on different guilds proceed in parallel.
///
/// # Examples
///
/// ```
/// use starling_board::guard::GuildLocks;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let locks = GuildLocks::new();
/// let guard = locks.acquire(1).await;
/// drop(guard);
/// # }
/// ```
#[derive(Debug, Default)]
pub struct GuildLocks {
    locks: Mutex<HashMap<GuildId, Arc<Mutex<()>>>>,
}

impl GuildLocks {
    /// Create an empty lock map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for a guild, waiting if another operation on the
    /// same guild is in flight. The lock is released when the returned guard
    /// drops, on every exit path.
    pub async fn acquire(&self, guild_id: GuildId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks
                .entry(guild_id)
                .or_insert_with(|| {
                    debug!(guild_id, "created guild lock");
                    Arc::new(Mutex::new(()))
                })
                .clone()
        };
        lock.lock_owned().await
    }

    /// Number of guilds with a lock allocated.
    pub async fn len(&self) -> usize {
        self.locks.lock().await.len()
    }

    /// Whether no guild locks have been allocated yet.
    pub async fn is_empty(&self) -> bool {
        self.locks.lock().await.is_empty()
    }
}

/// Single-slot admission gate for bulk-cleanup work.
///
/// At most one janitor pass runs process-wide at any time; further callers
/// queue until the permit is released. The permit is released when the
/// returned guard drops, on every exit path.
#[derive(Debug, Clone)]
pub struct JanitorGate {
    permits: Arc<Semaphore>,
}

impl JanitorGate {
    /// Create a gate with a single permit.
    pub fn new() -> Self {
        Self {
            permits: Arc::new(Semaphore::new(1)),
        }
    }

    /// Wait for the single permit.
    pub async fn admit(&self) -> OwnedSemaphorePermit {
        self.permits
            .clone()
            .acquire_owned()
            .await
            .expect("janitor gate is never closed")
    }
}

impl Default for JanitorGate {
    fn default() -> Self {
        Self::new()
    }
}
