//! Aggregate starboard reporting.
//!
//! Reporting is a read-side feature computed from a full-guild record scan;
//! it is not part of the state-machine contract.

use starling_core::{StarRecord, UserId};
use std::collections::HashMap;

/// Starboard statistics for one guild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildStarStats {
    /// Total number of starred messages.
    pub total_starred: usize,
    /// Users whose messages collected the most stars, with their totals.
    pub top_receivers: Vec<(UserId, usize)>,
    /// Users who gave the most stars, with their totals.
    pub top_givers: Vec<(UserId, usize)>,
}

/// Compute stats from a guild's records, keeping the top `limit` entries of
/// each ranking. Ties break toward the lower user ID so the result is
/// deterministic.
pub(crate) fn compute(records: &[StarRecord], limit: usize) -> GuildStarStats {
    let mut receivers: HashMap<UserId, usize> = HashMap::new();
    let mut givers: HashMap<UserId, usize> = HashMap::new();

    for record in records {
        *receivers.entry(record.author_id()).or_default() += record.count();
        for starrer in record.starrers() {
            *givers.entry(*starrer).or_default() += 1;
        }
    }

    GuildStarStats {
        total_starred: records.len(),
        top_receivers: ranked(receivers, limit),
        top_givers: ranked(givers, limit),
    }
}

fn ranked(counts: HashMap<UserId, usize>, limit: usize) -> Vec<(UserId, usize)> {
    let mut entries: Vec<_> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    entries.truncate(limit);
    entries
}
