//! Core data types for the Starling starboard engine.
//!
//! This crate provides the pure domain model shared by the storage and engine
//! crates: star records, per-guild starboard configuration, the item types
//! fetched from the chat host, and the vote-ratio tier ladder. Nothing here
//! performs I/O.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod id;
mod item;
mod record;
mod tier;

pub use config::{DEFAULT_STAR_EMOJI, GuildStarConfig, StarEmoji};
pub use id::{ChannelId, GuildId, MessageId, UserId};
pub use item::{Attachment, ChannelInfo, GuildProfile, Item, ItemRef};
pub use record::StarRecord;
pub use tier::{Tier, star_ratio};
