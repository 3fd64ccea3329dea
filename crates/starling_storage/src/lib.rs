//! Record and configuration store seams for the Starling starboard engine.
//!
//! The engine persists exactly two entities: [`starling_core::StarRecord`]
//! and [`starling_core::GuildStarConfig`]. Both are reached through async
//! trait seams so deployments can plug in a durable backend; the in-memory
//! implementations here back the engine's tests and small single-process
//! deployments.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config_store;
mod record_store;

pub use config_store::{ConfigStore, MemoryConfigStore};
pub use record_store::{MemoryRecordStore, RecordStore};
