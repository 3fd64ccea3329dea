//! Star aggregation state machine and starboard display engine.
//!
//! This crate folds reaction events into per-item vote counts and keeps a
//! mirrored post in the guild's starboard channel in sync with a
//! configurable threshold:
//!
//! - [`Starboard`] owns the add/remove/remove-all/reload operations and the
//!   Unposted/Posted/Retracted display state machine.
//! - [`guard`] serializes all mutations per guild and admits at most one
//!   janitor purge process-wide.
//! - [`render`] builds the mirrored post deterministically from a record and
//!   the live item.
//! - [`ReactionEvent`] dispatch filters raw platform events (emoji match,
//!   block lists) and resolves reactions placed on a mirrored post back to
//!   the original item.
//!
//! The chat platform itself is reached only through the collaborator traits
//! in [`host`]; persistence goes through the `starling_storage` seams.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod board;
pub mod guard;
pub mod host;
mod reaction;
pub mod render;
mod stats;

pub use board::Starboard;
pub use reaction::ReactionEvent;
pub use stats::GuildStarStats;
