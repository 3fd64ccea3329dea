//! Read-through guild configuration cache.
//!
//! Every star mutation reads the guild's configuration, so the engine fronts
//! its [`starling_storage::ConfigStore`] with this cache. It is explicit process-wide state:
//! it starts empty, fills on demand, and is invalidated on every write or
//! delete that flows through it. There is no teardown; a cold cache simply
//! rebuilds.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cache;

pub use cache::ConfigCache;
