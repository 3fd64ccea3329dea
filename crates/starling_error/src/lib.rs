//! Error types for the Starling starboard engine.
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use starling_error::{StarError, StarErrorKind, StarResult};
//!
//! fn vote() -> StarResult<()> {
//!     Err(StarError::new(StarErrorKind::AlreadyStarred))
//! }
//!
//! match vote() {
//!     Ok(()) => println!("starred"),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod host;
mod star;
mod storage;

pub use host::{HostError, HostErrorKind, HostResult};
pub use star::{StarError, StarErrorKind, StarResult};
pub use storage::{StorageError, StorageErrorKind, StorageResult};
