//! Starboard error types.
//!
//! The taxonomy covers every expected, recoverable-by-caller condition in the
//! star lifecycle. None of these are process-fatal; each renders as a short,
//! specific message suitable for surfacing to a user.

use crate::{HostError, StorageError};

/// Starboard error variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StarErrorKind {
    /// The guild has no starboard configuration, or no starboard channel set.
    #[display("No starboard is configured for this guild")]
    NotConfigured,

    /// The configured starboard channel no longer exists. The configuration
    /// is deleted as a repair action before this error is raised.
    #[display("The starboard channel no longer exists")]
    StarboardMissing,

    /// The item's channel is not in the guild's allowed-channel set.
    #[display("Channel is not allowed to have messages starred")]
    ChannelNotAllowed,

    /// A voter tried to star their own message.
    #[display("Starring your own message is not allowed")]
    SelfStar,

    /// The voter has already starred this message.
    #[display("Message already starred by this user")]
    AlreadyStarred,

    /// The voter has not starred this message (or no record exists).
    #[display("Message was not starred by this user")]
    NotStarred,

    /// An NSFW item may not be mirrored into a non-NSFW starboard.
    #[display("NSFW message cannot be posted to a SFW starboard")]
    NsfwPolicyViolation,

    /// No star record exists for the given item.
    #[display("No star record found for this message")]
    RecordNotFound,

    /// The record or config store failed.
    #[display("Storage error: {}", _0)]
    Storage(String),

    /// The chat host (item source or mirror channel) failed.
    #[display("Chat host error: {}", _0)]
    Host(String),
}

/// Starboard error with source location tracking.
///
/// # Examples
///
/// ```
/// use starling_error::{StarError, StarErrorKind};
///
/// let err = StarError::new(StarErrorKind::SelfStar);
/// assert_eq!(*err.kind(), StarErrorKind::SelfStar);
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Star Error: {} at line {} in {}", kind, line, file)]
pub struct StarError {
    kind: StarErrorKind,
    line: u32,
    file: &'static str,
}

impl StarError {
    /// Create a new star error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StarErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// The kind of error that occurred.
    pub fn kind(&self) -> &StarErrorKind {
        &self.kind
    }
}

impl From<StorageError> for StarError {
    #[track_caller]
    fn from(err: StorageError) -> Self {
        StarError::new(StarErrorKind::Storage(err.kind.to_string()))
    }
}

impl From<HostError> for StarError {
    #[track_caller]
    fn from(err: HostError) -> Self {
        StarError::new(StarErrorKind::Host(err.kind.to_string()))
    }
}

/// Result type for starboard operations.
pub type StarResult<T> = Result<T, StarError>;
