//! Chat-host boundary error types.
//!
//! The engine reaches the chat platform only through collaborator traits
//! (item source, mirror channel, guild policy). These errors describe the
//! ways those collaborators can fail.

/// Kinds of chat-host errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum HostErrorKind {
    /// The requested message or channel does not exist.
    #[display("Not found")]
    NotFound,
    /// The process is not permitted to read the requested item.
    #[display("Forbidden")]
    Forbidden,
    /// A mirrored-post create/edit/delete call failed.
    #[display("Post operation failed: {}", _0)]
    PostFailed(String),
    /// The host is unreachable or returned a transport-level error.
    #[display("Host unavailable: {}", _0)]
    Unavailable(String),
}

/// Chat-host error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Host Error: {} at line {} in {}", kind, line, file)]
pub struct HostError {
    /// The kind of error that occurred
    pub kind: HostErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl HostError {
    /// Create a new host error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: HostErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for chat-host operations.
pub type HostResult<T> = Result<T, HostError>;
