//! Session error types

/// Errors from the session layer.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SessionError {
    /// The current session's credential has expired.
    #[error("session expired")]
    Expired,

    /// An operation required a session but none is active.
    #[error("no active session")]
    Missing,
}
