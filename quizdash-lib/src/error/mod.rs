//! Error types

mod api;
mod session;

pub use api::*;
pub use session::*;

/// Top-level error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error during an API call.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Error from the session layer.
    #[error(transparent)]
    Session(#[from] SessionError),
}
