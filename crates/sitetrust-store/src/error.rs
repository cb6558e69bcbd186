use thiserror::Error;

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in vote/score storage.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Backend cannot be reached
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Backend accepted the request but failed to execute it
    #[error("storage backend error: {0}")]
    Backend(String),
}
