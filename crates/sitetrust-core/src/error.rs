use thiserror::Error;

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors produced by the core crate
#[derive(Error, Debug)]
pub enum CoreError {
    /// Host could not be reduced to a usable hostname
    #[error("invalid host: {0:?}")]
    InvalidHost(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
