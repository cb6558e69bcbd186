//! sitetrust HTTP API.
//!
//! Serves trust scores, score explanations, and vote submission under a
//! versioned prefix. All scoring goes through the one pipeline in
//! [`pipeline`]; the route handlers only normalize input, drive the
//! pipeline, and shape responses.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod routes;
pub mod state;

pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use routes::router;
pub use state::AppState;
