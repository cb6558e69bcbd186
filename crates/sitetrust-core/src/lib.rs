//! Core types and the scoring engine for sitetrust.
//!
//! This crate provides the foundational pieces shared across the workspace:
//!
//! - **Types**: data contracts for probe signals, votes, and score records
//! - **Host normalization**: the single join key used across stores and cache
//! - **Scoring**: pure signal aggregation, community estimation, and score
//!   composition -- no I/O anywhere in this crate
//!
//! # Example
//!
//! ```rust,ignore
//! use sitetrust_core::scoring::{self, CommunityParams};
//! use sitetrust_core::RawProbeBundle;
//!
//! let bundle = RawProbeBundle::default();
//! let record = scoring::score_site("example.com", &[], &bundle,
//!     &CommunityParams::default(), chrono::Utc::now());
//! println!("{} -> {} ({})", record.host, record.score, record.level);
//! ```

mod error;
pub mod host;
pub mod scoring;
pub mod types;

pub use error::{CoreError, Result};
pub use host::normalize_host;
pub use types::*;
