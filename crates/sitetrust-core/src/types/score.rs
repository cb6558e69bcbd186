//! Score record contracts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Discrete risk level derived from the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Green,
    Amber,
    Red,
}

impl Level {
    /// Classify a 0-100 score. Band lower bounds are inclusive.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Green
        } else if score >= 60.0 {
            Self::Amber
        } else {
            Self::Red
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Amber => "amber",
            Self::Red => "red",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized sub-scores, each clamped to [0,1].
///
/// `u` holds the ramp-adjusted community value, or the neutral baseline
/// when no votes exist; how much weight it actually received is recorded
/// separately as the composer's `u_factor`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    #[serde(rename = "S")]
    pub s: f64,
    #[serde(rename = "C")]
    pub c: f64,
    #[serde(rename = "T")]
    pub t: f64,
    #[serde(rename = "U")]
    pub u: f64,
}

/// Current computed score for one host. Upserted by host, never deleted.
///
/// Invariant: `u_included == (votes_total > 0)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteScoreRecord {
    pub host: String,
    /// Final score in [0,100], rounded to one decimal
    pub score: f64,
    pub level: Level,
    pub breakdown: ScoreBreakdown,
    pub updated_at: DateTime<Utc>,
    pub votes_total: u32,
    pub u_included: bool,
}
