//! Community vote contracts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User identity recorded when a vote arrives without one.
pub const ANONYMOUS_USER: &str = "anonymous";

/// Community vote label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Safe,
    Suspicious,
    Danger,
}

impl Label {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Suspicious => "suspicious",
            Self::Danger => "danger",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One community vote for a host. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    /// Normalized host the vote applies to
    pub host: String,
    /// Voter identity, `"anonymous"` when unauthenticated
    pub user_id: String,
    pub label: Label,
    pub reason: Option<String>,
    pub ts: DateTime<Utc>,
}

/// Per-label vote tallies for one host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteCounts {
    pub safe: u32,
    pub suspicious: u32,
    pub danger: u32,
}

impl VoteCounts {
    /// Tally a list of vote records.
    pub fn tally(votes: &[VoteRecord]) -> Self {
        let mut counts = Self::default();
        for vote in votes {
            match vote.label {
                Label::Safe => counts.safe += 1,
                Label::Suspicious => counts.suspicious += 1,
                Label::Danger => counts.danger += 1,
            }
        }
        counts
    }

    /// Total number of votes.
    #[must_use]
    pub const fn total(self) -> u32 {
        self.safe + self.suspicious + self.danger
    }

    /// Positive weight: safe counts fully, suspicious counts half.
    #[must_use]
    pub fn positive_weight(self) -> f64 {
        f64::from(self.safe) + 0.5 * f64::from(self.suspicious)
    }
}
