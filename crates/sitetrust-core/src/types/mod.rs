//! Shared data contracts.

pub mod score;
pub mod signals;
pub mod votes;

pub use score::{Level, ScoreBreakdown, SiteScoreRecord};
pub use signals::{
    EmailAuthSignals, HttpSignals, RawProbeBundle, SeoSignals, TransparencySignals,
};
pub use votes::{Label, VoteCounts, VoteRecord, ANONYMOUS_USER};
