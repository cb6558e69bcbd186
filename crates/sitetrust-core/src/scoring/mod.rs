//! Pure scoring pipeline: raw signals and votes in, score record out.

pub mod community;
pub mod compose;
pub mod signals;

pub use community::{wilson_lower_bound, CommunityEstimate, CommunityParams};
pub use compose::{compose_score, BaseWeights};
pub use signals::{credibility_score, domain_heuristic, security_score, transparency_score};

use chrono::{DateTime, Utc};

use crate::types::{RawProbeBundle, ScoreBreakdown, SiteScoreRecord, VoteRecord};

/// Compute the full score record for one host.
///
/// The single scoring entry point: both the read path and the vote path go
/// through here, so the two can never drift apart. Pure -- callers supply
/// the vote list, the probe bundle, and the timestamp.
pub fn score_site(
    host: &str,
    votes: &[VoteRecord],
    bundle: &RawProbeBundle,
    params: &CommunityParams,
    now: DateTime<Utc>,
) -> SiteScoreRecord {
    let community = community::estimate(votes, params);
    let breakdown = ScoreBreakdown {
        s: signals::security_score(bundle),
        c: signals::credibility_score(host, bundle),
        t: signals::transparency_score(bundle),
        u: community.u_adjusted,
    };
    let score = compose::compose_score(&breakdown, community.u_factor);

    SiteScoreRecord {
        host: host.to_string(),
        score,
        level: crate::types::Level::from_score(score),
        breakdown,
        updated_at: now,
        votes_total: community.counts.total(),
        u_included: community.included,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Label, Level};

    fn vote(label: Label) -> VoteRecord {
        VoteRecord {
            host: "example.com".into(),
            user_id: "anonymous".into(),
            label,
            reason: None,
            ts: Utc::now(),
        }
    }

    #[test]
    fn unreachable_host_with_no_votes_scores_neutral() {
        // All probes failed: every signal at its neutral default.
        let record = score_site(
            "example.com",
            &[],
            &RawProbeBundle::default(),
            &CommunityParams::default(),
            Utc::now(),
        );
        assert!((record.breakdown.s - 0.5).abs() < 1e-9);
        assert!((record.breakdown.c - 0.6).abs() < 1e-9);
        assert!((record.breakdown.t - 0.4).abs() < 1e-9);
        assert!((record.breakdown.u - 0.5).abs() < 1e-9);
        // z = (0.4*0.5 + 0.25*0.6 + 0.15*0.4) / 0.8 = 0.5125
        assert!((record.score - 50.9).abs() < 1e-9);
        assert_eq!(record.level, Level::Red);
        assert_eq!(record.votes_total, 0);
        assert!(!record.u_included);
    }

    #[test]
    fn first_safe_vote_moves_u_toward_wilson() {
        let params = CommunityParams::default();
        let bundle = RawProbeBundle::default();

        let before = score_site("example.com", &[], &bundle, &params, Utc::now());
        let after = score_site(
            "example.com",
            &[vote(Label::Safe)],
            &bundle,
            &params,
            Utc::now(),
        );

        assert_eq!(before.votes_total, 0);
        assert_eq!(after.votes_total, 1);
        assert!(!before.u_included);
        assert!(after.u_included);
        // Wilson lower bound for 1/1 is ~0.2065; ramped at 0.1 toward 0.5.
        let expected_u = 0.1 * wilson_lower_bound(1.0, 1.0) + 0.9 * 0.5;
        assert!((after.breakdown.u - expected_u).abs() < 1e-9);
        assert!(after.breakdown.u < before.breakdown.u);
    }

    #[test]
    fn record_invariant_votes_imply_u_included() {
        let params = CommunityParams::default();
        let bundle = RawProbeBundle::default();
        for votes in [vec![], vec![vote(Label::Danger)], vec![vote(Label::Safe); 12]] {
            let record = score_site("example.com", &votes, &bundle, &params, Utc::now());
            assert_eq!(record.u_included, record.votes_total > 0);
        }
    }
}
