//! Community trust estimation.
//!
//! Sparse vote samples are treated conservatively: the Wilson score lower
//! bound keeps one enthusiastic vote from reading as certainty, and a ramp
//! blends the bound toward a neutral baseline until enough votes accumulate.

use crate::types::{VoteCounts, VoteRecord};

/// z for a 95% confidence interval.
const WILSON_Z: f64 = 1.96;

/// Tunables for the community estimator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommunityParams {
    /// Neutral U value blended in while votes are few
    pub baseline: f64,
    /// Votes needed before the community signal carries full weight
    pub ramp_n: u32,
}

impl Default for CommunityParams {
    fn default() -> Self {
        Self {
            baseline: 0.5,
            ramp_n: 10,
        }
    }
}

/// Output of the community estimator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommunityEstimate {
    /// Wilson lower bound on the positive-vote proportion
    pub u_raw: f64,
    /// Ramp-blended value that enters the score breakdown
    pub u_adjusted: f64,
    /// How much weight U should receive in composition, in [0,1]
    pub u_factor: f64,
    pub counts: VoteCounts,
    /// Whether any votes exist at all
    pub included: bool,
}

/// Wilson score lower bound for a Bernoulli proportion at z = 1.96.
///
/// `pos` may be fractional (suspicious votes weigh half). Returns the
/// neutral 0.5 when there are no trials.
pub fn wilson_lower_bound(pos: f64, n: f64) -> f64 {
    if n <= 0.0 {
        return 0.5;
    }
    let z = WILSON_Z;
    let phat = pos / n;
    let denom = 1.0 + z * z / n;
    let center = phat + z * z / (2.0 * n);
    let margin = z * ((phat * (1.0 - phat) + z * z / (4.0 * n)) / n).sqrt();
    ((center - margin) / denom).clamp(0.0, 1.0)
}

/// Estimate the community trust value for a host's vote list.
pub fn estimate(votes: &[VoteRecord], params: &CommunityParams) -> CommunityEstimate {
    let counts = VoteCounts::tally(votes);
    let n = counts.total();

    if n == 0 {
        return CommunityEstimate {
            u_raw: 0.5,
            u_adjusted: params.baseline,
            u_factor: 0.0,
            counts,
            included: false,
        };
    }

    let u_raw = wilson_lower_bound(counts.positive_weight(), f64::from(n));
    let alpha = if params.ramp_n == 0 {
        1.0
    } else {
        (f64::from(n) / f64::from(params.ramp_n)).clamp(0.0, 1.0)
    };
    let u_adjusted = (alpha * u_raw + (1.0 - alpha) * params.baseline).clamp(0.0, 1.0);

    CommunityEstimate {
        u_raw,
        u_adjusted,
        u_factor: alpha,
        counts,
        included: true,
    }
}
