//! Score composition: weighted blend of sub-scores through a logistic curve.

use crate::types::ScoreBreakdown;

/// Base weights for the four sub-scores. Sum to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseWeights {
    pub s: f64,
    pub c: f64,
    pub t: f64,
    pub u: f64,
}

impl Default for BaseWeights {
    fn default() -> Self {
        Self {
            s: 0.40,
            c: 0.25,
            t: 0.15,
            u: 0.20,
        }
    }
}

/// Compose the final 0-100 score from a breakdown and the community weight
/// factor.
///
/// U's base weight is scaled by `u_factor`; whatever weight U gives up is
/// redistributed across S/C/T proportionally to their base ratios, so the
/// effective weights always sum to 1. A host with no votes composes with
/// `u_factor = 0`, which is numerically identical to leaving U out and
/// renormalizing S/C/T -- there is one composition path, not two.
///
/// The linear blend is mapped through a logistic curve centered at z = 0.5
/// to sharpen separation in the middle of the range, then rounded to one
/// decimal.
pub fn compose_score(breakdown: &ScoreBreakdown, u_factor: f64) -> f64 {
    let base = BaseWeights::default();
    let w_u = base.u * u_factor.clamp(0.0, 1.0);
    let remaining = 1.0 - w_u;
    let base_sum = base.s + base.c + base.t;

    let z = remaining * (base.s / base_sum) * breakdown.s
        + remaining * (base.c / base_sum) * breakdown.c
        + remaining * (base.t / base_sum) * breakdown.t
        + w_u * breakdown.u;

    round1(sigmoid(3.0 * z - 1.5) * 100.0)
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
