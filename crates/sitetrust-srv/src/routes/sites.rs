//! Score and explanation endpoints.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};
use sitetrust_core::scoring::community;
use sitetrust_core::{normalize_host, SiteScoreRecord};

use crate::error::{ApiError, ApiResult};
use crate::pipeline::{self, MODEL_VERSION};
use crate::state::AppState;

/// One raw signal in the explanation payload.
#[derive(Debug, Serialize)]
pub struct Signal {
    pub key: String,
    pub value: Value,
}

/// Full signal dump for a host.
#[derive(Debug, Serialize)]
pub struct Explanation {
    pub host: String,
    pub model_version: String,
    pub signals: Vec<Signal>,
}

/// `GET /v1/sites/{host}` -- cached-or-computed score record.
pub async fn get_site(
    State(state): State<AppState>,
    Path(host): Path<String>,
) -> ApiResult<Json<SiteScoreRecord>> {
    let host = normalize_host(&host)?;
    let record = pipeline::cached_score(&state, &host).await?;
    Ok(Json(record))
}

/// `GET /v1/sites/{host}/explain` -- every raw probe output plus the
/// community inputs. Never cached: this is the debugging surface.
pub async fn explain(
    State(state): State<AppState>,
    Path(host): Path<String>,
) -> ApiResult<Json<Explanation>> {
    let host = normalize_host(&host)?;

    let (votes, bundle) = tokio::join!(
        state.votes.list_for_host(&host),
        state.orchestrator.collect(&host),
    );
    let votes = votes?;
    let estimate = community::estimate(&votes, &state.config.community);

    let mut signals: Vec<Signal> = bundle
        .signals()
        .into_iter()
        .map(|(key, value)| Signal { key, value })
        .collect();
    signals.push(Signal {
        key: "community_wilson".into(),
        value: json!(round2(estimate.u_raw)),
    });
    signals.push(Signal {
        key: "votes_counts".into(),
        value: serde_json::to_value(estimate.counts)
            .map_err(|e| ApiError::Internal(e.to_string()))?,
    });

    Ok(Json(Explanation {
        host,
        model_version: MODEL_VERSION.to_string(),
        signals,
    }))
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
