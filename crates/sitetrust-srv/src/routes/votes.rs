//! Vote submission endpoint.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sitetrust_core::{normalize_host, Label, VoteRecord, ANONYMOUS_USER};

use crate::error::ApiResult;
use crate::pipeline;
use crate::state::AppState;

/// Inbound vote payload. An unknown label fails deserialization at the
/// boundary, which is the only user-visible failure class.
#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub host: String,
    pub label: Label,
    pub reason: Option<String>,
    pub user: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VoteResponse {
    pub ok: bool,
    pub new_score: f64,
}

/// `POST /v1/votes` -- append the vote, recompute synchronously, and
/// invalidate the cached response.
pub async fn submit(
    State(state): State<AppState>,
    Json(payload): Json<VoteRequest>,
) -> ApiResult<Json<VoteResponse>> {
    let host = normalize_host(&payload.host)?;

    let vote = VoteRecord {
        host,
        user_id: payload
            .user
            .filter(|user| !user.trim().is_empty())
            .unwrap_or_else(|| ANONYMOUS_USER.to_string()),
        label: payload.label,
        reason: payload.reason,
        ts: Utc::now(),
    };

    let record = pipeline::submit_vote(&state, vote).await?;
    Ok(Json(VoteResponse {
        ok: true,
        new_score: record.score,
    }))
}
