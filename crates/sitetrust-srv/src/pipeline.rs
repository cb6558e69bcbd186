//! The scoring pipeline and its cache-consistency glue.
//!
//! One computation path serves both the read endpoint and the vote
//! endpoint: fetch votes and probe signals concurrently, run the pure
//! scoring engine, persist the record. The cache wraps the read path only;
//! vote submission always recomputes and then poisons the cached entry
//! with a near-zero TTL so the next read recomputes too.

use std::time::Duration;

use chrono::Utc;
use serde_json::Value;
use sitetrust_core::{scoring, SiteScoreRecord, VoteRecord};
use sitetrust_store::cache_key;
use tracing::debug;

use crate::error::ApiResult;
use crate::state::AppState;
use crate::ApiError;

/// Version tag reported by the explain surface; bump when scoring
/// constants change.
pub const MODEL_VERSION: &str = "v0.3";

/// TTL used to overwrite (and thereby invalidate) a cached entry.
const INVALIDATION_TTL: Duration = Duration::from_secs(1);

/// Run the full pipeline for a host and persist the resulting record.
///
/// The record always reflects the vote list and probe bundle read during
/// this invocation. Concurrent pipelines for the same host are not
/// excluded; the later upsert wins.
pub async fn compute_and_store(state: &AppState, host: &str) -> ApiResult<SiteScoreRecord> {
    let (votes, bundle) = tokio::join!(
        state.votes.list_for_host(host),
        state.orchestrator.collect(host),
    );
    let votes = votes?;

    let record = scoring::score_site(
        host,
        &votes,
        &bundle,
        &state.config.community,
        Utc::now(),
    );
    state.scores.upsert(record.clone()).await?;
    Ok(record)
}

/// Read path: cache hit returns verbatim, miss computes and populates.
///
/// A null cache value (the invalidation marker) and an unreadable entry
/// both count as misses.
pub async fn cached_score(state: &AppState, host: &str) -> ApiResult<SiteScoreRecord> {
    let key = cache_key(host);

    if let Some(value) = state.cache.get_json(&key).await {
        if !value.is_null() {
            match serde_json::from_value::<SiteScoreRecord>(value) {
                Ok(record) => {
                    debug!(host, "cache hit");
                    return Ok(record);
                }
                Err(e) => debug!(host, error = %e, "cache entry unreadable; recomputing"),
            }
        }
    }

    let record = compute_and_store(state, host).await?;
    let value = serde_json::to_value(&record).map_err(|e| ApiError::Internal(e.to_string()))?;
    state
        .cache
        .set_json(&key, value, state.config.cache_ttl)
        .await;
    Ok(record)
}

/// Vote path: append, recompute synchronously, invalidate the cache entry.
pub async fn submit_vote(state: &AppState, vote: VoteRecord) -> ApiResult<SiteScoreRecord> {
    let host = vote.host.clone();
    state.votes.append(vote).await?;

    let record = compute_and_store(state, &host).await?;
    state
        .cache
        .set_json(&cache_key(&host), Value::Null, INVALIDATION_TTL)
        .await;
    Ok(record)
}
