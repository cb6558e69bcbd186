//! sitetrustd -- the sitetrust API server.

use std::time::Duration;

use anyhow::Context;
use sitetrust_srv::{routes, AppState, Config};
use sitetrust_store::StoreError;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Bounded startup gate for storage reachability.
const STARTUP_ATTEMPTS: u32 = 30;
const STARTUP_RETRY_DELAY: Duration = Duration::from_secs(1);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sitetrust_srv=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();
    let config = Config::from_env();
    let bind = config.bind;

    info!(
        addr = %bind,
        cache_ttl_secs = config.cache_ttl.as_secs(),
        ramp_n = config.community.ramp_n,
        threat_probe = config.threat_api_key.is_some(),
        "starting sitetrust API"
    );

    let state = AppState::new(config);

    // The process must not serve traffic against an unreachable store.
    wait_for_stores(&state)
        .await
        .context("storage unavailable at startup")?;

    let app = routes::router(state);
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("bind {bind}"))?;
    info!(addr = %bind, "sitetrust API listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

/// Retry the store healthchecks with a fixed delay; fatal once exhausted.
async fn wait_for_stores(state: &AppState) -> Result<(), StoreError> {
    let mut last = None;
    for attempt in 1..=STARTUP_ATTEMPTS {
        match tokio::try_join!(state.votes.healthcheck(), state.scores.healthcheck()) {
            Ok(_) => return Ok(()),
            Err(e) => {
                warn!(attempt, error = %e, "storage healthcheck failed; retrying");
                last = Some(e);
                tokio::time::sleep(STARTUP_RETRY_DELAY).await;
            }
        }
    }
    Err(last.unwrap_or_else(|| StoreError::Unavailable("healthcheck never ran".into())))
}
