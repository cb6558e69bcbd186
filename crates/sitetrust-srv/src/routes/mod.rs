//! Route wiring.

pub mod health;
pub mod sites;
pub mod votes;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Versioned API prefix.
pub const API_PREFIX: &str = "/v1";

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/sites/:host", get(sites::get_site))
        .route("/sites/:host/explain", get(sites::explain))
        .route("/votes", post(votes::submit))
        .route("/health", get(health::check));

    Router::new()
        .nest(API_PREFIX, api)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use sitetrust_probes::OrchestratorConfig;
    use std::time::Duration;
    use tower::ServiceExt;

    /// State whose probes all fail fast: no network dependency, every
    /// signal lands on its neutral default.
    fn offline_state() -> AppState {
        let config = Config {
            bind: "127.0.0.1:0".parse().unwrap(),
            cache_ttl: Duration::from_secs(900),
            community: sitetrust_core::scoring::CommunityParams::default(),
            threat_api_key: None,
            probe_deadline: Duration::from_secs(2),
            cache_disabled: false,
        };
        let probes = OrchestratorConfig {
            http_timeout: Duration::from_millis(300),
            seo_timeout: Duration::from_millis(300),
            transparency_timeout: Duration::from_millis(300),
            email_auth_timeout: Duration::from_millis(300),
            dnssec_timeout: Duration::from_millis(300),
            tls_timeout: Duration::from_millis(300),
            threat_timeout: Duration::from_millis(300),
            overall_deadline: Duration::from_secs(2),
        };
        AppState::with_orchestrator(config, probes)
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn post_json(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn health_reports_service_identity() {
        let app = router(offline_state());
        let (status, body) = get_json(&app, "/v1/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["service"], "sitetrust-srv");
        assert!(body["version"].is_string());
        assert!(body["time"].is_string());
    }

    #[tokio::test]
    async fn unreachable_host_gets_the_neutral_score() {
        let app = router(offline_state());
        let (status, body) = get_json(&app, "/v1/sites/unreachable.invalid").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["host"], "unreachable.invalid");
        assert_eq!(body["score"], 50.9);
        assert_eq!(body["level"], "red");
        assert_eq!(body["votes_total"], 0);
        assert_eq!(body["u_included"], false);
        assert_eq!(body["breakdown"]["S"], 0.5);
        assert_eq!(body["breakdown"]["C"], 0.6);
        assert_eq!(body["breakdown"]["T"], 0.4);
        assert_eq!(body["breakdown"]["U"], 0.5);
    }

    #[tokio::test]
    async fn host_is_normalized_before_scoring() {
        let app = router(offline_state());
        let (status, body) = get_json(&app, "/v1/sites/Unreachable.INVALID.").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["host"], "unreachable.invalid");
    }

    #[tokio::test]
    async fn repeated_reads_hit_the_cache() {
        let app = router(offline_state());
        let (_, first) = get_json(&app, "/v1/sites/cached.invalid").await;
        let (_, second) = get_json(&app, "/v1/sites/cached.invalid").await;
        // Identical timestamp proves the second response was served
        // verbatim from cache, not recomputed.
        assert_eq!(first["updated_at"], second["updated_at"]);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn vote_recomputes_and_invalidates() {
        let app = router(offline_state());

        let (_, before) = get_json(&app, "/v1/sites/voted.invalid").await;
        assert_eq!(before["votes_total"], 0);

        let (status, vote_body) = post_json(
            &app,
            "/v1/votes",
            r#"{"host": "voted.invalid", "label": "safe"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(vote_body["ok"], true);
        assert_eq!(vote_body["new_score"], 50.9);

        let (_, after) = get_json(&app, "/v1/sites/voted.invalid").await;
        assert_eq!(after["votes_total"], 1);
        assert_eq!(after["u_included"], true);
        // One safe vote at ramp 10: U = 0.1 * wilson(1,1) + 0.9 * 0.5.
        let u = after["breakdown"]["U"].as_f64().unwrap();
        assert!((u - 0.470_654_3).abs() < 1e-6);
        // Cache was invalidated: the read after the vote recomputed.
        assert_ne!(before["updated_at"], after["updated_at"]);
    }

    #[tokio::test]
    async fn unknown_label_is_a_client_error() {
        let app = router(offline_state());
        let (status, _) = post_json(
            &app,
            "/v1/votes",
            r#"{"host": "x.invalid", "label": "awesome"}"#,
        )
        .await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn blank_host_is_rejected() {
        let app = router(offline_state());
        let (status, body) = post_json(&app, "/v1/votes", r#"{"host": "   ", "label": "safe"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("invalid host"));
    }

    #[tokio::test]
    async fn explain_enumerates_raw_signals() {
        let app = router(offline_state());
        let (status, body) = get_json(&app, "/v1/sites/explained.invalid/explain").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["host"], "explained.invalid");
        assert_eq!(body["model_version"], "v0.3");

        let signals = body["signals"].as_array().unwrap();
        let find = |key: &str| {
            signals
                .iter()
                .find(|s| s["key"] == key)
                .unwrap_or_else(|| panic!("missing signal {key}"))
        };
        assert_eq!(find("https_ok")["value"], false);
        assert_eq!(find("dnssec")["value"], false);
        assert_eq!(find("threat_list_flagged")["value"], false);
        assert_eq!(find("community_wilson")["value"], 0.5);
        assert_eq!(find("votes_counts")["value"]["safe"], 0);
    }
}
