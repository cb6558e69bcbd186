//! Liveness endpoint.

use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

/// `GET /v1/health`
pub async fn check() -> Json<Value> {
    Json(json!({
        "ok": true,
        "service": "sitetrust-srv",
        "version": env!("CARGO_PKG_VERSION"),
        "time": Utc::now().to_rfc3339(),
    }))
}
