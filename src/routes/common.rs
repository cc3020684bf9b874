//! Operational routes: health, readiness, version.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Probes the two catalog tables rather than a bare SELECT 1, so readiness
/// flips if the pool is up but the bootstrap DDL never ran.
async fn ready(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let category = table_ready(&state.pool, "category").await;
    let product = table_ready(&state.pool, "product").await;
    let ok = category && product;
    let body = json!({
        "status": if ok { "ok" } else { "degraded" },
        "catalog": {
            "category": if category { "ok" } else { "unavailable" },
            "product": if product { "ok" } else { "unavailable" },
        }
    });
    let status = if ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(body))
}

async fn table_ready(pool: &PgPool, table: &str) -> bool {
    // Succeeds on an empty table; fails if the table or connection is gone.
    sqlx::query(&format!("SELECT 1 FROM {} LIMIT 1", table))
        .fetch_optional(pool)
        .await
        .is_ok()
}

async fn version() -> Json<Value> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /health, GET /ready (catalog table probes), GET /version.
pub fn common_routes_with_ready(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .with_state(state)
}
