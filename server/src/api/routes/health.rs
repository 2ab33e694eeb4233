//! Health check endpoint
//!
//! Each check round-trips the store, so the report reflects database
//! reachability and not just process liveness.

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use serde::Serialize;
use utoipa::ToSchema;

use crate::data::SqliteService;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub version: &'static str,
}

/// Shared state for the health endpoint
#[derive(Clone)]
pub struct HealthApiState {
    pub database: Arc<SqliteService>,
}

/// Build the health route
pub fn routes(database: Arc<SqliteService>) -> Router<()> {
    let state = HealthApiState { database };

    Router::new()
        .route("/api/v1/health", get(health))
        .with_state(state)
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "health",
    responses(
        (status = 200, description = "Service and store are healthy", body = HealthResponse),
        (status = 503, description = "Store is unreachable", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<HealthApiState>) -> (StatusCode, Json<HealthResponse>) {
    match state.database.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                database: "ok",
                version: env!("CARGO_PKG_VERSION"),
            }),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Health check could not reach the store");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "degraded",
                    database: "unreachable",
                    version: env!("CARGO_PKG_VERSION"),
                }),
            )
        }
    }
}
