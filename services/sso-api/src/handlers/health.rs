//! Liveness and readiness probes

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use std::time::Instant;

use crate::state::AppState;

const SERVICE: &str = "sso-api";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub database: DatabaseCheck,
}

/// Outcome of the storage ping
#[derive(Debug, Serialize)]
pub struct DatabaseCheck {
    pub ok: bool,
    pub latency_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE,
    })
}

/// GET /ready
///
/// 200 when the store answers `SELECT 1`, 503 with the failed check otherwise.
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadyResponse>) {
    let database = ping_database(&state).await;

    let (status, label) = if database.ok {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not_ready")
    };

    (
        status,
        Json(ReadyResponse {
            status: label,
            service: SERVICE,
            database,
        }),
    )
}

async fn ping_database(state: &AppState) -> DatabaseCheck {
    let start = Instant::now();
    let result = sqlx::query("SELECT 1").execute(&*state.pool).await;
    let latency_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(_) => DatabaseCheck {
            ok: true,
            latency_ms,
            error: None,
        },
        Err(e) => {
            tracing::warn!(error = %e, latency_ms, "database ping failed");
            DatabaseCheck {
                ok: false,
                latency_ms,
                error: Some(e.to_string()),
            }
        }
    }
}
