use axum::{extract::State, Json};
use serde::Serialize;
use tracing::error;

use crate::db::ping;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatusChecks {
    pub database: &'static str,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub environment: String,
    pub llm_provider: &'static str,
    pub checks: StatusChecks,
}

/// GET /status
/// Always 200. A failed storage probe is reported as `degraded`, never raised.
pub async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    let database = match ping(&state.db).await {
        Ok(()) => "ok",
        Err(e) => {
            error!("database health check failed: {e}");
            "error"
        }
    };

    Json(StatusResponse {
        status: if database == "ok" { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.app_env.clone(),
        llm_provider: state.assistant.configured_provider().as_str(),
        checks: StatusChecks { database },
    })
}
