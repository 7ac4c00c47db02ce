mod answers;
mod assistant;
mod auth;
mod config;
mod db;
mod errors;
mod extract;
mod llm_client;
mod logging;
mod metrics;
mod models;
mod pagination;
mod resume;
mod routes;
mod state;
mod users;
mod validation;

#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::assistant::JobAssistant;
use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::logging::init_logging;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; logging depends on it
    let config = Config::from_env()?;

    // Kept alive until shutdown so the file writer flushes
    let _log_guard = init_logging(&config)?;

    info!(
        "Starting job assistant API v{} ({})",
        env!("CARGO_PKG_VERSION"),
        config.app_env
    );

    let db = create_pool(&config.database_url).await?;
    run_migrations(&db).await?;

    let assistant = JobAssistant::from_config(&config);
    info!("Text generation provider: {}", assistant.configured_provider());

    let state = AppState {
        db,
        config: Arc::new(config.clone()),
        assistant,
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
