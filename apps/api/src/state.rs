use std::sync::Arc;

use sqlx::SqlitePool;

use crate::assistant::JobAssistant;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<Config>,
    pub assistant: JobAssistant,
}
