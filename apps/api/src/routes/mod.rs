pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::answers::handlers as answers;
use crate::metrics::handlers as metrics;
use crate::resume::handlers as resume;
use crate::state::AppState;
use crate::users::handlers as users;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/status", get(health::status_handler))
        // Users
        .route("/api/users", post(users::handle_create_user))
        .route("/api/users/:id", get(users::handle_get_user))
        // Resume analyses
        .route("/api/resume", get(resume::handle_list_analyses))
        .route("/api/resume/analyze", post(resume::handle_analyze_resume))
        .route("/api/resume/:id", get(resume::handle_get_analysis))
        .route(
            "/api/resume/:id/answers",
            get(resume::handle_list_analysis_answers),
        )
        // Interview answers
        .route("/api/generate/answer", post(answers::handle_generate_answer))
        .route("/api/answers", get(answers::handle_list_answers))
        .route(
            "/api/answers/:id",
            get(answers::handle_get_answer).delete(answers::handle_delete_answer),
        )
        // Metrics
        .route("/api/metrics/summary", get(metrics::handle_metrics_summary))
        .route("/api/metrics/user", get(metrics::handle_user_metrics))
        .with_state(state)
}
