use axum::{extract::State, Json};
use serde::Serialize;

use crate::answers::store::count_answers;
use crate::auth::{require_user, CurrentUser};
use crate::errors::AppError;
use crate::resume::store::count_analyses;
use crate::state::AppState;
use crate::users::store::count_users;

#[derive(Debug, Serialize)]
pub struct MetricsSummary {
    pub total_users: i64,
    pub total_resume_analyses: i64,
    pub total_answers: i64,
    /// `None` (serialized as `null`) when no identity was presented.
    pub user_resume_analyses: Option<i64>,
    pub user_answers: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct UserMetrics {
    pub user_id: i64,
    pub resume_analyses: i64,
    pub answers: i64,
}

/// GET /api/metrics/summary
pub async fn handle_metrics_summary(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<MetricsSummary>, AppError> {
    let total_users = count_users(&state.db).await?;
    let total_resume_analyses = count_analyses(&state.db, None).await?;
    let total_answers = count_answers(&state.db, None).await?;

    let (user_resume_analyses, user_answers) = match current.id() {
        Some(user_id) => (
            Some(count_analyses(&state.db, Some(user_id)).await?),
            Some(count_answers(&state.db, Some(user_id)).await?),
        ),
        None => (None, None),
    };

    Ok(Json(MetricsSummary {
        total_users,
        total_resume_analyses,
        total_answers,
        user_resume_analyses,
        user_answers,
    }))
}

/// GET /api/metrics/user
pub async fn handle_user_metrics(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<UserMetrics>, AppError> {
    let user = require_user(&current, "Authentication required to fetch user metrics.")?;

    Ok(Json(UserMetrics {
        user_id: user.id,
        resume_analyses: count_analyses(&state.db, Some(user.id)).await?,
        answers: count_answers(&state.db, Some(user.id)).await?,
    }))
}
