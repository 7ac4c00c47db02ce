use axum::{extract::State, http::StatusCode};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::answers::store::list_answers_for_analysis;
use crate::auth::{reconcile_user_id, CurrentUser};
use crate::errors::AppError;
use crate::extract::{Json, Path, Query};
use crate::models::answer::InterviewAnswerRow;
use crate::models::resume::ResumeAnalysisRow;
use crate::pagination::ListQuery;
use crate::resume::store::{find_analysis, insert_analysis, list_analyses, NewAnalysis};
use crate::state::AppState;
use crate::users::store::find_user;
use crate::validation;

const MIN_RESUME_CHARS: usize = 20;

#[derive(Debug, Deserialize)]
pub struct AnalyzeResumeRequest {
    #[serde(default)]
    pub user_id: Option<i64>,
    pub resume_text: String,
}

/// POST /api/resume/analyze
///
/// Summarizes the submitted text and stores it. The stored `provider` is the
/// one that actually produced the summary.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(request): Json<AnalyzeResumeRequest>,
) -> Result<(StatusCode, Json<ResumeAnalysisRow>), AppError> {
    validation::min_chars("resume_text", &request.resume_text, MIN_RESUME_CHARS)?;

    let user_id = reconcile_user_id(&current, request.user_id)?;
    if let Some(user_id) = user_id {
        if current.id() != Some(user_id) && find_user(&state.db, user_id).await?.is_none() {
            warn!("resume analysis for missing user_id={user_id}");
            return Err(AppError::NotFound("User not found.".to_string()));
        }
    }

    let generated = state.assistant.summarize(&request.resume_text).await;

    let analysis = insert_analysis(
        &state.db,
        NewAnalysis {
            user_id,
            resume_text: &request.resume_text,
            summary: &generated.text,
            provider: generated.provider,
        },
    )
    .await
    .map_err(|e| {
        error!("failed to create resume analysis user_id={user_id:?} error={e}");
        AppError::Database(e)
    })?;

    info!(
        "created resume analysis id={} user_id={:?} provider={}",
        analysis.id, analysis.user_id, generated.provider
    );
    Ok((StatusCode::CREATED, Json(analysis)))
}

/// GET /api/resume?limit&offset&user_id
pub async fn handle_list_analyses(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ResumeAnalysisRow>>, AppError> {
    let page = query.page()?;
    let analyses = list_analyses(&state.db, query.user_id, page).await?;
    Ok(Json(analyses))
}

/// GET /api/resume/:id
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    Path(analysis_id): Path<i64>,
) -> Result<Json<ResumeAnalysisRow>, AppError> {
    let analysis = find_analysis(&state.db, analysis_id)
        .await?
        .ok_or_else(resume_not_found)?;
    Ok(Json(analysis))
}

/// GET /api/resume/:id/answers?limit&offset
pub async fn handle_list_analysis_answers(
    State(state): State<AppState>,
    Path(analysis_id): Path<i64>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<InterviewAnswerRow>>, AppError> {
    let page = query.page()?;
    if find_analysis(&state.db, analysis_id).await?.is_none() {
        return Err(resume_not_found());
    }
    let answers = list_answers_for_analysis(&state.db, analysis_id, page).await?;
    Ok(Json(answers))
}

pub fn resume_not_found() -> AppError {
    AppError::NotFound("Resume analysis not found.".to_string())
}
