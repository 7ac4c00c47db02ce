use axum::{extract::State, http::StatusCode};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::answers::ownership::{check_can_delete, check_resume_owner};
use crate::answers::store::{delete_answer, find_answer, insert_answer, list_answers, NewAnswer};
use crate::assistant::AnswerPrompt;
use crate::auth::{reconcile_user_id, require_user, CurrentUser};
use crate::errors::AppError;
use crate::extract::{Json, Path, Query};
use crate::models::answer::InterviewAnswerRow;
use crate::pagination::ListQuery;
use crate::resume::handlers::resume_not_found;
use crate::resume::store::find_analysis;
use crate::state::AppState;
use crate::users::store::find_user;
use crate::validation;

const MIN_QUESTION_CHARS: usize = 5;
const MAX_CONTEXT_CHARS: usize = 100;

#[derive(Debug, Deserialize)]
pub struct GenerateAnswerRequest {
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub resume_analysis_id: Option<i64>,
    pub question: String,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
}

impl GenerateAnswerRequest {
    fn validate(&self) -> Result<(), AppError> {
        validation::min_chars("question", &self.question, MIN_QUESTION_CHARS)?;
        if let Some(job_title) = &self.job_title {
            validation::max_chars("job_title", job_title, MAX_CONTEXT_CHARS)?;
        }
        if let Some(company_name) = &self.company_name {
            validation::max_chars("company_name", company_name, MAX_CONTEXT_CHARS)?;
        }
        Ok(())
    }
}

/// POST /api/generate/answer
///
/// Checks run in a fixed order: fields, identity, resume lookup, resume
/// ownership, user lookup. Nothing is written until all of them pass and the
/// assistant has returned.
pub async fn handle_generate_answer(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(request): Json<GenerateAnswerRequest>,
) -> Result<(StatusCode, Json<InterviewAnswerRow>), AppError> {
    request.validate()?;
    let job_title = validation::non_blank(request.job_title);
    let company_name = validation::non_blank(request.company_name);

    let user_id = reconcile_user_id(&current, request.user_id)?;

    let resume = match request.resume_analysis_id {
        Some(analysis_id) => Some(
            find_analysis(&state.db, analysis_id)
                .await?
                .ok_or_else(resume_not_found)?,
        ),
        None => None,
    };

    if let Some(resume) = &resume {
        check_resume_owner(resume, user_id).map_err(|e| {
            warn!(
                "answer for resume {} owned by {:?} requested by user {:?}",
                resume.id, resume.user_id, user_id
            );
            e
        })?;
    }

    if let Some(user_id) = user_id {
        if current.id() != Some(user_id) && find_user(&state.db, user_id).await?.is_none() {
            return Err(AppError::NotFound("User not found.".to_string()));
        }
    }

    let generated = state
        .assistant
        .generate_answer(AnswerPrompt {
            question: &request.question,
            job_title: job_title.as_deref(),
            company_name: company_name.as_deref(),
            resume_summary: resume.as_ref().map(|r| r.summary.as_str()),
        })
        .await;

    let answer = insert_answer(
        &state.db,
        NewAnswer {
            user_id,
            resume_analysis_id: request.resume_analysis_id,
            question: &request.question,
            job_title: job_title.as_deref(),
            company_name: company_name.as_deref(),
            answer: &generated.text,
            provider: generated.provider,
        },
    )
    .await
    .map_err(|e| {
        error!("failed to create interview answer user_id={user_id:?} error={e}");
        AppError::Database(e)
    })?;

    info!(
        "created interview answer id={} user_id={:?} resume_analysis_id={:?} provider={}",
        answer.id, answer.user_id, answer.resume_analysis_id, generated.provider
    );
    Ok((StatusCode::CREATED, Json(answer)))
}

/// GET /api/answers?limit&offset&user_id
///
/// With an identity header and no `user_id`, the caller's own answers are listed.
pub async fn handle_list_answers(
    State(state): State<AppState>,
    current: CurrentUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<InterviewAnswerRow>>, AppError> {
    let page = query.page()?;
    let user_id = reconcile_user_id(&current, query.user_id)?;
    let answers = list_answers(&state.db, user_id, page).await?;
    Ok(Json(answers))
}

/// GET /api/answers/:id
pub async fn handle_get_answer(
    State(state): State<AppState>,
    Path(answer_id): Path<i64>,
) -> Result<Json<InterviewAnswerRow>, AppError> {
    let answer = find_answer(&state.db, answer_id)
        .await?
        .ok_or_else(answer_not_found)?;
    Ok(Json(answer))
}

/// DELETE /api/answers/:id
pub async fn handle_delete_answer(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(answer_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let caller = require_user(&current, "Authentication required to delete answers.")?;

    let answer = find_answer(&state.db, answer_id)
        .await?
        .ok_or_else(answer_not_found)?;

    check_can_delete(&answer, caller.id).map_err(|e| {
        warn!(
            "user {} attempted to delete answer {} owned by {:?}",
            caller.id, answer.id, answer.user_id
        );
        e
    })?;

    let deleted = delete_answer(&state.db, answer_id).await.map_err(|e| {
        error!("failed to delete interview answer id={answer_id} error={e}");
        AppError::Database(e)
    })?;
    if !deleted {
        return Err(answer_not_found());
    }

    info!("deleted interview answer id={answer_id} by user {}", caller.id);
    Ok(StatusCode::NO_CONTENT)
}

fn answer_not_found() -> AppError {
    AppError::NotFound("Interview answer not found.".to_string())
}
