use axum::{extract::State, http::StatusCode};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::extract::{Json, Path};
use crate::models::user::User;
use crate::state::AppState;
use crate::users::store::{duplicate_email, find_user, find_user_by_email, insert_user};
use crate::validation;

const MAX_FULL_NAME_CHARS: usize = 100;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub full_name: String,
}

impl CreateUserRequest {
    fn validate(&self) -> Result<(), AppError> {
        validation::email(&self.email)?;
        validation::min_chars("full_name", &self.full_name, 1)?;
        validation::max_chars("full_name", self.full_name.trim(), MAX_FULL_NAME_CHARS)
    }
}

/// POST /api/users
pub async fn handle_create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    request.validate()?;
    let email = validation::normalize_email(&request.email);

    if find_user_by_email(&state.db, &email).await?.is_some() {
        return Err(duplicate_email());
    }

    let user = insert_user(&state.db, &email, request.full_name.trim()).await?;
    info!("created user id={}", user.id);

    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/users/:id
pub async fn handle_get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<User>, AppError> {
    let user = find_user(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;
    Ok(Json(user))
}
