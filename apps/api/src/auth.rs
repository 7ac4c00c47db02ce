//! Optional caller identity carried in the `X-User-Id` header.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::warn;

use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;
use crate::users::store::find_user;

pub const USER_ID_HEADER: &str = "x-user-id";

/// The resolved caller, or `None` when no identity header was sent.
/// A header that is malformed or names an unknown user rejects the request with 401.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<User>);

impl CurrentUser {
    pub fn id(&self) -> Option<i64> {
        self.0.as_ref().map(|u| u.id)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(raw) = parts.headers.get(USER_ID_HEADER) else {
            return Ok(CurrentUser(None));
        };

        let user_id = raw
            .to_str()
            .ok()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .ok_or_else(|| {
                warn!("malformed {USER_ID_HEADER} header");
                invalid_header()
            })?;

        let user = find_user(&state.db, user_id).await?.ok_or_else(|| {
            warn!("invalid {USER_ID_HEADER} header user_id={user_id}");
            invalid_header()
        })?;

        Ok(CurrentUser(Some(user)))
    }
}

fn invalid_header() -> AppError {
    AppError::Unauthorized("Invalid user header.".to_string())
}

/// Merges the header identity with a user id supplied in the body or query.
///
/// Both present and different → 400. Only the header present → it becomes the
/// effective user. Otherwise the supplied value (possibly `None`) is used.
pub fn reconcile_user_id(
    current: &CurrentUser,
    supplied: Option<i64>,
) -> Result<Option<i64>, AppError> {
    match (current.id(), supplied) {
        (Some(header_id), Some(body_id)) if header_id != body_id => {
            warn!("user id mismatch header={header_id} supplied={body_id}");
            Err(AppError::Validation(
                "user_id does not match the authenticated user.".to_string(),
            ))
        }
        (Some(header_id), _) => Ok(Some(header_id)),
        (None, supplied) => Ok(supplied),
    }
}

/// Returns the caller or a 401 carrying `message`.
pub fn require_user<'a>(current: &'a CurrentUser, message: &str) -> Result<&'a User, AppError> {
    current
        .0
        .as_ref()
        .ok_or_else(|| AppError::Unauthorized(message.to_string()))
}
