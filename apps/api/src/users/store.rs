use sqlx::SqlitePool;

use crate::errors::AppError;
use crate::models::user::User;

pub async fn find_user(pool: &SqlitePool, user_id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn find_user_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// Inserts a user in its own transaction. A unique-key violation on `email`
/// (e.g. a concurrent insert that passed the pre-check) becomes `Duplicate`.
pub async fn insert_user(pool: &SqlitePool, email: &str, full_name: &str) -> Result<User, AppError> {
    let mut tx = pool.begin().await?;

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (email, full_name) VALUES (?, ?) RETURNING *",
    )
    .bind(email)
    .bind(full_name)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| {
        let unique = e
            .as_database_error()
            .is_some_and(|db| db.is_unique_violation());
        if unique {
            duplicate_email()
        } else {
            AppError::Database(e)
        }
    })?;

    tx.commit().await?;
    Ok(user)
}

pub async fn count_users(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
}

pub fn duplicate_email() -> AppError {
    AppError::Duplicate("User with this email already exists.".to_string())
}
