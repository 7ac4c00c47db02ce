use sqlx::SqlitePool;

use crate::assistant::LlmProvider;
use crate::models::answer::InterviewAnswerRow;
use crate::pagination::Page;

pub struct NewAnswer<'a> {
    pub user_id: Option<i64>,
    pub resume_analysis_id: Option<i64>,
    pub question: &'a str,
    pub job_title: Option<&'a str>,
    pub company_name: Option<&'a str>,
    pub answer: &'a str,
    pub provider: LlmProvider,
}

pub async fn insert_answer(
    pool: &SqlitePool,
    answer: NewAnswer<'_>,
) -> Result<InterviewAnswerRow, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let row = sqlx::query_as::<_, InterviewAnswerRow>(
        r#"
        INSERT INTO interview_answers
            (user_id, resume_analysis_id, question, job_title, company_name, answer, provider)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(answer.user_id)
    .bind(answer.resume_analysis_id)
    .bind(answer.question)
    .bind(answer.job_title)
    .bind(answer.company_name)
    .bind(answer.answer)
    .bind(answer.provider.as_str())
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(row)
}

pub async fn find_answer(
    pool: &SqlitePool,
    answer_id: i64,
) -> Result<Option<InterviewAnswerRow>, sqlx::Error> {
    sqlx::query_as::<_, InterviewAnswerRow>("SELECT * FROM interview_answers WHERE id = ?")
        .bind(answer_id)
        .fetch_optional(pool)
        .await
}

/// Newest first, optionally restricted to one owner.
pub async fn list_answers(
    pool: &SqlitePool,
    user_id: Option<i64>,
    page: Page,
) -> Result<Vec<InterviewAnswerRow>, sqlx::Error> {
    sqlx::query_as::<_, InterviewAnswerRow>(
        r#"
        SELECT * FROM interview_answers
        WHERE (?1 IS NULL OR user_id = ?1)
        ORDER BY created_at DESC, id DESC
        LIMIT ?2 OFFSET ?3
        "#,
    )
    .bind(user_id)
    .bind(page.limit)
    .bind(page.offset)
    .fetch_all(pool)
    .await
}

pub async fn list_answers_for_analysis(
    pool: &SqlitePool,
    analysis_id: i64,
    page: Page,
) -> Result<Vec<InterviewAnswerRow>, sqlx::Error> {
    sqlx::query_as::<_, InterviewAnswerRow>(
        r#"
        SELECT * FROM interview_answers
        WHERE resume_analysis_id = ?
        ORDER BY created_at DESC, id DESC
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(analysis_id)
    .bind(page.limit)
    .bind(page.offset)
    .fetch_all(pool)
    .await
}

/// Deletes one answer in its own transaction. Returns whether a row was removed.
pub async fn delete_answer(pool: &SqlitePool, answer_id: i64) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query("DELETE FROM interview_answers WHERE id = ?")
        .bind(answer_id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(result.rows_affected() > 0)
}

pub async fn count_answers(pool: &SqlitePool, user_id: Option<i64>) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM interview_answers WHERE (?1 IS NULL OR user_id = ?1)")
        .bind(user_id)
        .fetch_one(pool)
        .await
}
