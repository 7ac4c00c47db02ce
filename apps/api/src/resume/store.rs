use sqlx::SqlitePool;

use crate::assistant::LlmProvider;
use crate::models::resume::ResumeAnalysisRow;
use crate::pagination::Page;

pub struct NewAnalysis<'a> {
    pub user_id: Option<i64>,
    pub resume_text: &'a str,
    pub summary: &'a str,
    pub provider: LlmProvider,
}

/// Inserts an analysis in its own transaction; nothing is visible unless it commits.
pub async fn insert_analysis(
    pool: &SqlitePool,
    analysis: NewAnalysis<'_>,
) -> Result<ResumeAnalysisRow, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let row = sqlx::query_as::<_, ResumeAnalysisRow>(
        r#"
        INSERT INTO resume_analyses (user_id, resume_text, summary, provider)
        VALUES (?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(analysis.user_id)
    .bind(analysis.resume_text)
    .bind(analysis.summary)
    .bind(analysis.provider.as_str())
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(row)
}

pub async fn find_analysis(
    pool: &SqlitePool,
    analysis_id: i64,
) -> Result<Option<ResumeAnalysisRow>, sqlx::Error> {
    sqlx::query_as::<_, ResumeAnalysisRow>("SELECT * FROM resume_analyses WHERE id = ?")
        .bind(analysis_id)
        .fetch_optional(pool)
        .await
}

/// Newest first, optionally restricted to one owner.
pub async fn list_analyses(
    pool: &SqlitePool,
    user_id: Option<i64>,
    page: Page,
) -> Result<Vec<ResumeAnalysisRow>, sqlx::Error> {
    sqlx::query_as::<_, ResumeAnalysisRow>(
        r#"
        SELECT * FROM resume_analyses
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

pub async fn count_analyses(pool: &SqlitePool, user_id: Option<i64>) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM resume_analyses WHERE (?1 IS NULL OR user_id = ?1)")
        .bind(user_id)
        .fetch_one(pool)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_pool;

    async fn seed_user(pool: &SqlitePool, email: &str) -> i64 {
        sqlx::query_scalar("INSERT INTO users (email, full_name) VALUES (?, 'Seed') RETURNING id")
            .bind(email)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    async fn seed(pool: &SqlitePool, user_id: Option<i64>, text: &str) -> ResumeAnalysisRow {
        insert_analysis(
            pool,
            NewAnalysis {
                user_id,
                resume_text: text,
                summary: "summary",
                provider: LlmProvider::Placeholder,
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_timestamp() {
        let pool = test_pool().await;
        let row = seed(&pool, None, "anonymous resume text here").await;

        assert!(row.id > 0);
        assert_eq!(row.user_id, None);
        assert_eq!(row.provider, "placeholder");
        let found = find_analysis(&pool, row.id).await.unwrap().unwrap();
        assert_eq!(found.created_at, row.created_at);
    }

    #[tokio::test]
    async fn test_list_filters_by_owner_newest_first() {
        let pool = test_pool().await;
        let x = seed_user(&pool, "x@example.com").await;
        let y = seed_user(&pool, "y@example.com").await;
        let first = seed(&pool, Some(x), "first").await;
        seed(&pool, Some(y), "other").await;
        let second = seed(&pool, Some(x), "second").await;

        let rows = list_analyses(&pool, Some(x), Page::default()).await.unwrap();
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);

        assert_eq!(count_analyses(&pool, None).await.unwrap(), 3);
        assert_eq!(count_analyses(&pool, Some(y)).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_respects_page_window() {
        let pool = test_pool().await;
        for i in 0..5 {
            seed(&pool, None, &format!("resume {i}")).await;
        }

        let page = Page { limit: 2, offset: 3 };
        let rows = list_analyses(&pool, None, page).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].resume_text, "resume 1");
        assert_eq!(rows[1].resume_text, "resume 0");
    }

    #[tokio::test]
    async fn test_unknown_owner_violates_foreign_key() {
        let pool = test_pool().await;
        let result = insert_analysis(
            &pool,
            NewAnalysis {
                user_id: Some(404),
                resume_text: "orphan",
                summary: "summary",
                provider: LlmProvider::Placeholder,
            },
        )
        .await;
        assert!(result.is_err());
        assert_eq!(count_analyses(&pool, None).await.unwrap(), 0);
    }
}
