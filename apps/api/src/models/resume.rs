use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored resume submission plus its generated summary.
/// `user_id` is `None` for anonymous submissions.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeAnalysisRow {
    pub id: i64,
    pub user_id: Option<i64>,
    pub resume_text: String,
    pub summary: String,
    /// Provider that actually produced `summary`.
    pub provider: String,
    pub created_at: DateTime<Utc>,
}
