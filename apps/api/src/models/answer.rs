use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterviewAnswerRow {
    pub id: i64,
    pub user_id: Option<i64>,
    pub resume_analysis_id: Option<i64>,
    pub question: String,
    pub job_title: Option<String>,
    pub company_name: Option<String>,
    pub answer: String,
    /// Provider that actually produced `answer`.
    pub provider: String,
    pub created_at: DateTime<Utc>,
}
