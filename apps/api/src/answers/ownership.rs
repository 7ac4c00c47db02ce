//! Ownership rules between callers, resume analyses and answers.

use crate::errors::AppError;
use crate::models::answer::InterviewAnswerRow;
use crate::models::resume::ResumeAnalysisRow;

/// An answer may only reference a resume analysis that is anonymous or owned
/// by the same user the answer is written for.
pub fn check_resume_owner(
    resume: &ResumeAnalysisRow,
    user_id: Option<i64>,
) -> Result<(), AppError> {
    match (resume.user_id, user_id) {
        (Some(owner), Some(user)) if owner != user => Err(AppError::Validation(
            "Resume analysis belongs to a different user.".to_string(),
        )),
        _ => Ok(()),
    }
}

/// The caller may delete an answer they own. Answers without an owner can be
/// deleted by any authenticated caller.
// TODO: decide whether ownerless answers should stay communal once accounts are mandatory.
pub fn check_can_delete(answer: &InterviewAnswerRow, caller_id: i64) -> Result<(), AppError> {
    match answer.user_id {
        Some(owner) if owner != caller_id => Err(AppError::Forbidden(
            "You do not have permission to delete this answer.".to_string(),
        )),
        _ => Ok(()),
    }
}
