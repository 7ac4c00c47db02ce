//! Field-level checks shared by the request bodies. Failures map to 422.

use crate::errors::AppError;

const MAX_EMAIL_CHARS: usize = 254;

/// Rejects `value` when it has fewer than `min` characters after trimming.
pub fn min_chars(field: &str, value: &str, min: usize) -> Result<(), AppError> {
    if value.trim().chars().count() < min {
        return Err(AppError::UnprocessableEntity(format!(
            "{field} must be at least {min} characters"
        )));
    }
    Ok(())
}

pub fn max_chars(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.chars().count() > max {
        return Err(AppError::UnprocessableEntity(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Deliberately shallow: one `@`, a non-empty local part, a dotted domain, no spaces.
pub fn email(value: &str) -> Result<(), AppError> {
    let invalid = || AppError::UnprocessableEntity("email is not a valid address".to_string());

    if value.chars().count() > MAX_EMAIL_CHARS || value.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
    let domain_ok = !domain.contains('@')
        && domain
            .split('.')
            .filter(|label| !label.is_empty())
            .count()
            >= 2
        && !domain.starts_with('.')
        && !domain.ends_with('.');
    if local.is_empty() || !domain_ok {
        return Err(invalid());
    }
    Ok(())
}

/// Lowercases the domain part; the local part is kept as sent.
pub fn normalize_email(value: &str) -> String {
    match value.rsplit_once('@') {
        Some((local, domain)) => format!("{local}@{}", domain.to_lowercase()),
        None => value.to_string(),
    }
}

/// Treats blank optional strings as absent.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
