//! Deterministic text used when no external model is available.

const PLACEHOLDER_DISCLAIMER: &str =
    "This is a placeholder answer for development purposes, not a final AI-generated response.";

/// Fixed-format report with the approximate word count and non-empty line count.
pub fn summarize_resume(resume_text: &str) -> String {
    let word_count = resume_text.split_whitespace().count();
    let line_count = resume_text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .count();

    format!(
        "Basic analysis only. Approximate word count: {word_count}. \
         Non-empty line count: {line_count}."
    )
}

/// Pipe-joined echo of the question and its context, ending in a disclaimer.
pub fn interview_answer(
    question: &str,
    job_title: Option<&str>,
    company_name: Option<&str>,
) -> String {
    let mut parts = vec![format!("Question: {question}")];

    if let Some(job_title) = job_title.filter(|t| !t.is_empty()) {
        parts.push(format!("Target role: {job_title}"));
    }
    if let Some(company_name) = company_name.filter(|c| !c.is_empty()) {
        parts.push(format!("Company: {company_name}"));
    }

    parts.push(PLACEHOLDER_DISCLAIMER.to_string());
    parts.join(" | ")
}
