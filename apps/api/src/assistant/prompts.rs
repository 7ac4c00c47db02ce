pub const RESUME_SUMMARY_SYSTEM: &str = "\
    You are an experienced technical recruiter. \
    You write short, factual summaries of resumes for hiring managers.";

pub const RESUME_SUMMARY_PROMPT_TEMPLATE: &str = "\
Summarize the resume below in at most five sentences. Cover the candidate's \
seniority, core skills, and the kind of roles they are suited for.

{grounding_instruction}

Resume:
{resume_text}";

pub const INTERVIEW_COACH_SYSTEM: &str = "\
    You are an interview coach. You draft first-person answers a candidate can \
    adapt and say out loud in an interview.";

pub const INTERVIEW_ANSWER_PROMPT_TEMPLATE: &str = "\
Draft an answer to the interview question below.

Target role: {job_title}
Company: {company_name}
Candidate background: {resume_summary}

{grounding_instruction}

Question: {question}";

/// Fills `{name}` placeholders in one left-to-right pass. Substituted values
/// are never re-scanned, so braces inside user input are kept literally.
/// Unknown placeholders are left as written.
pub fn render(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];
        let filled = tail.find('}').and_then(|close| {
            let name = &tail[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });
        match filled {
            Some((value, close)) => {
                out.push_str(value);
                rest = &tail[close + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}
