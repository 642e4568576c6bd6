// Prompt templates for the AI gateway. Placeholders are substituted verbatim.

use serde_json::{json, Value};

pub const EVALUATION_PROMPT: &str = "\
Analyze this candidate's resume against the following Job Description (JD).

JD Content:
{job_content}

Resume Content:
{resume_text}

Return a structured JSON evaluation including a match percentage (0-100), pros, cons, \
a summary, and 5 custom interview questions.";

pub const INVITATION_EMAIL_PROMPT: &str = "\
Write a professional interview invitation email for {candidate_name} for the {job_title} \
position. Their AI matching score was {score}%. Keep it warm, professional, and clear.";

pub fn evaluation_prompt(job_content: &str, resume_text: &str) -> String {
    fill(
        EVALUATION_PROMPT,
        &[("job_content", job_content), ("resume_text", resume_text)],
    )
}

pub fn invitation_email_prompt(candidate_name: &str, job_title: &str, score: u8) -> String {
    let score = score.to_string();
    fill(
        INVITATION_EMAIL_PROMPT,
        &[
            ("candidate_name", candidate_name),
            ("job_title", job_title),
            ("score", &score),
        ],
    )
}

/// Substitutes `{key}` placeholders in a single pass over `template`.
/// Inserted values are never rescanned; unknown braces are kept as-is.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let hit = values.iter().find_map(|(key, value)| {
            tail.strip_prefix(*key)
                .and_then(|after| after.strip_prefix('}'))
                .map(|after| (*value, after))
        });
        match hit {
            Some((value, after)) => {
                out.push_str(value);
                rest = after;
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

/// Response schema for the evaluation call. Every field is required.
pub fn evaluation_schema() -> Value {
    let string_list = json!({ "type": "ARRAY", "items": { "type": "STRING" } });
    json!({
        "type": "OBJECT",
        "properties": {
            "matchPercentage": { "type": "NUMBER" },
            "summary": { "type": "STRING" },
            "pros": string_list,
            "cons": string_list,
            "recommendedQuestions": string_list,
        },
        "required": ["matchPercentage", "summary", "pros", "cons", "recommendedQuestions"],
    })
}
