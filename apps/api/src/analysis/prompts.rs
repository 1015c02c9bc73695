// All LLM prompt constants for the ATS analysis pipeline.
// Placeholders in braces are filled by `llm_client::parsing::fill_template`.

/// Keyword extraction prompt. Replace `{job_description}` before sending.
pub const KEYWORD_PROMPT_TEMPLATE: &str = "Extract the most important keywords and skills from this job description.
Return ONLY a comma-separated list of keywords, nothing else.

Job Description:
{job_description}

Keywords:";

/// Suggestion prompt. Replace `{resume_text}`, `{missing_keywords}` and
/// `{job_description}` before sending.
pub const SUGGESTION_PROMPT_TEMPLATE: &str = r#"You are an expert ATS resume optimizer.

RESUME:
{resume_text}

MISSING KEYWORDS that should be incorporated:
{missing_keywords}

JOB DESCRIPTION:
{job_description}

Generate 5 specific, actionable suggestions to improve this resume's ATS score.

Return ONLY a valid JSON array of objects with NO additional text. Each object must have these exact keys:
- "section": the section to modify (e.g., "Experience", "Skills", "Summary")
- "original": the original text from the resume to replace (or empty string if adding new content)
- "suggested": the improved text with keywords naturally incorporated
- "improvement_type": one of "keyword_addition", "rewrite", or "format"

Example format:
[
    {"section": "Skills", "original": "", "suggested": "Python, Machine Learning, Data Analysis", "improvement_type": "keyword_addition"},
    {"section": "Experience", "original": "Worked on projects", "suggested": "Led cross-functional team to deliver 5+ data-driven projects using Python and SQL", "improvement_type": "rewrite"}
]

Return only the JSON array, nothing else:"#;
