//! Section rewriting, bullet point and summary generation.
//!
//! Every operation soft-fails: a generator error yields the original text,
//! an empty list or an empty string, never an error.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};

use crate::llm_client::parsing::{extract_labeled_field, fill_template, truncate_chars};
use crate::llm_client::{generate_with_timeout, GenerationRequest, TextGenerator};
use crate::rewrite::prompts::{
    BULLETS_KEYWORDS_HINT, BULLETS_PROMPT_TEMPLATE, REWRITE_JD_CONTEXT, REWRITE_PROMPT_TEMPLATE,
    SUMMARY_PROMPT_TEMPLATE,
};

const REWRITE_JD_CHARS: usize = 500;
const REWRITE_MAX_TOKENS: u32 = 600;

const BULLET_KEYWORD_HINTS: usize = 5;
const BULLETS_MAX_TOKENS: u32 = 400;
pub const MAX_BULLETS: usize = 5;

const SUMMARY_RESUME_CHARS: usize = 1500;
const SUMMARY_MAX_TOKENS: u32 = 200;

const TEMPERATURE: f32 = 0.7;

/// Markers a model may put in front of a list item.
const BULLET_MARKERS: &[char] = &['•', '-', '*'];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RewriteResult {
    pub text: String,
    pub improvements: Vec<String>,
    pub keywords_added: Vec<String>,
}

impl RewriteResult {
    fn unchanged(original_text: &str) -> Self {
        Self {
            text: original_text.to_string(),
            improvements: Vec::new(),
            keywords_added: Vec::new(),
        }
    }
}

/// Rewrites one resume section, optionally targeted at a job description.
pub async fn rewrite_section(
    generator: &dyn TextGenerator,
    original_text: &str,
    section: &str,
    job_description: Option<&str>,
    timeout: Duration,
) -> RewriteResult {
    let jd_context = match job_description.map(str::trim).filter(|jd| !jd.is_empty()) {
        Some(jd) => fill_template(
            REWRITE_JD_CONTEXT,
            &[("job_description", truncate_chars(jd, REWRITE_JD_CHARS))],
        ),
        None => String::new(),
    };
    let prompt = fill_template(
        REWRITE_PROMPT_TEMPLATE,
        &[
            ("section", section),
            ("jd_context", jd_context.as_str()),
            ("original_text", original_text),
        ],
    );
    let request = GenerationRequest::new(prompt)
        .max_tokens(REWRITE_MAX_TOKENS)
        .temperature(TEMPERATURE);

    match generate_with_timeout(generator, &request, timeout).await {
        Ok(reply) => parse_rewrite(&reply, original_text),
        Err(e) => {
            warn!("Rewrite of {section} section returned original text: {e}");
            RewriteResult::unchanged(original_text)
        }
    }
}

/// Reads the `REWRITTEN:` / `IMPROVEMENTS:` / `KEYWORDS_ADDED:` blocks of a reply.
pub fn parse_rewrite(reply: &str, original_text: &str) -> RewriteResult {
    let Some(text) = extract_labeled_field(reply, "REWRITTEN") else {
        debug!("Rewrite reply had no REWRITTEN block");
        return RewriteResult::unchanged(original_text);
    };

    let improvements = extract_labeled_field(reply, "IMPROVEMENTS")
        .map(|block| {
            block
                .lines()
                .map(|line| line.trim().trim_start_matches(|c: char| BULLET_MARKERS.contains(&c) || c == ' '))
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    let keywords_added = extract_labeled_field(reply, "KEYWORDS_ADDED")
        .map(|block| {
            block
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    RewriteResult {
        text,
        improvements,
        keywords_added,
    }
}

/// Generates up to `MAX_BULLETS` bullet points for one role.
pub async fn generate_bullet_points(
    generator: &dyn TextGenerator,
    description: &str,
    role: &str,
    company: &str,
    target_keywords: &[String],
    timeout: Duration,
) -> Vec<String> {
    let keywords_hint = if target_keywords.is_empty() {
        String::new()
    } else {
        let hinted: Vec<&str> = target_keywords
            .iter()
            .take(BULLET_KEYWORD_HINTS)
            .map(String::as_str)
            .collect();
        fill_template(BULLETS_KEYWORDS_HINT, &[("keywords", hinted.join(", ").as_str())])
    };
    let prompt = fill_template(
        BULLETS_PROMPT_TEMPLATE,
        &[
            ("role", role),
            ("company", company),
            ("description", description),
            ("keywords_hint", keywords_hint.as_str()),
        ],
    );
    let request = GenerationRequest::new(prompt)
        .max_tokens(BULLETS_MAX_TOKENS)
        .temperature(TEMPERATURE);

    match generate_with_timeout(generator, &request, timeout).await {
        Ok(reply) => parse_bullets(&reply),
        Err(e) => {
            warn!("Bullet generation for {role} failed: {e}");
            Vec::new()
        }
    }
}

/// Marked lines lose their marker; unmarked lines count only while the list is short.
pub fn parse_bullets(reply: &str) -> Vec<String> {
    let mut bullets = Vec::new();
    for line in reply.lines().map(str::trim) {
        if line.starts_with(BULLET_MARKERS) {
            let item = line.trim_start_matches(|c: char| BULLET_MARKERS.contains(&c) || c == ' ');
            bullets.push(item.to_string());
        } else if !line.is_empty() && bullets.len() < MAX_BULLETS {
            bullets.push(line.to_string());
        }
    }
    bullets.truncate(MAX_BULLETS);
    bullets
}

/// Generates a two to three sentence professional summary.
pub async fn generate_summary(
    generator: &dyn TextGenerator,
    resume_text: &str,
    target_role: Option<&str>,
    years_experience: Option<u32>,
    timeout: Duration,
) -> String {
    let target_role = target_role
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .unwrap_or("Not specified");
    let years = match years_experience {
        Some(years) if years > 0 => years.to_string(),
        _ => "Auto-detect from resume".to_string(),
    };
    let prompt = fill_template(
        SUMMARY_PROMPT_TEMPLATE,
        &[
            ("resume_text", truncate_chars(resume_text, SUMMARY_RESUME_CHARS)),
            ("target_role", target_role),
            ("years_experience", years.as_str()),
        ],
    );
    let request = GenerationRequest::new(prompt)
        .max_tokens(SUMMARY_MAX_TOKENS)
        .temperature(TEMPERATURE);

    match generate_with_timeout(generator, &request, timeout).await {
        Ok(reply) => reply.trim().to_string(),
        Err(e) => {
            warn!("Summary generation failed: {e}");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedGenerator;
    use crate::llm_client::LlmError;

    const TIMEOUT: Duration = Duration::from_secs(5);

    const REPLY: &str = "REWRITTEN:
Led a team of 5 engineers to ship a Rust ingestion service, cutting latency 40%.

IMPROVEMENTS:
- Added a strong action verb
• Quantified the impact

KEYWORDS_ADDED:
Rust, ingestion, latency";

    #[test]
    fn test_parse_rewrite_reads_all_blocks() {
        let result = parse_rewrite(REPLY, "Worked on a service");
        assert_eq!(
            result.text,
            "Led a team of 5 engineers to ship a Rust ingestion service, cutting latency 40%."
        );
        assert_eq!(
            result.improvements,
            vec!["Added a strong action verb", "Quantified the impact"]
        );
        assert_eq!(result.keywords_added, vec!["Rust", "ingestion", "latency"]);
    }

    #[test]
    fn test_parse_rewrite_without_label_keeps_original() {
        let result = parse_rewrite("Sure! Here is a better version.", "Worked on a service");
        assert_eq!(result, RewriteResult::unchanged("Worked on a service"));
    }

    #[tokio::test]
    async fn test_rewrite_includes_truncated_job_description() {
        let generator = ScriptedGenerator::new().reply(REPLY);
        let jd = format!("{}Kubernetes", "x".repeat(REWRITE_JD_CHARS));
        let result = rewrite_section(&generator, "Worked on a service", "experience", Some(&jd), TIMEOUT).await;

        assert!(result.text.starts_with("Led a team"));
        let calls = generator.calls();
        assert!(calls[0].prompt.contains("Rewrite the following experience section"));
        assert!(calls[0].prompt.contains("Target Job Description:"));
        assert!(!calls[0].prompt.contains("Kubernetes"));
        assert_eq!(calls[0].max_tokens, REWRITE_MAX_TOKENS);
    }

    #[tokio::test]
    async fn test_rewrite_failure_returns_original() {
        let generator = ScriptedGenerator::new().fail(LlmError::RateLimited { retries: 2 });
        let result = rewrite_section(&generator, "Worked on a service", "experience", None, TIMEOUT).await;
        assert_eq!(result.text, "Worked on a service");
        assert!(result.improvements.is_empty());
        assert!(result.keywords_added.is_empty());
        assert!(!generator.calls()[0].prompt.contains("Target Job Description:"));
    }

    #[test]
    fn test_parse_bullets_strips_markers_and_caps() {
        let reply = "Here are your bullets:\n• Built X\n- Shipped Y\n* Reduced Z\n• Led A\n• Mentored B\n• Extra C";
        let bullets = parse_bullets(reply);
        assert_eq!(bullets.len(), MAX_BULLETS);
        assert_eq!(bullets[0], "Here are your bullets:");
        assert_eq!(bullets[1], "Built X");
        assert_eq!(bullets[3], "Reduced Z");
    }

    #[tokio::test]
    async fn test_bullets_hint_first_five_keywords() {
        let generator = ScriptedGenerator::new().reply("• Built a Rust service");
        let keywords: Vec<String> = ["Rust", "AWS", "Docker", "SQL", "Kafka", "Terraform"]
            .iter()
            .map(|k| k.to_string())
            .collect();
        let bullets =
            generate_bullet_points(&generator, "Backend work", "Engineer", "Acme", &keywords, TIMEOUT).await;

        assert_eq!(bullets, vec!["Built a Rust service"]);
        let prompt = &generator.calls()[0].prompt;
        assert!(prompt.contains("Rust, AWS, Docker, SQL, Kafka"));
        assert!(!prompt.contains("Terraform"));
    }

    #[tokio::test]
    async fn test_summary_trims_reply_and_soft_fails() {
        let generator = ScriptedGenerator::new()
            .reply("  Seasoned backend engineer.  \n")
            .fail(LlmError::NotConfigured);

        let summary = generate_summary(&generator, "resume", Some("SRE"), Some(8), TIMEOUT).await;
        assert_eq!(summary, "Seasoned backend engineer.");
        let prompt = &generator.calls()[0].prompt;
        assert!(prompt.contains("Target Role: SRE"));
        assert!(prompt.contains("Years of Experience: 8"));

        let summary = generate_summary(&generator, "resume", None, None, TIMEOUT).await;
        assert!(summary.is_empty());
        assert!(generator.calls()[1].prompt.contains("Auto-detect from resume"));
    }
}
