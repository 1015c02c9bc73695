//! Keyword Extractor — ranked, deduplicated keyword list for a job description.
//!
//! Model-derived keywords come first, followed by literal matches of a fixed
//! technical-term table scanned over the full description. Never fails: when
//! the generator is unavailable only the pattern matches are returned.

use std::collections::HashSet;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use tracing::{debug, warn};

use crate::analysis::prompts::KEYWORD_PROMPT_TEMPLATE;
use crate::llm_client::parsing::{fill_template, truncate_chars};
use crate::llm_client::{generate_with_timeout, GenerationRequest, TextGenerator};

/// Maximum keywords kept per job description.
pub const MAX_KEYWORDS: usize = 30;
/// Characters of the job description sent to the generator.
pub const PROMPT_JD_CHARS: usize = 2000;

const KEYWORD_MAX_TOKENS: u32 = 300;
const KEYWORD_TEMPERATURE: f32 = 0.3;

/// Technology, data/ML and process terms, matched case-insensitively on word boundaries.
const TECHNICAL_PATTERNS: [&str; 3] = [
    r"\b(?:Python|JavaScript|React|Node\.js|AWS|Docker|SQL|Git)\b",
    r"\b(?:Machine Learning|Data Analysis|API|REST|MongoDB)\b",
    r"\b(?:Agile|Scrum|CI/CD|DevOps|Cloud)\b",
];

static TECHNICAL_TERMS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    TECHNICAL_PATTERNS
        .iter()
        .map(|p| Regex::new(&format!("(?i){p}")).expect("technical term patterns are valid"))
        .collect()
});

/// Extracts up to `MAX_KEYWORDS` keywords from a job description.
pub async fn extract_keywords(
    generator: &dyn TextGenerator,
    job_description: &str,
    timeout: Duration,
) -> Vec<String> {
    let prompt = fill_template(
        KEYWORD_PROMPT_TEMPLATE,
        &[("job_description", truncate_chars(job_description, PROMPT_JD_CHARS))],
    );
    let request = GenerationRequest::new(prompt)
        .max_tokens(KEYWORD_MAX_TOKENS)
        .temperature(KEYWORD_TEMPERATURE);

    let generated = match generate_with_timeout(generator, &request, timeout).await {
        Ok(text) => parse_keyword_list(&text),
        Err(e) => {
            warn!("Keyword extraction degraded to pattern matches only: {e}");
            Vec::new()
        }
    };
    debug!("Generator proposed {} keywords", generated.len());

    merge_keywords(generated, pattern_keywords(job_description))
}

/// Splits a comma-separated model reply, dropping entries of one character or less.
pub fn parse_keyword_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|k| k.chars().count() > 1)
        .map(String::from)
        .collect()
}

/// Literal matches of the technical-term table, in table order then text order.
pub fn pattern_keywords(job_description: &str) -> Vec<String> {
    TECHNICAL_TERMS
        .iter()
        .flat_map(|re| re.find_iter(job_description).map(|m| m.as_str().to_string()))
        .collect()
}

/// Concatenates, deduplicates case-insensitively keeping first-seen casing,
/// and caps the result at `MAX_KEYWORDS`.
pub fn merge_keywords(primary: Vec<String>, secondary: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    primary
        .into_iter()
        .chain(secondary)
        .filter(|k| seen.insert(k.to_lowercase()))
        .take(MAX_KEYWORDS)
        .collect()
}
