//! Suggestion Generator — asks the generator for edit suggestions and turns its
//! semi-structured reply into stable `Suggestion` records.
//!
//! Parsing is a two-stage pipeline over a typed intermediate `RawSuggestion`:
//! 1. `parse_structured` reads a JSON array (code fences stripped, surrounding
//!    prose tolerated) or reports `UnparsableOutput`.
//! 2. `parse_delimited` runs only on that signal and reads `---`-separated
//!    blocks of `label: value` lines.
//! Both stages feed the same `build_suggestions` normalisation.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::analysis::prompts::SUGGESTION_PROMPT_TEMPLATE;
use crate::llm_client::parsing::{
    extract_labeled_field, fill_template, strip_code_fences, truncate_chars,
};
use crate::llm_client::{generate_with_timeout, GenerationRequest, TextGenerator};

/// Maximum suggestions kept from one reply.
pub const MAX_SUGGESTIONS: usize = 5;
/// Missing keywords listed in the prompt.
pub const PROMPT_KEYWORDS: usize = 10;
const PROMPT_RESUME_CHARS: usize = 2000;
const PROMPT_JD_CHARS: usize = 1000;
const SUGGESTION_MAX_TOKENS: u32 = 1500;
const SUGGESTION_TEMPERATURE: f32 = 0.7;

const BLOCK_DELIMITER: &str = "---";
const DEFAULT_SECTION: &str = "General";
const NOT_APPLICABLE: &str = "N/A";

/// Kind of edit a suggestion proposes. Unknown labels read as `Rewrite`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImprovementType {
    KeywordAddition,
    #[default]
    Rewrite,
    Format,
}

impl ImprovementType {
    /// Lower-cases, maps spaces to underscores, and falls back to `Rewrite`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().replace(' ', "_").as_str() {
            "keyword_addition" => ImprovementType::KeywordAddition,
            "format" => ImprovementType::Format,
            _ => ImprovementType::Rewrite,
        }
    }
}

/// One ranked edit suggestion returned to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: String,
    pub section: String,
    /// Empty when the suggestion adds new content.
    pub original: String,
    pub suggested: String,
    pub improvement_type: ImprovementType,
    /// 0.9 for the first reply position, decreasing by 0.1 per position.
    pub impact_score: f64,
}

/// A suggestion as read from the model, before defaults and validation.
/// `position` is the element's index in the reply and drives id and impact.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSuggestion {
    pub position: usize,
    pub section: Option<String>,
    pub original: Option<String>,
    pub suggested: Option<String>,
    pub improvement_type: Option<String>,
}

impl RawSuggestion {
    fn from_object(position: usize, object: &serde_json::Map<String, Value>) -> Self {
        let field = |key: &str| object.get(key).and_then(Value::as_str).map(String::from);
        Self {
            position,
            section: field("section"),
            original: field("original"),
            suggested: field("suggested"),
            improvement_type: field("improvement_type"),
        }
    }

    fn from_block(position: usize, block: &str) -> Self {
        let field = |label: &str, alias: &str| {
            extract_labeled_field(block, label).or_else(|| extract_labeled_field(block, alias))
        };
        Self {
            position,
            section: field("section", "SECTION"),
            original: field("original", "ORIGINAL"),
            suggested: field("suggested", "SUGGESTED"),
            improvement_type: field("improvement_type", "TYPE"),
        }
    }
}

/// Stage-one signal: the reply is not a JSON array of suggestions.
#[derive(Debug, Error)]
#[error("model output is not a JSON suggestion list: {0}")]
pub struct UnparsableOutput(String);

/// Stage 1: reads the reply as a JSON array. Elements that are not objects
/// keep their position but yield no suggestion.
pub fn parse_structured(response: &str) -> Result<Vec<RawSuggestion>, UnparsableOutput> {
    let cleaned = strip_code_fences(response);

    let items = match serde_json::from_str::<Value>(cleaned) {
        Ok(Value::Array(items)) => items,
        Ok(other) => {
            return Err(UnparsableOutput(format!(
                "expected an array, found {}",
                json_kind(&other)
            )))
        }
        Err(first_err) => embedded_array(cleaned)
            .ok_or_else(|| UnparsableOutput(first_err.to_string()))?,
    };

    Ok(items
        .iter()
        .take(MAX_SUGGESTIONS)
        .enumerate()
        .filter_map(|(position, item)| {
            item.as_object()
                .map(|object| RawSuggestion::from_object(position, object))
        })
        .collect())
}

/// Stage 2: reads `---`-separated blocks of `label: value` lines.
pub fn parse_delimited(response: &str) -> Vec<RawSuggestion> {
    response
        .split(BLOCK_DELIMITER)
        .take(MAX_SUGGESTIONS)
        .enumerate()
        .map(|(position, block)| RawSuggestion::from_block(position, block))
        .collect()
}

/// Runs stage 1 and, only if it reports unparsable output, stage 2.
pub fn parse_suggestions(response: &str) -> Vec<Suggestion> {
    let raw = match parse_structured(response) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("{e}; falling back to delimited text parsing");
            parse_delimited(response)
        }
    };
    build_suggestions(raw)
}

/// Applies defaults, drops entries without suggested text, and assigns ids and impact.
pub fn build_suggestions(raw: Vec<RawSuggestion>) -> Vec<Suggestion> {
    raw.into_iter()
        .filter_map(|raw| {
            let suggested = raw.suggested.as_deref().map(str::trim).unwrap_or_default();
            if suggested.is_empty() {
                return None;
            }

            let section = raw
                .section
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(DEFAULT_SECTION);
            let original = raw
                .original
                .as_deref()
                .map(str::trim)
                .filter(|o| *o != NOT_APPLICABLE)
                .unwrap_or_default();
            let improvement_type = raw
                .improvement_type
                .as_deref()
                .map(ImprovementType::from_label)
                .unwrap_or_default();

            Some(Suggestion {
                id: suggestion_id(raw.position, suggested),
                section: section.to_string(),
                original: original.to_string(),
                suggested: suggested.to_string(),
                improvement_type,
                impact_score: impact_score(raw.position),
            })
        })
        .collect()
}

/// `sug_{position+1}_{hash mod 10000}`; the hash is stable across runs.
pub fn suggestion_id(position: usize, suggested: &str) -> String {
    format!("sug_{}_{}", position + 1, stable_hash(suggested) % 10_000)
}

fn impact_score(position: usize) -> f64 {
    (9 - position.min(8)) as f64 / 10.0
}

/// Reads a JSON array wrapped in prose, spanning the outermost brackets.
/// Accepted only when it holds at least one object, so a list quoted inside
/// label text does not hide the delimited blocks around it.
fn embedded_array(text: &str) -> Option<Vec<Value>> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    if start >= end {
        return None;
    }
    match serde_json::from_str::<Value>(&text[start..=end]).ok()? {
        Value::Array(items) if items.iter().any(Value::is_object) => Some(items),
        _ => None,
    }
}

/// 64-bit FNV-1a over the UTF-8 bytes.
fn stable_hash(text: &str) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    text.bytes().fold(OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(PRIME)
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Requests suggestions for the missing keywords. Returns an empty list without
/// calling the generator when nothing is missing, and on any generator failure.
pub async fn generate_suggestions(
    generator: &dyn TextGenerator,
    resume_text: &str,
    job_description: &str,
    missing_keywords: &[String],
    timeout: Duration,
) -> Vec<Suggestion> {
    if missing_keywords.is_empty() {
        return Vec::new();
    }

    let keywords: Vec<&str> = missing_keywords
        .iter()
        .take(PROMPT_KEYWORDS)
        .map(String::as_str)
        .collect();
    let keywords = keywords.join(", ");
    let prompt = fill_template(
        SUGGESTION_PROMPT_TEMPLATE,
        &[
            ("resume_text", truncate_chars(resume_text, PROMPT_RESUME_CHARS)),
            ("missing_keywords", keywords.as_str()),
            ("job_description", truncate_chars(job_description, PROMPT_JD_CHARS)),
        ],
    );
    let request = GenerationRequest::new(prompt)
        .max_tokens(SUGGESTION_MAX_TOKENS)
        .temperature(SUGGESTION_TEMPERATURE);

    let response = match generate_with_timeout(generator, &request, timeout).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Suggestion generation unavailable: {e}");
            return Vec::new();
        }
    };
    debug!("Suggestion reply: {} chars", response.len());

    let suggestions = parse_suggestions(&response);
    info!("Parsed {} suggestions", suggestions.len());
    suggestions
}
