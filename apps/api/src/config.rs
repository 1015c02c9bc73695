use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::analysis::scoring::ScoringWeights;

const DEFAULT_BASE_URL: &str = "https://integrate.api.nvidia.com/v1";
const DEFAULT_TEXT_MODEL: &str = "meta/llama-3.1-70b-instruct";

/// Application configuration loaded from environment variables.
/// Every value has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub nvidia_api_key: String,
    pub nvidia_base_url: String,
    pub text_model: String,
    pub llm_timeout: Duration,
    pub llm_max_retries: u32,
    pub max_file_size_bytes: usize,
    pub allowed_origins: Vec<String>,
    pub ats_weights: ScoringWeights,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = ScoringWeights::default();
        let ats_weights = ScoringWeights {
            keyword_match: parse_env("ATS_WEIGHT_KEYWORD_MATCH", defaults.keyword_match)?,
            format_compliance: parse_env(
                "ATS_WEIGHT_FORMAT_COMPLIANCE",
                defaults.format_compliance,
            )?,
            experience_relevance: parse_env(
                "ATS_WEIGHT_EXPERIENCE_RELEVANCE",
                defaults.experience_relevance,
            )?,
            skills_coverage: parse_env("ATS_WEIGHT_SKILLS_COVERAGE", defaults.skills_coverage)?,
        };
        validate_weights(&ats_weights)?;

        let max_file_size_mb: usize = parse_env("MAX_FILE_SIZE_MB", 10)?;

        Ok(Config {
            nvidia_api_key: std::env::var("NVIDIA_API_KEY").unwrap_or_default(),
            nvidia_base_url: std::env::var("NVIDIA_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            text_model: std::env::var("TEXT_MODEL")
                .unwrap_or_else(|_| DEFAULT_TEXT_MODEL.to_string()),
            llm_timeout: Duration::from_secs(parse_env("LLM_TIMEOUT_SECS", 60)?),
            llm_max_retries: parse_env("LLM_MAX_RETRIES", 2)?,
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
            allowed_origins: std::env::var("ALLOWED_ORIGINS")
                .map(|v| split_origins(&v))
                .unwrap_or_else(|_| {
                    vec![
                        "http://localhost:5173".to_string(),
                        "http://localhost:3000".to_string(),
                    ]
                }),
            ats_weights,
            port: parse_env("PORT", 8000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

#[cfg(test)]
impl Config {
    /// Defaults with no API key, for handler tests.
    pub fn for_tests() -> Self {
        Config {
            nvidia_api_key: String::new(),
            nvidia_base_url: DEFAULT_BASE_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            llm_timeout: Duration::from_secs(5),
            llm_max_retries: 0,
            max_file_size_bytes: 1024 * 1024,
            allowed_origins: Vec::new(),
            ats_weights: ScoringWeights::default(),
            port: 8000,
            rust_log: "info".to_string(),
        }
    }
}

fn validate_weights(weights: &ScoringWeights) -> Result<()> {
    if !weights.is_normalized() {
        bail!("ATS weights must sum to 1.0 (got {:.3})", weights.total());
    }
    Ok(())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
