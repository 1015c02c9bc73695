// ATS analysis: keyword extraction, format heuristics, weighted scoring, suggestions.
// All LLM calls go through llm_client::TextGenerator and fail soft.

pub mod analyzer;
pub mod format_check;
pub mod handlers;
pub mod keywords;
pub mod prompts;
pub mod scoring;
pub mod suggestions;

pub use analyzer::AtsAnalyzer;
