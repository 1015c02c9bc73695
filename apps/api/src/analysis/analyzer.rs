//! ATS analysis pipeline.
//!
//! Flow: extract_keywords → partition against resume → check_format →
//!       generate_suggestions (missing keywords only) → compute_score.
//!
//! Generator failures degrade keywords and suggestions but the pipeline
//! always returns a complete `AnalysisResult`.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::analysis::format_check::check_format;
use crate::analysis::keywords::extract_keywords;
use crate::analysis::scoring::{compute_score, partition_keywords, AnalysisResult, ScoringWeights};
use crate::analysis::suggestions::generate_suggestions;
use crate::llm_client::TextGenerator;

/// Stateless orchestrator shared by all requests.
#[derive(Clone)]
pub struct AtsAnalyzer {
    generator: Arc<dyn TextGenerator>,
    weights: ScoringWeights,
    timeout: Duration,
}

impl AtsAnalyzer {
    pub fn new(generator: Arc<dyn TextGenerator>, weights: ScoringWeights, timeout: Duration) -> Self {
        Self {
            generator,
            weights,
            timeout,
        }
    }

    /// Scores a resume against a job description.
    pub async fn analyze(&self, resume_text: &str, job_description: &str) -> AnalysisResult {
        let keywords = extract_keywords(self.generator.as_ref(), job_description, self.timeout).await;
        let (matched_keywords, missing_keywords) = partition_keywords(resume_text, &keywords);
        info!(
            "Keywords: {} extracted, {} matched, {} missing",
            keywords.len(),
            matched_keywords.len(),
            missing_keywords.len()
        );

        let format_issues = check_format(resume_text);

        let suggestions = generate_suggestions(
            self.generator.as_ref(),
            resume_text,
            job_description,
            &missing_keywords,
            self.timeout,
        )
        .await;

        let breakdown = compute_score(
            matched_keywords.len(),
            keywords.len(),
            format_issues.len(),
            &self.weights,
        );
        debug!("Score breakdown: {:?}", breakdown);
        info!("ATS score: {}/100", breakdown.total);

        AnalysisResult {
            score: breakdown.total,
            matched_keywords,
            missing_keywords,
            suggestions,
            format_issues: format_issues.iter().map(ToString::to_string).collect(),
        }
    }
}
