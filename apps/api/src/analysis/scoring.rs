//! ATS Scorer — weighted 0–100 compatibility score.
//!
//! score = keyword·w_k + format·w_f + experience·w_e + skills·w_s, where
//! - keyword    = matched / max(total, 1) × 100
//! - format     = max(0, 100 − 10 × issues)
//! - experience = 70, a fixed placeholder until a relevance model exists
//! - skills     = keyword × 0.8

use serde::{Deserialize, Serialize};

use crate::analysis::suggestions::Suggestion;

/// Experience-relevance score used for every resume. Not derived from content.
pub const EXPERIENCE_PLACEHOLDER_SCORE: f64 = 70.0;
/// Skills coverage is approximated as this fraction of the keyword score.
pub const SKILLS_COVERAGE_FACTOR: f64 = 0.8;
/// Points removed from the format score per issue.
pub const FORMAT_PENALTY_PER_ISSUE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub keyword_match: f64,
    pub format_compliance: f64,
    pub experience_relevance: f64,
    pub skills_coverage: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            keyword_match: 0.35,
            format_compliance: 0.20,
            experience_relevance: 0.25,
            skills_coverage: 0.20,
        }
    }
}

impl ScoringWeights {
    pub fn total(&self) -> f64 {
        self.keyword_match + self.format_compliance + self.experience_relevance + self.skills_coverage
    }

    /// True when the weights sum to 1.0 within rounding tolerance and none is negative.
    pub fn is_normalized(&self) -> bool {
        let all_non_negative = [
            self.keyword_match,
            self.format_compliance,
            self.experience_relevance,
            self.skills_coverage,
        ]
        .iter()
        .all(|w| *w >= 0.0);
        all_non_negative && (self.total() - 1.0).abs() < 1e-3
    }
}

/// Component scores (0–100 each) and the weighted total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub keyword: f64,
    pub format: f64,
    pub experience: f64,
    pub skills: f64,
    pub total: u8,
}

/// Computes the weighted ATS score for a keyword match count and format issue count.
pub fn compute_score(
    matched: usize,
    total_keywords: usize,
    format_issue_count: usize,
    weights: &ScoringWeights,
) -> ScoreBreakdown {
    let keyword = matched as f64 / total_keywords.max(1) as f64 * 100.0;
    let format = (100.0 - FORMAT_PENALTY_PER_ISSUE * format_issue_count as f64).max(0.0);
    let experience = EXPERIENCE_PLACEHOLDER_SCORE;
    let skills = keyword * SKILLS_COVERAGE_FACTOR;

    let weighted = keyword * weights.keyword_match
        + format * weights.format_compliance
        + experience * weights.experience_relevance
        + skills * weights.skills_coverage;

    ScoreBreakdown {
        keyword,
        format,
        experience,
        skills,
        total: weighted.round().clamp(0.0, 100.0) as u8,
    }
}

/// Splits keywords into (matched, missing) by case-insensitive substring search
/// in the resume. Order within each half follows the input order.
pub fn partition_keywords(resume_text: &str, keywords: &[String]) -> (Vec<String>, Vec<String>) {
    let resume_lower = resume_text.to_lowercase();
    keywords
        .iter()
        .cloned()
        .partition(|k| resume_lower.contains(&k.to_lowercase()))
}

/// Final output of one ATS analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub score: u8,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub suggestions: Vec<Suggestion>,
    pub format_issues: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_are_normalized() {
        let weights = ScoringWeights::default();
        assert!(weights.is_normalized());
        assert!((weights.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_unnormalized_weights_rejected() {
        let weights = ScoringWeights {
            keyword_match: 0.5,
            ..ScoringWeights::default()
        };
        assert!(!weights.is_normalized());

        let negative = ScoringWeights {
            keyword_match: 0.75,
            format_compliance: -0.2,
            ..ScoringWeights::default()
        };
        assert!(!negative.is_normalized());
    }

    #[test]
    fn test_perfect_match_no_issues() {
        // 100*0.35 + 100*0.20 + 70*0.25 + 80*0.20 = 35 + 20 + 17.5 + 16 = 88.5 → 89
        let score = compute_score(10, 10, 0, &ScoringWeights::default());
        assert_eq!(score.total, 89);
        assert!((score.skills - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_keywords_and_many_issues() {
        // 0 + 0 + 17.5 + 0 = 17.5 → 18; format score floors at zero
        let score = compute_score(0, 0, 12, &ScoringWeights::default());
        assert_eq!(score.format, 0.0);
        assert_eq!(score.total, 18);
    }

    #[test]
    fn test_half_match_with_two_issues() {
        // 50*0.35 + 80*0.20 + 17.5 + 40*0.20 = 17.5 + 16 + 17.5 + 8 = 59
        let score = compute_score(5, 10, 2, &ScoringWeights::default());
        assert_eq!(score.total, 59);
    }

    #[test]
    fn test_score_monotonic_in_matches_and_issues() {
        let weights = ScoringWeights::default();
        for issues in 0..=6 {
            let mut previous = 0;
            for matched in 0..=30 {
                let total = compute_score(matched, 30, issues, &weights).total;
                assert!(total >= previous);
                assert!(total <= 100);
                previous = total;
            }
        }
        for matched in 0..=30 {
            let mut previous = u8::MAX;
            for issues in 0..=12 {
                let total = compute_score(matched, 30, issues, &weights).total;
                assert!(total <= previous);
                previous = total;
            }
        }
    }

    #[test]
    fn test_partition_is_exact_and_disjoint() {
        let keywords: Vec<String> = ["Rust", "AWS", "Kubernetes", "sql"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let (matched, missing) =
            partition_keywords("Built services in rust on aws with PostgreSQL", &keywords);
        assert_eq!(matched, vec!["Rust", "AWS", "sql"]);
        assert_eq!(missing, vec!["Kubernetes"]);
        assert_eq!(matched.len() + missing.len(), keywords.len());
        assert!(matched.iter().all(|k| !missing.contains(k)));
    }
}
