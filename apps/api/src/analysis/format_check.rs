//! Format Compliance Checker — fixed structural heuristics over resume text.
//!
//! Pure and deterministic: every check runs, in declaration order, and each
//! contributes at most one issue.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Below this many characters a resume reads as incomplete.
pub const MIN_RESUME_CHARS: usize = 500;
/// Above this many characters a resume likely exceeds two pages.
pub const MAX_RESUME_CHARS: usize = 10_000;

pub const ACTION_VERBS: [&str; 10] = [
    "led",
    "managed",
    "developed",
    "created",
    "implemented",
    "achieved",
    "improved",
    "designed",
    "built",
    "delivered",
];

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("email pattern is valid")
});

static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").expect("phone pattern is valid")
});

static QUANTIFIED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+%|\$\d+|\d+\+").expect("quantity pattern is valid"));

/// One failed format check. Variant order is evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatIssue {
    MissingEmail,
    MissingPhone,
    TooShort,
    TooLong,
    NoActionVerbs,
    NoQuantifiedAchievements,
}

impl fmt::Display for FormatIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            FormatIssue::MissingEmail => "No email address detected",
            FormatIssue::MissingPhone => "No phone number detected",
            FormatIssue::TooShort => "Resume content appears too short",
            FormatIssue::TooLong => "Resume may be too long (consider 1-2 pages)",
            FormatIssue::NoActionVerbs => {
                "Consider using more action verbs (led, managed, developed, etc.)"
            }
            FormatIssue::NoQuantifiedAchievements => {
                "Add quantifiable achievements (percentages, dollar amounts, numbers)"
            }
        };
        f.write_str(message)
    }
}

/// Runs every format check against the resume text.
pub fn check_format(resume_text: &str) -> Vec<FormatIssue> {
    let mut issues = Vec::new();
    let length = resume_text.chars().count();
    let lowered = resume_text.to_lowercase();

    if !EMAIL.is_match(resume_text) {
        issues.push(FormatIssue::MissingEmail);
    }
    if !PHONE.is_match(resume_text) {
        issues.push(FormatIssue::MissingPhone);
    }
    if length < MIN_RESUME_CHARS {
        issues.push(FormatIssue::TooShort);
    }
    if length > MAX_RESUME_CHARS {
        issues.push(FormatIssue::TooLong);
    }
    // Substring match: "led" also counts inside "skilled".
    if !ACTION_VERBS.iter().any(|verb| lowered.contains(verb)) {
        issues.push(FormatIssue::NoActionVerbs);
    }
    if !QUANTIFIED.is_match(resume_text) {
        issues.push(FormatIssue::NoQuantifiedAchievements);
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn padded(text: &str) -> String {
        format!("{text}\n{}", "Additional detail line. ".repeat(30))
    }

    #[test]
    fn test_empty_resume_flags_everything_but_too_long() {
        assert_eq!(
            check_format(""),
            vec![
                FormatIssue::MissingEmail,
                FormatIssue::MissingPhone,
                FormatIssue::TooShort,
                FormatIssue::NoActionVerbs,
                FormatIssue::NoQuantifiedAchievements,
            ]
        );
    }

    #[test]
    fn test_complete_resume_has_no_issues() {
        let text = padded(
            "jane.doe@example.com (555) 123-4567\nLed a team of 6 engineers and cut costs by 30%",
        );
        assert!(check_format(&text).is_empty());
    }

    #[test]
    fn test_too_long_resume_is_flagged_not_too_short() {
        let text = format!(
            "jane@example.com 555.123.4567 Delivered $2M savings. {}",
            "x".repeat(MAX_RESUME_CHARS)
        );
        assert_eq!(check_format(&text), vec![FormatIssue::TooLong]);
    }

    #[test]
    fn test_quantified_patterns() {
        for sample in ["grew revenue 25%", "saved $400", "served 10+ clients"] {
            let issues = check_format(sample);
            assert!(
                !issues.contains(&FormatIssue::NoQuantifiedAchievements),
                "{sample} should count as quantified"
            );
        }
    }

    #[test]
    fn test_action_verbs_are_case_insensitive() {
        let issues = check_format("DESIGNED the billing system");
        assert!(!issues.contains(&FormatIssue::NoActionVerbs));
    }

    #[test]
    fn test_check_format_is_idempotent() {
        let text = "Managed things at 555-123-4567";
        assert_eq!(check_format(text), check_format(text));
    }

    #[test]
    fn test_issue_messages_are_distinct() {
        let all = [
            FormatIssue::MissingEmail,
            FormatIssue::MissingPhone,
            FormatIssue::TooShort,
            FormatIssue::TooLong,
            FormatIssue::NoActionVerbs,
            FormatIssue::NoQuantifiedAchievements,
        ];
        let mut messages: Vec<String> = all.iter().map(ToString::to_string).collect();
        messages.sort();
        messages.dedup();
        assert_eq!(messages.len(), all.len());
        assert!(FormatIssue::TooShort.to_string().contains("too short"));
    }
}
