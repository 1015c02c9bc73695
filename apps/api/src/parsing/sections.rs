//! Section Segmenter — splits raw resume text into the fixed set of labelled sections.
//!
//! Classification is driven by `HEADING_TABLE`: an ordered list of
//! (section, pattern) rows. The first row whose pattern matches the start of a
//! line wins. New headings are added by editing the table, not the scan loop.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// The closed set of resume sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Contact,
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Other,
}

impl Section {
    /// All sections in canonical (document export) order.
    pub const ALL: [Section; 8] = [
        Section::Contact,
        Section::Summary,
        Section::Experience,
        Section::Education,
        Section::Skills,
        Section::Projects,
        Section::Certifications,
        Section::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Contact => "contact",
            Section::Summary => "summary",
            Section::Experience => "experience",
            Section::Education => "education",
            Section::Skills => "skills",
            Section::Projects => "projects",
            Section::Certifications => "certifications",
            Section::Other => "other",
        }
    }
}

/// Heading patterns in priority order. Each is anchored at the start of a
/// trimmed line and matched case-insensitively. The `other` row must match
/// the whole line, since its words also open ordinary content lines.
const HEADING_TABLE: &[(Section, &str)] = &[
    (
        Section::Summary,
        r"(?:professional\s+)?summary|objective|profile|about\s*me",
    ),
    (
        Section::Experience,
        r"(?:work\s+)?experience|employment|work\s*history|professional\s*experience",
    ),
    (
        Section::Education,
        r"education|academic|qualifications|degrees?",
    ),
    (
        Section::Skills,
        r"skills?|technical\s*skills?|competenc(?:y|ies)|technologies|expertise",
    ),
    (Section::Projects, r"projects?|portfolio|work\s*samples?"),
    (
        Section::Certifications,
        r"certifications?|certificates?|licenses?|credentials?",
    ),
    (
        Section::Other,
        r"(?:interests|hobbies|languages|volunteer(?:ing)?|awards?|honou?rs|publications?|references|activities|achievements|leadership)\s*:?\s*$",
    ),
];

static HEADINGS: LazyLock<Vec<(Section, Regex)>> = LazyLock::new(|| {
    HEADING_TABLE
        .iter()
        .map(|(section, pattern)| {
            let re = Regex::new(&format!("(?i)^(?:{pattern})"))
                .expect("heading table patterns are valid");
            (*section, re)
        })
        .collect()
});

/// Returns the section a line introduces, if it is a recognised heading.
pub fn classify_heading(line: &str) -> Option<Section> {
    let line = line.trim();
    HEADINGS
        .iter()
        .find(|(_, re)| re.is_match(line))
        .map(|(section, _)| *section)
}

/// Mapping from every `Section` to its (possibly empty) text block.
/// All keys are always present when serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionMap {
    pub contact: String,
    pub summary: String,
    pub experience: String,
    pub education: String,
    pub skills: String,
    pub projects: String,
    pub certifications: String,
    pub other: String,
}

impl SectionMap {
    pub fn get(&self, section: Section) -> &str {
        match section {
            Section::Contact => &self.contact,
            Section::Summary => &self.summary,
            Section::Experience => &self.experience,
            Section::Education => &self.education,
            Section::Skills => &self.skills,
            Section::Projects => &self.projects,
            Section::Certifications => &self.certifications,
            Section::Other => &self.other,
        }
    }

    fn slot(&mut self, section: Section) -> &mut String {
        match section {
            Section::Contact => &mut self.contact,
            Section::Summary => &mut self.summary,
            Section::Experience => &mut self.experience,
            Section::Education => &mut self.education,
            Section::Skills => &mut self.skills,
            Section::Projects => &mut self.projects,
            Section::Certifications => &mut self.certifications,
            Section::Other => &mut self.other,
        }
    }

    /// Replaces the text of one section.
    pub fn set(&mut self, section: Section, text: String) {
        *self.slot(section) = text;
    }

    /// Iterates sections in canonical order with their text.
    pub fn iter(&self) -> impl Iterator<Item = (Section, &str)> + '_ {
        Section::ALL.iter().map(move |s| (*s, self.get(*s)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, text)| text.is_empty())
    }
}

/// Splits resume text into sections.
///
/// Content before the first heading belongs to `contact`. Heading lines are
/// consumed, blank lines skipped, and every other line is trimmed and appended
/// to the open section. A repeated heading replaces that section's earlier text.
pub fn segment(text: &str) -> SectionMap {
    let mut sections = SectionMap::default();
    let mut current = Section::Contact;
    let mut buffer: Vec<&str> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match classify_heading(line) {
            Some(next) => {
                if !buffer.is_empty() {
                    sections.set(current, buffer.join("\n"));
                }
                current = next;
                buffer.clear();
            }
            None => buffer.push(line),
        }
    }

    if !buffer.is_empty() {
        sections.set(current, buffer.join("\n"));
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Jane Doe
jane@example.com | (555) 123-4567

Professional Summary
Backend engineer with 8 years of experience.

Work Experience
Acme Corp - Senior Engineer
Led migration to Rust, cutting latency 40%

EDUCATION
B.Sc. Computer Science

Technical Skills
Rust, Python, AWS

Projects
resume-reactor: ATS analyzer

Certifications
AWS Solutions Architect

Interests
Climbing, chess";

    #[test]
    fn test_segment_assigns_every_section() {
        let sections = segment(RESUME);
        assert_eq!(sections.contact, "Jane Doe\njane@example.com | (555) 123-4567");
        assert_eq!(sections.summary, "Backend engineer with 8 years of experience.");
        assert_eq!(
            sections.experience,
            "Acme Corp - Senior Engineer\nLed migration to Rust, cutting latency 40%"
        );
        assert_eq!(sections.education, "B.Sc. Computer Science");
        assert_eq!(sections.skills, "Rust, Python, AWS");
        assert_eq!(sections.projects, "resume-reactor: ATS analyzer");
        assert_eq!(sections.certifications, "AWS Solutions Architect");
        assert_eq!(sections.other, "Climbing, chess");
    }

    #[test]
    fn test_heading_priority_first_match_wins() {
        // "Professional Experience" must not be taken by the summary row.
        assert_eq!(
            classify_heading("Professional Experience"),
            Some(Section::Experience)
        );
        assert_eq!(classify_heading("PROFILE"), Some(Section::Summary));
        assert_eq!(classify_heading("Degrees"), Some(Section::Education));
        assert_eq!(classify_heading("Licenses & Credentials"), Some(Section::Certifications));
        assert_eq!(classify_heading("Acme Corp"), None);
    }

    #[test]
    fn test_content_before_any_heading_is_contact() {
        let sections = segment("John Smith\nSeattle, WA");
        assert_eq!(sections.contact, "John Smith\nSeattle, WA");
        assert!(sections.summary.is_empty());
    }

    #[test]
    fn test_unmatched_lines_stay_in_open_section() {
        let sections = segment("Skills\nRust\nAcme Corp\nKubernetes");
        assert_eq!(sections.skills, "Rust\nAcme Corp\nKubernetes");
        assert!(sections.other.is_empty());
    }

    #[test]
    fn test_other_keywords_inside_content_are_not_headings() {
        let sections = segment(
            "Work Experience\nAcme Corp\nLeadership of a 5-person platform team\nAchievements include 3 patents\nShipped billing v2",
        );
        assert_eq!(
            sections.experience,
            "Acme Corp\nLeadership of a 5-person platform team\nAchievements include 3 patents\nShipped billing v2"
        );
        assert!(sections.other.is_empty());
        assert_eq!(classify_heading("Leadership:"), Some(Section::Other));
        assert_eq!(classify_heading("  AWARDS  "), Some(Section::Other));
    }

    #[test]
    fn test_repeated_heading_last_write_wins() {
        let sections = segment("Skills\nRust\nEducation\nMIT\nSkills\nGo");
        assert_eq!(sections.skills, "Go");
        assert_eq!(sections.education, "MIT");
    }

    #[test]
    fn test_empty_input_has_all_keys_empty() {
        let sections = segment("");
        assert!(sections.is_empty());
        let json = serde_json::to_value(&sections).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 8);
        for section in Section::ALL {
            assert!(json.get(section.as_str()).is_some());
        }
    }

    #[test]
    fn test_every_non_heading_line_lands_in_exactly_one_section() {
        let sections = segment(RESUME);
        let mut assigned: Vec<&str> = sections
            .iter()
            .flat_map(|(_, text)| text.lines())
            .collect();
        let mut expected: Vec<&str> = RESUME
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && classify_heading(l).is_none())
            .collect();
        assigned.sort_unstable();
        expected.sort_unstable();
        assert_eq!(assigned, expected);
    }

    #[test]
    fn test_section_map_deserializes_partial_object() {
        let map: SectionMap = serde_json::from_str(r#"{"skills": "Rust"}"#).unwrap();
        assert_eq!(map.get(Section::Skills), "Rust");
        assert_eq!(map.get(Section::Contact), "");
    }
}
