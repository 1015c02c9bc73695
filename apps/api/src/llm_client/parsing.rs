//! Helpers for reading semi-structured model output and for sizing prompts.

use std::sync::LazyLock;

use regex::Regex;

/// Start of the next `label:` line — a newline followed by a bare word and a colon.
static NEXT_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n[A-Za-z_]+:").expect("next-label pattern is valid")
});

/// Strips ```json / ```python / bare ``` code fences from model output.
pub fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = ["```json", "```python", "```"]
        .iter()
        .find_map(|fence| text.strip_prefix(fence));

    match inner {
        Some(stripped) => stripped
            .trim_end()
            .strip_suffix("```")
            .unwrap_or(stripped)
            .trim(),
        None => text,
    }
}

/// Extracts the value following `label:` up to the next `word:` line or the end
/// of the text. The label is matched case-insensitively; the value is trimmed.
/// Returns `None` when the label is absent or its value is empty.
pub fn extract_labeled_field(text: &str, label: &str) -> Option<String> {
    let pattern = format!(r"(?i){}:\s*", regex::escape(label));
    let label_re = Regex::new(&pattern).ok()?;
    let found = label_re.find(text)?;

    let rest = &text[found.end()..];
    let first_len = rest.chars().next()?.len_utf8();
    let end = NEXT_LABEL
        .find_at(rest, first_len)
        .map(|m| m.start())
        .unwrap_or(rest.len());

    let value = rest[..end].trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Substitutes `{name}` placeholders in one left-to-right pass. Inserted
/// values are never rescanned; unknown `{...}` spans are copied verbatim.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let replacement = after.find('}').and_then(|close| {
            let name = &after[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (close, *value))
        });
        match replacement {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Returns at most the first `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fences_with_json_tag() {
        let input = "```json\n[{\"key\": \"value\"}]\n```";
        assert_eq!(strip_code_fences(input), "[{\"key\": \"value\"}]");
    }

    #[test]
    fn test_strip_code_fences_with_python_tag() {
        let input = "```python\n[1, 2]\n```";
        assert_eq!(strip_code_fences(input), "[1, 2]");
    }

    #[test]
    fn test_strip_code_fences_without_tag() {
        let input = "```\n[]\n```";
        assert_eq!(strip_code_fences(input), "[]");
    }

    #[test]
    fn test_strip_code_fences_no_fences() {
        assert_eq!(strip_code_fences("  [1]  "), "[1]");
    }

    #[test]
    fn test_extract_labeled_field_stops_at_next_label() {
        let text = "section: Skills\nsuggested: Rust, Tokio";
        assert_eq!(
            extract_labeled_field(text, "section").as_deref(),
            Some("Skills")
        );
        assert_eq!(
            extract_labeled_field(text, "suggested").as_deref(),
            Some("Rust, Tokio")
        );
    }

    #[test]
    fn test_extract_labeled_field_is_case_insensitive_and_multiline() {
        let text = "SUGGESTED: Led migration\nto Kubernetes\nTYPE: rewrite";
        assert_eq!(
            extract_labeled_field(text, "suggested").as_deref(),
            Some("Led migration\nto Kubernetes")
        );
    }

    #[test]
    fn test_extract_labeled_field_missing_or_empty() {
        assert_eq!(extract_labeled_field("nothing here", "section"), None);
        assert_eq!(extract_labeled_field("section:   ", "section"), None);
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn test_fill_template_does_not_rescan_values() {
        let filled = fill_template(
            "A={a} B={b}",
            &[("a", "{b}"), ("b", "two")],
        );
        assert_eq!(filled, "A={b} B=two");
    }

    #[test]
    fn test_fill_template_keeps_unknown_braces() {
        let filled = fill_template(r#"[{"section": "Skills"}] {x} {"#, &[("x", "1")]);
        assert_eq!(filled, r#"[{"section": "Skills"}] 1 {"#);
    }
}
