// Document front ends: container-format text extraction plus section segmentation.
// Each format implements `DocumentParser`; both feed the same segmenter.

pub mod docx;
pub mod pdf;
pub mod sections;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub use sections::{segment, Section, SectionMap};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unsupported file type '{0}'; allowed: .pdf, .docx")]
    UnsupportedFormat(String),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),
}

/// Supported upload container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Resolves the format from a filename extension, case-insensitively.
    pub fn from_filename(filename: &str) -> Result<Self, ParseError> {
        let extension = std::path::Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            other => Err(ParseError::UnsupportedFormat(format!(".{other}"))),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
        }
    }
}

/// Raw output of a container parser, before segmentation.
#[derive(Debug, Clone, Default)]
pub struct RawDocument {
    pub text: String,
    pub images_count: usize,
}

/// A parsed resume: trimmed text, its sections, and the embedded image count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedDocument {
    pub text: String,
    pub sections: SectionMap,
    pub images_count: usize,
}

impl ParsedDocument {
    pub fn from_text(text: &str, images_count: usize) -> Self {
        let text = text.trim().to_string();
        let sections = segment(&text);
        Self {
            text,
            sections,
            images_count,
        }
    }
}

/// A container-format text extractor.
pub trait DocumentParser: Send + Sync {
    fn format(&self) -> DocumentFormat;
    fn parse(&self, data: &[u8]) -> Result<RawDocument, ParseError>;
}

fn parser_for(format: DocumentFormat) -> Box<dyn DocumentParser> {
    match format {
        DocumentFormat::Pdf => Box::new(pdf::PdfParser),
        DocumentFormat::Docx => Box::new(docx::DocxParser),
    }
}

/// Extracts text from an uploaded document and segments it.
/// CPU-bound: call from `tokio::task::spawn_blocking`.
pub fn parse_document(format: DocumentFormat, data: &[u8]) -> Result<ParsedDocument, ParseError> {
    let parser = parser_for(format);
    let raw = parser.parse(data)?;
    if raw.text.trim().is_empty() {
        warn!(
            "{} document produced no text ({} images); it may be scanned",
            parser.format().extension(),
            raw.images_count
        );
    }
    let parsed = ParsedDocument::from_text(&raw.text, raw.images_count);
    let found: Vec<&str> = parsed
        .sections
        .iter()
        .filter(|(_, text)| !text.is_empty())
        .map(|(section, _)| section.as_str())
        .collect();
    debug!("Segmented sections: {}", found.join(", "));
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_filename_is_case_insensitive() {
        assert_eq!(DocumentFormat::from_filename("CV.PDF").unwrap(), DocumentFormat::Pdf);
        assert_eq!(
            DocumentFormat::from_filename("resume.final.docx").unwrap(),
            DocumentFormat::Docx
        );
    }

    #[test]
    fn test_format_rejects_other_extensions() {
        assert!(matches!(
            DocumentFormat::from_filename("resume.txt"),
            Err(ParseError::UnsupportedFormat(ext)) if ext == ".txt"
        ));
        assert!(DocumentFormat::from_filename("resume").is_err());
    }

    #[test]
    fn test_parsed_document_trims_and_segments() {
        let parsed = ParsedDocument::from_text("\n  Jane Doe\nSkills\nRust\n\n", 2);
        assert_eq!(parsed.text, "Jane Doe\nSkills\nRust");
        assert_eq!(parsed.sections.contact, "Jane Doe");
        assert_eq!(parsed.sections.skills, "Rust");
        assert_eq!(parsed.images_count, 2);
    }

    #[test]
    fn test_parse_document_rejects_garbage_pdf() {
        assert!(matches!(
            parse_document(DocumentFormat::Pdf, b"not a pdf"),
            Err(ParseError::Pdf(_))
        ));
    }
}
