//! Export — renders a parsed resume as an ATS-friendly DOCX or PDF.
//!
//! Both renderers consume the same flat `Block` list so the section order
//! and titles are decided once.

pub mod docx;
pub mod pdf;

use std::str::FromStr;

use thiserror::Error;

use crate::parsing::{ParsedDocument, Section};

/// Contact lines carried into the export header.
const CONTACT_LINES: usize = 4;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("DOCX packaging failed: {0}")]
    Docx(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF rendering failed: {0}")]
    Pdf(#[from] printpdf::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Docx,
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Docx => "docx",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "docx" => Ok(ExportFormat::Docx),
            "pdf" => Ok(ExportFormat::Pdf),
            _ => Err(format!("Format must be 'docx' or 'pdf', got '{s}'")),
        }
    }
}

/// One rendered line of the exported document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Contact(String),
    Title(&'static str),
    Body(String),
}

fn section_title(section: Section) -> &'static str {
    match section {
        Section::Contact => "CONTACT",
        Section::Summary => "PROFESSIONAL SUMMARY",
        Section::Experience => "PROFESSIONAL EXPERIENCE",
        Section::Education => "EDUCATION",
        Section::Skills => "SKILLS",
        Section::Projects => "PROJECTS",
        Section::Certifications => "CERTIFICATIONS",
        Section::Other => "ADDITIONAL INFORMATION",
    }
}

fn non_blank_lines(text: &str) -> impl Iterator<Item = String> + '_ {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
}

/// Lays a document out as contact lines, then each non-empty section under
/// its title. Falls back to the full text when no section has content.
pub fn layout(document: &ParsedDocument) -> Vec<Block> {
    let sections = &document.sections;
    if sections.is_empty() {
        return non_blank_lines(&document.text).map(Block::Body).collect();
    }

    let mut blocks: Vec<Block> = non_blank_lines(&sections.contact)
        .take(CONTACT_LINES)
        .map(Block::Contact)
        .collect();

    for (section, text) in sections.iter().filter(|(s, _)| *s != Section::Contact) {
        if text.trim().is_empty() {
            continue;
        }
        blocks.push(Block::Title(section_title(section)));
        blocks.extend(non_blank_lines(text).map(Block::Body));
    }

    blocks
}

/// Renders the document in the requested format.
pub fn render(format: ExportFormat, document: &ParsedDocument) -> Result<Vec<u8>, ExportError> {
    let blocks = layout(document);
    match format {
        ExportFormat::Docx => docx::render(&blocks),
        ExportFormat::Pdf => pdf::render(&blocks),
    }
}
