//! DOCX front end: unzips the package and streams `word/document.xml`.
//!
//! Every `w:p` paragraph becomes one line, including paragraphs nested in
//! table cells, so table content keeps its document position.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;
use zip::ZipArchive;

use super::{DocumentFormat, DocumentParser, ParseError, RawDocument};

const DOCUMENT_PART: &str = "word/document.xml";
const MEDIA_PREFIX: &str = "word/media/";

pub struct DocxParser;

impl DocumentParser for DocxParser {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Docx
    }

    fn parse(&self, data: &[u8]) -> Result<RawDocument, ParseError> {
        let mut archive =
            ZipArchive::new(Cursor::new(data)).map_err(|e| ParseError::Docx(e.to_string()))?;

        let images_count = archive
            .file_names()
            .filter(|name| name.starts_with(MEDIA_PREFIX))
            .count();

        let mut xml = String::new();
        archive
            .by_name(DOCUMENT_PART)
            .map_err(|e| ParseError::Docx(format!("{DOCUMENT_PART}: {e}")))?
            .read_to_string(&mut xml)
            .map_err(|e| ParseError::Docx(e.to_string()))?;

        let text = document_text(&xml)?;
        debug!(
            "DOCX extracted: {} lines, {} media parts",
            text.lines().count(),
            images_count
        );

        Ok(RawDocument { text, images_count })
    }
}

/// Flattens WordprocessingML body XML into newline-separated paragraphs.
fn document_text(xml: &str) -> Result<String, ParseError> {
    let mut reader = Reader::from_str(xml);
    let mut lines: Vec<String> = Vec::new();
    let mut paragraph = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:p" => paragraph.clear(),
                b"w:t" => in_text_run = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:tab" => paragraph.push('\t'),
                b"w:br" | b"w:cr" => paragraph.push('\n'),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text_run => {
                let text = t
                    .unescape()
                    .map_err(|e| ParseError::Docx(e.to_string()))?;
                paragraph.push_str(&text);
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => lines.push(std::mem::take(&mut paragraph)),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ParseError::Docx(format!(
                    "malformed XML at position {}: {e}",
                    reader.buffer_position()
                )))
            }
            _ => {}
        }
    }

    Ok(lines.join("\n"))
}
