//! Minimal WordprocessingML package: content types, package rels, and one
//! document part with a paragraph per block.

use std::io::{Cursor, Write};

use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::{Block, ExportError};

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

// Sizes are in half-points; margins in twentieths of a point.
const CONTACT_SIZE: u32 = 20;
const TITLE_SIZE: u32 = 24;
const BODY_SIZE: u32 = 20;
const SECTION_PROPERTIES: &str = r#"<w:sectPr><w:pgSz w:w="12240" w:h="15840"/><w:pgMar w:top="720" w:right="1080" w:bottom="720" w:left="1080" w:header="720" w:footer="720" w:gutter="0"/></w:sectPr>"#;

pub fn render(blocks: &[Block]) -> Result<Vec<u8>, ExportError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    writer.start_file("[Content_Types].xml", options)?;
    writer.write_all(CONTENT_TYPES.as_bytes())?;
    writer.start_file("_rels/.rels", options)?;
    writer.write_all(PACKAGE_RELS.as_bytes())?;
    writer.start_file("word/document.xml", options)?;
    writer.write_all(document_xml(blocks).as_bytes())?;

    Ok(writer.finish()?.into_inner())
}

fn document_xml(blocks: &[Block]) -> String {
    let mut body = String::new();
    for block in blocks {
        let paragraph = match block {
            Block::Contact(text) => paragraph(text, CONTACT_SIZE, false, Some("center")),
            Block::Title(title) => paragraph(title, TITLE_SIZE, true, None),
            Block::Body(text) => paragraph(text, BODY_SIZE, false, None),
        };
        body.push_str(&paragraph);
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}{SECTION_PROPERTIES}</w:body></w:document>"#
    )
}

fn paragraph(text: &str, half_points: u32, bold: bool, align: Option<&str>) -> String {
    let paragraph_props = match align {
        Some(jc) => format!(r#"<w:pPr><w:spacing w:after="40"/><w:jc w:val="{jc}"/></w:pPr>"#),
        None => r#"<w:pPr><w:spacing w:after="40"/></w:pPr>"#.to_string(),
    };
    let bold = if bold { "<w:b/>" } else { "" };
    format!(
        r#"<w:p>{paragraph_props}<w:r><w:rPr>{bold}<w:sz w:val="{half_points}"/></w:rPr><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
        escape_xml(text)
    )
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            // Control characters other than tab are not allowed in XML 1.0.
            c if c.is_control() && c != '\t' => {}
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use zip::ZipArchive;

    use super::*;
    use crate::export::layout;
    use crate::parsing::docx::DocxParser;
    use crate::parsing::{DocumentParser, ParsedDocument};

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("R&D <lead> \"x\""), "R&amp;D &lt;lead&gt; &quot;x&quot;");
        assert_eq!(escape_xml("a\u{0007}b\tc"), "ab\tc");
    }

    #[test]
    fn test_package_contains_required_parts() {
        let bytes = render(&[Block::Body("hello".to_string())]).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        for part in ["[Content_Types].xml", "_rels/.rels", "word/document.xml"] {
            assert!(archive.by_name(part).is_ok(), "missing {part}");
        }

        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .unwrap()
            .read_to_string(&mut xml)
            .unwrap();
        assert!(xml.contains(">hello</w:t>"));
    }

    #[test]
    fn test_export_reparses_with_titles() {
        let document = ParsedDocument::from_text(
            "Jane Doe\nSummary\nR&D engineer\nExperience\nAcme Corp\nSkills\nRust",
            0,
        );
        let bytes = render(&layout(&document)).unwrap();
        let reparsed = DocxParser.parse(&bytes).unwrap();

        assert_eq!(
            reparsed.text,
            "Jane Doe\nPROFESSIONAL SUMMARY\nR&D engineer\nPROFESSIONAL EXPERIENCE\nAcme Corp\nSKILLS\nRust"
        );
        assert!(!reparsed.text.contains("EDUCATION"));
    }
}
