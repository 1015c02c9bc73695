//! PDF renderer: built-in Helvetica on US-letter pages, one text line per
//! wrapped block line, new page when the bottom margin is reached.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use super::{Block, ExportError};

const PAGE_WIDTH: Mm = Mm(215.9);
const PAGE_HEIGHT: Mm = Mm(279.4);
const MARGIN_X: f32 = 19.05;
const MARGIN_Y: f32 = 12.7;
const LAYER: &str = "Layer 1";

const BODY_PT: f32 = 10.0;
const TITLE_PT: f32 = 12.0;
const PT_TO_MM: f32 = 0.3528;
/// Helvetica averages roughly half an em per glyph.
const AVG_GLYPH_EM: f32 = 0.5;

struct PageCursor {
    layer: PdfLayerReference,
    y: f32,
}

pub fn render(blocks: &[Block]) -> Result<Vec<u8>, ExportError> {
    let (doc, page, layer) = PdfDocument::new("Resume", PAGE_WIDTH, PAGE_HEIGHT, LAYER);
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    let mut cursor = PageCursor {
        layer: doc.get_page(page).get_layer(layer),
        y: PAGE_HEIGHT.0 - MARGIN_Y,
    };

    let mut previous_was_contact = false;
    for block in blocks {
        let (text, size, font, space_before): (&str, f32, &IndirectFontRef, f32) = match block {
            Block::Contact(text) => (text.as_str(), BODY_PT, &regular, 0.0),
            Block::Title(title) => (*title, TITLE_PT, &bold, 4.0),
            Block::Body(text) => (text.as_str(), BODY_PT, &regular, 0.0),
        };
        let space_before = if previous_was_contact && !matches!(block, Block::Contact(_)) {
            space_before + 4.0
        } else {
            space_before
        };
        previous_was_contact = matches!(block, Block::Contact(_));

        let line_height = size * PT_TO_MM * 1.4;
        cursor.y -= space_before;
        for line in wrap(text, chars_per_line(size)) {
            if cursor.y - line_height < MARGIN_Y {
                let (page, layer) = doc.add_page(PAGE_WIDTH, PAGE_HEIGHT, LAYER);
                cursor.layer = doc.get_page(page).get_layer(layer);
                cursor.y = PAGE_HEIGHT.0 - MARGIN_Y;
            }
            cursor.y -= line_height;
            cursor
                .layer
                .use_text(line, size, Mm(MARGIN_X), Mm(cursor.y), font);
        }
    }

    Ok(doc.save_to_bytes()?)
}

fn chars_per_line(font_pt: f32) -> usize {
    let usable_mm = PAGE_WIDTH.0 - 2.0 * MARGIN_X;
    let glyph_mm = font_pt * AVG_GLYPH_EM * PT_TO_MM;
    (usable_mm / glyph_mm).floor().max(1.0) as usize
}

/// Greedy word wrap. Words longer than a line are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word = word.to_string();
        while word.chars().count() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let split = word
                .char_indices()
                .nth(width)
                .map(|(i, _)| i)
                .unwrap_or(word.len());
            let rest = word.split_off(split);
            lines.push(word);
            word = rest;
        }

        let needed = current.chars().count() + usize::from(!current.is_empty()) + word.chars().count();
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
