//! PDF front end backed by `pdf-extract`.

use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::debug;

use super::{DocumentFormat, DocumentParser, ParseError, RawDocument};

const IMAGE_MARKERS: [&[u8]; 2] = [b"/Subtype/Image", b"/Subtype /Image"];

pub struct PdfParser;

impl DocumentParser for PdfParser {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pdf
    }

    fn parse(&self, data: &[u8]) -> Result<RawDocument, ParseError> {
        // pdf-extract panics on some malformed inputs instead of returning an error.
        let text = catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(data)))
            .map_err(|_| ParseError::Pdf("extractor panicked on malformed input".to_string()))?
            .map_err(|e| ParseError::Pdf(e.to_string()))?;

        let images_count = count_image_objects(data);
        debug!(
            "PDF extracted: {} chars, {} image objects",
            text.chars().count(),
            images_count
        );

        Ok(RawDocument { text, images_count })
    }
}

/// Counts image XObject dictionaries visible in the raw file.
/// Images declared inside compressed object streams are not seen.
fn count_image_objects(data: &[u8]) -> usize {
    IMAGE_MARKERS
        .iter()
        .map(|marker| {
            data.windows(marker.len())
                .filter(|window| window == marker)
                .count()
        })
        .sum()
}
