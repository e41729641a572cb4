//! Page preview sources for the terminal reader.
//!
//! Plain text has no page geometry, so it is laid out on US Letter pages in a
//! fixed-pitch font: one fragment per wrapped line. PDF geometry would need a
//! renderer the host does not carry and is reported as unsupported.

use log::debug;
use speedread_core::{
    content::{PagePreviewSource, TextExtractor, tokenize},
    error::ExtractionError,
    preview::{PageText, PageTextFragment},
};

use crate::extract::{PlainTextExtractor, looks_like_pdf};

const PAGE_WIDTH: f64 = 612.0;
const PAGE_HEIGHT: f64 = 792.0;
const MARGIN: f64 = 72.0;
const FONT_SIZE: f64 = 12.0;
const LINE_HEIGHT: f64 = 14.0;
const CHAR_WIDTH: f64 = 6.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PreviewLayout {
    pub scale: f64,
    pub columns: usize,
    pub lines_per_page: usize,
}

impl PreviewLayout {
    pub const fn letter(scale: f64) -> Self {
        Self {
            scale,
            columns: ((PAGE_WIDTH - 2.0 * MARGIN) / CHAR_WIDTH) as usize,
            lines_per_page: ((PAGE_HEIGHT - 2.0 * MARGIN) / LINE_HEIGHT) as usize,
        }
    }
}

impl Default for PreviewLayout {
    fn default() -> Self {
        Self::letter(1.0)
    }
}

/// Monospace page layout for plain-text documents.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainTextPreview {
    layout: PreviewLayout,
}

impl PlainTextPreview {
    pub const fn new(layout: PreviewLayout) -> Self {
        Self { layout }
    }

    /// Lay out already-decoded text.
    pub fn paginate(&self, text: &str) -> Vec<PageText> {
        let lines = wrap_words(text, self.layout.columns.max(1));
        let per_page = self.layout.lines_per_page.max(1);

        lines
            .chunks(per_page)
            .enumerate()
            .map(|(page_index, chunk)| PageText {
                page_number: page_index as u32 + 1,
                viewport_height: PAGE_HEIGHT * self.layout.scale,
                scale: self.layout.scale,
                fragments: chunk
                    .iter()
                    .enumerate()
                    .map(|(line, text)| line_fragment(text, line))
                    .collect(),
            })
            .collect()
    }
}

impl PagePreviewSource for PlainTextPreview {
    fn pages(&self, bytes: &[u8]) -> Result<Vec<PageText>, ExtractionError> {
        if looks_like_pdf(bytes) {
            return Err(ExtractionError::Unsupported);
        }

        let text = PlainTextExtractor.extract(bytes)?;
        let pages = self.paginate(&text);
        debug!("preview: laid out pages={}", pages.len());
        Ok(pages)
    }
}

fn line_fragment(text: &str, line: usize) -> PageTextFragment {
    let baseline = PAGE_HEIGHT - MARGIN - FONT_SIZE - line as f64 * LINE_HEIGHT;
    PageTextFragment {
        text: text.to_owned(),
        transform: [1.0, 0.0, 0.0, 1.0, MARGIN, baseline],
        width: text.chars().count() as f64 * CHAR_WIDTH,
        height: FONT_SIZE,
    }
}

/// Greedy wrap; a word longer than a line gets a line to itself.
fn wrap_words(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in tokenize(text) {
        let len = word.text.chars().count();
        if current_len > 0 && current_len + 1 + len > columns {
            lines.push(core::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(&word.text);
        current_len += len;
    }

    if current_len > 0 {
        lines.push(current);
    }
    lines
}
