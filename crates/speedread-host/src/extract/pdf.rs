use log::{debug, info};
use lopdf::Document as PdfDocument;
use speedread_core::{content::TextExtractor, error::ExtractionError};

/// Separator placed after every page's text.
const PAGE_SEPARATOR: &str = " ";

/// PDF text extraction backed by `lopdf`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub const fn new() -> Self {
        Self
    }
}

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let pdf = PdfDocument::load_mem(bytes)
            .map_err(|err| ExtractionError::Corrupt(err.to_string()))?;

        let pages = pdf.get_pages();
        let mut text = String::new();
        let mut failed_pages = 0usize;

        for &page_number in pages.keys() {
            match pdf.extract_text(&[page_number]) {
                Ok(page_text) => text.push_str(&page_text),
                Err(err) => {
                    // A single unreadable page should not sink the document.
                    failed_pages += 1;
                    debug!("pdf: page {} text failed: {}", page_number, err);
                }
            }
            text.push_str(PAGE_SEPARATOR);
        }

        if !pages.is_empty() && failed_pages == pages.len() {
            return Err(ExtractionError::Corrupt(
                "no page text could be decoded".to_owned(),
            ));
        }

        info!(
            "pdf: extracted pages={} failed_pages={} chars={}",
            pages.len(),
            failed_pages,
            text.len()
        );
        Ok(text)
    }
}
