//! Text extraction collaborators.

mod pdf;

pub use pdf::PdfExtractor;

use speedread_core::{content::TextExtractor, error::ExtractionError};

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// True when the bytes open with a `%PDF-` header, after an optional BOM and
/// leading whitespace. Text that only mentions the header later on is not a PDF.
pub fn looks_like_pdf(bytes: &[u8]) -> bool {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let start = body
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(body.len());
    body[start..].starts_with(b"%PDF-")
}

/// UTF-8 text files, taken verbatim.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let text = core::str::from_utf8(bytes).map_err(|_| ExtractionError::Encoding)?;
        Ok(text.strip_prefix('\u{feff}').unwrap_or(text).to_owned())
    }
}

/// Picks the PDF or plain-text extractor from the upload's header bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentExtractor {
    pdf: PdfExtractor,
    text: PlainTextExtractor,
}

impl DocumentExtractor {
    pub const fn new() -> Self {
        Self {
            pdf: PdfExtractor::new(),
            text: PlainTextExtractor,
        }
    }
}

impl TextExtractor for DocumentExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        if looks_like_pdf(bytes) {
            self.pdf.extract(bytes)
        } else {
            self.text.extract(bytes).map_err(|err| match err {
                ExtractionError::Encoding => ExtractionError::Unsupported,
                other => other,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_header_detection() {
        assert!(looks_like_pdf(b"%PDF-1.7\n..."));
        assert!(looks_like_pdf(b"\xef\xbb\xbf  %PDF-1.4"));
        assert!(!looks_like_pdf(b"plain words"));
        assert!(!looks_like_pdf(b""));
        assert!(!looks_like_pdf(b"A PDF begins with %PDF-1.7 and then objects."));
    }

    #[test]
    fn text_mentioning_a_pdf_header_is_read_as_text() {
        let text = "Notes on file formats: a PDF begins with %PDF-1.7 followed by objects.";
        assert_eq!(
            DocumentExtractor::new().extract(text.as_bytes()),
            Ok(text.to_owned())
        );
    }

    #[test]
    fn plain_text_is_taken_verbatim() {
        let text = PlainTextExtractor.extract("\u{feff}Hello, world.".as_bytes());
        assert_eq!(text, Ok("Hello, world.".to_owned()));
    }

    #[test]
    fn invalid_utf8_is_an_encoding_error() {
        assert_eq!(
            PlainTextExtractor.extract(&[0x66, 0xff, 0xfe]),
            Err(ExtractionError::Encoding)
        );
    }

    #[test]
    fn binary_non_pdf_is_unsupported() {
        assert_eq!(
            DocumentExtractor::new().extract(&[0x89, b'P', b'N', b'G', 0xff]),
            Err(ExtractionError::Unsupported)
        );
    }

    #[test]
    fn broken_pdf_is_corrupt() {
        let result = DocumentExtractor::new().extract(b"%PDF-1.7\nthis is not a pdf body");
        assert!(matches!(result, Err(ExtractionError::Corrupt(_))));
    }
}
