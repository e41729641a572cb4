//! HTTP upload endpoint: document bytes in, word list out.
//!
//! Request handling is a pure function over method, path, content type and
//! body so the routing and error mapping can be exercised without sockets.

pub mod multipart;
mod server;

pub use server::{ServeError, UploadServer, serve};

use log::{info, warn};
use serde::Serialize;
use speedread_core::{
    content::{Document, TextExtractor},
    error::{ExtractionError, LoadError},
};
use thiserror::Error;

/// Largest accepted request body.
pub const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No file uploaded")]
    NoFile,
    #[error("malformed multipart body: {0}")]
    Malformed(String),
    #[error("upload exceeds {limit} bytes")]
    TooLarge { limit: usize },
    #[error("document contains no words")]
    EmptyDocument,
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

impl UploadError {
    pub const fn status(&self) -> u16 {
        match self {
            Self::NoFile | Self::Malformed(_) | Self::EmptyDocument => 400,
            Self::TooLarge { .. } => 413,
            Self::Extraction(_) => 500,
        }
    }
}

impl From<LoadError> for UploadError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::EmptyDocument => Self::EmptyDocument,
            LoadError::Extraction(err) => Self::Extraction(err),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub words: Vec<String>,
    pub original_text: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Status, content type and body of a reply.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpReply {
    fn json(status: u16, value: &impl Serialize) -> Self {
        let body = serde_json::to_string(value)
            .unwrap_or_else(|err| format!("{{\"error\":\"{err}\"}}"));
        Self {
            status,
            content_type: "application/json",
            body,
        }
    }

    fn error(status: u16, message: impl Into<String>) -> Self {
        Self::json(
            status,
            &ErrorBody {
                error: message.into(),
            },
        )
    }

    fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "text/plain; charset=utf-8",
            body: body.to_owned(),
        }
    }
}

impl From<UploadError> for HttpReply {
    fn from(err: UploadError) -> Self {
        Self::error(err.status(), err.to_string())
    }
}

/// Pull the uploaded file out of a request body.
///
/// Multipart bodies yield the `pdf` field or the first file part; anything
/// else is taken as the raw document.
pub fn upload_bytes<'a>(
    content_type: Option<&str>,
    body: &'a [u8],
) -> Result<&'a [u8], UploadError> {
    let bytes = match content_type.and_then(multipart::boundary) {
        Some(boundary) => {
            let parts = multipart::parse(body, boundary)?;
            multipart::upload_part(&parts)
                .map(|part| part.content)
                .ok_or(UploadError::NoFile)?
        }
        None => body,
    };

    if bytes.is_empty() {
        return Err(UploadError::NoFile);
    }
    Ok(bytes)
}

pub fn process_upload(
    extractor: &dyn TextExtractor,
    content_type: Option<&str>,
    body: &[u8],
) -> Result<UploadResponse, UploadError> {
    let bytes = upload_bytes(content_type, body)?;
    let text = extractor.extract(bytes)?;
    let document = Document::from_text(text)?;

    Ok(UploadResponse {
        words: document.word_strings().map(str::to_owned).collect(),
        original_text: document.text().to_owned(),
    })
}

pub fn handle_request(
    method: &str,
    path: &str,
    content_type: Option<&str>,
    body: &[u8],
    extractor: &dyn TextExtractor,
) -> HttpReply {
    let path = path.split('?').next().unwrap_or(path);

    match (method, path) {
        ("GET", "/health") => HttpReply::text(200, "ok"),
        ("POST", "/upload") => match process_upload(extractor, content_type, body) {
            Ok(response) => {
                info!(
                    "upload: ok bytes={} words={}",
                    body.len(),
                    response.words.len()
                );
                HttpReply::json(200, &response)
            }
            Err(err) => {
                warn!("upload: rejected status={} err={}", err.status(), err);
                err.into()
            }
        },
        _ => HttpReply::error(404, "not found"),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::extract::{DocumentExtractor, PlainTextExtractor};

    struct FailingExtractor;

    impl TextExtractor for FailingExtractor {
        fn extract(&self, _bytes: &[u8]) -> Result<String, ExtractionError> {
            Err(ExtractionError::Corrupt("xref table missing".to_owned()))
        }
    }

    fn json(reply: &HttpReply) -> Value {
        serde_json::from_str(&reply.body).unwrap()
    }

    fn multipart(field: &str, content: &str) -> (String, Vec<u8>) {
        let boundary = "XyZ";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; \
             filename=\"doc.txt\"\r\n\r\n{content}\r\n--{boundary}--\r\n"
        );
        (
            format!("multipart/form-data; boundary={boundary}"),
            body.into_bytes(),
        )
    }

    #[test]
    fn multipart_upload_returns_words_and_text() {
        let (content_type, body) = multipart("pdf", "Hello  brave\nnew world");
        let reply = handle_request(
            "POST",
            "/upload",
            Some(&content_type),
            &body,
            &DocumentExtractor::new(),
        );

        assert_eq!(reply.status, 200);
        assert_eq!(reply.content_type, "application/json");
        let value = json(&reply);
        assert_eq!(
            value["words"],
            serde_json::json!(["Hello", "brave", "new", "world"])
        );
        assert_eq!(value["originalText"], "Hello  brave\nnew world");
    }

    #[test]
    fn raw_body_is_the_document() {
        let reply = handle_request(
            "POST",
            "/upload",
            Some("text/plain"),
            b"one two",
            &PlainTextExtractor,
        );
        assert_eq!(reply.status, 200);
        assert_eq!(json(&reply)["words"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn text_quoting_a_pdf_header_uploads_as_text() {
        let body: &[u8] = b"Notes on file formats: a PDF begins with %PDF-1.7 followed by objects.";
        let reply = handle_request(
            "POST",
            "/upload",
            Some("text/plain"),
            body,
            &DocumentExtractor::new(),
        );
        assert_eq!(reply.status, 200);
        assert_eq!(json(&reply)["words"].as_array().unwrap().len(), 12);
    }

    #[test]
    fn missing_file_is_400() {
        let reply = handle_request("POST", "/upload", None, b"", &PlainTextExtractor);
        assert_eq!(reply.status, 400);
        assert_eq!(json(&reply)["error"], "No file uploaded");

        let (content_type, _) = multipart("pdf", "x");
        let body = b"--XyZ\r\nContent-Disposition: form-data; name=\"title\"\r\n\r\nhi\r\n--XyZ--\r\n";
        let reply = handle_request(
            "POST",
            "/upload",
            Some(&content_type),
            body,
            &PlainTextExtractor,
        );
        assert_eq!(reply.status, 400);
    }

    #[test]
    fn whitespace_only_document_is_400() {
        let reply = handle_request("POST", "/upload", None, b" \n\t ", &PlainTextExtractor);
        assert_eq!(reply.status, 400);
        assert_eq!(json(&reply)["error"], "document contains no words");
    }

    #[test]
    fn extraction_failure_is_500_with_message() {
        let reply = handle_request("POST", "/upload", None, b"%PDF-", &FailingExtractor);
        assert_eq!(reply.status, 500);
        let message = json(&reply)["error"].as_str().unwrap().to_owned();
        assert!(message.contains("xref table missing"));
    }

    #[test]
    fn health_and_unknown_routes() {
        let extractor = PlainTextExtractor;
        let health = handle_request("GET", "/health", None, b"", &extractor);
        assert_eq!((health.status, health.body.as_str()), (200, "ok"));

        let missing = handle_request("GET", "/upload", None, b"", &extractor);
        assert_eq!(missing.status, 404);
        assert_eq!(json(&missing)["error"], "not found");
    }

    #[test]
    fn status_mapping() {
        assert_eq!(UploadError::TooLarge { limit: 1 }.status(), 413);
        assert_eq!(UploadError::from(LoadError::EmptyDocument).status(), 400);
        assert_eq!(
            UploadError::from(ExtractionError::Unsupported).status(),
            500
        );
    }
}
