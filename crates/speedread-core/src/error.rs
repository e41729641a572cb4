//! Error types shared by the reader model and its collaborators.

use thiserror::Error;

/// Failure reported by a text extraction or page preview collaborator.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum ExtractionError {
    /// The bytes are not a document format the collaborator understands.
    #[error("unsupported document format")]
    Unsupported,

    /// The document was recognized but could not be decoded.
    #[error("could not read document: {0}")]
    Corrupt(String),

    /// Plain text input that is not valid UTF-8.
    #[error("document text is not valid UTF-8")]
    Encoding,
}

/// Errors that prevent a new document from replacing the current one.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum LoadError {
    #[error("error processing document: {0}")]
    Extraction(#[from] ExtractionError),

    /// Extraction worked but produced no words (image-only or blank document).
    #[error("no readable text found in document")]
    EmptyDocument,
}

/// Errors returned by playback operations.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum PlaybackError {
    #[error("no document loaded")]
    NoDocument,

    #[error("please enter a valid word number between 1 and {word_count} (got {input:?})")]
    InvalidSeek { input: String, word_count: usize },
}
