//! Documents, word tokens and the collaborator contracts that produce them.

mod tokenizer;

pub use tokenizer::{count_words, next_word_at, tokenize};

use crate::{
    error::{ExtractionError, LoadError},
    preview::PageText,
};

/// One whitespace-delimited word, punctuation included.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WordToken {
    pub text: String,
    /// Zero-based position in the document word sequence.
    pub index: usize,
}

impl WordToken {
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Extracted document text with its word sequence.
///
/// A `Document` always holds at least one word.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Document {
    text: String,
    words: Vec<WordToken>,
}

impl Document {
    /// Tokenize `text` into a document, rejecting text without any words.
    pub fn from_text(text: impl Into<String>) -> Result<Self, LoadError> {
        let text = text.into();
        let words = tokenize(&text);
        if words.is_empty() {
            return Err(LoadError::EmptyDocument);
        }

        Ok(Self { text, words })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn words(&self) -> &[WordToken] {
        &self.words
    }

    pub fn word(&self, index: usize) -> Option<&WordToken> {
        self.words.get(index)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Index of the last word.
    pub fn last_index(&self) -> usize {
        self.words.len().saturating_sub(1)
    }

    pub fn word_strings(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(WordToken::as_str)
    }
}

/// Turns raw uploaded bytes into plain text, pages in reading order.
pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// Produces per-page text fragments for mapping word positions onto pages.
pub trait PagePreviewSource {
    fn pages(&self, bytes: &[u8]) -> Result<Vec<PageText>, ExtractionError>;
}
