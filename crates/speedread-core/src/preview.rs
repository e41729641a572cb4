//! Mapping word positions onto page preview geometry.
//!
//! Page fragments come from a preview collaborator. A fragment may hold several
//! words; the horizontal position of a word inside it is estimated by splitting
//! the fragment width evenly between its words.

use serde::{Deserialize, Serialize};

use crate::content::count_words;

/// A positioned run of text on a page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageTextFragment {
    pub text: String,
    /// Affine transform `[a, b, c, d, e, f]`; `e`/`f` are the baseline origin
    /// in page units (origin bottom-left).
    pub transform: [f64; 6],
    pub width: f64,
    pub height: f64,
}

/// Text fragments for one rendered page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageText {
    /// 1-based page number.
    pub page_number: u32,
    /// Height of the rendered surface, already scaled.
    pub viewport_height: f64,
    /// Page units to surface pixels.
    pub scale: f64,
    pub fragments: Vec<PageTextFragment>,
}

/// Highlight box in rendered surface coordinates (origin top-left).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HighlightRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WordLocation {
    pub page_number: u32,
    /// Index into the page's fragment list.
    pub fragment: usize,
    /// Word position inside the fragment.
    pub word_in_fragment: usize,
    pub rect: HighlightRect,
}

/// Find word `index` by walking pages and fragments in source order.
///
/// Returns `None` when fewer than `index + 1` words are mapped.
pub fn locate_word(pages: &[PageText], index: usize) -> Option<WordLocation> {
    let mut counted = 0usize;

    for page in pages {
        for (fragment_index, fragment) in page.fragments.iter().enumerate() {
            let words = count_words(&fragment.text);
            if words == 0 {
                continue;
            }

            if index < counted + words {
                return Some(place_word(page, fragment_index, index - counted, words));
            }
            counted += words;
        }
    }

    None
}

fn place_word(
    page: &PageText,
    fragment_index: usize,
    word_in_fragment: usize,
    words_in_fragment: usize,
) -> WordLocation {
    let fragment = &page.fragments[fragment_index];
    let tx = fragment.transform[4] * page.scale;
    let ty = page.viewport_height - fragment.transform[5] * page.scale;
    let height = fragment.height * page.scale;
    let word_width = fragment.width * page.scale / words_in_fragment as f64;

    WordLocation {
        page_number: page.page_number,
        fragment: fragment_index,
        word_in_fragment,
        rect: HighlightRect {
            left: tx + word_width * word_in_fragment as f64,
            top: ty - height,
            width: word_width,
            height,
        },
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct FragmentSpan {
    first_word: usize,
    words: usize,
    page: usize,
    fragment: usize,
}

/// Word-index lookup table built once per preview delivery.
///
/// Answers exactly what [`locate_word`] answers without rescanning fragments.
#[derive(Clone, Debug, PartialEq)]
pub struct FragmentIndex {
    pages: Vec<PageText>,
    spans: Vec<FragmentSpan>,
    mapped_words: usize,
}

impl FragmentIndex {
    pub fn new(pages: Vec<PageText>) -> Self {
        let mut spans = Vec::new();
        let mut mapped_words = 0usize;

        for (page_index, page) in pages.iter().enumerate() {
            for (fragment_index, fragment) in page.fragments.iter().enumerate() {
                let words = count_words(&fragment.text);
                if words == 0 {
                    continue;
                }
                spans.push(FragmentSpan {
                    first_word: mapped_words,
                    words,
                    page: page_index,
                    fragment: fragment_index,
                });
                mapped_words += words;
            }
        }

        Self {
            pages,
            spans,
            mapped_words,
        }
    }

    pub fn pages(&self) -> &[PageText] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Total words covered by the fragments.
    pub fn mapped_words(&self) -> usize {
        self.mapped_words
    }

    pub fn locate(&self, index: usize) -> Option<WordLocation> {
        if index >= self.mapped_words {
            return None;
        }

        let slot = self
            .spans
            .partition_point(|span| span.first_word + span.words <= index);
        let span = self.spans.get(slot)?;

        Some(place_word(
            &self.pages[span.page],
            span.fragment,
            index - span.first_word,
            span.words,
        ))
    }
}
