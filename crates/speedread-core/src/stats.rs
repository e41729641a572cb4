//! Lexical and readability statistics computed once per loaded document.

use std::collections::HashSet;

use serde::Serialize;

use crate::content::{Document, WordToken};

const VOWELS: &str = "aeiouy";

/// Immutable statistics snapshot for one document.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStats {
    pub total_words: usize,
    pub unique_words: usize,
    /// Unique/total as a percentage, one decimal.
    pub lexical_diversity_pct: f64,
    /// Mean token length in characters (punctuation included), one decimal.
    pub avg_word_length: f64,
    pub sentence_count: usize,
    /// Words per sentence, one decimal.
    pub avg_sentence_length: f64,
    pub syllable_count: usize,
    /// Flesch-Kincaid grade estimate, one decimal, never negative.
    pub reading_level: f64,
}

impl DocumentStats {
    pub fn for_document(document: &Document) -> Self {
        Self::compute(document.words(), document.text())
    }

    /// Compute all statistics from the word sequence and its source text.
    pub fn compute(words: &[WordToken], text: &str) -> Self {
        let total_words = words.len();
        let sentence_count = count_sentences(text);

        if total_words == 0 {
            return Self {
                total_words,
                unique_words: 0,
                lexical_diversity_pct: 0.0,
                avg_word_length: 0.0,
                sentence_count,
                avg_sentence_length: 0.0,
                syllable_count: 0,
                reading_level: 0.0,
            };
        }

        let unique_words = words
            .iter()
            .map(|w| w.text.to_lowercase())
            .collect::<HashSet<_>>()
            .len();
        let total_chars: usize = words.iter().map(|w| w.text.chars().count()).sum();
        let syllable_count: usize = words.iter().map(|w| count_syllables(&w.text)).sum();

        let total = total_words as f64;
        let words_per_sentence = total / sentence_count as f64;
        let grade = 0.39 * words_per_sentence + 11.8 * (syllable_count as f64 / total) - 15.59;

        Self {
            total_words,
            unique_words,
            lexical_diversity_pct: round1(unique_words as f64 / total * 100.0),
            avg_word_length: round1(total_chars as f64 / total),
            sentence_count,
            avg_sentence_length: round1(words_per_sentence),
            syllable_count,
            reading_level: round1(grade).max(0.0),
        }
    }
}

/// Non-empty segments between runs of `.`, `!` and `?`; at least one.
pub fn count_sentences(text: &str) -> usize {
    text.split(['.', '!', '?'])
        .filter(|segment| !segment.trim().is_empty())
        .count()
        .max(1)
}

/// Vowel-group syllable estimate with silent-`e` and `-le` adjustments.
pub fn count_syllables(word: &str) -> usize {
    let lower: Vec<char> = word.to_lowercase().chars().collect();
    let is_vowel = |c: char| VOWELS.contains(c);

    let mut count = 0i64;
    let mut previous_was_vowel = false;
    for &c in &lower {
        let vowel = is_vowel(c);
        if vowel && !previous_was_vowel {
            count += 1;
        }
        previous_was_vowel = vowel;
    }

    if lower.last() == Some(&'e') {
        count -= 1;
    }
    if lower.len() > 2 && lower.ends_with(&['l', 'e']) && !is_vowel(lower[lower.len() - 3]) {
        count += 1;
    }

    count.max(1) as usize
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
