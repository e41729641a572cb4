//! Optimal recognition point (ORP) selection.
//!
//! The ORP is the letter the eye should land on. It sits roughly a third into
//! the word and saturates for long words.

/// Character index of the highlighted letter in `word`.
///
/// Leading non-word characters (anything outside `[A-Za-z0-9_]`) are skipped
/// before the offset table is applied. The result is always a valid character
/// index for non-empty words and `0` for an empty one.
pub fn orp_index(word: &str) -> usize {
    let total_chars = word.chars().count();
    if total_chars == 0 {
        return 0;
    }

    let leading_punct = word.chars().take_while(|&c| !is_word_char(c)).count();
    let effective_len = total_chars - leading_punct;

    (leading_punct + orp_offset(effective_len)).min(total_chars - 1)
}

/// Offset into the word body for a body of `effective_len` characters.
pub fn orp_offset(effective_len: usize) -> usize {
    match effective_len {
        0 | 1 => 0,
        2..=5 => 1,
        6..=9 => 2,
        10..=13 => 3,
        _ => 4,
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// A word split around its ORP letter for display.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OrpSplit<'a> {
    pub before: &'a str,
    pub pivot: &'a str,
    pub after: &'a str,
}

impl<'a> OrpSplit<'a> {
    pub fn new(word: &'a str) -> Self {
        let target = orp_index(word);
        let Some((start, pivot)) = word.char_indices().nth(target) else {
            return Self {
                before: word,
                pivot: "",
                after: "",
            };
        };
        let end = start + pivot.len_utf8();

        Self {
            before: &word[..start],
            pivot: &word[start..end],
            after: &word[end..],
        }
    }

    /// Characters printed before the pivot, used to center the pivot column.
    pub fn pivot_column(&self) -> usize {
        self.before.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_words_follow_threshold_table() {
        assert_eq!(orp_index("a"), 0);
        assert_eq!(orp_index("the"), 1);
        assert_eq!(orp_index("reading"), 2);
        assert_eq!(orp_index("internationally"), 4);
        assert_eq!(orp_index("\"hello"), 2);
    }

    #[test]
    fn threshold_boundaries() {
        assert_eq!(orp_index("hello"), 1);
        assert_eq!(orp_index("harbor"), 2);
        assert_eq!(orp_index("something"), 2);
        assert_eq!(orp_index("absolutely"), 3);
        assert_eq!(orp_index("extraordinary"), 3);
        assert_eq!(orp_index("extraordinarys"), 4);
    }

    #[test]
    fn result_is_always_a_valid_index() {
        for word in ["", "?", "...", "(a", "\"'", "x", "—", "((((((((((((((((a", "ñandú", "it's"] {
            let index = orp_index(word);
            let len = word.chars().count();
            if len == 0 {
                assert_eq!(index, 0);
            } else {
                assert!(index < len, "{word:?} -> {index}");
            }
        }
    }

    #[test]
    fn punctuation_only_words_clamp_to_last_char() {
        assert_eq!(orp_index("..."), 2);
        assert_eq!(orp_index("(("), 1);
    }

    #[test]
    fn trailing_punctuation_counts_toward_length() {
        // "fast!" has effective length 5, "fast!!" has 6.
        assert_eq!(orp_index("fast!"), 1);
        assert_eq!(orp_index("fast!!"), 2);
    }

    #[test]
    fn split_surrounds_pivot() {
        let split = OrpSplit::new("\"hello");
        assert_eq!(split.before, "\"h");
        assert_eq!(split.pivot, "e");
        assert_eq!(split.after, "llo");
        assert_eq!(split.pivot_column(), 2);
    }

    #[test]
    fn split_handles_multibyte_letters() {
        let split = OrpSplit::new("café");
        assert_eq!(split.before, "c");
        assert_eq!(split.pivot, "a");
        assert_eq!(split.after, "fé");

        let split = OrpSplit::new("é");
        assert_eq!(split.pivot, "é");
    }

    #[test]
    fn split_of_empty_word_is_empty() {
        let split = OrpSplit::new("");
        assert_eq!(split.before, "");
        assert_eq!(split.pivot, "");
        assert_eq!(split.after, "");
    }
}
