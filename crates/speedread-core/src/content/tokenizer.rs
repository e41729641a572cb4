use super::WordToken;

/// Split `text` on whitespace runs, keeping attached punctuation verbatim.
pub fn tokenize(text: &str) -> Vec<WordToken> {
    let mut words = Vec::new();
    let mut cursor = 0usize;

    while let Some((word, next_cursor)) = next_word_at(text, cursor) {
        words.push(WordToken {
            text: word.to_owned(),
            index: words.len(),
        });
        cursor = next_cursor;
    }

    words
}

/// Number of words `tokenize` would produce for `text`.
pub fn count_words(text: &str) -> usize {
    let mut count = 0usize;
    let mut cursor = 0usize;

    while let Some((_, next_cursor)) = next_word_at(text, cursor) {
        count += 1;
        cursor = next_cursor;
    }

    count
}

/// Next word starting at byte offset `cursor`, with the offset just past it.
pub fn next_word_at(text: &str, cursor: usize) -> Option<(&str, usize)> {
    let rest = text.get(cursor..)?;
    let start = cursor + rest.find(|c: char| !c.is_whitespace())?;
    let end = text[start..]
        .find(char::is_whitespace)
        .map_or(text.len(), |offset| start + offset);

    Some((&text[start..end], end))
}
