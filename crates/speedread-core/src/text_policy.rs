//! Shared number and label formatting for reader surfaces.

use crate::stats::DocumentStats;

/// `1234567` -> `"1,234,567"`.
pub fn group_thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

/// Fixed one-decimal rendering used by every statistic.
pub fn one_decimal(value: f64) -> String {
    format!("{value:.1}")
}

/// `"Word 3 of 1,200"`; position is 1-based.
pub fn word_progress_label(position: usize, total: usize) -> String {
    format!(
        "Word {} of {}",
        group_thousands(position),
        group_thousands(total)
    )
}

/// Label/value pairs in display order.
pub fn stats_rows(stats: &DocumentStats) -> [(&'static str, String); 6] {
    [
        ("Total Words", group_thousands(stats.total_words)),
        ("Unique Words", group_thousands(stats.unique_words)),
        (
            "Lexical Diversity",
            format!("{}%", one_decimal(stats.lexical_diversity_pct)),
        ),
        ("Avg Word Length", one_decimal(stats.avg_word_length)),
        ("Avg Sentence Length", one_decimal(stats.avg_sentence_length)),
        ("Reading Level", one_decimal(stats.reading_level)),
    ]
}
