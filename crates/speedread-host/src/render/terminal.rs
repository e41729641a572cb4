use std::io::{self, Write};

use crossterm::{
    cursor::MoveToColumn,
    queue,
    style::{Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use speedread_core::{
    app::PlaybackStatus,
    orp::OrpSplit,
    render::ReaderView,
    stats::DocumentStats,
    text_policy::{stats_rows, word_progress_label},
};

use super::palette::palette_for;

/// Horizontal position of the pivot letter, in percent of the line width.
pub const ORP_ANCHOR_PERCENT: usize = 42;

const FALLBACK_WIDTH: u16 = 80;
const WORD_FIELD_PERCENT: usize = 60;

/// Column where a word must start so its pivot lands on the anchor column.
pub fn word_start_column(split: &OrpSplit<'_>, field_width: usize) -> usize {
    let anchor = field_width * ORP_ANCHOR_PERCENT / 100;
    anchor.saturating_sub(split.pivot_column())
}

/// Redraws one status line in place: the word with its pivot anchored, then
/// progress, pace and preview page.
pub struct TerminalRenderer<W: Write> {
    out: W,
    width: Option<u16>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, width: None }
    }

    /// Fixed line width instead of querying the terminal.
    pub fn with_width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line_width(&self) -> usize {
        let width = self
            .width
            .or_else(|| terminal::size().ok().map(|(cols, _)| cols))
            .unwrap_or(FALLBACK_WIDTH);
        usize::from(width.max(20))
    }

    pub fn draw(&mut self, view: &ReaderView<'_>) -> io::Result<()> {
        let palette = palette_for(view.theme, view.highlight);
        let field = self.line_width() * WORD_FIELD_PERCENT / 100;

        queue!(self.out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;

        let mut used = 0usize;
        if let Some(split) = view.word.as_ref() {
            let start = word_start_column(split, field);
            queue!(
                self.out,
                Print(" ".repeat(start)),
                SetForegroundColor(palette.text),
                Print(split.before),
                SetForegroundColor(palette.pivot),
                Print(split.pivot),
                SetForegroundColor(palette.text),
                Print(split.after),
            )?;
            used = start
                + split.before.chars().count()
                + split.pivot.chars().count()
                + split.after.chars().count();
        }

        let pad = field.saturating_sub(used).max(1);
        queue!(
            self.out,
            Print(" ".repeat(pad)),
            SetForegroundColor(palette.muted),
            Print(status_tail(view)),
            ResetColor,
        )?;
        self.out.flush()
    }

    /// Statistics panel, one metric per line.
    pub fn print_stats(&mut self, stats: &DocumentStats) -> io::Result<()> {
        queue!(self.out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
        for (label, value) in stats_rows(stats) {
            queue!(self.out, Print(format!("{label:<20}{value}\r\n")))?;
        }
        self.out.flush()
    }

    pub fn finish(&mut self) -> io::Result<()> {
        queue!(self.out, ResetColor, Print("\r\n"))?;
        self.out.flush()
    }
}

fn status_tail(view: &ReaderView<'_>) -> String {
    let mut tail = if view.total == 0 {
        "no document".to_owned()
    } else {
        word_progress_label(view.position, view.total)
    };

    tail.push_str(&format!(" · {} wpm", view.wpm));
    if let Some(location) = view.location {
        tail.push_str(&format!(" · page {}", location.page_number));
    }
    tail.push_str(match view.status {
        PlaybackStatus::Playing => " · playing",
        PlaybackStatus::Paused => " · paused",
        PlaybackStatus::Stopped => "",
    });
    tail
}

#[cfg(test)]
mod tests {
    use speedread_core::render::{HighlightColor, Theme};

    use super::*;

    fn view<'a>(word: &'a str, status: PlaybackStatus) -> ReaderView<'a> {
        ReaderView {
            status,
            word: Some(OrpSplit::new(word)),
            position: 3,
            total: 12_000,
            wpm: 300,
            highlight: HighlightColor::Green,
            theme: Theme::Dark,
            stats: None,
            location: None,
        }
    }

    #[test]
    fn pivot_lands_on_anchor_column() {
        let field = 100;
        let anchor = field * ORP_ANCHOR_PERCENT / 100;
        for word in ["a", "the", "reading", "internationally"] {
            let split = OrpSplit::new(word);
            assert_eq!(word_start_column(&split, field) + split.pivot_column(), anchor);
        }
    }

    #[test]
    fn frame_shows_word_progress_and_pace() {
        let mut renderer = TerminalRenderer::new(Vec::new()).with_width(80);
        renderer
            .draw(&view("reading", PlaybackStatus::Playing))
            .unwrap();
        let out = String::from_utf8(renderer.into_inner()).unwrap();

        assert!(out.contains("re"));
        assert!(out.contains("ding"));
        assert!(out.contains("Word 3 of 12,000 · 300 wpm · playing"));
    }

    #[test]
    fn stopped_view_without_document() {
        let empty = ReaderView {
            word: None,
            position: 0,
            total: 0,
            ..view("x", PlaybackStatus::Stopped)
        };
        assert_eq!(status_tail(&empty), "no document · 300 wpm");
    }

    #[test]
    fn stats_panel_lists_every_row() {
        let doc = speedread_core::Document::from_text("One two. Three!").unwrap();
        let stats = DocumentStats::for_document(&doc);
        let mut renderer = TerminalRenderer::new(Vec::new());
        renderer.print_stats(&stats).unwrap();
        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(out.contains("Total Words"));
        assert!(out.contains("Reading Level"));
    }
}
