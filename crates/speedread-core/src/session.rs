//! Reader session: one controller tying the playback engine to document loads,
//! statistics and page preview results that arrive asynchronously.
//!
//! Every load is tagged with a [`SessionId`]. Collaborator results carry the id
//! they were requested for, and anything tagged with a superseded id is dropped.

use core::fmt;

use log::{debug, info};

use crate::{
    app::{PlaybackEngine, PlaybackEvent, ReaderConfig, TickResult},
    content::Document,
    error::{ExtractionError, LoadError, PlaybackError},
    input::ReaderCommand,
    orp::OrpSplit,
    preview::{FragmentIndex, PageText, WordLocation},
    render::{ReaderView, Theme},
    settings::PersistedSettings,
    stats::DocumentStats,
};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SessionId(u64);

impl SessionId {
    pub const fn get(self) -> u64 {
        self.0
    }

    const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handed out by [`ReaderSession::begin_load`]; redeemed with the extraction result.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[must_use]
pub struct LoadTicket {
    session: SessionId,
}

impl LoadTicket {
    pub const fn session(self) -> SessionId {
        self.session
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoadOutcome {
    Loaded {
        session: SessionId,
        word_count: usize,
    },
    /// A newer load was started before this one completed; nothing changed.
    Stale { session: SessionId },
}

/// Page fragments produced for a given session.
#[derive(Clone, Debug, PartialEq)]
pub struct PreviewDelivery {
    pub session: SessionId,
    pub pages: Vec<PageText>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PreviewOutcome {
    Accepted { pages: usize, mapped_words: usize },
    Stale,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CommandOutcome {
    Playback(PlaybackEvent),
    ThemeChanged(Theme),
    Quit,
}

pub struct ReaderSession {
    engine: PlaybackEngine,
    theme: Theme,
    latest: SessionId,
    loaded: Option<SessionId>,
    stats: Option<DocumentStats>,
    preview: Option<FragmentIndex>,
}

impl ReaderSession {
    pub fn new(config: ReaderConfig) -> Self {
        Self {
            engine: PlaybackEngine::new(config),
            theme: Theme::default(),
            latest: SessionId::default(),
            loaded: None,
            stats: None,
            preview: None,
        }
    }

    pub fn with_settings(config: ReaderConfig, settings: PersistedSettings) -> Self {
        let mut session = Self::new(config);
        session.apply_settings(settings);
        session
    }

    /// Start a new load. Results for any earlier ticket become stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest = self.latest.next();
        debug!("session: begin load {}", self.latest);
        LoadTicket {
            session: self.latest,
        }
    }

    /// Finish the load started by `ticket` with the extraction result.
    ///
    /// Failures leave the previously loaded document untouched.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        extracted: Result<String, ExtractionError>,
    ) -> Result<LoadOutcome, LoadError> {
        if ticket.session != self.latest {
            debug!(
                "session: discard stale load {} (latest {})",
                ticket.session, self.latest
            );
            return Ok(LoadOutcome::Stale {
                session: ticket.session,
            });
        }

        let document = Document::from_text(extracted?)?;
        let stats = DocumentStats::for_document(&document);
        let word_count = document.len();

        self.engine.load(document);
        self.loaded = Some(ticket.session);
        self.stats = Some(stats);
        self.preview = None;
        info!(
            "session: loaded {} words={} unique={} sentences={}",
            ticket.session,
            word_count,
            self.stats.as_ref().map_or(0, |s| s.unique_words),
            self.stats.as_ref().map_or(0, |s| s.sentence_count)
        );

        Ok(LoadOutcome::Loaded {
            session: ticket.session,
            word_count,
        })
    }

    /// Load already-extracted text in one step.
    pub fn load_text(&mut self, text: impl Into<String>) -> Result<LoadOutcome, LoadError> {
        let ticket = self.begin_load();
        self.complete_load(ticket, Ok(text.into()))
    }

    /// Install page fragments for the loaded document.
    ///
    /// Deliveries for any other session are dropped without error.
    pub fn accept_preview(&mut self, delivery: PreviewDelivery) -> PreviewOutcome {
        if self.loaded != Some(delivery.session) {
            debug!(
                "session: discard stale preview {} (loaded {:?})",
                delivery.session,
                self.loaded.map(SessionId::get)
            );
            return PreviewOutcome::Stale;
        }

        let index = FragmentIndex::new(delivery.pages);
        let outcome = PreviewOutcome::Accepted {
            pages: index.page_count(),
            mapped_words: index.mapped_words(),
        };
        if index.mapped_words() < self.engine.word_count() {
            debug!(
                "session: preview maps {} of {} words",
                index.mapped_words(),
                self.engine.word_count()
            );
        }
        self.preview = Some(index);
        outcome
    }

    pub fn tick(&mut self, now_ms: u64) -> TickResult {
        self.engine.tick(now_ms)
    }

    pub fn apply_command(
        &mut self,
        command: ReaderCommand,
        now_ms: u64,
    ) -> Result<CommandOutcome, PlaybackError> {
        let event = match command {
            ReaderCommand::TogglePlay => self.engine.toggle(now_ms)?,
            ReaderCommand::Play => self.engine.play(now_ms)?,
            ReaderCommand::Pause => self.engine.pause()?,
            ReaderCommand::Faster => self.engine.adjust_wpm(true, now_ms)?,
            ReaderCommand::Slower => self.engine.adjust_wpm(false, now_ms)?,
            ReaderCommand::SetWpm(wpm) => self.engine.set_wpm(wpm, now_ms)?,
            ReaderCommand::Seek(index) => self.engine.seek(index)?,
            ReaderCommand::Jump(input) => self.engine.jump_to_input(&input)?,
            ReaderCommand::Highlight(color) => self.engine.set_highlight(color),
            ReaderCommand::ToggleTheme => {
                self.theme = self.theme.toggled();
                return Ok(CommandOutcome::ThemeChanged(self.theme));
            }
            ReaderCommand::Quit => return Ok(CommandOutcome::Quit),
        };

        Ok(CommandOutcome::Playback(event))
    }

    pub fn engine(&self) -> &PlaybackEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut PlaybackEngine {
        &mut self.engine
    }

    /// Session of the document currently in the engine.
    pub fn loaded_session(&self) -> Option<SessionId> {
        self.loaded
    }

    pub fn stats(&self) -> Option<&DocumentStats> {
        self.stats.as_ref()
    }

    pub fn preview(&self) -> Option<&FragmentIndex> {
        self.preview.as_ref()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Preview position of the current word; `None` means skip the highlight.
    pub fn current_location(&self) -> Option<WordLocation> {
        let index = self.engine.index()?;
        self.preview.as_ref()?.locate(index)
    }

    pub fn view(&self) -> ReaderView<'_> {
        let word = self
            .engine
            .current_word()
            .map(|token| OrpSplit::new(token.as_str()));

        ReaderView {
            status: self.engine.status(),
            word,
            position: self.engine.index().map_or(0, |index| index + 1),
            total: self.engine.word_count(),
            wpm: self.engine.wpm(),
            highlight: self.engine.highlight(),
            theme: self.theme,
            stats: self.stats.as_ref(),
            location: self.current_location(),
        }
    }

    pub fn persisted_settings(&self) -> PersistedSettings {
        PersistedSettings::new(self.engine.wpm(), self.engine.highlight(), self.theme)
    }

    pub fn apply_settings(&mut self, settings: PersistedSettings) {
        self.engine
            .restore_preferences(settings.wpm, settings.highlight);
        self.theme = settings.theme;
    }
}
