impl PlaybackEngine {
    pub fn new(mut config: ReaderConfig) -> Self {
        if config.max_wpm < config.min_wpm {
            core::mem::swap(&mut config.max_wpm, &mut config.min_wpm);
        }
        config.min_wpm = config.min_wpm.max(1);
        config.wpm = config.wpm.clamp(config.min_wpm, config.max_wpm);

        Self {
            config,
            wpm: config.wpm,
            highlight: HighlightColor::default(),
            loaded: None,
            next_timer_id: 1,
            words_since_drain: 0,
        }
    }

    /// Replace the current document, cancelling any running timer.
    pub fn load(&mut self, document: Document) -> PlaybackEvent {
        if let Some(previous) = self.loaded.as_ref()
            && let Some(timer) = previous.timer
        {
            debug!("playback: load cancels timer id={}", timer.id);
        }

        let word_count = document.len();
        self.loaded = Some(LoadedDocument {
            document,
            index: 0,
            timer: None,
        });
        debug!("playback: loaded words={}", word_count);

        PlaybackEvent::Loaded { word_count }
    }

    pub fn config(&self) -> ReaderConfig {
        self.config
    }

    pub fn status(&self) -> PlaybackStatus {
        match &self.loaded {
            None => PlaybackStatus::Stopped,
            Some(loaded) if loaded.timer.is_some() => PlaybackStatus::Playing,
            Some(_) => PlaybackStatus::Paused,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.status() == PlaybackStatus::Playing
    }

    pub fn state(&self) -> Option<PlaybackState> {
        self.loaded.as_ref().map(|loaded| PlaybackState {
            index: loaded.index,
            word_count: loaded.document.len(),
            playing: loaded.timer.is_some(),
            wpm: self.wpm,
            highlight: self.highlight,
        })
    }

    pub fn document(&self) -> Option<&Document> {
        self.loaded.as_ref().map(|loaded| &loaded.document)
    }

    pub fn index(&self) -> Option<usize> {
        self.loaded.as_ref().map(|loaded| loaded.index)
    }

    pub fn word_count(&self) -> usize {
        self.loaded.as_ref().map_or(0, |loaded| loaded.document.len())
    }

    pub fn current_word(&self) -> Option<&WordToken> {
        let loaded = self.loaded.as_ref()?;
        loaded.document.word(loaded.index)
    }

    pub fn active_timer(&self) -> Option<TimerHandle> {
        self.loaded.as_ref().and_then(|loaded| loaded.timer)
    }

    pub fn wpm(&self) -> u16 {
        self.wpm
    }

    /// Milliseconds between words at the current pace.
    pub fn interval_ms(&self) -> u32 {
        interval_for(self.wpm)
    }

    pub fn highlight(&self) -> HighlightColor {
        self.highlight
    }

    /// Number of timer-driven advances since the last call.
    pub fn drain_word_updates(&mut self) -> u32 {
        core::mem::take(&mut self.words_since_drain)
    }

    fn loaded_mut(&mut self) -> Result<&mut LoadedDocument, PlaybackError> {
        self.loaded.as_mut().ok_or(PlaybackError::NoDocument)
    }
}

fn interval_for(wpm: u16) -> u32 {
    60_000u32 / wpm.max(1) as u32
}
