impl PlaybackEngine {
    /// Move to `index`, clamped to the document. Play/pause state is kept.
    pub fn seek(&mut self, index: usize) -> Result<PlaybackEvent, PlaybackError> {
        let loaded = self.loaded_mut()?;
        let target = index.min(loaded.document.last_index());

        if target == loaded.index {
            return Ok(PlaybackEvent::Unchanged);
        }

        loaded.index = target;
        debug!("playback: seek index={}", target);
        Ok(PlaybackEvent::Seeked { index: target })
    }

    /// Move to the 1-based word number `word_number`.
    pub fn jump_to_word(&mut self, word_number: usize) -> Result<PlaybackEvent, PlaybackError> {
        let word_count = self.word_count();
        if self.loaded.is_none() {
            return Err(PlaybackError::NoDocument);
        }

        if word_number == 0 || word_number > word_count {
            return Err(PlaybackError::InvalidSeek {
                input: word_number.to_string(),
                word_count,
            });
        }

        self.seek(word_number - 1)
    }

    /// Parse a typed word number and jump to it.
    pub fn jump_to_input(&mut self, input: &str) -> Result<PlaybackEvent, PlaybackError> {
        if self.loaded.is_none() {
            return Err(PlaybackError::NoDocument);
        }

        match input.trim().parse::<usize>() {
            Ok(word_number) => self.jump_to_word(word_number).map_err(|err| match err {
                PlaybackError::InvalidSeek { word_count, .. } => PlaybackError::InvalidSeek {
                    input: input.to_owned(),
                    word_count,
                },
                other => other,
            }),
            Err(_) => Err(PlaybackError::InvalidSeek {
                input: input.to_owned(),
                word_count: self.word_count(),
            }),
        }
    }
}
