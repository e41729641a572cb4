impl PlaybackEngine {
    /// Start the word timer. Playing again keeps the running timer.
    pub fn play(&mut self, now_ms: u64) -> Result<PlaybackEvent, PlaybackError> {
        let interval_ms = self.interval_ms();
        let id = self.next_timer_id;
        let loaded = self.loaded_mut()?;

        if loaded.timer.is_some() {
            return Ok(PlaybackEvent::Unchanged);
        }

        let timer = TimerHandle {
            id,
            interval_ms,
            next_due_ms: now_ms + interval_ms as u64,
        };
        loaded.timer = Some(timer);
        self.next_timer_id += 1;
        debug!(
            "playback: play index={} timer id={} interval_ms={}",
            self.index().unwrap_or(0),
            timer.id,
            timer.interval_ms
        );

        Ok(PlaybackEvent::Started { timer })
    }

    /// Cancel the word timer. Pausing while paused is a no-op.
    pub fn pause(&mut self) -> Result<PlaybackEvent, PlaybackError> {
        let loaded = self.loaded_mut()?;

        match loaded.timer.take() {
            Some(timer) => {
                debug!(
                    "playback: pause index={} timer id={}",
                    loaded.index, timer.id
                );
                Ok(PlaybackEvent::Paused {
                    index: loaded.index,
                })
            }
            None => Ok(PlaybackEvent::Unchanged),
        }
    }

    /// Single play/pause control.
    pub fn toggle(&mut self, now_ms: u64) -> Result<PlaybackEvent, PlaybackError> {
        if self.is_playing() {
            self.pause()
        } else {
            self.play(now_ms)
        }
    }

    /// Fire every timer deadline that has passed by `now_ms`.
    pub fn tick(&mut self, now_ms: u64) -> TickResult {
        let Some(loaded) = self.loaded.as_mut() else {
            return TickResult::Idle;
        };

        let mut steps = 0usize;
        while let Some(timer) = loaded.timer {
            if now_ms < timer.next_due_ms {
                break;
            }

            if loaded.index >= loaded.document.last_index() {
                loaded.timer = None;
                self.words_since_drain = self.words_since_drain.saturating_add(steps as u32);
                debug!(
                    "playback: end of document index={} timer id={}",
                    loaded.index, timer.id
                );
                return TickResult::Finished {
                    index: loaded.index,
                };
            }

            loaded.index += 1;
            loaded.timer = Some(TimerHandle {
                next_due_ms: timer.next_due_ms + timer.interval_ms as u64,
                ..timer
            });
            steps += 1;
        }

        if steps == 0 {
            return TickResult::Idle;
        }

        self.words_since_drain = self.words_since_drain.saturating_add(steps as u32);
        TickResult::Advanced {
            index: loaded.index,
            steps,
        }
    }

    /// Set the pace, clamped to the configured range.
    ///
    /// While playing, the running timer is replaced by one at the new interval
    /// starting from `now_ms`; the position is kept.
    pub fn set_wpm(&mut self, wpm: u16, now_ms: u64) -> Result<PlaybackEvent, PlaybackError> {
        let next = wpm.clamp(self.config.min_wpm, self.config.max_wpm);
        let current = self.wpm;
        let loaded = self.loaded_mut()?;

        if next == current {
            return Ok(PlaybackEvent::Unchanged);
        }

        let was_playing = loaded.timer.take().is_some();
        self.wpm = next;
        if was_playing {
            self.play(now_ms)?;
        }
        debug!("playback: wpm={} playing={}", next, was_playing);

        Ok(PlaybackEvent::PaceChanged { wpm: next })
    }

    /// Step the pace by [`WPM_STEP`].
    pub fn adjust_wpm(
        &mut self,
        increase: bool,
        now_ms: u64,
    ) -> Result<PlaybackEvent, PlaybackError> {
        let next = if increase {
            self.wpm.saturating_add(WPM_STEP)
        } else {
            self.wpm.saturating_sub(WPM_STEP)
        };
        self.set_wpm(next, now_ms)
    }

    /// Change the ORP color. Allowed without a document; it is a preference.
    pub fn set_highlight(&mut self, color: HighlightColor) -> PlaybackEvent {
        if color == self.highlight {
            return PlaybackEvent::Unchanged;
        }
        self.highlight = color;
        PlaybackEvent::HighlightChanged { color }
    }

    /// Restore preferences without touching the current document.
    pub fn restore_preferences(&mut self, wpm: u16, highlight: HighlightColor) {
        self.wpm = wpm.clamp(self.config.min_wpm, self.config.max_wpm);
        self.highlight = highlight;
    }
}
