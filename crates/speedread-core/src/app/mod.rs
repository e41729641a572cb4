//! Playback engine: position, play/pause state and pacing for one document.

use log::debug;

use crate::{
    content::{Document, WordToken},
    error::PlaybackError,
    render::HighlightColor,
};

pub const WPM_STEP: u16 = 10;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ReaderConfig {
    pub wpm: u16,
    pub min_wpm: u16,
    pub max_wpm: u16,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            wpm: 300,
            min_wpm: 50,
            max_wpm: 1_000,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PlaybackStatus {
    /// No document loaded.
    Stopped,
    Paused,
    Playing,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickResult {
    Idle,
    /// The timer fired `steps` times and moved the position to `index`.
    Advanced { index: usize, steps: usize },
    /// The timer fired on the last word; playback paused there.
    Finished { index: usize },
}

/// Outcome of a user-triggered operation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PlaybackEvent {
    /// The operation was accepted but changed nothing.
    Unchanged,
    Loaded { word_count: usize },
    Started { timer: TimerHandle },
    Paused { index: usize },
    Seeked { index: usize },
    PaceChanged { wpm: u16 },
    HighlightChanged { color: HighlightColor },
}

/// The single repeating word timer.
///
/// Installing a timer always issues a fresh `id`; a handle that keeps its id
/// is the same timer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TimerHandle {
    pub id: u64,
    pub interval_ms: u32,
    next_due_ms: u64,
}

impl TimerHandle {
    pub const fn next_due_ms(&self) -> u64 {
        self.next_due_ms
    }
}

/// Value snapshot of the playback state of a loaded document.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PlaybackState {
    pub index: usize,
    pub word_count: usize,
    pub playing: bool,
    pub wpm: u16,
    pub highlight: HighlightColor,
}

#[derive(Debug)]
struct LoadedDocument {
    document: Document,
    index: usize,
    timer: Option<TimerHandle>,
}

/// Owns the word position and timer for the current document.
///
/// Pace and highlight color are user preferences: they survive document loads.
#[derive(Debug)]
pub struct PlaybackEngine {
    config: ReaderConfig,
    wpm: u16,
    highlight: HighlightColor,
    loaded: Option<LoadedDocument>,
    next_timer_id: u64,
    words_since_drain: u32,
}

include!("view.rs");
include!("runtime.rs");
include!("navigation.rs");
