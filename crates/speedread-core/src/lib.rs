//! Playback and synchronization model for the speedread RSVP reader.
//!
//! Everything in this crate is pure state: no files, sockets or clocks. Hosts
//! feed it extracted text, page fragments, user commands and a millisecond
//! clock, and read back view models.

pub mod app;
pub mod content;
pub mod error;
pub mod input;
pub mod orp;
pub mod preview;
pub mod render;
pub mod session;
pub mod settings;
pub mod stats;
pub mod text_policy;

pub use app::{
    PlaybackEngine, PlaybackEvent, PlaybackState, PlaybackStatus, ReaderConfig, TickResult,
};
pub use content::{Document, WordToken};
pub use error::{ExtractionError, LoadError, PlaybackError};
pub use session::{ReaderSession, SessionId};
