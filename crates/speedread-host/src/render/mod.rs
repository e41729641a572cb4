//! Terminal presentation of the reader view.

mod palette;
mod terminal;

pub use palette::{Palette, palette_for};
pub use terminal::{ORP_ANCHOR_PERCENT, TerminalRenderer, word_start_column};
