//! Input abstraction layer.

mod scripted;

pub use scripted::ScriptedCommands;

use crate::render::HighlightColor;

/// Logical user actions consumed by the reader session.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ReaderCommand {
    TogglePlay,
    Play,
    Pause,
    Faster,
    Slower,
    SetWpm(u16),
    /// Zero-based position, as set by the position slider.
    Seek(usize),
    /// Raw text from the jump-to-word box (1-based word number).
    Jump(String),
    Highlight(HighlightColor),
    ToggleTheme,
    Quit,
}

/// Polled command provider.
pub trait CommandProvider {
    type Error;

    fn poll_command(&mut self) -> Result<Option<ReaderCommand>, Self::Error>;
}

/// Reason a command line could not be parsed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnknownCommand(pub String);

/// Parse one line of the text command grammar.
///
/// `p` or an empty line toggles playback, `+`/`-` step the pace, `w N` sets
/// it, `s N` seeks to a 1-based position, `j N` jumps, `c N` picks a highlight
/// color (0-4), `t` toggles the theme and `q` quits.
pub fn parse_command(line: &str) -> Result<ReaderCommand, UnknownCommand> {
    let line = line.trim();
    let (verb, arg) = match line.split_once(char::is_whitespace) {
        Some((verb, arg)) => (verb, arg.trim()),
        None => (line, ""),
    };
    let unknown = || UnknownCommand(line.to_owned());

    let command = match (verb, arg) {
        ("" | "p" | "play", "") => ReaderCommand::TogglePlay,
        ("pause", "") => ReaderCommand::Pause,
        ("resume", "") => ReaderCommand::Play,
        ("+", "") => ReaderCommand::Faster,
        ("-", "") => ReaderCommand::Slower,
        ("w" | "wpm", value) => ReaderCommand::SetWpm(value.parse().map_err(|_| unknown())?),
        ("s" | "seek", value) => {
            let position: usize = value.parse().map_err(|_| unknown())?;
            ReaderCommand::Seek(position.saturating_sub(1))
        }
        ("j" | "jump", value) => ReaderCommand::Jump(value.to_owned()),
        ("c" | "color", value) => value
            .parse()
            .ok()
            .and_then(HighlightColor::from_index)
            .map(ReaderCommand::Highlight)
            .ok_or_else(unknown)?,
        ("t" | "theme", "") => ReaderCommand::ToggleTheme,
        ("q" | "quit", "") => ReaderCommand::Quit,
        _ => return Err(unknown()),
    };

    Ok(command)
}
