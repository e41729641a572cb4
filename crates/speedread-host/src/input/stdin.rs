use std::{
    io::{self, BufRead},
    sync::mpsc::{self, Receiver, TryRecvError},
    thread,
};

use log::{debug, warn};
use speedread_core::input::{CommandProvider, ReaderCommand, UnknownCommand, parse_command};

/// Line-oriented commands read on a background thread.
///
/// End of input is reported once as [`ReaderCommand::Quit`].
pub struct StdinCommands {
    lines: Receiver<String>,
    closed: bool,
}

impl StdinCommands {
    pub fn spawn() -> io::Result<Self> {
        Self::from_reader(io::BufReader::new(io::stdin()))
    }

    pub fn from_reader<R>(reader: R) -> io::Result<Self>
    where
        R: BufRead + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();

        thread::Builder::new()
            .name("speedread-input".into())
            .spawn(move || {
                for line in reader.lines() {
                    let Ok(line) = line else {
                        break;
                    };
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                debug!("input: reader closed");
            })?;

        Ok(Self {
            lines: rx,
            closed: false,
        })
    }
}

impl CommandProvider for StdinCommands {
    type Error = core::convert::Infallible;

    fn poll_command(&mut self) -> Result<Option<ReaderCommand>, Self::Error> {
        loop {
            match self.lines.try_recv() {
                Ok(line) => match parse_command(&line) {
                    Ok(command) => return Ok(Some(command)),
                    Err(UnknownCommand(text)) => warn!("input: unknown command {:?}", text),
                },
                Err(TryRecvError::Empty) => return Ok(None),
                Err(TryRecvError::Disconnected) => {
                    if self.closed {
                        return Ok(None);
                    }
                    self.closed = true;
                    return Ok(Some(ReaderCommand::Quit));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{io::Cursor, time::Duration};

    use super::*;

    fn drain(commands: &mut StdinCommands) -> Vec<ReaderCommand> {
        let mut seen = Vec::new();
        for _ in 0..200 {
            match commands.poll_command().unwrap() {
                Some(ReaderCommand::Quit) => {
                    seen.push(ReaderCommand::Quit);
                    return seen;
                }
                Some(command) => seen.push(command),
                None => thread::sleep(Duration::from_millis(5)),
            }
        }
        seen
    }

    #[test]
    fn lines_become_commands_and_end_of_input_quits() {
        let input = Cursor::new("p\nw 420\nbogus\nj 12\n");
        let mut commands = StdinCommands::from_reader(input).unwrap();

        assert_eq!(
            drain(&mut commands),
            vec![
                ReaderCommand::TogglePlay,
                ReaderCommand::SetWpm(420),
                ReaderCommand::Jump("12".to_owned()),
                ReaderCommand::Quit,
            ]
        );
        assert_eq!(commands.poll_command().unwrap(), None);
    }
}
