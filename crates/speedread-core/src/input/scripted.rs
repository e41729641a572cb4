use std::collections::VecDeque;

use super::{CommandProvider, ReaderCommand};

/// Replays a fixed list of commands, one per poll.
#[derive(Debug, Default, Clone)]
pub struct ScriptedCommands {
    queue: VecDeque<ReaderCommand>,
}

impl ScriptedCommands {
    pub fn new(commands: impl IntoIterator<Item = ReaderCommand>) -> Self {
        Self {
            queue: commands.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl CommandProvider for ScriptedCommands {
    type Error = core::convert::Infallible;

    fn poll_command(&mut self) -> Result<Option<ReaderCommand>, Self::Error> {
        Ok(self.queue.pop_front())
    }
}
