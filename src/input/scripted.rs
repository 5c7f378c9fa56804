use std::collections::VecDeque;

use crate::input::command::{Command, InputSource};

/// Replays one key per cycle from a script such as `"..dd.a q"`.
///
/// `.` means no key for that cycle. Once the script is exhausted every poll returns
/// [`Command::None`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    pending: VecDeque<Command>,
}

impl ScriptedInput {
    /// Parse a key script.
    pub fn parse(script: &str) -> Self {
        Self {
            pending: script
                .chars()
                .map(|c| match c {
                    '.' => Command::None,
                    c => Command::from_char(c),
                })
                .collect(),
        }
    }

    /// Build from explicit commands.
    pub fn from_commands(commands: impl IntoIterator<Item = Command>) -> Self {
        Self {
            pending: commands.into_iter().collect(),
        }
    }

    /// Commands not yet polled.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll_command(&mut self) -> Command {
        self.pending.pop_front().unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/input/scripted.rs"]
mod tests;
