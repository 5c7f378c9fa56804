/// User command polled once per pipeline cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Command {
    /// No key pressed.
    #[default]
    None,
    /// Shorten the delay by one frame.
    DecreaseOffset,
    /// Lengthen the delay by one frame.
    IncreaseOffset,
    /// Freeze or unfreeze the blend source.
    ToggleFreeze,
    /// Stop the pipeline.
    Quit,
}

impl Command {
    /// Map a key code (as reported by a window's key poll) to a command.
    ///
    /// `Esc`/`q` quit, `a` decreases the delay, `d` increases it, space toggles freeze.
    pub fn from_key(key: i32) -> Self {
        match key {
            27 | 113 => Self::Quit,
            97 => Self::DecreaseOffset,
            100 => Self::IncreaseOffset,
            32 => Self::ToggleFreeze,
            _ => Self::None,
        }
    }

    /// Map a character to a command using the same key layout as [`Command::from_key`].
    pub fn from_char(c: char) -> Self {
        u8::try_from(c).map_or(Self::None, |b| Self::from_key(i32::from(b)))
    }
}

/// A supplier of user commands.
pub trait InputSource {
    /// Return the command for this cycle, [`Command::None`] when idle.
    fn poll_command(&mut self) -> Command;
}

/// Input source that never reports a key.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoInput;

impl InputSource for NoInput {
    fn poll_command(&mut self) -> Command {
        Command::None
    }
}

#[cfg(test)]
#[path = "../../tests/unit/input/command.rs"]
mod tests;
