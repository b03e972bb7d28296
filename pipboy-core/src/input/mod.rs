//! Input normalization
//!
//! Two very different sources drive the UI: the control pad's serial lines
//! and the local keyboard/mouse. Both end up as [`Command`]s, which the
//! [`InputNormalizer`] folds into one [`TickInput`] per frame.
//!
//! [`Command`]: pipboy_protocol::Command

pub mod normalizer;

pub use normalizer::{InputNormalizer, TickInput};

use pipboy_protocol::Command;

/// Raw local input event, already decoupled from the terminal/window layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RawInput {
    /// Key pressed
    Key(Key),
    /// Relative mouse movement since the previous motion event
    MouseMotion { dx: i32, dy: i32 },
    /// Any mouse button pressed
    MouseButtonDown,
    /// Window/terminal asked us to quit
    Quit,
}

/// Keys the engine cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    /// Printable character (lower-cased by the input layer)
    Char(char),
    Up,
    Down,
    Enter,
    Escape,
}

impl Key {
    /// Map the key onto the control pad vocabulary
    ///
    /// Escape has no pad equivalent; the normalizer handles it as exit.
    pub fn command(self) -> Option<Command> {
        let cmd = match self {
            Key::Char('1') => Command::Tab(0),
            Key::Char('2') => Command::Tab(1),
            Key::Char('3') => Command::Tab(2),
            Key::Char('q') => Command::Mode(0),
            Key::Char('w') => Command::Mode(1),
            Key::Char('e') => Command::Mode(2),
            Key::Char('r') => Command::Mode(3),
            Key::Char('t') => Command::Mode(4),
            Key::Char('o') => Command::TorchOn,
            Key::Char('p') => Command::TorchOff,
            Key::Up => Command::CursorUp,
            Key::Down => Command::CursorDown,
            Key::Enter => Command::Select,
            Key::Char(_) | Key::Escape => return None,
        };
        Some(cmd)
    }
}
