//! Command vocabulary of the control pad
//!
//! The pad sends one word per line. Tab and mode selection come from the
//! rotary switches, `cursor*` from the scroll wheel, the four directions
//! from the joystick, and `volts*` / `temp*` are sensor readings that pages
//! consume verbatim.

use core::fmt::Write;

use heapless::String;

use crate::line::Line;

/// Pointer distance applied for each joystick direction line
pub const MOUSE_STEP: i32 = 10;

/// A recognised control pad command
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Torch switched on (`lighton`)
    TorchOn,
    /// Torch switched off (`lightoff`)
    TorchOff,
    /// Tab switch position, 0-based (`1`..`3`)
    Tab(u8),
    /// Mode switch position, 0-based (`q`,`w`,`e`,`r`,`t`)
    Mode(u8),
    /// Select button (`select`)
    Select,
    /// Scroll wheel up (`cursorup`)
    CursorUp,
    /// Scroll wheel down (`cursordown`)
    CursorDown,
    /// Joystick left (`left`)
    Left,
    /// Joystick right (`right`)
    Right,
    /// Joystick up (`up`)
    Up,
    /// Joystick down (`down`)
    Down,
    /// Battery voltage report, full line (`volts...`)
    Volts(Line),
    /// Temperature report, full line (`temp...`)
    Temp(Line),
}

/// Mode switch letters in switch order
const MODE_KEYS: [&str; 5] = ["q", "w", "e", "r", "t"];

impl Command {
    /// Match a complete line against the vocabulary
    ///
    /// Returns `None` for anything unrecognised.
    pub fn parse(line: &str) -> Option<Self> {
        let cmd = match line {
            "lighton" => Command::TorchOn,
            "lightoff" => Command::TorchOff,
            "1" => Command::Tab(0),
            "2" => Command::Tab(1),
            "3" => Command::Tab(2),
            "select" => Command::Select,
            "cursorup" => Command::CursorUp,
            "cursordown" => Command::CursorDown,
            "left" => Command::Left,
            "right" => Command::Right,
            "up" => Command::Up,
            "down" => Command::Down,
            _ => {
                if let Some(pos) = MODE_KEYS.iter().position(|k| *k == line) {
                    Command::Mode(pos as u8)
                } else if line.starts_with("volts") {
                    Command::Volts(to_line(line)?)
                } else if line.starts_with("temp") {
                    Command::Temp(to_line(line)?)
                } else {
                    return None;
                }
            }
        };
        Some(cmd)
    }

    /// Pointer delta `(dx, dy, scroll)` contributed by this command
    pub fn pointer_delta(&self) -> (i32, i32, i32) {
        match self {
            Command::CursorUp => (0, 0, 1),
            Command::CursorDown => (0, 0, -1),
            Command::Left => (-MOUSE_STEP, 0, 0),
            Command::Right => (MOUSE_STEP, 0, 0),
            Command::Up => (0, MOUSE_STEP, 0),
            Command::Down => (0, -MOUSE_STEP, 0),
            _ => (0, 0, 0),
        }
    }
}

fn to_line(text: &str) -> Option<Line> {
    let mut line = Line::new();
    line.push_str(text).ok()?;
    Some(line)
}

/// Encode the startup gauge-mode request sent to the pad
///
/// The pad drives its analog gauge from the mode number.
pub fn encode_gauge_mode(mode: u8) -> String<16> {
    let mut out = String::new();
    // "gaugeMode=255\n" is 14 bytes, fits
    let _ = writeln!(out, "gaugeMode={}", mode);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_torch() {
        assert_eq!(Command::parse("lighton"), Some(Command::TorchOn));
        assert_eq!(Command::parse("lightoff"), Some(Command::TorchOff));
    }

    #[test]
    fn test_parse_tabs_are_zero_based() {
        assert_eq!(Command::parse("1"), Some(Command::Tab(0)));
        assert_eq!(Command::parse("3"), Some(Command::Tab(2)));
        assert_eq!(Command::parse("4"), None);
        assert_eq!(Command::parse("0"), None);
    }

    #[test]
    fn test_parse_modes() {
        let expected = [("q", 0), ("w", 1), ("e", 2), ("r", 3), ("t", 4)];
        for (key, mode) in expected {
            assert_eq!(Command::parse(key), Some(Command::Mode(mode)));
        }
        assert_eq!(Command::parse("y"), None);
    }

    #[test]
    fn test_passthrough_keeps_full_line() {
        match Command::parse("volts3.71") {
            Some(Command::Volts(line)) => assert_eq!(line.as_str(), "volts3.71"),
            other => panic!("unexpected {:?}", other),
        }
        match Command::parse("temp21") {
            Some(Command::Temp(line)) => assert_eq!(line.as_str(), "temp21"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(Command::parse("temp"), Some(Command::Temp(_))));
    }

    #[test]
    fn test_unknown_and_case_sensitive() {
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("SELECT"), None);
        assert_eq!(Command::parse("select "), None);
        assert_eq!(Command::parse("xvolts"), None);
    }

    #[test]
    fn test_pointer_deltas() {
        assert_eq!(Command::CursorUp.pointer_delta(), (0, 0, 1));
        assert_eq!(Command::CursorDown.pointer_delta(), (0, 0, -1));
        assert_eq!(Command::Left.pointer_delta(), (-MOUSE_STEP, 0, 0));
        assert_eq!(Command::Right.pointer_delta(), (MOUSE_STEP, 0, 0));
        assert_eq!(Command::Up.pointer_delta(), (0, MOUSE_STEP, 0));
        assert_eq!(Command::Down.pointer_delta(), (0, -MOUSE_STEP, 0));
        assert_eq!(Command::Select.pointer_delta(), (0, 0, 0));
    }

    #[test]
    fn test_encode_gauge_mode() {
        assert_eq!(encode_gauge_mode(2).as_str(), "gaugeMode=2\n");
    }
}
