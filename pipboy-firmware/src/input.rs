//! Local keyboard and mouse input from the controlling terminal
//!
//! The terminal is put in raw mode with mouse capture for the life of
//! [`TerminalInput`] and restored when it drops. Mouse positions arrive in
//! cells; motion is reported as the difference to the previous position.
//! Output post-processing stays on so log lines still break correctly.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseEvent, MouseEventKind,
};
use crossterm::{execute, terminal};
use nix::sys::termios::{self, OutputFlags, SetArg};
use pipboy_core::input::{Key, RawInput};
use tracing::{debug, warn};

/// Terminal-backed local input
pub struct TerminalInput {
    last_mouse: Option<(u16, u16)>,
}

impl TerminalInput {
    /// Take over the terminal
    ///
    /// Fails if stdin is not a terminal.
    pub fn open() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        if let Err(e) = keep_output_processing() {
            debug!("output post-processing left off: {}", e);
        }
        if let Err(e) = execute!(io::stdout(), EnableMouseCapture) {
            debug!("mouse capture unavailable: {}", e);
        }
        debug!("terminal input enabled");
        Ok(Self { last_mouse: None })
    }

    /// Collect every event already queued, without waiting
    pub fn poll(&mut self) -> Vec<RawInput> {
        let mut out = Vec::new();
        loop {
            match event::poll(Duration::ZERO) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    warn!("terminal poll failed: {}", e);
                    break;
                }
            }
            match event::read() {
                Ok(ev) => out.extend(self.convert(ev)),
                Err(e) => {
                    warn!("terminal read failed: {}", e);
                    break;
                }
            }
        }
        out
    }

    fn convert(&mut self, event: Event) -> Option<RawInput> {
        match event {
            Event::Key(key) => convert_key(key),
            Event::Mouse(mouse) => self.convert_mouse(mouse),
            _ => None,
        }
    }

    fn convert_mouse(&mut self, mouse: MouseEvent) -> Option<RawInput> {
        let pos = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                let previous = self.last_mouse.replace(pos);
                previous.map(|(x, y)| RawInput::MouseMotion {
                    dx: i32::from(pos.0) - i32::from(x),
                    dy: i32::from(pos.1) - i32::from(y),
                })
            }
            MouseEventKind::Down(_) => {
                self.last_mouse = Some(pos);
                Some(RawInput::MouseButtonDown)
            }
            _ => None,
        }
    }
}

impl Drop for TerminalInput {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, DisableMouseCapture);
        let _ = terminal::disable_raw_mode();
        let _ = stdout.flush();
        debug!("terminal restored");
    }
}

/// Raw mode also clears OPOST; put newline translation back so log lines
/// written to the terminal start at column 0
fn keep_output_processing() -> nix::Result<()> {
    let stdin = io::stdin();
    let mut attrs = termios::tcgetattr(&stdin)?;
    attrs.output_flags |= OutputFlags::OPOST | OutputFlags::ONLCR;
    termios::tcsetattr(&stdin, SetArg::TCSANOW, &attrs)
}

/// Map a key press to the local input vocabulary
pub fn convert_key(key: KeyEvent) -> Option<RawInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    // raw mode swallows SIGINT
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(RawInput::Quit);
    }
    let key = match key.code {
        KeyCode::Char(c) => Key::Char(c.to_ascii_lowercase()),
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        _ => return None,
    };
    Some(RawInput::Key(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, MouseButton};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(
            convert_key(press(KeyCode::Char('q'))),
            Some(RawInput::Key(Key::Char('q')))
        );
        assert_eq!(convert_key(press(KeyCode::Enter)), Some(RawInput::Key(Key::Enter)));
        assert_eq!(convert_key(press(KeyCode::Esc)), Some(RawInput::Key(Key::Escape)));
        assert_eq!(convert_key(press(KeyCode::Tab)), None);
        assert_eq!(
            convert_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(RawInput::Quit)
        );
    }

    #[test]
    fn test_key_release_ignored() {
        let release = KeyEvent {
            code: KeyCode::Char('1'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(convert_key(release), None);
    }

    #[test]
    fn test_mouse_motion_deltas() {
        let mut input = TerminalInput { last_mouse: None };
        // first sighting only records the position
        assert_eq!(input.convert(mouse(MouseEventKind::Moved, 10, 5)), None);
        assert_eq!(
            input.convert(mouse(MouseEventKind::Moved, 13, 4)),
            Some(RawInput::MouseMotion { dx: 3, dy: -1 })
        );
        assert_eq!(
            input.convert(mouse(MouseEventKind::Down(MouseButton::Left), 13, 4)),
            Some(RawInput::MouseButtonDown)
        );
        assert_eq!(input.convert(mouse(MouseEventKind::ScrollUp, 13, 4)), None);
        // never took over the terminal, nothing to restore
        std::mem::forget(input);
    }
}
