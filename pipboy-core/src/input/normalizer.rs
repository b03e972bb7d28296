//! Per-tick input folding
//!
//! Serial bytes are fed first, then the local event queue. Discrete events
//! keep arrival order; pointer movement is summed and appended last as one
//! [`PageEvent::PointerDelta`], and only if it is non-zero.

use pipboy_protocol::{Command, LineError, LineParser};

use super::{Key, RawInput};
use crate::state::{PageEvent, PageEvents, StateRequests};

/// Everything the inputs produced during one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Quit requested (Escape, window close)
    pub exit: bool,
    /// Summed pointer movement `(dx, dy, scroll)`
    pub pointer: (i32, i32, i32),
    /// Page events in arrival order, pointer delta last
    pub events: PageEvents,
    /// Requested tab/mode/torch changes
    pub requests: StateRequests,
    /// Events lost because the per-tick list was full
    pub dropped_events: usize,
}

/// Accumulates one tick's worth of input
#[derive(Debug, Default)]
pub struct InputNormalizer {
    input: TickInput,
}

impl InputNormalizer {
    /// Start a fresh tick
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one serial byte through the line parser
    ///
    /// Completed lines are matched against the pad vocabulary; unknown lines
    /// are dropped silently. Framing errors are returned for logging only.
    pub fn feed_serial(&mut self, parser: &mut LineParser, byte: u8) -> Result<(), LineError> {
        if let Some(line) = parser.feed(byte)? {
            if let Some(cmd) = Command::parse(&line) {
                self.apply_command(cmd);
            }
        }
        Ok(())
    }

    /// Feed one local input event
    pub fn feed_local(&mut self, input: RawInput) {
        match input {
            RawInput::Quit | RawInput::Key(Key::Escape) => self.input.exit = true,
            RawInput::Key(key) => {
                if let Some(cmd) = key.command() {
                    self.apply_command(cmd);
                }
            }
            RawInput::MouseMotion { dx, dy } => self.add_pointer(dx, dy, 0),
            RawInput::MouseButtonDown => self.push_event(PageEvent::Select),
        }
    }

    /// Apply a command from either source
    pub fn apply_command(&mut self, cmd: Command) {
        match cmd {
            Command::TorchOn => self.input.requests.torch = Some(true),
            Command::TorchOff => self.input.requests.torch = Some(false),
            Command::Tab(tab) => self.input.requests.tab = Some(tab as usize),
            Command::Mode(mode) => self.input.requests.mode = Some(mode as usize),
            Command::Select => self.push_event(PageEvent::Select),
            Command::Volts(line) | Command::Temp(line) => {
                self.push_event(PageEvent::RawCommand(line))
            }
            Command::CursorUp
            | Command::CursorDown
            | Command::Left
            | Command::Right
            | Command::Up
            | Command::Down => {
                let (dx, dy, scroll) = cmd.pointer_delta();
                self.add_pointer(dx, dy, scroll);
            }
        }
    }

    /// Returns true if exit has been requested so far this tick
    pub fn exit_requested(&self) -> bool {
        self.input.exit
    }

    /// Close the tick and hand out the result
    pub fn finish(mut self) -> TickInput {
        let (dx, dy, scroll) = self.input.pointer;
        if (dx, dy, scroll) != (0, 0, 0) {
            self.push_event(PageEvent::PointerDelta { dx, dy, scroll });
        }
        self.input
    }

    fn add_pointer(&mut self, dx: i32, dy: i32, scroll: i32) {
        let p = &mut self.input.pointer;
        p.0 = p.0.saturating_add(dx);
        p.1 = p.1.saturating_add(dy);
        p.2 = p.2.saturating_add(scroll);
    }

    fn push_event(&mut self, event: PageEvent) {
        if self.input.events.push(event).is_err() {
            self.input.dropped_events += 1;
        }
    }
}
