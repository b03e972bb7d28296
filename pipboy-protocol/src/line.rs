//! Line framing for the control pad protocol.
//!
//! Bytes accumulate until a `\n` or `\r`. A `\r\n` pair yields one line
//! followed by an empty one, and empty lines are skipped, so both endings
//! work.

use heapless::{String, Vec};

/// Maximum line length in bytes, excluding the terminator
pub const MAX_LINE_LEN: usize = 64;

/// A complete command line
pub type Line = String<MAX_LINE_LEN>;

/// Errors that can occur while framing lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line exceeded [`MAX_LINE_LEN`] and was discarded
    TooLong,
    /// Line was not valid UTF-8
    InvalidUtf8,
}

/// State machine for framing incoming lines
#[derive(Debug, Clone, Default)]
pub struct LineParser {
    buffer: Vec<u8, MAX_LINE_LEN>,
    overflowed: bool,
}

impl LineParser {
    /// Create a new line parser
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            overflowed: false,
        }
    }

    /// Discard any partial line
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.overflowed = false;
    }

    /// Bytes received since the last terminator
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }

    /// Returns true if a partial line is buffered
    pub fn has_partial(&self) -> bool {
        !self.buffer.is_empty() || self.overflowed
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(line))` when a terminator completes a non-empty line,
    /// `Ok(None)` when more bytes are needed, or `Err` when the finished line
    /// had to be thrown away. The buffer is always empty after a terminator.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Line>, LineError> {
        if byte == b'\n' || byte == b'\r' {
            let overflowed = self.overflowed;
            self.overflowed = false;

            if overflowed {
                self.buffer.clear();
                return Err(LineError::TooLong);
            }
            if self.buffer.is_empty() {
                return Ok(None);
            }

            let result = core::str::from_utf8(&self.buffer)
                .map_err(|_| LineError::InvalidUtf8)
                .map(|text| {
                    let mut line = Line::new();
                    // Cannot fail: buffer and line share the same capacity
                    let _ = line.push_str(text);
                    line
                });
            self.buffer.clear();
            return result.map(Some);
        }

        if !self.overflowed && self.buffer.push(byte).is_err() {
            // Drop the rest of this line up to its terminator
            self.buffer.clear();
            self.overflowed = true;
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn feed_all(parser: &mut LineParser, bytes: &[u8]) -> Vec<Result<Line, LineError>, 16> {
        let mut out = Vec::new();
        for &b in bytes {
            match parser.feed(b) {
                Ok(Some(line)) => {
                    let _ = out.push(Ok(line));
                }
                Ok(None) => {}
                Err(e) => {
                    let _ = out.push(Err(e));
                }
            }
        }
        out
    }

    #[test]
    fn test_newline_terminated() {
        let mut parser = LineParser::new();
        let lines = feed_all(&mut parser, b"select\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].as_ref().unwrap().as_str(), "select");
        assert!(parser.pending().is_empty());
    }

    #[test]
    fn test_crlf_yields_single_line() {
        let mut parser = LineParser::new();
        let lines = feed_all(&mut parser, b"lighton\r\nq\r\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].as_ref().unwrap().as_str(), "lighton");
        assert_eq!(lines[1].as_ref().unwrap().as_str(), "q");
    }

    #[test]
    fn test_split_across_feeds() {
        let mut parser = LineParser::new();
        assert!(feed_all(&mut parser, b"curs").is_empty());
        assert_eq!(parser.pending(), b"curs");
        let lines = feed_all(&mut parser, b"orup\r");
        assert_eq!(lines[0].as_ref().unwrap().as_str(), "cursorup");
    }

    #[test]
    fn test_overlong_line_discarded_until_terminator() {
        let mut parser = LineParser::new();
        for _ in 0..MAX_LINE_LEN + 10 {
            assert_eq!(parser.feed(b'x'), Ok(None));
        }
        assert!(parser.has_partial());
        assert_eq!(parser.feed(b'\n'), Err(LineError::TooLong));
        assert!(!parser.has_partial());

        // Next line parses normally
        let lines = feed_all(&mut parser, b"2\n");
        assert_eq!(lines[0].as_ref().unwrap().as_str(), "2");
    }

    #[test]
    fn test_invalid_utf8_cleared() {
        let mut parser = LineParser::new();
        parser.feed(0xFF).unwrap();
        assert_eq!(parser.feed(b'\n'), Err(LineError::InvalidUtf8));
        assert!(parser.pending().is_empty());
    }

    proptest! {
        #[test]
        fn prop_no_terminator_only_accumulates(
            bytes in proptest::collection::vec(
                any::<u8>().prop_filter("no terminators", |b| *b != b'\n' && *b != b'\r'),
                0..MAX_LINE_LEN,
            )
        ) {
            let mut parser = LineParser::new();
            for &b in &bytes {
                prop_assert_eq!(parser.feed(b), Ok(None));
            }
            prop_assert_eq!(parser.pending(), bytes.as_slice());
        }
    }
}
