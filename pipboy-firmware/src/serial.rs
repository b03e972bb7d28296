//! Control pad serial input
//!
//! Fail-closed: the first read error drops the port for the rest of the
//! process. There is no reconnect; the keyboard keeps working.

use core::fmt::Debug;

use pipboy_hal::{UartRx, UartTx};
use pipboy_protocol::encode_gauge_mode;
use tracing::{info, warn};

/// Bytes drained from the port per read call
const READ_CHUNK: usize = 64;

/// Serial input that disables itself on failure
pub struct SerialInput<U> {
    uart: Option<U>,
}

impl<U> SerialInput<U> {
    pub fn new(uart: U) -> Self {
        Self { uart: Some(uart) }
    }

    /// Input that never produces anything (serial disabled or failed to open)
    pub fn disabled() -> Self {
        Self { uart: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.uart.is_some()
    }

    /// Release the port
    pub fn close(&mut self) {
        if self.uart.take().is_some() {
            info!("serial port closed");
        }
    }
}

impl<U> SerialInput<U>
where
    U: UartRx,
    U::Error: Debug,
{
    /// Hand every byte that has already arrived to `sink`
    ///
    /// Never blocks. Any read error is logged and disables the input.
    pub fn poll(&mut self, mut sink: impl FnMut(u8)) {
        let Some(uart) = self.uart.as_mut() else {
            return;
        };
        let mut buf = [0u8; READ_CHUNK];
        let result = loop {
            match uart.bytes_waiting() {
                Ok(0) => break Ok(()),
                Ok(_) => {}
                Err(e) => break Err(e),
            }
            match uart.read_available(&mut buf) {
                Ok(0) => break Ok(()),
                Ok(n) => buf[..n].iter().for_each(|&b| sink(b)),
                Err(e) => break Err(e),
            }
        };
        if let Err(e) = result {
            warn!("serial read failed, disabling serial input: {:?}", e);
            self.uart = None;
        }
    }
}

impl<U> SerialInput<U>
where
    U: UartTx,
    U::Error: Debug,
{
    /// Best-effort startup write of the pad's gauge mode
    pub fn send_gauge_mode(&mut self, mode: u8) {
        let Some(uart) = self.uart.as_mut() else {
            return;
        };
        let line = encode_gauge_mode(mode);
        let result = uart
            .write_blocking(line.as_bytes())
            .and_then(|_| uart.flush());
        match result {
            Ok(()) => info!("sent gauge mode {}", mode),
            Err(e) => warn!("gauge mode write failed: {:?}", e),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pipboy_hal::UartError;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    /// Scripted UART: each poll returns the next chunk, `None` is an error
    #[derive(Clone, Default)]
    pub(crate) struct ScriptedUart {
        pub chunks: Rc<RefCell<VecDeque<Option<Vec<u8>>>>>,
        pub reads: Rc<RefCell<usize>>,
        pub written: Rc<RefCell<Vec<u8>>>,
        current: Vec<u8>,
    }

    impl ScriptedUart {
        pub fn push(&self, chunk: &[u8]) {
            self.chunks.borrow_mut().push_back(Some(chunk.to_vec()));
        }

        pub fn push_error(&self) {
            self.chunks.borrow_mut().push_back(None);
        }
    }

    impl UartRx for ScriptedUart {
        type Error = UartError;

        fn bytes_waiting(&mut self) -> Result<usize, UartError> {
            *self.reads.borrow_mut() += 1;
            if self.current.is_empty() {
                match self.chunks.borrow_mut().pop_front() {
                    Some(Some(chunk)) => self.current = chunk,
                    Some(None) => return Err(UartError::Disconnected),
                    None => {}
                }
            }
            Ok(self.current.len())
        }

        fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, UartError> {
            let n = buf.len().min(self.current.len());
            buf[..n].copy_from_slice(&self.current[..n]);
            self.current.drain(..n);
            Ok(n)
        }
    }

    impl UartTx for ScriptedUart {
        type Error = UartError;

        fn write_blocking(&mut self, data: &[u8]) -> Result<(), UartError> {
            self.written.borrow_mut().extend_from_slice(data);
            Ok(())
        }

        fn flush(&mut self) -> Result<(), UartError> {
            Ok(())
        }
    }

    fn drain(input: &mut SerialInput<ScriptedUart>) -> Vec<u8> {
        let mut out = Vec::new();
        input.poll(|b| out.push(b));
        out
    }

    #[test]
    fn test_poll_drains_available_bytes() {
        let uart = ScriptedUart::default();
        uart.push(b"select\n");
        let mut input = SerialInput::new(uart.clone());
        assert_eq!(drain(&mut input), b"select\n");
        // nothing queued: a poll returns without blocking
        assert!(drain(&mut input).is_empty());
        assert!(input.is_enabled());
    }

    #[test]
    fn test_read_failure_disables_forever() {
        let uart = ScriptedUart::default();
        uart.push(b"1\n");
        uart.push_error();
        uart.push(b"q\n");
        let mut input = SerialInput::new(uart.clone());

        assert_eq!(drain(&mut input), b"1\n");
        assert!(!input.is_enabled());

        let reads = *uart.reads.borrow();
        assert!(drain(&mut input).is_empty());
        assert!(drain(&mut input).is_empty());
        assert_eq!(*uart.reads.borrow(), reads);
    }

    #[test]
    fn test_gauge_mode_written() {
        let uart = ScriptedUart::default();
        let mut input = SerialInput::new(uart.clone());
        input.send_gauge_mode(2);
        assert_eq!(uart.written.borrow().as_slice(), b"gaugeMode=2\n");
    }

    #[test]
    fn test_disabled_does_nothing() {
        let mut input: SerialInput<ScriptedUart> = SerialInput::disabled();
        assert!(drain(&mut input).is_empty());
        input.send_gauge_mode(2);
        input.close();
        assert!(!input.is_enabled());
    }
}
