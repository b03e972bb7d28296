//! termios serial port
//!
//! Opens the device non-blocking and in raw mode. Received bytes are pulled
//! into a small pending buffer by [`UartRx::bytes_waiting`], which keeps the
//! "how much is there" query free of ioctls.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

use nix::libc;
use nix::sys::termios::{self, BaudRate, ControlFlags, SetArg};
use tracing::debug;

use pipboy_hal::uart::{DataBits, Parity, StopBits};
use pipboy_hal::{UartConfig, UartRx, UartTx};

/// Bytes pulled from the kernel per read
const READ_CHUNK: usize = 64;

/// Serial port errors
#[derive(Debug, thiserror::Error)]
pub enum SerialError {
    /// Device node could not be opened
    #[error("failed to open serial device {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// termios configuration was rejected
    #[error("failed to configure serial device: {0}")]
    Configure(#[from] nix::Error),
    /// Baud rate has no termios constant
    #[error("unsupported baud rate {0}")]
    UnsupportedBaud(u32),
    /// Read or write failed
    #[error("serial I/O error: {0}")]
    Io(#[from] io::Error),
    /// Device hung up
    #[error("serial device disconnected")]
    Disconnected,
}

/// Non-blocking termios serial port
pub struct SerialPort {
    file: File,
    path: PathBuf,
    pending: Vec<u8>,
}

impl SerialPort {
    /// Open and configure a serial device
    pub fn open(path: impl AsRef<Path>, config: &UartConfig) -> Result<Self, SerialError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_NOCTTY | libc::O_NONBLOCK)
            .open(&path)
            .map_err(|source| SerialError::Open {
                path: path.clone(),
                source,
            })?;

        let mut attrs = termios::tcgetattr(&file)?;
        termios::cfmakeraw(&mut attrs);
        termios::cfsetspeed(&mut attrs, baud_rate(config.baudrate)?)?;

        attrs.control_flags &= !(ControlFlags::CSIZE
            | ControlFlags::PARENB
            | ControlFlags::PARODD
            | ControlFlags::CSTOPB);
        attrs.control_flags |= ControlFlags::CLOCAL | ControlFlags::CREAD;
        attrs.control_flags |= match config.data_bits {
            DataBits::Seven => ControlFlags::CS7,
            DataBits::Eight => ControlFlags::CS8,
        };
        match config.parity {
            Parity::None => {}
            Parity::Even => attrs.control_flags |= ControlFlags::PARENB,
            Parity::Odd => attrs.control_flags |= ControlFlags::PARENB | ControlFlags::PARODD,
        }
        if config.stop_bits == StopBits::Two {
            attrs.control_flags |= ControlFlags::CSTOPB;
        }

        termios::tcsetattr(&file, SetArg::TCSANOW, &attrs)?;
        termios::tcflush(&file, termios::FlushArg::TCIFLUSH)?;

        debug!("Opened {} at {} baud", path.display(), config.baudrate);

        Ok(Self {
            file,
            path,
            pending: Vec::with_capacity(READ_CHUNK),
        })
    }

    /// Device path this port was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Pull everything the kernel has buffered into `pending`
    fn fill_pending(&mut self) -> Result<(), SerialError> {
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            match self.file.read(&mut chunk) {
                // A tty only reports EOF once the other end has hung up
                Ok(0) => return Err(SerialError::Disconnected),
                Ok(n) => {
                    self.pending.extend_from_slice(&chunk[..n]);
                    if n < READ_CHUNK {
                        return Ok(());
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => return Ok(()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(SerialError::Io(e)),
            }
        }
    }
}

impl UartRx for SerialPort {
    type Error = SerialError;

    fn bytes_waiting(&mut self) -> Result<usize, SerialError> {
        self.fill_pending()?;
        Ok(self.pending.len())
    }

    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, SerialError> {
        if self.pending.is_empty() {
            self.fill_pending()?;
        }
        let n = buf.len().min(self.pending.len());
        buf[..n].copy_from_slice(&self.pending[..n]);
        self.pending.drain(..n);
        Ok(n)
    }
}

impl UartTx for SerialPort {
    type Error = SerialError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), SerialError> {
        let mut remaining = data;
        while !remaining.is_empty() {
            match self.file.write(remaining) {
                Ok(0) => return Err(SerialError::Disconnected),
                Ok(n) => remaining = &remaining[n..],
                Err(e)
                    if matches!(
                        e.kind(),
                        io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
                    ) =>
                {
                    std::thread::yield_now();
                }
                Err(e) => return Err(SerialError::Io(e)),
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SerialError> {
        termios::tcdrain(&self.file)?;
        Ok(())
    }
}

/// Map a numeric baud rate onto its termios constant
fn baud_rate(baud: u32) -> Result<BaudRate, SerialError> {
    let rate = match baud {
        1200 => BaudRate::B1200,
        2400 => BaudRate::B2400,
        4800 => BaudRate::B4800,
        9600 => BaudRate::B9600,
        19200 => BaudRate::B19200,
        38400 => BaudRate::B38400,
        57600 => BaudRate::B57600,
        115200 => BaudRate::B115200,
        230400 => BaudRate::B230400,
        other => return Err(SerialError::UnsupportedBaud(other)),
    };
    Ok(rate)
}
