//! UART serial communication abstractions
//!
//! The control pad streams short ASCII command lines. The render loop drains
//! whatever has arrived once per tick and must never block on the port, so
//! the receive side is poll-based: ask how many bytes are waiting, then read
//! exactly those.

/// Errors reported by a UART implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartError {
    /// Device disappeared (USB adapter unplugged, port closed)
    Disconnected,
    /// Framing error
    Framing,
    /// Receive overrun
    Overrun,
    /// Parity error
    Parity,
    /// Any other I/O failure
    Other,
}

/// UART transmitter
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Write data to the UART
    ///
    /// Blocks until all data has been written or an error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// UART receiver
///
/// Poll-based receiver for use from a fixed-rate loop.
pub trait UartRx {
    /// Error type for receive operations
    type Error;

    /// Number of bytes that can be read right now without blocking
    fn bytes_waiting(&mut self) -> Result<usize, Self::Error>;

    /// Read up to `buf.len()` already-received bytes
    ///
    /// Returns the number of bytes copied, which may be zero.
    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Read a single waiting byte, if there is one
    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        let mut buf = [0u8; 1];
        match self.read_available(&mut buf)? {
            0 => Ok(None),
            _ => Ok(Some(buf[0])),
        }
    }
}

/// Combined UART interface
///
/// For UARTs that provide both TX and RX on a single device.
pub trait Uart: UartTx + UartRx {}

// Blanket implementation
impl<T: UartTx + UartRx> Uart for T {}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baudrate: 9600, // Control pad sketch default
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}
