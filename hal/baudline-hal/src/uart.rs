//! UART serial communication abstractions
//!
//! Byte-level traits implemented on top of the bit-level engine. Framing is
//! fixed at 8N1: one start bit, eight data bits LSB first, one stop bit.

/// Bits on the line per character (start + 8 data + stop)
pub const FRAME_BITS: u32 = 10;

/// UART transmitter
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Write data to the UART
    ///
    /// Blocks until all data has been written or an error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Block until the last character has left the line
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// UART receiver
pub trait UartRx {
    /// Error type for receive operations
    type Error;

    /// Read data from the UART
    ///
    /// Blocks until the buffer is filled or an error occurs.
    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Read a single byte from the UART
    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.read_blocking(&mut buf)?;
        Ok(buf[0])
    }
}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self { baudrate: 115200 }
    }
}

impl UartConfig {
    /// Create a configuration for the given baud rate
    pub const fn new(baudrate: u32) -> Self {
        Self { baudrate }
    }

    /// Maximum characters per second at this baud rate
    pub const fn chars_per_second(&self) -> u32 {
        self.baudrate / FRAME_BITS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_baudrate() {
        assert_eq!(UartConfig::default().baudrate, 115200);
    }

    #[test]
    fn test_chars_per_second() {
        assert_eq!(UartConfig::new(9600).chars_per_second(), 960);
        assert_eq!(UartConfig::new(115200).chars_per_second(), 11520);
    }
}
