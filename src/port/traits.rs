//! Core trait for serial port abstraction.
//!
//! Defines the `SerialPortAdapter` trait that allows both real serial ports
//! and mock implementations to be used interchangeably by the transfer runner.

use super::error::PortError;

/// Trait for synchronous serial port I/O.
///
/// Abstracts over the operations the transfer runner needs, so tests can
/// substitute a mock for real hardware.
pub trait SerialPortAdapter: Send + std::fmt::Debug {
    /// Write bytes to the serial port.
    ///
    /// Returns the number of bytes actually written, which may be fewer than
    /// requested; use [`write_all_bytes`](Self::write_all_bytes) when the
    /// full buffer must go out.
    fn write_bytes(&mut self, data: &[u8]) -> Result<usize, PortError>;

    /// Read bytes from the serial port into the provided buffer.
    ///
    /// Returns the number of bytes actually read. A return of `Ok(0)` or a
    /// would-block/timeout error both mean "no data available yet".
    fn read_bytes(&mut self, buffer: &mut [u8]) -> Result<usize, PortError>;

    /// Block until all buffered output has been transmitted.
    fn flush(&mut self) -> Result<(), PortError>;

    /// Get the name/path of this serial port.
    fn name(&self) -> &str;

    /// Write the entire buffer, retrying on short writes.
    fn write_all_bytes(&mut self, mut data: &[u8]) -> Result<(), PortError> {
        while !data.is_empty() {
            match self.write_bytes(data) {
                Ok(0) => {
                    return Err(PortError::Io(std::io::Error::new(
                        std::io::ErrorKind::WriteZero,
                        "serial port accepted zero bytes",
                    )))
                }
                Ok(n) => data = &data[n..],
                Err(e) if e.is_would_block() => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::mock::MockSerialPort;
    use super::*;

    #[test]
    fn test_write_all_bytes_single_shot() {
        let mut port = MockSerialPort::new("MOCK0");
        port.write_all_bytes(b"123456789").unwrap();
        assert_eq!(port.written_bytes(), b"123456789");
    }

    #[test]
    fn test_write_all_bytes_short_writes() {
        let mut port = MockSerialPort::new("MOCK0").with_max_write_chunk(3);
        port.write_all_bytes(b"123456789a").unwrap();
        // Four chunks of at most three bytes, flattened in order.
        assert_eq!(port.written_bytes(), b"123456789a");
        assert_eq!(port.write_log().len(), 4);
    }
}
