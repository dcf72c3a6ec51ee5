//! Mock serial port implementation for testing.
//!
//! Provides a `MockSerialPort` that simulates the solver device without
//! requiring actual hardware. Reads are scripted: queued bytes, interleaved
//! "no data yet" polls, and a device-gone error once the script runs out so
//! tests of the read-until-sentinel loop stay bounded.

use super::error::PortError;
use super::traits::SerialPortAdapter;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// One scripted read outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadEvent {
    /// Deliver this byte.
    Byte(u8),
    /// Report "no data available yet" (a timed-out poll).
    NoData,
}

/// Inner state of the mock port, protected by a mutex for interior mutability.
#[derive(Debug, Default)]
struct MockPortState {
    /// Scripted sequence of read outcomes.
    read_script: VecDeque<ReadEvent>,
    /// Log of all write calls, in order.
    write_log: Vec<Vec<u8>>,
    /// Cap on bytes accepted per write call (0 = unlimited); simulates
    /// short writes.
    max_write_chunk: usize,
    /// Number of flush calls observed.
    flush_count: usize,
}

/// Mock serial port for tests.
///
/// Reads follow the script built with [`enqueue_read`](Self::enqueue_read)
/// and [`enqueue_no_data`](Self::enqueue_no_data). When the script is
/// exhausted, reads fail with an `UnexpectedEof` I/O error, the same thing a
/// real port reports when the device disappears. Writes are logged for later
/// inspection.
///
/// # Example
/// ```
/// use puzzlecom::port::{MockSerialPort, SerialPortAdapter};
///
/// let mut port = MockSerialPort::new("MOCK0");
/// port.enqueue_read(b"42");
///
/// let mut buffer = [0u8; 8];
/// let n = port.read_bytes(&mut buffer).unwrap();
/// assert_eq!(&buffer[..n], b"42");
///
/// port.write_bytes(b"hello").unwrap();
/// assert_eq!(port.written_bytes(), b"hello");
/// ```
#[derive(Clone)]
pub struct MockSerialPort {
    /// The port name/identifier.
    name: String,
    /// The internal state, shared so clones observe the same script and log.
    state: Arc<Mutex<MockPortState>>,
}

impl MockSerialPort {
    /// Create a new mock serial port with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: Arc::new(Mutex::new(MockPortState::default())),
        }
    }

    /// Limit each write call to accepting at most `chunk` bytes.
    pub fn with_max_write_chunk(self, chunk: usize) -> Self {
        self.state.lock().unwrap().max_write_chunk = chunk;
        self
    }

    /// Append bytes to the read script.
    pub fn enqueue_read(&mut self, data: &[u8]) {
        let mut state = self.state.lock().unwrap();
        state.read_script.extend(data.iter().map(|&b| ReadEvent::Byte(b)));
    }

    /// Append `count` "no data yet" poll results to the read script.
    pub fn enqueue_no_data(&mut self, count: usize) {
        let mut state = self.state.lock().unwrap();
        state
            .read_script
            .extend(std::iter::repeat(ReadEvent::NoData).take(count));
    }

    /// All write calls observed so far, one entry per call.
    pub fn write_log(&self) -> Vec<Vec<u8>> {
        self.state.lock().unwrap().write_log.clone()
    }

    /// All bytes written so far, flattened in order.
    pub fn written_bytes(&self) -> Vec<u8> {
        let state = self.state.lock().unwrap();
        state.write_log.iter().flatten().copied().collect()
    }

    /// Number of flush calls observed so far.
    pub fn flush_count(&self) -> usize {
        self.state.lock().unwrap().flush_count
    }

    /// Number of unread scripted events remaining.
    pub fn remaining_script_len(&self) -> usize {
        self.state.lock().unwrap().read_script.len()
    }
}

impl SerialPortAdapter for MockSerialPort {
    fn write_bytes(&mut self, data: &[u8]) -> Result<usize, PortError> {
        let mut state = self.state.lock().unwrap();

        let accepted = if state.max_write_chunk > 0 {
            data.len().min(state.max_write_chunk)
        } else {
            data.len()
        };
        state.write_log.push(data[..accepted].to_vec());
        Ok(accepted)
    }

    fn read_bytes(&mut self, buffer: &mut [u8]) -> Result<usize, PortError> {
        let mut state = self.state.lock().unwrap();

        if buffer.is_empty() {
            return Ok(0);
        }

        match state.read_script.front() {
            Some(ReadEvent::NoData) => {
                state.read_script.pop_front();
                Err(PortError::Io(std::io::Error::new(
                    std::io::ErrorKind::TimedOut,
                    "no data available",
                )))
            }
            Some(ReadEvent::Byte(_)) => {
                let mut bytes_read = 0;
                for slot in buffer.iter_mut() {
                    match state.read_script.front() {
                        Some(ReadEvent::Byte(b)) => {
                            *slot = *b;
                            state.read_script.pop_front();
                            bytes_read += 1;
                        }
                        // Stop at a NoData boundary or end of script.
                        _ => break,
                    }
                }
                Ok(bytes_read)
            }
            None => Err(PortError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "mock device disconnected",
            ))),
        }
    }

    fn flush(&mut self) -> Result<(), PortError> {
        self.state.lock().unwrap().flush_count += 1;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for MockSerialPort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockSerialPort")
            .field("name", &self.name)
            .field("remaining_script", &self.remaining_script_len())
            .finish()
    }
}
