//! The transfer runner: the two-phase exchange with the solver device.
//!
//! Phase one writes the puzzle payload followed immediately by the `stop`
//! sentinel, with no separator; the device detects end-of-payload from that
//! exact adjacency. Phase two reads the device's byte stream until the same
//! sentinel appears, then returns the response with the sentinel removed.
//!
//! There is no length prefix and no escaping: a payload or response that
//! legitimately contains `stop` will be truncated early. That is the wire
//! contract of the counterpart device and cannot change unilaterally.

use crate::error::AppError;
use crate::port::SerialPortAdapter;
use memchr::memmem;
use std::path::Path;
use tracing::{debug, trace};

/// Sentinel marker delimiting both directions of a transmission.
pub const STOP_FRAME: &str = "stop";

/// Write the puzzle payload to the port, terminated by the sentinel.
///
/// The payload and sentinel go out back-to-back with no separator byte.
pub fn send_puzzle(port: &mut dyn SerialPortAdapter, payload: &str) -> Result<(), AppError> {
    port.write_all_bytes(payload.as_bytes())?;
    port.write_all_bytes(STOP_FRAME.as_bytes())?;
    port.flush()?;
    debug!(
        port = port.name(),
        payload_bytes = payload.len(),
        "puzzle payload sent"
    );
    Ok(())
}

/// Read from the port until the sentinel appears, returning the response
/// with the sentinel stripped.
///
/// Reads one byte at a time. "No data yet" results (zero-byte reads and
/// timed-out polls) are retried; the port's read timeout does the waiting,
/// so this loop blocks rather than spinning. It is unbounded: without a
/// sentinel it only ends when the port itself fails.
///
/// # Errors
///
/// - `AppError::Port` for any port error other than a timed-out poll
/// - `AppError::InvalidResponse` if the accumulated bytes are not UTF-8
pub fn read_response(port: &mut dyn SerialPortAdapter) -> Result<String, AppError> {
    let sentinel = STOP_FRAME.as_bytes();
    let finder = memmem::Finder::new(sentinel);
    let mut accumulated: Vec<u8> = Vec::new();
    let mut byte = [0u8; 1];

    loop {
        match port.read_bytes(&mut byte) {
            Ok(0) => continue,
            Ok(_) => {
                accumulated.push(byte[0]);
                // Appending one byte can only complete the sentinel at the
                // tail; any earlier occurrence was found on a prior pass.
                let window_start = accumulated.len().saturating_sub(sentinel.len());
                if finder.find(&accumulated[window_start..]).is_some() {
                    accumulated.truncate(window_start);
                    break;
                }
            }
            Err(e) if e.is_would_block() => {
                trace!(port = port.name(), "no data yet, polling again");
                continue;
            }
            Err(e) => return Err(e.into()),
        }
    }

    debug!(
        port = port.name(),
        response_bytes = accumulated.len(),
        "sentinel received, response complete"
    );
    Ok(String::from_utf8(accumulated)?)
}

/// Run the full exchange: send the payload, then wait for the response.
pub fn run(port: &mut dyn SerialPortAdapter, payload: &str) -> Result<String, AppError> {
    send_puzzle(port, payload)?;
    read_response(port)
}

/// Read the puzzle file and run the full exchange over an already-open port.
///
/// The file is read only after the port is open (the caller opened it), and
/// nothing is written until the file read succeeds: an unreadable file must
/// never leave the device with a partial frame.
pub fn run_from_file(
    port: &mut dyn SerialPortAdapter,
    puzzle_file: &Path,
) -> Result<String, AppError> {
    let payload = std::fs::read_to_string(puzzle_file)
        .map_err(|e| AppError::puzzle_file(puzzle_file, e))?;
    run(port, &payload)
}
