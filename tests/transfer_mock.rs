//! End-to-end exchange behavior against the mock serial port.
//!
//! These tests pin the wire contract: outbound bytes are exactly
//! `payload + "stop"`, and the response is everything the device sends up
//! to (but not including) its own `stop` sentinel.

use pretty_assertions::assert_eq;
use puzzlecom::port::{MockSerialPort, PortError};
use puzzlecom::{transfer, AppError, STOP_FRAME};

const SAMPLE_PUZZLE: &str = "\
530070000\n\
600195000\n\
098000060\n";

const SAMPLE_SOLUTION: &str = "\
534678912\n\
672195348\n\
198342567\n";

#[test]
fn outbound_bytes_are_payload_then_sentinel_with_no_separator() {
    let mut port = MockSerialPort::new("MOCK0");
    port.enqueue_read(b"okstop");

    transfer::run(&mut port, SAMPLE_PUZZLE).expect("exchange failed");

    let mut expected = SAMPLE_PUZZLE.as_bytes().to_vec();
    expected.extend_from_slice(STOP_FRAME.as_bytes());
    assert_eq!(port.written_bytes(), expected);
}

#[test]
fn full_exchange_returns_solution_without_sentinel() {
    let mut port = MockSerialPort::new("MOCK0");
    let mut device_reply = SAMPLE_SOLUTION.as_bytes().to_vec();
    device_reply.extend_from_slice(STOP_FRAME.as_bytes());
    port.enqueue_read(&device_reply);

    let response = transfer::run(&mut port, SAMPLE_PUZZLE).expect("exchange failed");
    assert_eq!(response, SAMPLE_SOLUTION);
}

#[test]
fn slow_device_with_gaps_still_completes() {
    let mut port = MockSerialPort::new("MOCK0");
    // The solver thinks between characters; every gap is a timed-out poll.
    for chunk in SAMPLE_SOLUTION.as_bytes().chunks(4) {
        port.enqueue_no_data(5);
        port.enqueue_read(chunk);
    }
    port.enqueue_no_data(10);
    port.enqueue_read(STOP_FRAME.as_bytes());

    let response = transfer::run(&mut port, SAMPLE_PUZZLE).expect("exchange failed");
    assert_eq!(response, SAMPLE_SOLUTION);
}

#[test]
fn empty_payload_still_sends_sentinel() {
    let mut port = MockSerialPort::new("MOCK0");
    port.enqueue_read(b"stop");

    let response = transfer::run(&mut port, "").expect("exchange failed");
    assert_eq!(response, "");
    assert_eq!(port.written_bytes(), STOP_FRAME.as_bytes());
}

#[test]
fn response_without_sentinel_is_an_error_not_a_response() {
    let mut port = MockSerialPort::new("MOCK0");
    port.enqueue_read(b"half an answer and then silence");

    // The loop only ends at a sentinel or a port failure; the mock reports
    // the device gone once its script drains, bounding the wait.
    let err = transfer::run(&mut port, SAMPLE_PUZZLE).unwrap_err();
    assert!(matches!(err, AppError::Port(PortError::Io(_))));
}

#[test]
fn all_outbound_bytes_written_before_read_phase() {
    // A drained mock fails reads immediately, so if the runner interleaved
    // reading with writing this would produce a port error with a partial
    // write log; instead every outbound byte must already be there.
    let mut port = MockSerialPort::new("MOCK0");
    let err = transfer::run(&mut port, "abc").unwrap_err();

    assert!(matches!(err, AppError::Port(_)));
    let mut expected = b"abc".to_vec();
    expected.extend_from_slice(STOP_FRAME.as_bytes());
    assert_eq!(port.written_bytes(), expected);
}

#[test]
fn short_writes_do_not_corrupt_framing() {
    let mut port = MockSerialPort::new("MOCK0").with_max_write_chunk(2);
    port.enqueue_read(b"donestop");

    let response = transfer::run(&mut port, "123456789").expect("exchange failed");
    assert_eq!(response, "done");
    assert_eq!(port.written_bytes(), b"123456789stop");
}

#[test]
fn file_backed_exchange_sends_file_contents() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    std::io::Write::write_all(&mut file, SAMPLE_PUZZLE.as_bytes()).expect("write puzzle");

    let mut port = MockSerialPort::new("MOCK0");
    let mut device_reply = SAMPLE_SOLUTION.as_bytes().to_vec();
    device_reply.extend_from_slice(STOP_FRAME.as_bytes());
    port.enqueue_read(&device_reply);

    let response = transfer::run_from_file(&mut port, file.path()).expect("exchange failed");
    assert_eq!(response, SAMPLE_SOLUTION);

    let mut expected = SAMPLE_PUZZLE.as_bytes().to_vec();
    expected.extend_from_slice(STOP_FRAME.as_bytes());
    assert_eq!(port.written_bytes(), expected);
}

#[test]
fn nonexistent_puzzle_file_is_a_file_error_with_no_bytes_written() {
    // The port is already open at this point; the file failure must stop
    // the exchange before a single byte reaches the device.
    let mut port = MockSerialPort::new("MOCK0");

    let err = transfer::run_from_file(&mut port, std::path::Path::new("/nonexistent/grid.txt"))
        .unwrap_err();

    match err {
        AppError::PuzzleFile { path, .. } => {
            assert_eq!(path, std::path::PathBuf::from("/nonexistent/grid.txt"));
        }
        other => panic!("Expected puzzle-file error, got: {:?}", other),
    }
    assert!(port.written_bytes().is_empty());
    assert_eq!(port.flush_count(), 0);
}

#[test]
fn printed_form_is_newline_then_response() {
    // The binary prints the response prefixed by a blank line.
    let mut port = MockSerialPort::new("MOCK0");
    port.enqueue_read(b"42stop");

    let response = transfer::run(&mut port, "6*7").expect("exchange failed");
    assert_eq!(format!("\n{response}"), "\n42");
}

#[test]
fn multibyte_utf8_response_decodes() {
    let mut port = MockSerialPort::new("MOCK0");
    port.enqueue_read("résolu ✓stop".as_bytes());

    let response = transfer::run(&mut port, "p").expect("exchange failed");
    assert_eq!(response, "résolu ✓");
}
