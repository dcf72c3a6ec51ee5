//! Port abstraction layer for serial communication.
//!
//! Provides the `SerialPortAdapter` trait plus a real implementation backed
//! by the `serialport` crate and a scriptable mock for tests.

pub mod error;
pub mod mock;
pub mod sync_port;
pub mod traits;

pub use error::PortError;
pub use mock::MockSerialPort;
pub use sync_port::SyncSerialPort;
pub use traits::SerialPortAdapter;
