//! puzzlecom library
//!
//! Sends the contents of a puzzle file over a serial connection to an
//! external solver device, waits for the `stop`-delimited response, and
//! returns it with the sentinel stripped.
//!
//! # Modules
//!
//! - `cli`: Command-line argument definition and settings resolution
//! - `config`: Configuration management with TOML support
//! - `error`: Unified error handling
//! - `port`: Port abstraction layer for serial communication
//! - `transfer`: The payload/response exchange itself

pub mod cli;
pub mod config;
pub mod error;
pub mod port;
pub mod transfer;

// Re-export commonly used types for convenience
pub use cli::{Args, Settings};
pub use config::{Config, ConfigError, ConfigLoader, ConfigResult};
pub use error::{AppError, AppResult};
pub use port::{MockSerialPort, PortError, SerialPortAdapter, SyncSerialPort};
pub use transfer::STOP_FRAME;
