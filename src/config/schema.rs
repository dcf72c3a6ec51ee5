//! Configuration schema definitions.
//!
//! Defines the structure of the configuration file using serde, with
//! defaults matching the tool's CLI defaults.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Serial port configuration
    pub serial: SerialConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Serial port configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Default device path when `--port` is not given
    pub default_port: String,
    /// Default baud rate when `--baudrate` is not given
    pub default_baud: u32,
    /// Read-poll timeout in milliseconds; each blocking read waits at most
    /// this long before the loop polls again
    pub poll_timeout_ms: u64,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            default_port: "/dev/ttyACM0".to_string(),
            default_baud: 115_200,
            poll_timeout_ms: 100,
        }
    }
}

impl SerialConfig {
    /// Get the poll timeout as a Duration
    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter when neither `RUST_LOG` nor `-v` is given,
    /// e.g. "warn", "info", "puzzlecom=debug"
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}
