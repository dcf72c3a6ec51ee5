//! Configuration module for puzzlecom.
//!
//! TOML-based configuration with environment variable overrides. The config
//! file only supplies *defaults*; command-line flags always win.
//!
//! # Configuration Resolution
//!
//! Configuration is loaded from the following locations (in order of
//! priority):
//!
//! 1. `PUZZLECOM_CONFIG` environment variable (explicit path)
//! 2. `./puzzlecom.toml` (current directory)
//! 3. `~/.config/puzzlecom/config.toml` (platform config dir)
//! 4. Built-in defaults (no file required)
//!
//! # Environment Overrides
//!
//! Any configuration value can be overridden via environment variables with
//! the pattern `PUZZLECOM_<SECTION>_<KEY>`:
//!
//! - `PUZZLECOM_SERIAL_DEFAULT_PORT=/dev/ttyUSB0`
//! - `PUZZLECOM_SERIAL_DEFAULT_BAUD=9600`
//! - `PUZZLECOM_SERIAL_POLL_TIMEOUT_MS=250`
//! - `PUZZLECOM_LOGGING_FILTER=debug`

mod error;
mod loader;
mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{get_default_config_dir, resolve_config_path, ConfigLoader};
pub use schema::{Config, LoggingConfig, SerialConfig};
