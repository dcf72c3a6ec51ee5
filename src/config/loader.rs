//! Configuration loader with file resolution and environment override support.

use super::error::{ConfigError, ConfigResult};
use super::schema::Config;
use std::path::{Path, PathBuf};

/// Config file name looked for in the current directory
const CONFIG_FILE_NAME: &str = "puzzlecom.toml";

/// Config file name inside the per-user config directory
const USER_CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable for an explicit config path
const CONFIG_PATH_ENV: &str = "PUZZLECOM_CONFIG";

/// Configuration loader with resolution and override logic.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Resolved config file path (if any)
    pub config_path: Option<PathBuf>,
    /// The loaded configuration
    pub config: Config,
}

impl ConfigLoader {
    /// Load configuration using standard resolution order.
    ///
    /// Resolution priority (highest to lowest):
    /// 1. `PUZZLECOM_CONFIG` environment variable (explicit path)
    /// 2. `./puzzlecom.toml` (current directory)
    /// 3. `~/.config/puzzlecom/config.toml` (platform config dir)
    /// 4. Built-in defaults (no file required)
    ///
    /// Environment variables override file values in every case.
    pub fn load() -> ConfigResult<Self> {
        let config_path = resolve_config_path();

        let mut config = if let Some(ref path) = config_path {
            load_from_file(path)?
        } else {
            Config::default()
        };

        apply_env_overrides(&mut config)?;

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref().to_path_buf();
        let mut config = load_from_file(&path)?;
        apply_env_overrides(&mut config)?;

        Ok(Self {
            config_path: Some(path),
            config,
        })
    }

    /// Load built-in defaults, skipping file resolution entirely.
    pub fn with_defaults() -> Self {
        Self {
            config_path: None,
            config: Config::default(),
        }
    }
}

/// Resolve the config file path using the standard search order.
///
/// Returns `None` when no config file exists anywhere; that is not an error.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Ok(explicit) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(explicit);
        if path.exists() {
            return Some(path);
        }
    }

    let cwd_config = PathBuf::from(CONFIG_FILE_NAME);
    if cwd_config.exists() {
        return Some(cwd_config);
    }

    if let Some(dir) = get_default_config_dir() {
        let user_config = dir.join(USER_CONFIG_FILE_NAME);
        if user_config.exists() {
            return Some(user_config);
        }
    }

    None
}

/// Get the per-user config directory for this tool, if the platform has one.
pub fn get_default_config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "puzzlecom")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

fn load_from_file(path: &Path) -> ConfigResult<Config> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(toml::from_str(&contents)?)
}

/// Apply `PUZZLECOM_<SECTION>_<KEY>` environment overrides.
fn apply_env_overrides(config: &mut Config) -> ConfigResult<()> {
    apply_overrides_from(config, |var| std::env::var(var).ok())
}

/// Apply overrides from an arbitrary variable lookup.
///
/// Separated from the process environment so the override logic can be
/// tested hermetically.
fn apply_overrides_from<F>(config: &mut Config, lookup: F) -> ConfigResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(port) = lookup("PUZZLECOM_SERIAL_DEFAULT_PORT") {
        config.serial.default_port = port;
    }

    if let Some(baud) = lookup("PUZZLECOM_SERIAL_DEFAULT_BAUD") {
        config.serial.default_baud = baud.parse().map_err(|_| {
            ConfigError::env_parse(
                "PUZZLECOM_SERIAL_DEFAULT_BAUD",
                format!("'{baud}' is not a valid baud rate"),
            )
        })?;
    }

    if let Some(timeout) = lookup("PUZZLECOM_SERIAL_POLL_TIMEOUT_MS") {
        config.serial.poll_timeout_ms = timeout.parse().map_err(|_| {
            ConfigError::env_parse(
                "PUZZLECOM_SERIAL_POLL_TIMEOUT_MS",
                format!("'{timeout}' is not a valid millisecond count"),
            )
        })?;
    }

    if let Some(filter) = lookup("PUZZLECOM_LOGGING_FILTER") {
        config.logging.filter = filter;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        writeln!(
            file,
            r#"
            [serial]
            default_port = "/dev/ttyUSB3"
            default_baud = 57600
            "#
        )
        .expect("Failed to write temp file");

        let loader = ConfigLoader::load_from(file.path()).expect("Failed to load");
        assert_eq!(loader.config.serial.default_port, "/dev/ttyUSB3");
        assert_eq!(loader.config.serial.default_baud, 57_600);
        assert_eq!(loader.config_path.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_load_from_missing_file_is_error() {
        let result = ConfigLoader::load_from("/nonexistent/puzzlecom.toml");
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn test_load_from_invalid_toml_is_error() {
        let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        writeln!(file, "this is not toml [").expect("Failed to write temp file");

        let result = ConfigLoader::load_from(file.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_with_defaults() {
        let loader = ConfigLoader::with_defaults();
        assert!(loader.config_path.is_none());
        assert_eq!(loader.config.serial.default_baud, 115_200);
    }

    #[test]
    fn test_overrides_apply_over_defaults() {
        let vars: std::collections::HashMap<&str, &str> = [
            ("PUZZLECOM_SERIAL_DEFAULT_PORT", "/dev/ttyUSB7"),
            ("PUZZLECOM_SERIAL_DEFAULT_BAUD", "9600"),
            ("PUZZLECOM_SERIAL_POLL_TIMEOUT_MS", "250"),
            ("PUZZLECOM_LOGGING_FILTER", "trace"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        apply_overrides_from(&mut config, |var| vars.get(var).map(|v| v.to_string()))
            .expect("overrides failed");

        assert_eq!(config.serial.default_port, "/dev/ttyUSB7");
        assert_eq!(config.serial.default_baud, 9600);
        assert_eq!(config.serial.poll_timeout_ms, 250);
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn test_absent_overrides_leave_config_untouched() {
        let mut config = Config::default();
        apply_overrides_from(&mut config, |_| None).expect("overrides failed");

        assert_eq!(config.serial.default_port, "/dev/ttyACM0");
        assert_eq!(config.serial.default_baud, 115_200);
    }

    #[test]
    fn test_non_numeric_baud_override_is_error() {
        let mut config = Config::default();
        let result = apply_overrides_from(&mut config, |var| {
            (var == "PUZZLECOM_SERIAL_DEFAULT_BAUD").then(|| "fast".to_string())
        });

        match result {
            Err(ConfigError::EnvParseError { var, message }) => {
                assert_eq!(var, "PUZZLECOM_SERIAL_DEFAULT_BAUD");
                assert!(message.contains("fast"));
            }
            other => panic!("Expected EnvParseError, got: {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_timeout_override_is_error() {
        let mut config = Config::default();
        let result = apply_overrides_from(&mut config, |var| {
            (var == "PUZZLECOM_SERIAL_POLL_TIMEOUT_MS").then(|| "soon".to_string())
        });

        assert!(matches!(
            result,
            Err(ConfigError::EnvParseError { var, .. }) if var == "PUZZLECOM_SERIAL_POLL_TIMEOUT_MS"
        ));
    }
}
