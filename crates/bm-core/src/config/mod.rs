//! Configuration management for the Bitmessage RPC client

mod connection;

pub use connection::{ClientOptions, ConnectionConfig, DEFAULT_API_PORT, RPC_PATH};

use crate::error::ConfigError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// On-disk configuration file with `[connection]` and `[options]` tables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// Daemon endpoint and credentials
    pub connection: ConnectionConfig,

    /// Client tunables
    pub options: ClientOptions,
}

/// Get the default configuration directory
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bitmessage-rpc")
}

/// Get the default configuration file path
pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.toml")
}

/// Read a TOML config file into `T`
///
/// A missing file is reported as [`ConfigError::NotFound`] so callers can fall
/// back to defaults. Other read failures carry the offending path.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    Ok(toml::from_str(&content)?)
}

/// Write `config` to `path` as pretty TOML, creating missing parent directories
pub fn save_config<T: Serialize>(path: &Path, config: &T) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(config)?;
    let io_error = |source: std::io::Error| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(io_error)?;
    }
    std::fs::write(path, content).map_err(io_error)
}
