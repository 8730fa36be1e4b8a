//! Resolving the effective configuration
//!
//! Values come from the config file first, then from command-line flags and
//! `BITMESSAGE_*` environment variables, which clap merges before we see them.

use std::path::Path;

use anyhow::{Context, Result};

use bm_core::config::{self, ConfigFile};
use bm_core::error::ConfigError;

/// Connection values given on the command line or in the environment
#[derive(Debug, Clone, Default)]
pub struct ConnectionOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl ConnectionOverrides {
    /// Apply every value that was given
    pub fn apply(&self, config: &mut ConfigFile) {
        if let Some(host) = &self.host {
            config.connection.host = host.clone();
        }
        if let Some(port) = self.port {
            config.connection.port = port;
        }
        if let Some(username) = &self.username {
            config.connection.username = username.clone();
        }
        if let Some(password) = &self.password {
            config.connection.password = password.clone();
        }
    }
}

/// Load the config file and layer overrides on top.
///
/// An explicit path must exist. The default path is optional and falls back
/// to built-in defaults when absent.
pub fn resolve(config_path: Option<&Path>, overrides: &ConnectionOverrides) -> Result<ConfigFile> {
    let mut config = match config_path {
        Some(path) => config::load_config::<ConfigFile>(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => {
            let default_path = config::default_config_path();
            match config::load_config::<ConfigFile>(&default_path) {
                Ok(config) => config,
                Err(ConfigError::NotFound(_)) => ConfigFile::default(),
                Err(e) => {
                    return Err(e)
                        .with_context(|| format!("Failed to load config from {:?}", default_path))
                }
            }
        }
    };

    overrides.apply(&mut config);
    tracing::debug!(
        host = %config.connection.host,
        port = config.connection.port,
        "Resolved connection settings"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_win_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[connection]\nhost = \"10.0.0.2\"\nport = 9000\nusername = \"file-user\"\n",
        )
        .unwrap();

        let overrides = ConnectionOverrides {
            port: Some(8444),
            password: Some("flag-pass".to_string()),
            ..Default::default()
        };
        let config = resolve(Some(path.as_path()), &overrides).unwrap();

        assert_eq!(config.connection.host, "10.0.0.2");
        assert_eq!(config.connection.port, 8444);
        assert_eq!(config.connection.username, "file-user");
        assert_eq!(config.connection.password, "flag-pass");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        assert!(resolve(Some(path.as_path()), &ConnectionOverrides::default()).is_err());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[connection\nhost = ").unwrap();

        assert!(resolve(Some(path.as_path()), &ConnectionOverrides::default()).is_err());
    }
}
