//! Connection and client option configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::serde_utils::optional_duration_secs;

/// Default API port of the daemon
pub const DEFAULT_API_PORT: u16 = 8442;

/// Path of the XML-RPC endpoint on the daemon
pub const RPC_PATH: &str = "/";

/// Where the daemon's API listens and how to authenticate
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Hostname or IP address of the daemon
    pub host: String,

    /// API port
    pub port: u16,

    /// Basic-auth username (`apiusername` in the daemon's keys.dat)
    pub username: String,

    /// Basic-auth password (`apipassword` in the daemon's keys.dat)
    pub password: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_API_PORT,
            username: String::new(),
            password: String::new(),
        }
    }
}

impl ConnectionConfig {
    /// Create a connection config
    pub fn new(
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            username: username.into(),
            password: password.into(),
        }
    }

    /// Full URL of the XML-RPC endpoint
    pub fn endpoint_url(&self, use_tls: bool) -> String {
        let scheme = if use_tls { "https" } else { "http" };
        format!("{}://{}:{}{}", scheme, self.host, self.port, RPC_PATH)
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Tunables for the client; none are required
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientOptions {
    /// Whole-request timeout. Unset means wait indefinitely.
    #[serde(
        with = "optional_duration_secs",
        skip_serializing_if = "Option::is_none"
    )]
    pub request_timeout: Option<Duration>,

    /// TCP connect timeout. Unset means the system default.
    #[serde(
        with = "optional_duration_secs",
        skip_serializing_if = "Option::is_none"
    )]
    pub connect_timeout: Option<Duration>,

    /// Use HTTPS instead of HTTP
    pub use_tls: bool,
}

impl ClientOptions {
    /// Set the whole-request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Set the connect timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }
}
