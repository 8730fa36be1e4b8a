//! Core error types for the Bitmessage RPC client

use bm_protocol::{Fault, ProtocolError};
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for client operations
#[derive(Error, Debug)]
pub enum BmError {
    /// The remote call itself failed
    #[error("Remote call failed: {0}")]
    Remote(#[from] RemoteCallError),

    /// A result declared as JSON text did not parse as JSON
    #[error("Malformed JSON result from {method}: {source}")]
    MalformedResult {
        method: String,
        #[source]
        source: serde_json::Error,
    },

    /// A result did not match the schema expected for its method
    #[error("Unexpected response shape from {method}: {reason}")]
    UnexpectedShape { method: String, reason: String },

    /// Encoded text could not be decoded
    #[error("Text decode error: {0}")]
    Decode(#[from] TextDecodeError),

    /// Timestamp could not be converted
    #[error("Timestamp error: {0}")]
    Timestamp(#[from] TimestampError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl BmError {
    /// Build an unexpected-shape error for a method
    pub fn unexpected_shape(method: impl Into<String>, reason: impl Into<String>) -> Self {
        BmError::UnexpectedShape {
            method: method.into(),
            reason: reason.into(),
        }
    }
}

/// Failure of a single remote procedure call
#[derive(Error, Debug)]
pub enum RemoteCallError {
    /// The method name was empty or otherwise unusable
    #[error("Invalid method name: {0:?}")]
    InvalidMethod(String),

    /// The HTTP request could not be completed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success HTTP status
    #[error("Endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The endpoint returned an XML-RPC fault
    #[error("Remote fault {code}: {message}")]
    Fault { code: i32, message: String },

    /// The daemon returned an `API Error NNNN: ...` result
    #[error("API error {code}: {message}")]
    Api { code: u32, message: String },

    /// The response document could not be decoded
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

impl From<Fault> for RemoteCallError {
    fn from(fault: Fault) -> Self {
        RemoteCallError::Fault {
            code: fault.code,
            message: fault.message,
        }
    }
}

/// Base64 text that could not be decoded
#[derive(Error, Debug)]
#[error("invalid base64 text: {0}")]
pub struct TextDecodeError(#[from] pub base64::DecodeError);

/// Unix timestamp that could not be converted to a date
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TimestampError {
    /// Input is not a base-10 integer
    #[error("not a base-10 integer: {0:?}")]
    NotANumber(String),

    /// Input is outside the representable date range
    #[error("out of range: {0}")]
    OutOfRange(i64),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    /// Reading, writing or creating the directory of a config file failed
    #[error("Cannot access config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialize error
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, BmError>;
