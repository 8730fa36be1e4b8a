//! Protocol error types

use thiserror::Error;

/// Errors that can occur while encoding or decoding XML-RPC documents
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// The document is not well-formed XML
    #[error("XML syntax error: {0}")]
    Xml(String),

    /// The document ended before a required element was seen
    #[error("Missing element: <{0}>")]
    MissingElement(&'static str),

    /// An element appeared where it is not allowed
    #[error("Unexpected element <{found}> inside <{parent}>")]
    UnexpectedElement { parent: String, found: String },

    /// A scalar element carried text that does not parse as its type
    #[error("Invalid {kind} value: {text:?}")]
    InvalidValue { kind: &'static str, text: String },

    /// A `<base64>` element did not contain valid base64
    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The document is empty
    #[error("Empty document")]
    Empty,
}
