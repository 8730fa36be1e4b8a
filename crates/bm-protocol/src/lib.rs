//! bm-protocol: XML-RPC wire format for the Bitmessage daemon API
//!
//! This crate defines the value model and the request/response documents
//! exchanged with the daemon over HTTP.

pub mod codec;
pub mod error;
pub mod message;
pub mod value;

pub use error::ProtocolError;
pub use message::{Fault, MethodCall, MethodResponse};
pub use value::Value;
