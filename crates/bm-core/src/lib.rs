//! bm-core: Core abstractions and configuration for the Bitmessage RPC client
//!
//! This crate provides the error taxonomy, configuration structures, text and
//! timestamp helpers, response record schemas and the transport trait shared
//! by the client library and the CLI.

pub mod config;
pub mod encoding;
pub mod error;
pub mod serde_utils;
pub mod time;
pub mod traits;
pub mod types;

pub use error::{BmError, RemoteCallError, Result};
pub use traits::RpcTransport;
