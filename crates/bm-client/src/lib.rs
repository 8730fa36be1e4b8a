//! bm-client: Async client for the Bitmessage daemon API
//!
//! Translates namespaced method calls into XML-RPC requests against the
//! daemon, base64-encoding free-text arguments on the way out and decoding
//! records on the way back.

pub mod api;
pub mod client;
pub mod dispatcher;
pub mod transport;

pub use client::BitmessageClient;
pub use dispatcher::{CallDescriptor, CallOutput, Dispatcher, ResultFormat};
pub use transport::HttpTransport;

// Re-export the types callers need to use the client
pub use bm_core::config::{ClientOptions, ConfigFile, ConnectionConfig};
pub use bm_core::types::{
    Address, DeterministicOptions, InboxMessage, MessageStatus, SentMessage, Subscription,
};
pub use bm_core::{BmError, RemoteCallError, Result};
pub use bm_protocol::Value;
