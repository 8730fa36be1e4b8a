//! Core traits

mod transport;

pub use transport::RpcTransport;
