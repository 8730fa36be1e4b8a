//! Transports that carry method calls to the daemon

mod http;

pub use http::HttpTransport;
