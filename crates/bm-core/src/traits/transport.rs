//! Transport trait

use async_trait::async_trait;

use crate::error::RemoteCallError;
use bm_protocol::{MethodCall, Value};

/// Abstraction over the connection to the daemon's RPC endpoint
///
/// One implementation is owned per client and shared by every call, so it
/// must be usable from concurrent tasks.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// Human-readable description of the endpoint, for logs
    fn endpoint(&self) -> &str;

    /// Perform one remote call and return its value.
    ///
    /// Faults reported by the endpoint come back as
    /// [`RemoteCallError::Fault`]; the call is attempted exactly once.
    async fn call(&self, call: MethodCall) -> Result<Value, RemoteCallError>;
}
