//! Call dispatcher
//!
//! Every convenience method reduces to a [`CallDescriptor`]: a method name,
//! positional arguments and a flag saying whether the daemon's result is
//! JSON-encoded text or a plain XML-RPC value. The dispatcher performs one
//! remote call per descriptor, with no retries, and returns the decoded
//! result or the failure through the same `Result`.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use bm_core::{BmError, RemoteCallError, Result, RpcTransport};
use bm_protocol::{MethodCall, Value};

/// Prefix the daemon puts on errors it reports as ordinary results
const API_ERROR_PREFIX: &str = "API Error ";

/// Width of the numeric code after the prefix
const API_ERROR_CODE_LEN: usize = 4;

/// How the raw result of a call should be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultFormat {
    /// The result is a string holding a JSON document
    #[default]
    Json,
    /// The result is used as returned
    Raw,
}

/// One remote invocation: method name, ordered arguments, result format
#[derive(Debug, Clone, PartialEq)]
pub struct CallDescriptor {
    /// Remote method name
    pub method: String,
    /// Positional arguments, in order
    pub args: Vec<Value>,
    /// Result interpretation
    pub format: ResultFormat,
}

impl CallDescriptor {
    /// Describe a call with no arguments and a JSON result
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            args: Vec::new(),
            format: ResultFormat::Json,
        }
    }

    /// Append a positional argument
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Mark the result as a raw value
    pub fn raw(mut self) -> Self {
        self.format = ResultFormat::Raw;
        self
    }
}

/// Decoded result of a call
#[derive(Debug, Clone, PartialEq)]
pub enum CallOutput {
    /// Parsed JSON document
    Json(serde_json::Value),
    /// Value exactly as returned
    Raw(Value),
}

/// Performs remote calls over a shared transport
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn RpcTransport>,
}

impl Dispatcher {
    /// Create a dispatcher over a transport
    pub fn new(transport: Arc<dyn RpcTransport>) -> Self {
        Self { transport }
    }

    /// The underlying transport
    pub fn transport(&self) -> &Arc<dyn RpcTransport> {
        &self.transport
    }

    /// Perform a call and interpret its result according to the descriptor
    pub async fn call(&self, descriptor: CallDescriptor) -> Result<CallOutput> {
        let method = descriptor.method.clone();
        let format = descriptor.format;
        let value = self.invoke(descriptor).await?;

        match format {
            ResultFormat::Json => parse_json(&method, &value).map(CallOutput::Json),
            ResultFormat::Raw => Ok(CallOutput::Raw(value)),
        }
    }

    /// Perform a call whose result is JSON text and deserialize it into `T`
    ///
    /// Invalid JSON is a [`BmError::MalformedResult`]; JSON that does not
    /// match `T` is a [`BmError::UnexpectedShape`].
    pub async fn call_json<T: DeserializeOwned>(&self, descriptor: CallDescriptor) -> Result<T> {
        let method = descriptor.method.clone();
        let value = self.invoke(descriptor).await?;
        let json = parse_json(&method, &value)?;
        serde_json::from_value(json).map_err(|e| BmError::unexpected_shape(method, e.to_string()))
    }

    /// Perform a call and return its value as is
    pub async fn call_raw(&self, descriptor: CallDescriptor) -> Result<Value> {
        self.invoke(descriptor).await
    }

    async fn invoke(&self, descriptor: CallDescriptor) -> Result<Value> {
        let CallDescriptor { method, args, .. } = descriptor;

        if method.trim().is_empty() {
            return Err(RemoteCallError::InvalidMethod(method).into());
        }

        tracing::debug!(
            method = %method,
            args = args.len(),
            endpoint = self.transport.endpoint(),
            "Calling remote method"
        );

        let value = self
            .transport
            .call(MethodCall::new(method.clone(), args))
            .await?;

        check_api_error(&method, &value)?;
        Ok(value)
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("endpoint", &self.transport.endpoint())
            .finish()
    }
}

fn parse_json(method: &str, value: &Value) -> Result<serde_json::Value> {
    let text = value.as_str().ok_or_else(|| {
        BmError::unexpected_shape(
            method,
            format!("expected JSON text, got {}", value.type_name()),
        )
    })?;

    serde_json::from_str(text).map_err(|source| BmError::MalformedResult {
        method: method.to_string(),
        source,
    })
}

/// Turn an `API Error NNNN: message` result into an error
///
/// Only a four-digit code followed by a colon counts. Anything else that
/// happens to start with the prefix is an ordinary result.
fn check_api_error(method: &str, value: &Value) -> std::result::Result<(), RemoteCallError> {
    let Some((code, message)) = value.as_str().and_then(split_api_error) else {
        return Ok(());
    };

    tracing::warn!(method = %method, code, "Daemon reported API error: {}", message);
    Err(RemoteCallError::Api {
        code,
        message: message.trim().to_string(),
    })
}

fn split_api_error(text: &str) -> Option<(u32, &str)> {
    let rest = text.strip_prefix(API_ERROR_PREFIX)?;
    let code = rest.get(..API_ERROR_CODE_LEN)?;
    let message = rest.get(API_ERROR_CODE_LEN..)?.strip_prefix(':')?;
    if !code.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((code.parse().ok()?, message))
}

/// Require a raw result to be a string
pub(crate) fn expect_string(method: &str, value: Value) -> Result<String> {
    value.into_string().map_err(|other| {
        BmError::unexpected_shape(method, format!("expected string, got {}", other.type_name()))
    })
}

/// Require a raw result to be an integer
pub(crate) fn expect_int(method: &str, value: Value) -> Result<i64> {
    value.as_i64().ok_or_else(|| {
        BmError::unexpected_shape(method, format!("expected int, got {}", value.type_name()))
    })
}
