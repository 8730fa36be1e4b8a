//! Message types for the XML-RPC protocol
//!
//! The daemon speaks plain XML-RPC: the client sends one `<methodCall>` per
//! HTTP request and receives one `<methodResponse>`, which carries either a
//! single return value or a fault. Serialization lives in `codec.rs`.

use crate::codec;
use crate::error::ProtocolError;
use crate::value::Value;

/// A remote procedure invocation: method name plus positional parameters
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    /// Remote method name, e.g. `listAddresses`
    pub method_name: String,
    /// Positional parameters in call order
    pub params: Vec<Value>,
}

impl MethodCall {
    /// Create a new method call
    pub fn new(method_name: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            method_name: method_name.into(),
            params,
        }
    }

    /// Serialize to an XML-RPC request document
    pub fn to_xml(&self) -> String {
        codec::encode_call(self)
    }

    /// Parse an XML-RPC request document
    pub fn from_xml(xml: &str) -> Result<Self, ProtocolError> {
        codec::decode_call(xml)
    }
}

/// Fault reported by the remote endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    /// `faultCode` member
    pub code: i32,
    /// `faultString` member
    pub message: String,
}

impl Fault {
    /// Create a new fault
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Fault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "fault {}: {}", self.code, self.message)
    }
}

/// Response to a [`MethodCall`]
#[derive(Debug, Clone, PartialEq)]
pub enum MethodResponse {
    /// The call returned a value
    Success(Value),
    /// The endpoint reported a fault
    Fault(Fault),
}

impl MethodResponse {
    /// Serialize to an XML-RPC response document
    pub fn to_xml(&self) -> String {
        codec::encode_response(self)
    }

    /// Parse an XML-RPC response document
    pub fn from_xml(xml: &str) -> Result<Self, ProtocolError> {
        codec::decode_response(xml)
    }

    /// Convert into a `Result`, treating a fault as the error case
    pub fn into_result(self) -> Result<Value, Fault> {
        match self {
            MethodResponse::Success(value) => Ok(value),
            MethodResponse::Fault(fault) => Err(fault),
        }
    }
}
