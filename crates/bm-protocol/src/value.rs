//! XML-RPC value model
//!
//! A [`Value`] is one `<value>` element. Integers are widened to `i64` on
//! decode; on encode they are written as `<int>` when they fit in 32 bits
//! and as the common `<i8>` extension otherwise.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

/// A single XML-RPC value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `<int>`, `<i4>` or `<i8>`
    Int(i64),
    /// `<boolean>` (0 or 1 on the wire)
    Bool(bool),
    /// `<string>` or untyped `<value>` text
    String(String),
    /// `<double>`
    Double(f64),
    /// `<dateTime.iso8601>`, which carries no timezone
    DateTime(NaiveDateTime),
    /// `<base64>`
    Base64(Vec<u8>),
    /// `<array>`
    Array(Vec<Value>),
    /// `<struct>`
    Struct(BTreeMap<String, Value>),
    /// `<nil/>` extension
    Nil,
}

impl Value {
    /// Name of the XML-RPC type, as used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Bool(_) => "boolean",
            Value::String(_) => "string",
            Value::Double(_) => "double",
            Value::DateTime(_) => "dateTime.iso8601",
            Value::Base64(_) => "base64",
            Value::Array(_) => "array",
            Value::Struct(_) => "struct",
            Value::Nil => "nil",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Consume the value, returning the string if it is one
    pub fn into_string(self) -> Result<String, Value> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(other),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(members: BTreeMap<String, Value>) -> Self {
        Value::Struct(members)
    }
}
