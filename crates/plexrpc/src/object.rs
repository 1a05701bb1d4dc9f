//! # Object Model
//!
//! The recursive value type exchanged over the wire.
//!
//! ## Philosophy
//!
//! - **Strict tree ownership**: a value exclusively owns its buffers and
//!   children. `Drop` releases every node exactly once; `Clone` is a deep
//!   copy that never introduces sharing.
//! - **Closed set**: copy, release, and conversion are exhaustive matches
//!   over the variants below. There is no "unsupported type" arm and no
//!   `default` fallback.

use rmpv::Value;

use crate::types::ApiError;
use crate::types::Result;

/// A single value in a frame: scalar, buffer, or ordered tree of values.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageObject {
    Nil,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bin(Vec<u8>),
    Str(String),
    Array(Vec<MessageObject>),
}

impl MessageObject {
    /// Converts a decoded MessagePack value into an owned object tree.
    ///
    /// Maps and extension values have no place in the broker protocol and
    /// are rejected as validation failures, as are string payloads that
    /// are not valid UTF-8. 32-bit floats widen to 64-bit.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Nil => Ok(Self::Nil),
            Value::Boolean(b) => Ok(Self::Bool(b)),
            Value::Integer(n) => n
                .as_u64()
                .map(Self::UInt)
                .or_else(|| n.as_i64().map(Self::Int))
                .ok_or_else(|| ApiError::validation("integer value out of range")),
            Value::F32(f) => Ok(Self::Float(f64::from(f))),
            Value::F64(f) => Ok(Self::Float(f)),
            Value::String(s) => s
                .into_str()
                .map(Self::Str)
                .ok_or_else(|| ApiError::validation("string value is not valid utf-8")),
            Value::Binary(b) => Ok(Self::Bin(b)),
            Value::Array(items) => items
                .into_iter()
                .map(Self::from_value)
                .collect::<Result<Vec<_>>>()
                .map(Self::Array),
            Value::Map(_) => Err(ApiError::validation("map values are not supported")),
            Value::Ext(..) => Err(ApiError::validation("ext values are not supported")),
        }
    }

    /// Converts this object tree back into a MessagePack value. Total.
    pub fn into_value(self) -> Value {
        match self {
            Self::Nil => Value::Nil,
            Self::Bool(b) => Value::Boolean(b),
            Self::Int(n) => Value::from(n),
            Self::UInt(n) => Value::from(n),
            Self::Float(f) => Value::F64(f),
            Self::Bin(b) => Value::Binary(b),
            Self::Str(s) => Value::String(s.into()),
            Self::Array(items) => {
                Value::Array(items.into_iter().map(Self::into_value).collect())
            }
        }
    }

    /// The name of this variant, for diagnostics.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::UInt(_) => "uint",
            Self::Float(_) => "float",
            Self::Bin(_) => "bin",
            Self::Str(_) => "str",
            Self::Array(_) => "array",
        }
    }

    /// The text behind a `Str` variant, if this is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The elements behind an `Array` variant, if this is one.
    pub fn as_array(&self) -> Option<&[MessageObject]> {
        match self {
            Self::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }
}

impl From<&str> for MessageObject {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for MessageObject {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<bool> for MessageObject {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for MessageObject {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<u64> for MessageObject {
    fn from(n: u64) -> Self {
        Self::UInt(n)
    }
}

impl From<f64> for MessageObject {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<Vec<u8>> for MessageObject {
    fn from(b: Vec<u8>) -> Self {
        Self::Bin(b)
    }
}

impl From<Vec<MessageObject>> for MessageObject {
    fn from(items: Vec<MessageObject>) -> Self {
        Self::Array(items)
    }
}
