//! # Error Taxonomy
//!
//! The failure vocabulary shared by the codec, the dispatch layer, and the
//! API layer behind it.
//!
//! ## Invariants
//!
//! - **First error wins**: validation chains short-circuit through `?`, so
//!   at most one `ApiError` exists per failed operation and it is never
//!   overwritten by a later check.
//! - **Wire-stable kinds**: each kind carries a fixed integer code, packed
//!   into slot 2 of an error-response frame.

use std::fmt;

/// The kind of an [`ApiError`], as carried on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Malformed frame shape, wrong element type, missing or empty
    /// required field, unknown method name, or element-count mismatch.
    Validation,
    /// A failure inside the API layer itself (registration or invocation
    /// machinery), reported back without transformation.
    Runtime,
}

impl ApiErrorKind {
    /// The integer code packed into an error-response frame.
    pub const fn code(self) -> i64 {
        match self {
            Self::Validation => 0,
            Self::Runtime => 1,
        }
    }

    /// Recovers a kind from its wire code.
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Validation),
            1 => Some(Self::Runtime),
            _ => None,
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation => write!(f, "validation"),
            Self::Runtime => write!(f, "runtime"),
        }
    }
}

/// A single protocol-level failure with a human-readable message.
///
/// An `ApiError` value exists exactly when an operation failed; there is
/// no unset state to check before reading it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    /// A validation failure with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Validation,
            message: message.into(),
        }
    }

    /// A runtime failure with the given message.
    pub fn runtime(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Runtime,
            message: message.into(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ApiError {}

/// A specialized Result type for protocol operations.
pub type Result<T> = std::result::Result<T, ApiError>;
