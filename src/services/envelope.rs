//! Uniform result envelope returned by every service operation.
//!
//! The `code` mirrors HTTP semantics (200/201 success, 400 validation,
//! 404 not found, 500 unexpected failure) and the HTTP layer uses it as the
//! literal response status.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct OpResult<T> {
    pub success: bool,
    pub code: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T> OpResult<T> {
    pub fn ok(code: u16, message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            code,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn fail(code: u16, message: impl Into<String>) -> Self {
        Self {
            success: false,
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Failure that still carries a payload, used by the empty-page list
    /// result which reports pagination metadata alongside the 404.
    pub fn fail_with(code: u16, message: impl Into<String>, data: T) -> Self {
        Self {
            success: false,
            code,
            message: message.into(),
            data: Some(data),
        }
    }
}
