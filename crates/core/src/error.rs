//! Domain error model.

use serde::Serialize;
use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// A single field-level validation failure, reported back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Domain-level error.
///
/// Keep this focused on deterministic, recoverable failures; every variant
/// except `Internal` translates to a client-facing 4xx outcome.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A requested city or point of interest does not exist.
    #[error("not found")]
    NotFound,

    /// Entity state failed validation (creation or post-patch).
    #[error("validation failed")]
    Validation(Vec<FieldViolation>),

    /// A patch referenced an unknown path, used an unsupported operation
    /// kind, or carried a missing/ill-typed value.
    #[error("malformed patch: {0}")]
    MalformedPatch(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// An unexpected internal fault (e.g. a poisoned lock). Indicates a bug,
    /// not a client mistake.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn validation(violations: Vec<FieldViolation>) -> Self {
        Self::Validation(violations)
    }

    pub fn malformed_patch(msg: impl Into<String>) -> Self {
        Self::MalformedPatch(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
