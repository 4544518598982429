//! Error types for RhythmPulse Core

use thiserror::Error;

/// A single field-attributable failure (bad length, bad range, conflict).
///
/// Clients render these inline next to the offending input, so the field
/// name matches the wire name of the form field (`ticketPrice`, not
/// `ticket_price`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// One or more field bounds violated. All violations are collected
    /// before the operation fails, matching the client-side pre-submit
    /// validation contract.
    #[error("Validation failed: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "))]
    Validation(Vec<FieldError>),

    /// Duplicate email or duplicate password hash at registration.
    #[error("Conflict: {0}")]
    Conflict(FieldError),

    /// Unknown email or credential mismatch at login.
    #[error("Authentication failed: {0}")]
    Auth(FieldError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// The first field error carried by this error, if any.
    ///
    /// The HTTP boundary reports a single `{field, message}` body; this is
    /// the one it picks.
    pub fn field_error(&self) -> Option<&FieldError> {
        match self {
            Error::Validation(errors) => errors.first(),
            Error::Conflict(e) | Error::Auth(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
