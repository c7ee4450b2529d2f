//! Validation error types and handling

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Individual validation error for a specific field
///
/// Immutable once created; a message only ever disappears by rebuilding the
/// [`ValidationResult`](crate::ValidationResult) that owns it. Deserializing
/// goes through the same blank-message check as [`new`](Self::new).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawValidationErrorMessage")]
pub struct ValidationErrorMessage {
    field: String,
    message: String,
    timestamp: DateTime<Utc>,
}

impl ValidationErrorMessage {
    /// Create a new error message, rejecting blank messages
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Result<Self, ArgumentError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ArgumentError::BlankMessage);
        }

        Ok(Self {
            field: field.into(),
            message,
            timestamp: Utc::now(),
        })
    }

    /// The field that failed validation; empty for object-level errors
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Human-readable error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// When the error was recorded
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Whether this error belongs to a named field
    pub fn has_field(&self) -> bool {
        !self.field.is_empty()
    }
}

#[derive(Deserialize)]
struct RawValidationErrorMessage {
    #[serde(default)]
    field: String,
    message: String,
    #[serde(default = "Utc::now")]
    timestamp: DateTime<Utc>,
}

impl TryFrom<RawValidationErrorMessage> for ValidationErrorMessage {
    type Error = ArgumentError;

    fn try_from(raw: RawValidationErrorMessage) -> Result<Self, Self::Error> {
        let mut error = Self::new(raw.field, raw.message)?;
        error.timestamp = raw.timestamp;
        Ok(error)
    }
}

// Two messages are the same error when they name the same field and text,
// regardless of when each was recorded.
impl PartialEq for ValidationErrorMessage {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field && self.message == other.message
    }
}

impl Eq for ValidationErrorMessage {}

impl fmt::Display for ValidationErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.field.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

/// Misuse of the validation API by the calling code
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    #[error("validation message must not be null or blank")]
    BlankMessage,
}

/// Invariant violation raised when an invalid result is forced into a success
///
/// The display form is the `"; "`-joined list of `"field: message"` pairs, or
/// the custom message supplied to
/// [`ensure_valid_with`](crate::ValidationResult::ensure_valid_with).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DomainError {
    message: String,
    errors: Vec<ValidationErrorMessage>,
}

impl DomainError {
    pub(crate) fn new(message: String, errors: Vec<ValidationErrorMessage>) -> Self {
        Self { message, errors }
    }

    /// Build a domain error that is not backed by field errors
    pub fn invariant(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: Vec::new(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The validation errors that caused this failure
    pub fn errors(&self) -> &[ValidationErrorMessage] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ValidationErrorMessage> {
        self.errors
    }
}
