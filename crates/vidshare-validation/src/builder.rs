//! Fluent per-field validation chain
//!
//! Every check runs as soon as it is called and records an error when it
//! fails; the chain itself never stops early, so one pass reports every
//! problem with a field.
//!
//! ```
//! use vidshare_validation::ValidationBuilder;
//!
//! let result = ValidationBuilder::new()
//!     .with_field("name", "")
//!     .not_empty()
//!     .max_length(100)
//!     .with_field("description", "short")
//!     .max_length(200)
//!     .build();
//!
//! assert!(!result.is_valid());
//! assert!(result.has_field_errors("name"));
//! ```

use crate::error::ValidationErrorMessage;
use crate::result::ValidationResult;
use crate::traits::ToValidationValue;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt::Display;
use std::future::Future;

const EMAIL_PATTERN: &str =
    r"^[a-zA-Z0-9]([a-zA-Z0-9._%+-]*[a-zA-Z0-9])?@[a-zA-Z0-9]([a-zA-Z0-9.-]*[a-zA-Z0-9])?\.[a-zA-Z]{2,}$";
const URL_PATTERN: &str = r"^https?://[^\s/$.?#].[^\s]*$";

/// Accumulates field errors through a chain of checks
#[derive(Debug, Clone)]
pub struct ValidationBuilder {
    field: String,
    value: Value,
    result: ValidationResult,
}

impl ValidationBuilder {
    pub fn new() -> Self {
        Self {
            field: String::new(),
            value: Value::Null,
            result: ValidationResult::success(),
        }
    }

    /// Point subsequent checks at `name`, holding `value`
    pub fn with_field(mut self, name: impl Into<String>, value: impl ToValidationValue) -> Self {
        self.field = name.into();
        self.value = value.to_validation_value();
        self
    }

    /// Attach out-of-band data to the eventual result without touching validity
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.result.insert_metadata(key.into(), value.into());
        self
    }

    pub fn not_null(mut self) -> Self {
        if self.value.is_null() {
            let message = format!("{} is required", self.field);
            self.fail(message);
        }
        self
    }

    /// Fails on null, empty strings, empty lists and empty objects
    pub fn not_empty(mut self) -> Self {
        let empty = match &self.value {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::Object(map) => map.is_empty(),
            _ => false,
        };
        if empty {
            let message = format!("{} cannot be empty", self.field);
            self.fail(message);
        }
        self
    }

    pub fn not_white_space(mut self) -> Self {
        let blank = match &self.value {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            _ => false,
        };
        if blank {
            let message = format!("{} cannot be blank", self.field);
            self.fail(message);
        }
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        if let Some(len) = self.current_length() {
            if len < min {
                let message = format!("{} must be at least {} characters long", self.field, min);
                self.fail(message);
            }
        }
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        if let Some(len) = self.current_length() {
            if len > max {
                let message = format!("{} must be at most {} characters long", self.field, max);
                self.fail(message);
            }
        }
        self
    }

    /// Inclusive length bounds
    pub fn length(mut self, min: usize, max: usize) -> Self {
        if let Some(len) = self.current_length() {
            if len < min || len > max {
                let message = if min == max {
                    format!("{} must be exactly {} characters long", self.field, min)
                } else {
                    format!("{} must be between {} and {} characters long", self.field, min, max)
                };
                self.fail(message);
            }
        }
        self
    }

    /// Inclusive range check; null values are left to [`not_null`](Self::not_null)
    pub fn range<T>(mut self, min: T, max: T) -> Self
    where
        T: DeserializeOwned + PartialOrd + Display,
    {
        if self.value.is_null() {
            return self;
        }
        let in_range = serde_json::from_value::<T>(self.value.clone())
            .map(|value| value >= min && value <= max)
            .unwrap_or(false);
        if !in_range {
            let message = format!("{} must be between {} and {}", self.field, min, max);
            self.fail(message);
        }
        self
    }

    /// Regex match against a string value
    ///
    /// A pattern that does not compile is reported as an error on the field.
    pub fn matches(self, pattern: &str) -> Self {
        let message = format!("{} does not match the required pattern", self.field);
        self.matches_with(pattern, message)
    }

    pub fn email(self) -> Self {
        let message = format!("{} must be a valid email address", self.field);
        self.matches_with(EMAIL_PATTERN, message)
    }

    pub fn url(self) -> Self {
        let message = format!("{} must be a valid URL", self.field);
        self.matches_with(URL_PATTERN, message)
    }

    /// Fail with `message` unless `predicate` accepts the current value
    pub fn custom<F>(mut self, predicate: F, message: impl Into<String>) -> Self
    where
        F: FnOnce(&Value) -> bool,
    {
        if !predicate(&self.value) {
            self.fail(message.into());
        }
        self
    }

    pub async fn custom_async<F, Fut>(mut self, predicate: F, message: impl Into<String>) -> Self
    where
        F: FnOnce(Value) -> Fut,
        Fut: Future<Output = bool>,
    {
        if !predicate(self.value.clone()).await {
            self.fail(message.into());
        }
        self
    }

    /// Fail with `message` unless `condition` holds; for checks spanning fields
    pub fn ensure<F>(mut self, condition: F, message: impl Into<String>) -> Self
    where
        F: FnOnce() -> bool,
    {
        if !condition() {
            self.fail(message.into());
        }
        self
    }

    pub async fn ensure_async<F, Fut>(mut self, condition: F, message: impl Into<String>) -> Self
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = bool>,
    {
        if !condition().await {
            self.fail(message.into());
        }
        self
    }

    /// Snapshot of everything recorded so far; calling it again re-runs nothing
    pub fn validate(&self) -> ValidationResult {
        self.result.clone()
    }

    pub fn build(self) -> ValidationResult {
        self.result
    }

    fn matches_with(mut self, pattern: &str, message: String) -> Self {
        if self.value.is_null() {
            return self;
        }
        let regex = match Regex::new(pattern) {
            Ok(regex) => regex,
            Err(_) => {
                let message = format!("{} has an invalid pattern: {}", self.field, pattern);
                self.fail(message);
                return self;
            }
        };
        let matched = self.value.as_str().map_or(false, |text| regex.is_match(text));
        if !matched {
            self.fail(message);
        }
        self
    }

    fn current_length(&mut self) -> Option<usize> {
        match &self.value {
            Value::Null => None,
            Value::String(s) => Some(s.chars().count()),
            Value::Array(items) => Some(items.len()),
            _ => {
                let message = format!("{} must be a string or a list", self.field);
                self.fail(message);
                None
            }
        }
    }

    fn fail(&mut self, message: String) {
        let error = ValidationErrorMessage::new(self.field.clone(), message).or_else(|_| {
            ValidationErrorMessage::new(self.field.clone(), format!("{} is invalid", self.field))
        });
        if let Ok(error) = error {
            self.result.push(error);
        }
    }
}

impl Default for ValidationBuilder {
    fn default() -> Self {
        Self::new()
    }
}
