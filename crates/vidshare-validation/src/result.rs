//! Accumulated validation outcome with logical combinators

use crate::error::{ArgumentError, DomainError, ValidationErrorMessage};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::ops::{BitAnd, BitOr};

/// Ordered collection of field-scoped validation errors
///
/// A result is valid exactly when it holds no errors. Results compose with
/// `&` (fail-fast: the right side only counts when the left side is valid),
/// `|` (first success wins) and [`ValidationResult::combine`] (union of every
/// operand's errors).
///
/// ```
/// use vidshare_validation::ValidationResult;
///
/// let name = ValidationResult::failure("name", "Name is required").unwrap();
/// let both = ValidationResult::combine([name, ValidationResult::success()]);
/// assert!(!both.is_valid());
/// assert_eq!(both.error_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: Vec<ValidationErrorMessage>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    metadata: HashMap<String, Value>,
}

impl ValidationResult {
    /// A valid result with no errors
    pub fn success() -> Self {
        Self::default()
    }

    /// An invalid result holding exactly one error
    pub fn failure(field: impl Into<String>, message: impl Into<String>) -> Result<Self, ArgumentError> {
        let error = ValidationErrorMessage::new(field, message)?;
        Ok(Self::from(error))
    }

    /// Union of every operand's errors, in operand order
    ///
    /// Unlike `&`, no operand is skipped because an earlier one failed.
    /// Operands may be `Option<ValidationResult>`; `None` contributes nothing.
    pub fn combine<I, R>(results: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Option<ValidationResult>>,
    {
        results
            .into_iter()
            .filter_map(Into::<Option<ValidationResult>>::into)
            .fold(Self::success(), |mut acc, result| {
                acc.merge(result);
                acc
            })
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// Append one error and return `self` for chaining
    pub fn add_error(
        &mut self,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<&mut Self, ArgumentError> {
        let error = ValidationErrorMessage::new(field, message)?;
        self.errors.push(error);
        Ok(self)
    }

    /// Append an error when `condition` holds
    ///
    /// The condition is evaluated once, at call time.
    pub fn add_error_if(
        &mut self,
        condition: bool,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<&mut Self, ArgumentError> {
        if condition {
            self.add_error(field, message)
        } else {
            Ok(self)
        }
    }

    pub fn add_error_if_none<T>(
        &mut self,
        value: Option<&T>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<&mut Self, ArgumentError> {
        self.add_error_if(value.is_none(), field, message)
    }

    pub fn add_error_if_none_or_empty(
        &mut self,
        value: Option<&str>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<&mut Self, ArgumentError> {
        self.add_error_if(value.map_or(true, str::is_empty), field, message)
    }

    pub fn add_error_if_none_or_whitespace(
        &mut self,
        value: Option<&str>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<&mut Self, ArgumentError> {
        self.add_error_if(value.map_or(true, |v| v.trim().is_empty()), field, message)
    }

    /// Move every error (and metadata entry) of `other` into `self`
    pub fn merge(&mut self, other: ValidationResult) -> &mut Self {
        self.errors.extend(other.errors);
        self.metadata.extend(other.metadata);
        self
    }

    /// Lazy AND: `next` only runs when `self` is still valid
    pub fn and_then<F>(self, next: F) -> Self
    where
        F: FnOnce() -> ValidationResult,
    {
        if self.is_invalid() {
            return self;
        }
        let mut combined = self;
        combined.merge(next());
        combined
    }

    /// Lazy OR: `fallback` only runs when `self` is invalid
    pub fn or_else<F>(self, fallback: F) -> Self
    where
        F: FnOnce() -> ValidationResult,
    {
        if self.is_valid() {
            self
        } else {
            fallback()
        }
    }

    /// Fail with a [`DomainError`] describing every error
    ///
    /// Reserved for invariant enforcement; user input errors should travel as
    /// values instead.
    pub fn ensure_valid(&self) -> Result<(), DomainError> {
        if self.is_valid() {
            return Ok(());
        }
        Err(DomainError::new(self.joined_messages(), self.errors.clone()))
    }

    /// Like [`ensure_valid`](Self::ensure_valid) with a caller-supplied message
    pub fn ensure_valid_with(&self, message: impl Into<String>) -> Result<(), DomainError> {
        if self.is_valid() {
            return Ok(());
        }
        Err(DomainError::new(message.into(), self.errors.clone()))
    }

    pub fn errors(&self) -> &[ValidationErrorMessage] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ValidationErrorMessage> {
        self.errors
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn first_error(&self) -> Option<&ValidationErrorMessage> {
        self.errors.first()
    }

    /// Errors recorded against `field`, in insertion order
    pub fn field_errors<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ValidationErrorMessage> + 'a {
        self.errors.iter().filter(move |e| e.field() == field)
    }

    pub fn has_field_errors(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field() == field)
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message().to_string()).collect()
    }

    pub fn metadata(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }

    pub fn metadata_entries(&self) -> &HashMap<String, Value> {
        &self.metadata
    }

    pub(crate) fn insert_metadata(&mut self, key: String, value: Value) {
        self.metadata.insert(key, value);
    }

    pub(crate) fn push(&mut self, error: ValidationErrorMessage) {
        self.errors.push(error);
    }

    /// Convert to a JSON-serializable format for API responses
    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "error": {
                "code": "validation_failed",
                "message": "Validation failed",
                "fields": self.errors
                    .iter()
                    .map(|e| serde_json::json!({ "field": e.field(), "message": e.message() }))
                    .collect::<Vec<_>>()
            }
        })
    }

    fn joined_messages(&self) -> String {
        self.errors
            .iter()
            .map(ValidationErrorMessage::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "No validation errors")
        } else {
            write!(f, "{}", self.joined_messages())
        }
    }
}

impl From<ValidationErrorMessage> for ValidationResult {
    fn from(error: ValidationErrorMessage) -> Self {
        Self {
            errors: vec![error],
            metadata: HashMap::new(),
        }
    }
}

impl FromIterator<ValidationErrorMessage> for ValidationResult {
    fn from_iter<I: IntoIterator<Item = ValidationErrorMessage>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
            metadata: HashMap::new(),
        }
    }
}

impl Extend<ValidationErrorMessage> for ValidationResult {
    fn extend<I: IntoIterator<Item = ValidationErrorMessage>>(&mut self, iter: I) {
        self.errors.extend(iter);
    }
}

impl From<ValidationResult> for bool {
    fn from(result: ValidationResult) -> Self {
        result.is_valid()
    }
}

impl From<&ValidationResult> for bool {
    fn from(result: &ValidationResult) -> Self {
        result.is_valid()
    }
}

/// Fail-fast AND over two evaluated results
///
/// When the left side is invalid it comes back unchanged and the right
/// side's errors are dropped. Use [`ValidationResult::and_then`] to skip
/// evaluating the right side altogether.
impl BitAnd for ValidationResult {
    type Output = ValidationResult;

    fn bitand(self, rhs: ValidationResult) -> Self::Output {
        self.and_then(|| rhs)
    }
}

/// `None` behaves as `ValidationResult::success()`
impl BitAnd<Option<ValidationResult>> for ValidationResult {
    type Output = ValidationResult;

    fn bitand(self, rhs: Option<ValidationResult>) -> Self::Output {
        self & rhs.unwrap_or_default()
    }
}

/// First success wins; when both sides fail only the right side's errors surface
impl BitOr for ValidationResult {
    type Output = ValidationResult;

    fn bitor(self, rhs: ValidationResult) -> Self::Output {
        self.or_else(|| rhs)
    }
}

impl BitOr<Option<ValidationResult>> for ValidationResult {
    type Output = ValidationResult;

    fn bitor(self, rhs: Option<ValidationResult>) -> Self::Output {
        self | rhs.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn fail(field: &str, message: &str) -> ValidationResult {
        ValidationResult::failure(field, message).unwrap()
    }

    #[test]
    fn test_success_is_valid() {
        let result = ValidationResult::success();
        assert!(result.is_valid());
        assert_eq!(result.error_count(), 0);
        assert!(bool::from(&result));
    }

    #[test]
    fn test_failure_has_single_error() {
        let result = fail("name", "Name is required");
        assert!(result.is_invalid());
        assert_eq!(result.error_count(), 1);
        assert!(result.has_field_errors("name"));
        assert!(!bool::from(result));
    }

    #[test]
    fn test_failure_rejects_blank_message() {
        assert_eq!(
            ValidationResult::failure("name", " ").unwrap_err(),
            ArgumentError::BlankMessage
        );
    }

    #[test]
    fn test_add_error_rejects_blank_message() {
        let mut result = ValidationResult::success();
        assert_eq!(result.add_error("", "").unwrap_err(), ArgumentError::BlankMessage);
        assert!(result.add_error("", "x").is_ok());
        assert_eq!(result.error_count(), 1);
    }

    #[test]
    fn test_add_error_chains() {
        let mut result = ValidationResult::success();
        result
            .add_error("a", "first")
            .unwrap()
            .add_error("b", "second")
            .unwrap();
        assert_eq!(result.error_messages(), vec!["first", "second"]);
    }

    #[test]
    fn test_conditional_helpers() {
        let mut result = ValidationResult::success();
        result
            .add_error_if(false, "skipped", "never added")
            .unwrap()
            .add_error_if_none::<i32>(None, "age", "Age is required")
            .unwrap()
            .add_error_if_none_or_empty(Some(""), "name", "Name is required")
            .unwrap()
            .add_error_if_none_or_whitespace(Some("  "), "title", "Title is required")
            .unwrap()
            .add_error_if_none_or_whitespace(Some("ok"), "other", "not added")
            .unwrap();

        assert_eq!(result.error_count(), 3);
        assert!(!result.has_field_errors("skipped"));
        assert!(!result.has_field_errors("other"));
    }

    #[test]
    fn test_merge_appends_in_order() {
        let mut first = fail("a", "one");
        first.merge(fail("b", "two"));
        let fields: Vec<_> = first.errors().iter().map(|e| e.field()).collect();
        assert_eq!(fields, vec!["a", "b"]);
    }

    #[test]
    fn test_and_identity() {
        let x = fail("name", "bad");
        assert_eq!(x.clone() & ValidationResult::success(), x);
        assert_eq!(ValidationResult::success() & x.clone(), x);
        assert_eq!(x.clone() & None, x);
    }

    #[test]
    fn test_and_short_circuits() {
        let calls = Cell::new(0);
        let result = fail("a", "left").and_then(|| {
            calls.set(calls.get() + 1);
            fail("b", "right")
        });
        assert_eq!(calls.get(), 0);
        assert_eq!(result, fail("a", "left"));

        let eager = fail("a", "left") & fail("b", "right");
        assert_eq!(eager.error_count(), 1);
        assert!(!eager.has_field_errors("b"));
    }

    #[test]
    fn test_and_merges_when_left_valid() {
        let result = ValidationResult::success() & fail("b", "right");
        assert_eq!(result.error_count(), 1);
        assert!(result.has_field_errors("b"));
    }

    #[test]
    fn test_or_first_success_wins() {
        let result = ValidationResult::success() | fail("", "e");
        assert!(result.is_valid());

        let result = fail("", "a") | fail("", "b");
        assert_eq!(result.error_messages(), vec!["b"]);

        let result = fail("", "a") | None;
        assert!(result.is_valid());
    }

    #[test]
    fn test_combine_is_union() {
        let result = ValidationResult::combine([fail("", "a"), fail("", "b")]);
        assert_eq!(result.error_count(), 2);
        assert_eq!(result.error_messages(), vec!["a", "b"]);

        let empty = ValidationResult::combine(Vec::<ValidationResult>::new());
        assert!(empty.is_valid());
    }

    #[test]
    fn test_combine_skips_missing_operands() {
        let result = ValidationResult::combine([Some(fail("a", "one")), None, Some(fail("b", "two"))]);
        assert_eq!(result.error_messages(), vec!["one", "two"]);

        let nothing = ValidationResult::combine([None::<ValidationResult>, None]);
        assert!(nothing.is_valid());
    }

    #[test]
    fn test_ensure_valid_message_format() {
        let err = fail("Name", "bad").ensure_valid().unwrap_err();
        assert_eq!(err.to_string(), "Name: bad");

        let mut two = fail("F1", "m1");
        two.add_error("F2", "m2").unwrap();
        let err = two.ensure_valid().unwrap_err();
        assert_eq!(err.to_string(), "F1: m1; F2: m2");
        assert_eq!(err.errors().len(), 2);

        let err = two.ensure_valid_with("Category is invalid").unwrap_err();
        assert_eq!(err.to_string(), "Category is invalid");

        assert!(ValidationResult::success().ensure_valid().is_ok());
    }

    #[test]
    fn test_object_level_error_renders_bare_message() {
        let object = fail("", "bad");
        assert_eq!(object.to_string(), "bad");
        assert_eq!(object.ensure_valid().unwrap_err().to_string(), "bad");

        let mut mixed = fail("", "inconsistent dates");
        mixed.add_error("title", "required").unwrap();
        assert_eq!(mixed.to_string(), "inconsistent dates; title: required");
        assert_eq!(
            mixed.ensure_valid().unwrap_err().message(),
            "inconsistent dates; title: required"
        );
    }

    #[test]
    fn test_deserialized_result_rejects_blank_message() {
        let json = r#"{"errors":[{"field":"name","message":"  ","timestamp":"2024-01-01T00:00:00Z"}]}"#;
        assert!(serde_json::from_str::<ValidationResult>(json).is_err());

        let json = r#"{"errors":[{"field":"name","message":"Name is required","timestamp":"2024-01-01T00:00:00Z"}]}"#;
        let result: ValidationResult = serde_json::from_str(json).unwrap();
        assert!(result.has_field_errors("name"));
    }

    #[test]
    fn test_to_json_lists_fields() {
        let json = fail("email", "Invalid format").to_json();
        assert_eq!(json["error"]["code"], "validation_failed");
        assert_eq!(json["error"]["fields"][0]["field"], "email");
    }
}
