//! Outcome envelope returned by every use case
//!
//! Expected failures (bad input, missing entities, conflicts, infrastructure
//! errors) travel as a [`RequestResult`] value; presentation adapters inspect
//! [`RequestResult::status`] to pick a transport response.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use vidshare_validation::{ValidationErrorMessage, ValidationResult};

/// General error used when a failure is reported without any message
pub const UNSPECIFIED_ERROR: &str = "An unspecified error occurred";

/// Validation error used when a validation failure names no error
pub const VALIDATION_FAILED: &str = "Validation failed";

/// Outcome category of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Success,
    HasValidation,
    HasError,
    EntityNotFound,
    EntityHasError,
    EntityAlreadyExists,
    /// The operation succeeded but there is nothing to return
    NoContent,
}

impl RequestStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, RequestStatus::Success)
    }

    /// Whether the status reports a failure; `NoContent` is not one
    pub fn is_failure(&self) -> bool {
        !matches!(self, RequestStatus::Success | RequestStatus::NoContent)
    }

    /// Suggested HTTP status code for transport adapters
    pub fn http_status_hint(&self) -> u16 {
        match self {
            RequestStatus::Success => 200,
            RequestStatus::NoContent => 204,
            RequestStatus::HasValidation => 400,
            RequestStatus::EntityNotFound => 404,
            RequestStatus::EntityAlreadyExists => 409,
            RequestStatus::EntityHasError => 422,
            RequestStatus::HasError => 500,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Success => "success",
            RequestStatus::HasValidation => "has_validation",
            RequestStatus::HasError => "has_error",
            RequestStatus::EntityNotFound => "entity_not_found",
            RequestStatus::EntityHasError => "entity_has_error",
            RequestStatus::EntityAlreadyExists => "entity_already_exists",
            RequestStatus::NoContent => "no_content",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entity-scoped warning for not-found, conflict and entity-error outcomes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityWarning {
    pub entity: String,
    pub id: String,
    pub description: String,
}

impl fmt::Display for EntityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}': {}", self.entity, self.id, self.description)
    }
}

/// Status plus payload plus exactly one populated failure channel
///
/// `data` is present only for [`RequestStatus::Success`]. Failures fill one
/// channel chosen by the status: general errors (`HasError`), entity errors
/// (`EntityHasError` from [`with_entity_errors`](Self::with_entity_errors)),
/// validations (`HasValidation`) or the entity warning (`EntityNotFound`,
/// `EntityAlreadyExists`, and `EntityHasError` from
/// [`entity_has_error`](Self::entity_has_error)).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestResult<T = ()> {
    status: RequestStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    entity_errors: BTreeMap<String, Vec<String>>,
    #[serde(skip_serializing_if = "ValidationResult::is_valid")]
    validations: ValidationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    entity_warning: Option<EntityWarning>,
}

impl<T> RequestResult<T> {
    fn with_status(status: RequestStatus) -> Self {
        Self {
            status,
            data: None,
            errors: Vec::new(),
            entity_errors: BTreeMap::new(),
            validations: ValidationResult::success(),
            entity_warning: None,
        }
    }

    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            ..Self::with_status(RequestStatus::Success)
        }
    }

    /// Single general error
    pub fn with_error(message: impl Into<String>) -> Self {
        Self {
            errors: vec![message.into()],
            ..Self::with_status(RequestStatus::HasError)
        }
    }

    /// Single general error carrying the display form of `error`
    pub fn with_exception<E>(error: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        Self::with_error(error.to_string())
    }

    /// Several general errors, kept in order; blank entries are dropped
    ///
    /// With nothing left the result carries [`UNSPECIFIED_ERROR`].
    pub fn with_errors<I, S>(errors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut errors: Vec<String> = errors
            .into_iter()
            .map(Into::into)
            .filter(|e| !e.trim().is_empty())
            .collect();
        if errors.is_empty() {
            errors.push(UNSPECIFIED_ERROR.to_string());
        }
        Self {
            errors,
            ..Self::with_status(RequestStatus::HasError)
        }
    }

    /// Errors grouped by entity or context name
    ///
    /// Blank messages are dropped, as are entities left without any. When no
    /// entity remains the outcome degrades to a general `HasError`.
    pub fn with_entity_errors<I, K>(errors: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<String>)>,
        K: Into<String>,
    {
        let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (entity, messages) in errors {
            let messages: Vec<String> = messages.into_iter().filter(|m| !m.trim().is_empty()).collect();
            if !messages.is_empty() {
                grouped.entry(entity.into()).or_default().extend(messages);
            }
        }
        if grouped.is_empty() {
            return Self::with_errors(Vec::<String>::new());
        }
        Self {
            entity_errors: grouped,
            ..Self::with_status(RequestStatus::EntityHasError)
        }
    }

    /// Validation failures; an empty set becomes one object-level [`VALIDATION_FAILED`]
    pub fn with_validations<I>(messages: I) -> Self
    where
        I: IntoIterator<Item = ValidationErrorMessage>,
    {
        Self::with_validation_result(messages.into_iter().collect())
    }

    /// One field validation; a blank description becomes `"{field} is invalid"`
    pub fn with_validation(field: impl Into<String>, description: impl Into<String>) -> Self {
        let field = field.into();
        let error = ValidationErrorMessage::new(field.clone(), description)
            .or_else(|_| ValidationErrorMessage::new(field.clone(), format!("{} is invalid", field)));
        Self::with_validations(error.ok())
    }

    /// Carry every error of a failed validation pass
    ///
    /// A valid `result` still yields `HasValidation`, holding a single
    /// object-level [`VALIDATION_FAILED`] error next to its metadata.
    pub fn with_validation_result(mut result: ValidationResult) -> Self {
        if result.is_valid() {
            result.extend(ValidationErrorMessage::new("", VALIDATION_FAILED).ok());
        }
        Self {
            validations: result,
            ..Self::with_status(RequestStatus::HasValidation)
        }
    }

    pub fn no_content() -> Self {
        Self::with_status(RequestStatus::NoContent)
    }

    pub fn entity_not_found(
        entity: impl Into<String>,
        id: impl fmt::Display,
        description: impl Into<String>,
    ) -> Self {
        Self::with_warning(RequestStatus::EntityNotFound, entity, id, description)
    }

    pub fn entity_has_error(
        entity: impl Into<String>,
        id: impl fmt::Display,
        description: impl Into<String>,
    ) -> Self {
        Self::with_warning(RequestStatus::EntityHasError, entity, id, description)
    }

    pub fn entity_already_exists(
        entity: impl Into<String>,
        id: impl fmt::Display,
        description: impl Into<String>,
    ) -> Self {
        Self::with_warning(RequestStatus::EntityAlreadyExists, entity, id, description)
    }

    fn with_warning(
        status: RequestStatus,
        entity: impl Into<String>,
        id: impl fmt::Display,
        description: impl Into<String>,
    ) -> Self {
        Self {
            entity_warning: Some(EntityWarning {
                entity: entity.into(),
                id: id.to_string(),
                description: description.into(),
            }),
            ..Self::with_status(status)
        }
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn entity_errors(&self) -> &BTreeMap<String, Vec<String>> {
        &self.entity_errors
    }

    pub fn validations(&self) -> &ValidationResult {
        &self.validations
    }

    pub fn entity_warning(&self) -> Option<&EntityWarning> {
        self.entity_warning.as_ref()
    }

    /// Joined error text, `None` when there are no general or entity errors
    pub fn error_message(&self) -> Option<String> {
        let message = self.to_string();
        if message.is_empty() {
            None
        } else {
            Some(message)
        }
    }

    /// Transform the success payload, keeping every failure channel as is
    pub fn map<U, F>(self, f: F) -> RequestResult<U>
    where
        F: FnOnce(T) -> U,
    {
        RequestResult {
            status: self.status,
            data: self.data.map(f),
            errors: self.errors,
            entity_errors: self.entity_errors,
            validations: self.validations,
            entity_warning: self.entity_warning,
        }
    }

    /// `Ok(data)` on success, the whole result otherwise
    pub fn into_result(self) -> Result<T, Self> {
        match (self.status, self.data) {
            (RequestStatus::Success, Some(data)) => Ok(data),
            (status, data) => Err(Self { status, data, ..self }),
        }
    }
}

impl RequestResult {
    /// Payload-free success
    pub fn ok() -> Self {
        Self::success(())
    }
}

impl<T> fmt::Display for RequestResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entity_errors = self
            .entity_errors
            .iter()
            .flat_map(|(entity, messages)| messages.iter().map(move |m| format!("{}: {}", entity, m)));
        let joined = self
            .errors
            .iter()
            .cloned()
            .chain(entity_errors)
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

impl<T> From<ValidationErrorMessage> for RequestResult<T> {
    fn from(error: ValidationErrorMessage) -> Self {
        Self::with_validations([error])
    }
}

impl<T> From<Vec<ValidationErrorMessage>> for RequestResult<T> {
    fn from(errors: Vec<ValidationErrorMessage>) -> Self {
        Self::with_validations(errors)
    }
}
