use thiserror::Error;

/// Failures while loading or checking [`AppConfig`](super::AppConfig)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{field} must be set (via {env_var})")]
    MissingRequired { field: String, env_var: &'static str },

    #[error("{field} = '{value}' is invalid, expected {expected}")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },

    #[error("inconsistent configuration: {message}")]
    ValidationFailed { message: String },

    #[error("{var} does not hold valid unicode")]
    EnvironmentError { var: &'static str },
}

impl ConfigError {
    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }

    /// Name of the offending field, when the error concerns a single one
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingRequired { field, .. } | Self::InvalidValue { field, .. } => Some(field),
            Self::ValidationFailed { .. } | Self::EnvironmentError { .. } => None,
        }
    }
}
