use thiserror::Error;
use uuid::Uuid;

/// Failures reported by repository adapters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("{entity} '{id}' already exists")]
    Conflict { entity: &'static str, id: Uuid },

    #[error("{entity} '{id}' does not exist")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl RepositoryError {
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}
