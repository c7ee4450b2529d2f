//! Use cases over the catalog repositories
//!
//! Every operation answers with a [`RequestResult`]; nothing here returns
//! `Err` or panics for bad input, missing entities or storage failures.

pub mod category_service;
pub mod video_service;

pub use category_service::CategoryService;
pub use video_service::VideoService;

use crate::dto::{Page, PageRequest};
use crate::error::RepositoryError;
use serde_json::Value;
use vidshare_core::{AppConfig, RequestResult};
use vidshare_validation::{DomainError, ValidationBuilder, ValidationResult};

pub(crate) const SEARCH_TERM_MAX_LENGTH: usize = 100;

/// Entity invariant failures surface as validations when they name fields
pub(crate) fn domain_failure<T>(error: DomainError) -> RequestResult<T> {
    if error.errors().is_empty() {
        RequestResult::with_error(error.message())
    } else {
        RequestResult::with_validations(error.into_errors())
    }
}

pub(crate) fn repository_failure<T>(error: RepositoryError) -> RequestResult<T> {
    tracing::warn!(error = %error, "repository operation failed");
    match error {
        RepositoryError::Conflict { entity, id } => {
            RequestResult::entity_already_exists(entity, id, format!("{} already exists", entity))
        }
        RepositoryError::NotFound { entity, id } => {
            RequestResult::entity_not_found(entity, id, format!("{} was not found", entity))
        }
        RepositoryError::Storage { .. } => RequestResult::with_exception(&error),
    }
}

pub(crate) fn validate_page(request: &PageRequest) -> ValidationResult {
    ValidationBuilder::new()
        .with_field("page", request.page)
        .custom(at_least_one, "page must be at least 1")
        .with_field("page_size", request.page_size)
        .custom(at_least_one, "page_size must be at least 1")
        .build()
}

// Null passes so an absent page size falls back to the configured default
fn at_least_one(value: &Value) -> bool {
    value.is_null() || value.as_u64().map_or(false, |n| n >= 1)
}

pub(crate) fn validate_search_term(term: &str) -> ValidationResult {
    ValidationBuilder::new()
        .with_field("term", term)
        .not_white_space()
        .max_length(SEARCH_TERM_MAX_LENGTH)
        .build()
}

/// Resolve a validated page request into `(offset, limit)`
pub(crate) fn page_window(config: &AppConfig, request: &PageRequest) -> (usize, usize) {
    let limit = config.page_size(request.page_size);
    let offset = request.page.saturating_sub(1).saturating_mul(limit);
    (offset, limit)
}

/// Wrap a fetched window, answering `NoContent` when it is empty
pub(crate) fn page_result<E, T>(
    items: Vec<E>,
    total: usize,
    request: &PageRequest,
    limit: usize,
) -> RequestResult<Page<T>>
where
    T: From<E>,
{
    if items.is_empty() {
        return RequestResult::no_content();
    }
    RequestResult::success(Page {
        items: items.into_iter().map(T::from).collect(),
        page: request.page,
        page_size: limit,
        total,
    })
}
