//! # vidshare-validation
//!
//! Field-scoped validation results with logical combinators, a fluent
//! per-field builder and a rule registry evaluated against typed entities.

pub mod builder;
pub mod error;
pub mod result;
pub mod rules;
pub mod traits;

// Re-exports for easy access
pub use builder::ValidationBuilder;
pub use error::{ArgumentError, DomainError, ValidationErrorMessage};
pub use result::ValidationResult;
pub use rules::{ErrorHandler, PropertyRule, ValidationFn, ValidationService};
pub use traits::{Identifiable, IdentityValue, ToValidationValue, ValidationRule};
