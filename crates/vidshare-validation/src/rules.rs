//! Rule registry evaluated against typed entities

use crate::error::ValidationErrorMessage;
use crate::result::ValidationResult;
use crate::traits::{Identifiable, ValidationRule};
use std::sync::Arc;

/// Ad-hoc validation function registered alongside named rules
pub type ValidationFn<T> = Arc<dyn Fn(&T) -> ValidationResult + Send + Sync>;

/// Side-effect sink called once per reported error
pub type ErrorHandler = Arc<dyn Fn(&ValidationErrorMessage) + Send + Sync>;

/// Closure-backed [`ValidationRule`] for a single property
pub struct PropertyRule<T> {
    property: String,
    check: ValidationFn<T>,
}

impl<T> PropertyRule<T> {
    pub fn new<F>(property: impl Into<String>, check: F) -> Self
    where
        F: Fn(&T) -> ValidationResult + Send + Sync + 'static,
    {
        Self {
            property: property.into(),
            check: Arc::new(check),
        }
    }
}

impl<T> Clone for PropertyRule<T> {
    fn clone(&self) -> Self {
        Self {
            property: self.property.clone(),
            check: Arc::clone(&self.check),
        }
    }
}

impl<T> std::fmt::Debug for PropertyRule<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyRule")
            .field("property", &self.property)
            .finish()
    }
}

impl<T> ValidationRule<T> for PropertyRule<T> {
    fn property_name(&self) -> &str {
        &self.property
    }

    fn validate(&self, entity: &T) -> ValidationResult {
        (self.check)(entity)
    }
}

/// Ordered set of rules and validation functions for one entity type
///
/// Rules are registered while the application is being wired up and only
/// read afterwards, so a shared instance can serve concurrent callers.
/// Every registered check runs on each call and their errors are combined;
/// one failing rule never hides another.
pub struct ValidationService<T> {
    rules: Vec<Arc<dyn ValidationRule<T>>>,
    validations: Vec<ValidationFn<T>>,
    error_handler: Option<ErrorHandler>,
}

impl<T> ValidationService<T> {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            validations: Vec::new(),
            error_handler: None,
        }
    }

    /// Register a named rule
    pub fn add_rule<R>(&mut self, rule: R) -> &mut Self
    where
        R: ValidationRule<T> + 'static,
    {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Register an ad-hoc validation function
    pub fn add_validation<F>(&mut self, validation: F) -> &mut Self
    where
        F: Fn(&T) -> ValidationResult + Send + Sync + 'static,
    {
        self.validations.push(Arc::new(validation));
        self
    }

    pub fn set_error_handler<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(&ValidationErrorMessage) + Send + Sync + 'static,
    {
        self.error_handler = Some(Arc::new(handler));
        self
    }

    /// Consuming form of [`add_rule`](Self::add_rule) for composition roots
    pub fn rule<R>(mut self, rule: R) -> Self
    where
        R: ValidationRule<T> + 'static,
    {
        self.add_rule(rule);
        self
    }

    pub fn validation<F>(mut self, validation: F) -> Self
    where
        F: Fn(&T) -> ValidationResult + Send + Sync + 'static,
    {
        self.add_validation(validation);
        self
    }

    pub fn error_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&ValidationErrorMessage) + Send + Sync + 'static,
    {
        self.set_error_handler(handler);
        self
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn validation_count(&self) -> usize {
        self.validations.len()
    }

    /// Property names guarded by registered rules, in registration order
    pub fn validated_properties(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.property_name()).collect()
    }

    /// Run every rule and function against `entity`
    ///
    /// A missing entity yields a single `"{Type} cannot be null"` error on the
    /// `entity` field instead of a panic.
    pub fn validate<'a>(&self, entity: impl Into<Option<&'a T>>) -> ValidationResult
    where
        T: 'a,
    {
        let result = match entity.into() {
            Some(entity) => self.run(entity),
            None => missing_entity::<T>(),
        };
        self.report(&result);
        result
    }

    /// [`validate`](Self::validate) plus a check that the entity already has an identifier
    pub fn validate_update<'a>(&self, entity: impl Into<Option<&'a T>>) -> ValidationResult
    where
        T: Identifiable + 'a,
    {
        let result = match entity.into() {
            Some(entity) => {
                let mut result = self.run(entity);
                if !entity.has_identity() {
                    if let Ok(error) = ValidationErrorMessage::new("id", "ID is required for updates") {
                        result.push(error);
                    }
                }
                result
            }
            None => missing_entity::<T>(),
        };
        self.report(&result);
        result
    }

    fn run(&self, entity: &T) -> ValidationResult {
        let from_rules = self.rules.iter().map(|rule| rule.validate(entity));
        let from_functions = self.validations.iter().map(|validation| validation(entity));
        ValidationResult::combine(from_rules.chain(from_functions))
    }

    fn report(&self, result: &ValidationResult) {
        if result.is_valid() {
            return;
        }

        tracing::debug!(
            entity = type_name::<T>(),
            errors = result.error_count(),
            "entity failed validation"
        );

        if let Some(handler) = &self.error_handler {
            for error in result.errors() {
                handler(error);
            }
        }
    }
}

impl<T> Default for ValidationService<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ValidationService<T> {
    fn clone(&self) -> Self {
        Self {
            rules: self.rules.clone(),
            validations: self.validations.clone(),
            error_handler: self.error_handler.clone(),
        }
    }
}

impl<T> std::fmt::Debug for ValidationService<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationService")
            .field("entity", &type_name::<T>())
            .field("rules", &self.validated_properties())
            .field("validation_count", &self.validations.len())
            .field("has_error_handler", &self.error_handler.is_some())
            .finish()
    }
}

fn missing_entity<T>() -> ValidationResult {
    let message = format!("{} cannot be null", type_name::<T>());
    ValidationErrorMessage::new("entity", message)
        .map(ValidationResult::from)
        .unwrap_or_default()
}

/// Unqualified type name, e.g. `Category` rather than `vidshare_catalog::category::Category`
fn type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ValidationBuilder;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct Channel {
        id: u64,
        name: String,
        handle: String,
    }

    impl Identifiable for Channel {
        type Id = u64;

        fn id(&self) -> &u64 {
            &self.id
        }
    }

    fn service() -> ValidationService<Channel> {
        ValidationService::new()
            .rule(PropertyRule::new("name", |c: &Channel| {
                ValidationBuilder::new()
                    .with_field("name", c.name.as_str())
                    .not_empty()
                    .build()
            }))
            .rule(PropertyRule::new("handle", |c: &Channel| {
                ValidationBuilder::new()
                    .with_field("handle", c.handle.as_str())
                    .matches("^@")
                    .build()
            }))
    }

    #[test]
    fn test_missing_entity_reports_type_name() {
        let result = service().validate(None);
        assert_eq!(result.error_count(), 1);
        let error = result.first_error().unwrap();
        assert_eq!(error.field(), "entity");
        assert_eq!(error.message(), "Channel cannot be null");
    }

    #[test]
    fn test_all_rules_are_reported() {
        let channel = Channel { id: 1, name: String::new(), handle: "plain".into() };
        let result = service().validate(&channel);
        assert_eq!(result.error_count(), 2);
        assert!(result.has_field_errors("name"));
        assert!(result.has_field_errors("handle"));
    }

    #[test]
    fn test_functions_run_after_rules() {
        let svc = service().validation(|c: &Channel| {
            ValidationBuilder::new()
                .ensure(|| c.name != c.handle, "name and handle must differ")
                .build()
        });
        let channel = Channel { id: 1, name: "@x".into(), handle: "@x".into() };
        let result = svc.validate(&channel);
        assert_eq!(result.error_messages(), vec!["name and handle must differ"]);
        assert_eq!(svc.rule_count(), 2);
        assert_eq!(svc.validation_count(), 1);
        assert_eq!(svc.validated_properties(), vec!["name", "handle"]);
    }

    #[test]
    fn test_validate_update_requires_identifier() {
        let channel = Channel { id: 0, name: String::new(), handle: "@ok".into() };
        let created = service().validate(&channel);
        let updated = service().validate_update(&channel);
        assert_eq!(created.error_count(), 1);
        assert_eq!(updated.error_count(), 2);
        assert!(updated
            .errors()
            .iter()
            .any(|e| e.field() == "id" && e.message() == "ID is required for updates"));
    }

    #[test]
    fn test_validate_update_rejects_negative_identifier() {
        struct Ledger {
            id: i64,
        }

        impl Identifiable for Ledger {
            type Id = i64;

            fn id(&self) -> &i64 {
                &self.id
            }
        }

        let service = ValidationService::<Ledger>::new();
        let result = service.validate_update(&Ledger { id: -1 });
        assert!(result.has_field_errors("id"));
        assert!(service.validate_update(&Ledger { id: 12 }).is_valid());
    }

    #[test]
    fn test_error_handler_sees_every_error_without_changing_result() {
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        let svc = service().error_handler(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let channel = Channel { id: 3, name: String::new(), handle: "nope".into() };
        let result = svc.validate(&channel);
        assert_eq!(seen.load(Ordering::SeqCst), 2);
        assert_eq!(result.error_count(), 2);

        let valid = Channel { id: 3, name: "News".into(), handle: "@news".into() };
        assert!(svc.validate(&valid).is_valid());
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_type_name_strips_path() {
        assert_eq!(type_name::<Channel>(), "Channel");
        assert_eq!(type_name::<Vec<String>>(), "Vec");
    }
}
