//! Core validation traits

use crate::result::ValidationResult;
use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

/// A named check applied to a whole entity
///
/// Rules carry no state of their own: one instance is registered at startup
/// and evaluated against many entities.
pub trait ValidationRule<T>: Send + Sync {
    /// Name of the property this rule guards
    fn property_name(&self) -> &str;

    fn validate(&self, entity: &T) -> ValidationResult;
}

/// Identifier types that can tell an assigned value from a placeholder
pub trait IdentityValue {
    /// Non-default and, for numbers, positive; for text, non-blank
    fn is_assigned(&self) -> bool;
}

macro_rules! positive_identity {
    ($($ty:ty),*) => {
        $(
            impl IdentityValue for $ty {
                fn is_assigned(&self) -> bool {
                    *self > 0
                }
            }
        )*
    };
}

positive_identity!(i32, i64, u32, u64, usize);

impl IdentityValue for Uuid {
    fn is_assigned(&self) -> bool {
        !self.is_nil()
    }
}

impl IdentityValue for String {
    fn is_assigned(&self) -> bool {
        !self.trim().is_empty()
    }
}

/// Entities with an identifier assigned by persistence
pub trait Identifiable {
    type Id: IdentityValue;

    fn id(&self) -> &Self::Id;

    /// Whether the identifier holds a usable value
    fn has_identity(&self) -> bool {
        self.id().is_assigned()
    }
}

/// Trait for types that can be converted to a validation value
pub trait ToValidationValue {
    fn to_validation_value(&self) -> Value;
}

impl ToValidationValue for String {
    fn to_validation_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl ToValidationValue for str {
    fn to_validation_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl ToValidationValue for i32 {
    fn to_validation_value(&self) -> Value {
        Value::Number(serde_json::Number::from(*self))
    }
}

impl ToValidationValue for i64 {
    fn to_validation_value(&self) -> Value {
        Value::Number(serde_json::Number::from(*self))
    }
}

impl ToValidationValue for u32 {
    fn to_validation_value(&self) -> Value {
        Value::Number(serde_json::Number::from(*self))
    }
}

impl ToValidationValue for u64 {
    fn to_validation_value(&self) -> Value {
        Value::Number(serde_json::Number::from(*self))
    }
}

impl ToValidationValue for usize {
    fn to_validation_value(&self) -> Value {
        Value::Number(serde_json::Number::from(*self))
    }
}

impl ToValidationValue for f64 {
    fn to_validation_value(&self) -> Value {
        serde_json::Number::from_f64(*self)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

impl ToValidationValue for bool {
    fn to_validation_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl ToValidationValue for Uuid {
    fn to_validation_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl ToValidationValue for DateTime<Utc> {
    fn to_validation_value(&self) -> Value {
        Value::String(self.to_rfc3339())
    }
}

impl ToValidationValue for Value {
    fn to_validation_value(&self) -> Value {
        self.clone()
    }
}

impl<T> ToValidationValue for Option<T>
where
    T: ToValidationValue,
{
    fn to_validation_value(&self) -> Value {
        match self {
            Some(value) => value.to_validation_value(),
            None => Value::Null,
        }
    }
}

impl<T> ToValidationValue for Vec<T>
where
    T: ToValidationValue,
{
    fn to_validation_value(&self) -> Value {
        Value::Array(self.iter().map(|item| item.to_validation_value()).collect())
    }
}

impl<T> ToValidationValue for &T
where
    T: ToValidationValue + ?Sized,
{
    fn to_validation_value(&self) -> Value {
        (**self).to_validation_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Record {
        id: i64,
    }

    impl Identifiable for Record {
        type Id = i64;

        fn id(&self) -> &i64 {
            &self.id
        }
    }

    #[test]
    fn test_to_validation_value() {
        assert_eq!("hello".to_validation_value(), Value::String("hello".to_string()));
        assert_eq!(42i32.to_validation_value(), Value::Number(serde_json::Number::from(42)));
        assert_eq!(true.to_validation_value(), Value::Bool(true));

        let opt_str: Option<String> = Some("test".to_string());
        assert_eq!(opt_str.to_validation_value(), Value::String("test".to_string()));

        let opt_none: Option<String> = None;
        assert_eq!(opt_none.to_validation_value(), Value::Null);
        assert_eq!(f64::NAN.to_validation_value(), Value::Null);
    }

    #[test]
    fn test_identity_defaults() {
        assert!(!Record { id: 0 }.has_identity());
        assert!(!Record { id: -1 }.has_identity());
        assert!(Record { id: 7 }.has_identity());
    }

    #[test]
    fn test_identity_values() {
        assert!(!Uuid::nil().is_assigned());
        assert!(Uuid::new_v4().is_assigned());
        assert!(!" ".to_string().is_assigned());
        assert!("slug".to_string().is_assigned());
        assert!(!0u64.is_assigned());
    }
}
