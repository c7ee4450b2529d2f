use crate::entity::Entity;
use crate::value_objects::{Description, Name};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use uuid::Uuid;
use vidshare_validation::{DomainError, Identifiable, PropertyRule, ValidationService};

/// Video category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    id: Uuid,
    name: Name,
    description: Description,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Category {
    pub const DESCRIPTION_MAX_LENGTH: usize = 200;

    /// Unsaved category holding the given values, not yet validated
    pub fn draft(name: &str, description: Option<&str>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::nil(),
            name: Name::new(name),
            description: Description::new(description),
            created_at: now,
            updated_at: now,
        }
    }

    /// Validated, unsaved category
    pub fn create(name: &str, description: Option<&str>) -> Result<Self, DomainError> {
        let category = Self::draft(name, description);
        Self::validator().validate(&category).ensure_valid()?;
        Ok(category)
    }

    /// Replace name and description, leaving `self` untouched when the new values are invalid
    pub fn update(&mut self, name: &str, description: Option<&str>) -> Result<(), DomainError> {
        let mut candidate = self.clone();
        candidate.name = Name::new(name);
        candidate.description = Description::new(description);
        Self::validator().validate(&candidate).ensure_valid()?;

        candidate.updated_at = Utc::now();
        *self = candidate;
        Ok(())
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn description(&self) -> &Description {
        &self.description
    }

    pub(crate) fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Shared rule set: name required and at most 100 characters, description at most 200
    pub fn validator() -> &'static ValidationService<Category> {
        static VALIDATOR: OnceLock<ValidationService<Category>> = OnceLock::new();
        VALIDATOR.get_or_init(|| {
            ValidationService::new()
                .rule(PropertyRule::new("name", |c: &Category| c.name.validate("name")))
                .rule(PropertyRule::new("description", |c: &Category| {
                    c.description.validate("description", Category::DESCRIPTION_MAX_LENGTH)
                }))
        })
    }
}

impl Identifiable for Category {
    type Id = Uuid;

    fn id(&self) -> &Uuid {
        &self.id
    }
}

impl Entity for Category {
    const NAME: &'static str = "Category";

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn assign_id(&mut self, id: Uuid) {
        self.id = id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_valid_category() {
        let category = Category::create("Tech", Some("desc")).unwrap();
        assert_eq!(category.name().value(), "Tech");
        assert_eq!(category.description().value(), Some("desc"));
        assert!(!category.has_identity());
    }

    #[test]
    fn test_create_rejects_empty_name() {
        let err = Category::create("", None).unwrap_err();
        assert_eq!(err.errors().len(), 1);
        assert_eq!(err.errors()[0].field(), "name");
    }

    #[test]
    fn test_update_keeps_state_on_failure() {
        let mut category = Category::create("Tech", None).unwrap();
        let long = "d".repeat(201);
        assert!(category.update("Science", Some(long.as_str())).is_err());
        assert_eq!(category.name().value(), "Tech");

        category.update("Science", None).unwrap();
        assert_eq!(category.name().value(), "Science");
        assert!(category.updated_at() >= category.created_at());
    }

    #[test]
    fn test_validate_update_requires_saved_category() {
        let draft = Category::draft("Tech", None);
        assert!(Category::validator().validate(&draft).is_valid());

        let result = Category::validator().validate_update(&draft);
        assert_eq!(result.error_messages(), vec!["ID is required for updates"]);

        let saved = draft.with_id(Uuid::new_v4());
        assert!(Category::validator().validate_update(&saved).is_valid());
    }
}
