use crate::entity::Entity;
use crate::value_objects::{Description, DurationSeconds, Title, VideoUrl};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use uuid::Uuid;
use vidshare_validation::{
    DomainError, Identifiable, PropertyRule, ValidationBuilder, ValidationService,
};

/// Raw values a video is built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoDetails {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub url: String,
    pub duration_seconds: u32,
    pub category_id: Uuid,
    #[serde(default)]
    pub published: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    id: Uuid,
    title: Title,
    description: Description,
    url: VideoUrl,
    duration: DurationSeconds,
    category_id: Uuid,
    published: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Video {
    pub const DESCRIPTION_MAX_LENGTH: usize = 2000;

    /// Unsaved video holding `details`, not yet validated
    pub fn draft(details: &VideoDetails) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::nil(),
            title: Title::new(&details.title),
            description: Description::new(details.description.as_deref()),
            url: VideoUrl::new(&details.url),
            duration: DurationSeconds::new(details.duration_seconds),
            category_id: details.category_id,
            published: details.published,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn create(details: &VideoDetails) -> Result<Self, DomainError> {
        let video = Self::draft(details);
        Self::validator().validate(&video).ensure_valid()?;
        Ok(video)
    }

    /// Apply new details, leaving `self` untouched when they are invalid
    pub fn update(&mut self, details: &VideoDetails) -> Result<(), DomainError> {
        let candidate = Self {
            id: self.id,
            created_at: self.created_at,
            updated_at: Utc::now(),
            ..Self::draft(details)
        };
        Self::validator().validate(&candidate).ensure_valid()?;
        *self = candidate;
        Ok(())
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn description(&self) -> &Description {
        &self.description
    }

    pub fn url(&self) -> &VideoUrl {
        &self.url
    }

    pub fn duration(&self) -> DurationSeconds {
        self.duration
    }

    pub fn category_id(&self) -> Uuid {
        self.category_id
    }

    pub fn is_published(&self) -> bool {
        self.published
    }

    pub(crate) fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn validator() -> &'static ValidationService<Video> {
        static VALIDATOR: OnceLock<ValidationService<Video>> = OnceLock::new();
        VALIDATOR.get_or_init(|| {
            ValidationService::new()
                .rule(PropertyRule::new("title", |v: &Video| v.title.validate("title")))
                .rule(PropertyRule::new("description", |v: &Video| {
                    v.description.validate("description", Video::DESCRIPTION_MAX_LENGTH)
                }))
                .rule(PropertyRule::new("url", |v: &Video| v.url.validate("url")))
                .rule(PropertyRule::new("duration", |v: &Video| v.duration.validate("duration")))
                .rule(PropertyRule::new("category_id", |v: &Video| {
                    ValidationBuilder::new()
                        .with_field("category_id", v.category_id)
                        .custom(|_| !v.category_id.is_nil(), "category_id is required")
                        .build()
                }))
                .validation(|v: &Video| {
                    ValidationBuilder::new()
                        .with_field("description", v.description.value())
                        .ensure(
                            || !v.published || !v.description.is_empty(),
                            "Published videos need a description",
                        )
                        .build()
                })
        })
    }
}

impl Identifiable for Video {
    type Id = Uuid;

    fn id(&self) -> &Uuid {
        &self.id
    }
}

impl Entity for Video {
    const NAME: &'static str = "Video";

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

    fn details() -> VideoDetails {
        VideoDetails {
            title: "Ownership in five minutes".into(),
            description: Some("Borrowing explained".into()),
            url: "https://cdn.example.com/v/ownership.mp4".into(),
            duration_seconds: 300,
            category_id: Uuid::new_v4(),
            published: true,
        }
    }

    #[test]
    fn test_create_valid_video() {
        let video = Video::create(&details()).unwrap();
        assert_eq!(video.title().value(), "Ownership in five minutes");
        assert_eq!(video.duration().value(), 300);
        assert!(video.is_published());
    }

    #[test]
    fn test_every_rule_reports() {
        let input = VideoDetails {
            title: String::new(),
            description: None,
            url: "not a url".into(),
            duration_seconds: 0,
            category_id: Uuid::nil(),
            published: true,
        };
        let result = Video::validator().validate(&Video::draft(&input));
        for field in ["title", "url", "duration", "category_id", "description"] {
            assert!(result.has_field_errors(field), "missing error for {field}");
        }
        assert_eq!(result.error_count(), 5);
    }

    #[test]
    fn test_unpublished_video_may_skip_description() {
        let input = VideoDetails {
            description: None,
            published: false,
            ..details()
        };
        assert!(Video::create(&input).is_ok());
    }

    #[test]
    fn test_update_preserves_identity() {
        let mut video = Video::create(&details()).unwrap().with_id(Uuid::new_v4());
        let id = *video.id();
        let created = video.created_at();

        let changed = VideoDetails {
            title: "Lifetimes".into(),
            ..details()
        };
        video.update(&changed).unwrap();
        assert_eq!(*video.id(), id);
        assert_eq!(video.created_at(), created);
        assert_eq!(video.title().value(), "Lifetimes");

        let broken = VideoDetails {
            duration_seconds: 0,
            ..details()
        };
        assert!(video.update(&broken).is_err());
        assert_eq!(video.title().value(), "Lifetimes");
    }
}
