//! Request and response shapes exchanged with presentation adapters

use crate::category::Category;
use crate::entity::Entity;
use crate::video::{Video, VideoDetails};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vidshare_validation::Identifiable;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCategoryRequest {
    #[serde(default)]
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Category> for CategoryDto {
    fn from(category: &Category) -> Self {
        Self {
            id: *category.id(),
            name: category.name().value().to_string(),
            description: category.description().value().map(str::to_string),
            created_at: category.created_at(),
            updated_at: category.updated_at(),
        }
    }
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self::from(&category)
    }
}

pub type CreateVideoRequest = VideoDetails;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateVideoRequest {
    #[serde(default)]
    pub id: Uuid,
    #[serde(flatten)]
    pub details: VideoDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoDto {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub duration_seconds: u32,
    /// `h:mm:ss` or `m:ss`
    pub duration: String,
    pub category_id: Uuid,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Video> for VideoDto {
    fn from(video: &Video) -> Self {
        Self {
            id: *video.id(),
            title: video.title().value().to_string(),
            description: video.description().value().map(str::to_string),
            url: video.url().value().to_string(),
            duration_seconds: video.duration().value(),
            duration: video.duration().to_string(),
            category_id: video.category_id(),
            published: video.is_published(),
            created_at: video.created_at(),
            updated_at: video.updated_at(),
        }
    }
}

impl From<Video> for VideoDto {
    fn from(video: Video) -> Self {
        Self::from(&video)
    }
}

/// 1-based page selection; `page_size` falls back to the configured default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: usize,
    #[serde(default)]
    pub page_size: Option<usize>,
}

impl PageRequest {
    pub fn first() -> Self {
        Self {
            page: 1,
            page_size: None,
        }
    }

    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page,
            page_size: Some(page_size),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.page_size.max(1))
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Convert every item, keeping the paging numbers
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total: self.total,
        }
    }
}
