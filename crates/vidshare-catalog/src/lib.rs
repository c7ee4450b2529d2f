//! # vidshare-catalog
//!
//! Categories and videos: entities validated through shared rule sets,
//! repository ports with an in-memory adapter, and use case services that
//! report every outcome as a `RequestResult`.
//!
//! ```
//! use std::sync::Arc;
//! use vidshare_catalog::{CategoryService, CreateCategoryRequest, InMemoryCategoryRepository};
//! use vidshare_core::{AppConfig, RequestStatus};
//!
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! runtime.block_on(async {
//!     let service = CategoryService::new(Arc::new(InMemoryCategoryRepository::new()), AppConfig::testing());
//!     let request = CreateCategoryRequest { name: String::new(), description: None };
//!     let result = service.create(&request).await;
//!     assert_eq!(result.status(), RequestStatus::HasValidation);
//! });
//! ```

pub mod category;
pub mod dto;
pub mod entity;
pub mod error;
pub mod repository;
pub mod services;
pub mod value_objects;
pub mod video;

pub use category::Category;
pub use dto::{
    CategoryDto, CreateCategoryRequest, CreateVideoRequest, Page, PageRequest, UpdateCategoryRequest,
    UpdateVideoRequest, VideoDto,
};
pub use entity::Entity;
pub use error::RepositoryError;
pub use repository::{
    CategoryRepository, InMemoryCategoryRepository, InMemoryStore, InMemoryVideoRepository, VideoRepository,
};
pub use services::{CategoryService, VideoService};
pub use value_objects::{Description, DurationSeconds, Name, Title, VideoUrl};
pub use video::{Video, VideoDetails};
