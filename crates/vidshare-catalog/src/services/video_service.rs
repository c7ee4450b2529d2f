use super::{
    domain_failure, page_result, page_window, repository_failure, validate_page, validate_search_term,
};
use crate::dto::{CreateVideoRequest, Page, PageRequest, UpdateVideoRequest, VideoDto};
use crate::repository::{CategoryRepository, VideoRepository};
use crate::video::Video;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;
use vidshare_core::{AppConfig, RequestResult};
use vidshare_validation::Identifiable;

/// Video use cases; every video must point at an existing category
#[derive(Clone)]
pub struct VideoService {
    videos: Arc<dyn VideoRepository>,
    categories: Arc<dyn CategoryRepository>,
    config: AppConfig,
}

impl VideoService {
    pub fn new(
        videos: Arc<dyn VideoRepository>,
        categories: Arc<dyn CategoryRepository>,
        config: AppConfig,
    ) -> Self {
        Self {
            videos,
            categories,
            config,
        }
    }

    pub async fn create(&self, request: &CreateVideoRequest) -> RequestResult<VideoDto> {
        let video = Video::draft(request);
        let validation = Video::validator().validate(&video);
        if validation.is_invalid() {
            debug!(errors = validation.error_count(), "video rejected");
            return RequestResult::with_validation_result(validation);
        }

        if let Some(failure) = self.require_category(request.category_id).await {
            return failure;
        }

        match self.videos.insert(video).await {
            Ok(saved) => {
                info!(id = %saved.id(), title = %saved.title(), "video created");
                RequestResult::success(VideoDto::from(saved))
            }
            Err(e) => repository_failure(e),
        }
    }

    pub async fn update(&self, request: &UpdateVideoRequest) -> RequestResult<VideoDto> {
        let candidate = Video::draft(&request.details).with_id(request.id);
        let validation = Video::validator().validate_update(&candidate);
        if validation.is_invalid() {
            return RequestResult::with_validation_result(validation);
        }

        let mut existing = match self.videos.get(request.id).await {
            Ok(Some(video)) => video,
            Ok(None) => return not_found(request.id),
            Err(e) => return repository_failure(e),
        };

        if existing.category_id() != request.details.category_id {
            if let Some(failure) = self.require_category(request.details.category_id).await {
                return failure;
            }
        }

        if let Err(e) = existing.update(&request.details) {
            return domain_failure(e);
        }

        match self.videos.update(existing).await {
            Ok(saved) => {
                info!(id = %saved.id(), "video updated");
                RequestResult::success(VideoDto::from(saved))
            }
            Err(e) => repository_failure(e),
        }
    }

    pub async fn get(&self, id: Uuid) -> RequestResult<VideoDto> {
        match self.videos.get(id).await {
            Ok(Some(video)) => RequestResult::success(VideoDto::from(video)),
            Ok(None) => not_found(id),
            Err(e) => repository_failure(e),
        }
    }

    pub async fn list(&self, request: &PageRequest) -> RequestResult<Page<VideoDto>> {
        let validation = validate_page(request);
        if validation.is_invalid() {
            return RequestResult::with_validation_result(validation);
        }

        let (offset, limit) = page_window(&self.config, request);
        match self.videos.list(offset, limit).await {
            Ok((items, total)) => page_result(items, total, request, limit),
            Err(e) => repository_failure(e),
        }
    }

    pub async fn list_by_category(
        &self,
        category_id: Uuid,
        request: &PageRequest,
    ) -> RequestResult<Page<VideoDto>> {
        let validation = validate_page(request);
        if validation.is_invalid() {
            return RequestResult::with_validation_result(validation);
        }
        if let Some(failure) = self.require_category(category_id).await {
            return failure;
        }

        let (offset, limit) = page_window(&self.config, request);
        match self.videos.list_by_category(category_id, offset, limit).await {
            Ok((items, total)) => page_result(items, total, request, limit),
            Err(e) => repository_failure(e),
        }
    }

    pub async fn search(&self, term: &str) -> RequestResult<Vec<VideoDto>> {
        let validation = validate_search_term(term);
        if validation.is_invalid() {
            return RequestResult::with_validation_result(validation);
        }

        match self.videos.search(term, self.config.max_search_results).await {
            Ok(found) if found.is_empty() => RequestResult::no_content(),
            Ok(found) => RequestResult::success(found.into_iter().map(VideoDto::from).collect()),
            Err(e) => repository_failure(e),
        }
    }

    /// `Some` failure when the category is missing or cannot be looked up
    async fn require_category<T>(&self, category_id: Uuid) -> Option<RequestResult<T>> {
        match self.categories.get(category_id).await {
            Ok(Some(_)) => None,
            Ok(None) => {
                debug!(%category_id, "video references unknown category");
                Some(RequestResult::entity_not_found(
                    "Category",
                    category_id,
                    "Category was not found",
                ))
            }
            Err(e) => Some(repository_failure(e)),
        }
    }
}

fn not_found<T>(id: Uuid) -> RequestResult<T> {
    debug!(%id, "video not found");
    RequestResult::entity_not_found("Video", id, "Video was not found")
}
