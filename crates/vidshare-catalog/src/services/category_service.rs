use super::{
    domain_failure, page_result, page_window, repository_failure, validate_page, validate_search_term,
};
use crate::category::Category;
use crate::dto::{CategoryDto, CreateCategoryRequest, Page, PageRequest, UpdateCategoryRequest};
use crate::repository::CategoryRepository;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;
use vidshare_core::{AppConfig, RequestResult};
use vidshare_validation::Identifiable;

/// Category use cases
#[derive(Clone)]
pub struct CategoryService {
    repository: Arc<dyn CategoryRepository>,
    config: AppConfig,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepository>, config: AppConfig) -> Self {
        Self { repository, config }
    }

    pub async fn create(&self, request: &CreateCategoryRequest) -> RequestResult<Category> {
        let category = Category::draft(&request.name, request.description.as_deref());
        let validation = Category::validator().validate(&category);
        if validation.is_invalid() {
            debug!(errors = validation.error_count(), "category rejected");
            return RequestResult::with_validation_result(validation);
        }

        match self.repository.find_by_name(category.name().value()).await {
            Ok(Some(existing)) => {
                return RequestResult::entity_already_exists(
                    "Category",
                    existing.id(),
                    format!("A category named '{}' already exists", existing.name()),
                );
            }
            Ok(None) => {}
            Err(e) => return repository_failure(e),
        }

        match self.repository.insert(category).await {
            Ok(saved) => {
                info!(id = %saved.id(), name = %saved.name(), "category created");
                RequestResult::success(saved)
            }
            Err(e) => repository_failure(e),
        }
    }

    pub async fn update(&self, request: &UpdateCategoryRequest) -> RequestResult<Category> {
        let candidate =
            Category::draft(&request.name, request.description.as_deref()).with_id(request.id);
        let validation = Category::validator().validate_update(&candidate);
        if validation.is_invalid() {
            return RequestResult::with_validation_result(validation);
        }

        let mut existing = match self.repository.get(request.id).await {
            Ok(Some(category)) => category,
            Ok(None) => return not_found(request.id),
            Err(e) => return repository_failure(e),
        };

        match self.repository.find_by_name(candidate.name().value()).await {
            Ok(Some(other)) if other.id() != existing.id() => {
                return RequestResult::entity_already_exists(
                    "Category",
                    other.id(),
                    format!("A category named '{}' already exists", other.name()),
                );
            }
            Ok(_) => {}
            Err(e) => return repository_failure(e),
        }

        if let Err(e) = existing.update(&request.name, request.description.as_deref()) {
            return domain_failure(e);
        }

        match self.repository.update(existing).await {
            Ok(saved) => {
                info!(id = %saved.id(), "category updated");
                RequestResult::success(saved)
            }
            Err(e) => repository_failure(e),
        }
    }

    pub async fn get(&self, id: Uuid) -> RequestResult<CategoryDto> {
        match self.repository.get(id).await {
            Ok(Some(category)) => RequestResult::success(CategoryDto::from(category)),
            Ok(None) => not_found(id),
            Err(e) => repository_failure(e),
        }
    }

    pub async fn list(&self, request: &PageRequest) -> RequestResult<Page<CategoryDto>> {
        let validation = validate_page(request);
        if validation.is_invalid() {
            return RequestResult::with_validation_result(validation);
        }

        let (offset, limit) = page_window(&self.config, request);
        match self.repository.list(offset, limit).await {
            Ok((items, total)) => page_result(items, total, request, limit),
            Err(e) => repository_failure(e),
        }
    }

    /// Case-insensitive match on name or description, capped at `max_search_results`
    pub async fn search(&self, term: &str) -> RequestResult<Vec<CategoryDto>> {
        let validation = validate_search_term(term);
        if validation.is_invalid() {
            return RequestResult::with_validation_result(validation);
        }

        match self.repository.search(term, self.config.max_search_results).await {
            Ok(found) if found.is_empty() => RequestResult::no_content(),
            Ok(found) => RequestResult::success(found.into_iter().map(CategoryDto::from).collect()),
            Err(e) => repository_failure(e),
        }
    }
}

fn not_found<T>(id: Uuid) -> RequestResult<T> {
    debug!(%id, "category not found");
    RequestResult::entity_not_found("Category", id, "Category was not found")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;
    use crate::repository::InMemoryCategoryRepository;
    use tracing_test::traced_test;
    use vidshare_core::RequestStatus;

    fn service() -> CategoryService {
        CategoryService::new(Arc::new(InMemoryCategoryRepository::new()), AppConfig::testing())
    }

    fn request(name: &str, description: Option<&str>) -> CreateCategoryRequest {
        CreateCategoryRequest {
            name: name.to_string(),
            description: description.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_create_category() {
        let result = service().create(&request("Tech", Some("desc"))).await;
        assert_eq!(result.status(), RequestStatus::Success);
        let category = result.data().unwrap();
        assert_eq!(category.name().value(), "Tech");
        assert!(category.has_identity());
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_name() {
        let result = service().create(&request("", None)).await;
        assert_eq!(result.status(), RequestStatus::HasValidation);
        assert!(result.validations().has_field_errors("name"));
        assert!(result.data().is_none());
    }

    #[traced_test]
    #[tokio::test]
    async fn test_create_logs_new_category() {
        service().create(&request("Tech", None)).await;
        assert!(logs_contain("category created"));
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_name() {
        let service = service();
        assert!(service.create(&request("Tech", None)).await.is_success());

        let result = service.create(&request("tech", None)).await;
        assert_eq!(result.status(), RequestStatus::EntityAlreadyExists);
        assert_eq!(result.entity_warning().unwrap().entity, "Category");
    }

    #[tokio::test]
    async fn test_concurrent_creates_of_one_name() {
        let service = service();
        let first_request = request("Tech", None);
        let second_request = request("TECH", None);
        let (first, second) = tokio::join!(
            service.create(&first_request),
            service.create(&second_request),
        );

        let mut statuses = vec![first.status(), second.status()];
        statuses.sort_by_key(|status| status.as_str());
        assert_eq!(
            statuses,
            vec![RequestStatus::EntityAlreadyExists, RequestStatus::Success]
        );
    }

    #[tokio::test]
    async fn test_update_without_id() {
        let result = service()
            .update(&UpdateCategoryRequest {
                id: Uuid::nil(),
                name: "Tech".into(),
                description: None,
            })
            .await;
        assert_eq!(result.status(), RequestStatus::HasValidation);
        assert!(result.validations().has_field_errors("id"));
    }

    #[tokio::test]
    async fn test_update_existing_category() {
        let service = service();
        let created = service.create(&request("Tech", None)).await.into_data().unwrap();

        let result = service
            .update(&UpdateCategoryRequest {
                id: *created.id(),
                name: "Technology".into(),
                description: Some("Gadgets".into()),
            })
            .await;
        assert!(result.is_success());
        assert_eq!(result.data().unwrap().name().value(), "Technology");
        assert_eq!(result.data().unwrap().created_at(), created.created_at());
    }

    #[tokio::test]
    async fn test_get_unknown_category() {
        let id = Uuid::new_v4();
        let result = service().get(id).await;
        assert_eq!(result.status(), RequestStatus::EntityNotFound);
        assert_eq!(result.entity_warning().unwrap().id, id.to_string());
    }

    #[tokio::test]
    async fn test_list_and_search() {
        let service = service();
        assert_eq!(
            service.list(&PageRequest::first()).await.status(),
            RequestStatus::NoContent
        );

        for name in ["Tech", "Science", "Music"] {
            service.create(&request(name, None)).await;
        }

        let page = service.list(&PageRequest::new(1, 2)).await.into_data().unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, 3);
        assert!(page.has_next());

        let found = service.search("sci").await.into_data().unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Science");

        assert_eq!(service.search("cooking").await.status(), RequestStatus::NoContent);
        assert_eq!(service.search("  ").await.status(), RequestStatus::HasValidation);
    }
}
