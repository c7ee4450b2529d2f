//! Persistence ports and the in-memory adapter used by tests and demos

use crate::category::Category;
use crate::entity::Entity;
use crate::error::RepositoryError;
use crate::video::Video;
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Store a new category, assigning an id when it has none
    async fn insert(&self, category: Category) -> Result<Category, RepositoryError>;

    async fn update(&self, category: Category) -> Result<Category, RepositoryError>;

    async fn get(&self, id: Uuid) -> Result<Option<Category>, RepositoryError>;

    /// A window of categories plus the total count
    async fn list(&self, offset: usize, limit: usize) -> Result<(Vec<Category>, usize), RepositoryError>;

    async fn search(&self, term: &str, limit: usize) -> Result<Vec<Category>, RepositoryError>;

    /// Case-insensitive lookup by name
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepositoryError>;
}

#[async_trait]
pub trait VideoRepository: Send + Sync {
    async fn insert(&self, video: Video) -> Result<Video, RepositoryError>;

    async fn update(&self, video: Video) -> Result<Video, RepositoryError>;

    async fn get(&self, id: Uuid) -> Result<Option<Video>, RepositoryError>;

    async fn list(&self, offset: usize, limit: usize) -> Result<(Vec<Video>, usize), RepositoryError>;

    async fn search(&self, term: &str, limit: usize) -> Result<Vec<Video>, RepositoryError>;

    async fn list_by_category(
        &self,
        category_id: Uuid,
        offset: usize,
        limit: usize,
    ) -> Result<(Vec<Video>, usize), RepositoryError>;
}

/// Insertion-ordered entity store behind a read/write lock
#[derive(Debug)]
pub struct InMemoryStore<E> {
    items: RwLock<Vec<E>>,
}

impl<E: Entity> InMemoryStore<E> {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    async fn insert(&self, entity: E) -> Result<E, RepositoryError> {
        self.insert_unique(entity, |_, _| false).await
    }

    /// Insert unless an id is taken or `clashes(stored, new)` holds for a stored entity
    ///
    /// The check and the write happen under one write lock.
    async fn insert_unique<F>(&self, mut entity: E, clashes: F) -> Result<E, RepositoryError>
    where
        F: Fn(&E, &E) -> bool + Send,
    {
        let mut items = self.items.write().await;
        if !entity.has_identity() {
            entity.assign_id(Uuid::new_v4());
        }
        let id = *entity.id();
        if let Some(taken) = items.iter().find(|e| *e.id() == id || clashes(e, &entity)) {
            return Err(RepositoryError::Conflict { entity: E::NAME, id: *taken.id() });
        }
        items.push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: E) -> Result<E, RepositoryError> {
        self.update_unique(entity, |_, _| false).await
    }

    /// Replace the stored entity unless `clashes(other, updated)` holds for another one
    async fn update_unique<F>(&self, entity: E, clashes: F) -> Result<E, RepositoryError>
    where
        F: Fn(&E, &E) -> bool + Send,
    {
        let mut items = self.items.write().await;
        let id = *entity.id();
        if let Some(taken) = items.iter().find(|e| *e.id() != id && clashes(e, &entity)) {
            return Err(RepositoryError::Conflict { entity: E::NAME, id: *taken.id() });
        }
        match items.iter_mut().find(|e| *e.id() == id) {
            Some(slot) => {
                *slot = entity.clone();
                Ok(entity)
            }
            None => Err(RepositoryError::NotFound { entity: E::NAME, id }),
        }
    }

    async fn get(&self, id: Uuid) -> Option<E> {
        self.items.read().await.iter().find(|e| *e.id() == id).cloned()
    }

    async fn window<P>(&self, offset: usize, limit: usize, predicate: P) -> (Vec<E>, usize)
    where
        P: Fn(&E) -> bool + Send,
    {
        let items = self.items.read().await;
        let matching: Vec<&E> = items.iter().filter(|e| predicate(e)).collect();
        let total = matching.len();
        let page = matching.into_iter().skip(offset).take(limit).cloned().collect();
        (page, total)
    }
}

impl<E: Entity> Default for InMemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.trim().to_lowercase())
}

fn same_name(stored: &Category, candidate: &Category) -> bool {
    stored.name().matches(candidate.name().value())
}

/// Category names are unique, ignoring case and surrounding whitespace
#[derive(Debug, Default)]
pub struct InMemoryCategoryRepository {
    store: InMemoryStore<Category>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn insert(&self, category: Category) -> Result<Category, RepositoryError> {
        self.store.insert_unique(category, same_name).await
    }

    async fn update(&self, category: Category) -> Result<Category, RepositoryError> {
        self.store.update_unique(category, same_name).await
    }

    async fn get(&self, id: Uuid) -> Result<Option<Category>, RepositoryError> {
        Ok(self.store.get(id).await)
    }

    async fn list(&self, offset: usize, limit: usize) -> Result<(Vec<Category>, usize), RepositoryError> {
        Ok(self.store.window(offset, limit, |_| true).await)
    }

    async fn search(&self, term: &str, limit: usize) -> Result<Vec<Category>, RepositoryError> {
        let (found, _) = self
            .store
            .window(0, limit, |c: &Category| {
                contains_ignore_case(c.name().value(), term)
                    || c.description().value().map_or(false, |d| contains_ignore_case(d, term))
            })
            .await;
        Ok(found)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepositoryError> {
        let (found, _) = self.store.window(0, 1, |c: &Category| c.name().matches(name)).await;
        Ok(found.into_iter().next())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryVideoRepository {
    store: InMemoryStore<Video>,
}

impl InMemoryVideoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VideoRepository for InMemoryVideoRepository {
    async fn insert(&self, video: Video) -> Result<Video, RepositoryError> {
        self.store.insert(video).await
    }

    async fn update(&self, video: Video) -> Result<Video, RepositoryError> {
        self.store.update(video).await
    }

    async fn get(&self, id: Uuid) -> Result<Option<Video>, RepositoryError> {
        Ok(self.store.get(id).await)
    }

    async fn list(&self, offset: usize, limit: usize) -> Result<(Vec<Video>, usize), RepositoryError> {
        Ok(self.store.window(offset, limit, |_| true).await)
    }

    async fn search(&self, term: &str, limit: usize) -> Result<Vec<Video>, RepositoryError> {
        let (found, _) = self
            .store
            .window(0, limit, |v: &Video| {
                contains_ignore_case(v.title().value(), term)
                    || v.description().value().map_or(false, |d| contains_ignore_case(d, term))
            })
            .await;
        Ok(found)
    }

    async fn list_by_category(
        &self,
        category_id: Uuid,
        offset: usize,
        limit: usize,
    ) -> Result<(Vec<Video>, usize), RepositoryError> {
        Ok(self
            .store
            .window(offset, limit, |v: &Video| v.category_id() == category_id)
            .await)
    }
}
