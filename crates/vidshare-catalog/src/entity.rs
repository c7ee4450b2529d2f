//! Shared shape of persisted catalog entities

use chrono::{DateTime, Utc};
use uuid::Uuid;
use vidshare_validation::Identifiable;

/// Entity with a persistence-assigned id and audit timestamps
///
/// A freshly built entity carries the nil id until a repository stores it.
pub trait Entity: Identifiable<Id = Uuid> + Clone + Send + Sync + 'static {
    /// Name used in not-found and conflict reports
    const NAME: &'static str;

    fn created_at(&self) -> DateTime<Utc>;

    fn updated_at(&self) -> DateTime<Utc>;

    /// Called by repositories when the entity is first stored
    fn assign_id(&mut self, id: Uuid);
}
