use crate::domain::model::{Entity, EntityId, EntityPage, ObjectMetadata, UseCase};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Read access to entities and their use cases.
#[async_trait]
pub trait EntityRepository: Send + Sync {
    /// `Ok(None)` when no record exists for `id`.
    async fn get_entity(&self, id: &EntityId) -> Result<Option<Entity>>;

    /// All use cases whose owning entity is `id`; empty when there are none.
    async fn get_use_cases(&self, id: &EntityId) -> Result<Vec<UseCase>>;
}

/// Turns a loaded page into a response body.
pub trait PageRenderer: Send + Sync {
    fn render(&self, page: &EntityPage) -> Result<String>;
}

/// Read side of the binary object store.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn object_metadata(&self, name: &str) -> Result<Option<ObjectMetadata>>;

    async fn download(&self, name: &str) -> Result<Option<Vec<u8>>>;
}
