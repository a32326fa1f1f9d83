use crate::core::{Entity, EntityId, EntityPage, EntityRepository, UseCase};
use crate::utils::error::{PageError, Result};
use std::sync::Arc;

/// Loads everything one entity page needs.
pub struct EntityPageLoader<R: EntityRepository> {
    repository: R,
}

impl<R: EntityRepository> EntityPageLoader<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Fetches the entity and its use cases concurrently with the same id.
    ///
    /// The first failing fetch fails the load. An absent entity yields
    /// [`PageError::NotFound`], so nothing downstream ever sees a missing
    /// entity.
    #[tracing::instrument(name = "load_entity_page", skip_all, fields(entity_id = %id))]
    pub async fn load(&self, id: &EntityId) -> Result<EntityPage> {
        let (entity, use_cases) = tokio::try_join!(
            self.repository.get_entity(id),
            self.repository.get_use_cases(id)
        )?;

        let Some(entity) = entity else {
            tracing::warn!("Entity not found");
            return Err(PageError::NotFound { id: id.to_string() });
        };

        tracing::debug!(use_cases = use_cases.len(), "Entity page loaded");
        Ok(EntityPage { entity, use_cases })
    }
}

#[async_trait::async_trait]
impl<T: EntityRepository + ?Sized> EntityRepository for Arc<T> {
    async fn get_entity(&self, id: &EntityId) -> Result<Option<Entity>> {
        (**self).get_entity(id).await
    }

    async fn get_use_cases(&self, id: &EntityId) -> Result<Vec<UseCase>> {
        (**self).get_use_cases(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingRepository {
        calls: Mutex<Vec<String>>,
        entity_exists: bool,
        fail_use_cases: bool,
    }

    #[async_trait::async_trait]
    impl EntityRepository for RecordingRepository {
        async fn get_entity(&self, id: &EntityId) -> Result<Option<Entity>> {
            self.calls.lock().unwrap().push(format!("entity:{}", id));
            Ok(self.entity_exists.then(|| Entity {
                id: id.to_string(),
                fields: Map::new(),
            }))
        }

        async fn get_use_cases(&self, id: &EntityId) -> Result<Vec<UseCase>> {
            self.calls.lock().unwrap().push(format!("use_cases:{}", id));
            if self.fail_use_cases {
                return Err(PageError::BackendError {
                    status: 503,
                    message: "unavailable".to_string(),
                });
            }
            Ok(vec![UseCase {
                id: "u1".to_string(),
                entity_id: id.to_string(),
                fields: Map::new(),
            }])
        }
    }

    #[tokio::test]
    async fn test_both_fetches_use_the_route_id() {
        let repo = RecordingRepository {
            entity_exists: true,
            ..Default::default()
        };
        let loader = EntityPageLoader::new(repo);
        let id = EntityId::parse("e123").unwrap();

        let page = loader.load(&id).await.unwrap();

        assert_eq!(page.entity.id, "e123");
        assert_eq!(page.use_cases.len(), 1);
        assert_eq!(page.use_cases[0].entity_id, "e123");

        let mut calls = loader.repository.calls.lock().unwrap().clone();
        calls.sort();
        assert_eq!(calls, vec!["entity:e123", "use_cases:e123"]);
    }

    #[tokio::test]
    async fn test_missing_entity_is_not_found() {
        let loader = EntityPageLoader::new(RecordingRepository::default());
        let id = EntityId::parse("ghost").unwrap();

        let err = loader.load(&id).await.unwrap_err();
        assert!(matches!(err, PageError::NotFound { id } if id == "ghost"));
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates() {
        let repo = RecordingRepository {
            entity_exists: true,
            fail_use_cases: true,
            ..Default::default()
        };
        let loader = EntityPageLoader::new(Arc::new(repo));
        let id = EntityId::parse("e123").unwrap();

        let err = loader.load(&id).await.unwrap_err();
        assert!(matches!(err, PageError::BackendError { status: 503, .. }));
    }
}
