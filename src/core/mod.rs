pub mod bootstrap;
pub mod entity_page;

pub use crate::domain::model::{Entity, EntityId, EntityPage, ObjectMetadata, UseCase};
pub use crate::domain::ports::{EntityRepository, ObjectStore, PageRenderer};
pub use crate::utils::error::Result;
