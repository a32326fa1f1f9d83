// Adapters layer: concrete implementations for external systems (credentials, document store, object store).

pub mod credentials;
pub mod firestore;
pub mod storage;

pub use credentials::{Authorizer, ServiceAccountKey, TokenSource};
pub use firestore::FirestoreClient;
pub use storage::StorageBucket;
