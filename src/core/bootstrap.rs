use crate::adapters::credentials::{Authorizer, ServiceAccountKey, TokenSource};
use crate::adapters::{FirestoreClient, StorageBucket};
use crate::config::{BackendConfig, BackendSettings, CollectionsConfig, StorageAccess};
use crate::utils::error::Result;
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Initialized backend: one document-store and one object-store handle.
#[derive(Debug)]
pub struct AdminApp {
    settings: BackendSettings,
    firestore: FirestoreClient,
    storage: StorageBucket,
}

impl AdminApp {
    pub async fn initialize(
        config: &BackendConfig,
        collections: &CollectionsConfig,
    ) -> Result<Self> {
        let key = match &config.credentials_path {
            Some(path) => Some(ServiceAccountKey::from_file(path).await?),
            None => None,
        };
        let settings = BackendSettings::resolve(config, key.as_ref())?;

        let http = Client::builder().build()?;
        let token_source = key.map(|key| Arc::new(TokenSource::new(key, http.clone())));

        let firestore_auth = if settings.firestore_emulated {
            Authorizer::Emulator
        } else {
            match &token_source {
                Some(source) => Authorizer::ServiceAccount(Arc::clone(source)),
                None => Authorizer::Anonymous,
            }
        };
        let storage_auth = match (settings.storage_access, &token_source) {
            (StorageAccess::Emulator, _) => Authorizer::Emulator,
            (StorageAccess::ServiceAccount, Some(source)) => {
                Authorizer::ServiceAccount(Arc::clone(source))
            }
            (StorageAccess::ServiceAccount, None) | (StorageAccess::Anonymous, _) => {
                tracing::warn!(
                    bucket = %settings.storage_bucket,
                    "⚠️ No storage emulator or service-account key; object-store requests are unauthenticated"
                );
                Authorizer::Anonymous
            }
        };

        let firestore = FirestoreClient::new(
            http.clone(),
            settings.firestore_base_url.clone(),
            settings.project_id.clone(),
            settings.database.clone(),
            collections.clone(),
            firestore_auth,
        );
        let storage = StorageBucket::new(
            http,
            settings.storage_base_url.clone(),
            settings.storage_bucket.clone(),
            storage_auth,
        );

        tracing::info!(
            project_id = %settings.project_id,
            bucket = %settings.storage_bucket,
            emulated = settings.firestore_emulated,
            storage_access = ?settings.storage_access,
            "Backend client initialized"
        );

        Ok(Self {
            settings,
            firestore,
            storage,
        })
    }

    pub fn settings(&self) -> &BackendSettings {
        &self.settings
    }

    pub fn firestore(&self) -> &FirestoreClient {
        &self.firestore
    }

    pub fn storage(&self) -> &StorageBucket {
        &self.storage
    }
}

/// Owns backend initialization for the process. Construct one at start-up
/// and hand it (or the [`AdminApp`] it yields) to whoever needs the backend.
pub struct AdminBootstrap {
    config: BackendConfig,
    collections: CollectionsConfig,
    app: OnceCell<Arc<AdminApp>>,
}

impl AdminBootstrap {
    pub fn new(config: BackendConfig, collections: CollectionsConfig) -> Self {
        Self {
            config,
            collections,
            app: OnceCell::new(),
        }
    }

    /// Initializes on first call; later calls return the same instance.
    /// A failed initialization is not cached, so the next call retries.
    pub async fn handle(&self) -> Result<Arc<AdminApp>> {
        let app = self
            .app
            .get_or_try_init(|| async {
                AdminApp::initialize(&self.config, &self.collections)
                    .await
                    .map(Arc::new)
            })
            .await?;
        Ok(Arc::clone(app))
    }

    pub fn is_initialized(&self) -> bool {
        self.app.initialized()
    }
}
