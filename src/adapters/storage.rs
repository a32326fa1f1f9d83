use crate::adapters::credentials::Authorizer;
use crate::adapters::firestore::ensure_success;
use crate::domain::model::ObjectMetadata;
use crate::domain::ports::ObjectStore;
use crate::utils::error::{PageError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use url::Url;

/// Binary-object-store handle bound to a single bucket.
#[derive(Debug, Clone)]
pub struct StorageBucket {
    http: Client,
    base_url: String,
    bucket: String,
    authorizer: Authorizer,
}

impl StorageBucket {
    pub fn new(
        http: Client,
        base_url: impl Into<String>,
        bucket: impl Into<String>,
        authorizer: Authorizer,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            bucket: bucket.into(),
            authorizer,
        }
    }

    pub fn name(&self) -> &str {
        &self.bucket
    }

    /// `{base}/storage/v1/b/{bucket}/o/{object}`; `/` inside the object name is encoded.
    fn object_url(&self, object: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| PageError::ConfigError {
            message: format!("invalid storage base URL '{}': {}", self.base_url, e),
        })?;
        {
            let mut segments = url.path_segments_mut().map_err(|_| PageError::ConfigError {
                message: format!("storage base URL '{}' cannot be a base", self.base_url),
            })?;
            segments
                .pop_if_empty()
                .extend(["storage", "v1", "b", self.bucket.as_str(), "o", object]);
        }
        Ok(url)
    }

    async fn fetch(&self, url: Url) -> Result<Option<reqwest::Response>> {
        let request = self.authorizer.authorize(self.http.get(url)).await?;
        let response = request.send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        ensure_success(response).await.map(Some)
    }
}

#[async_trait]
impl ObjectStore for StorageBucket {
    async fn object_metadata(&self, name: &str) -> Result<Option<ObjectMetadata>> {
        let url = self.object_url(name)?;
        tracing::debug!("GET {}", url);

        match self.fetch(url).await? {
            Some(response) => Ok(Some(response.json().await?)),
            None => Ok(None),
        }
    }

    async fn download(&self, name: &str) -> Result<Option<Vec<u8>>> {
        let mut url = self.object_url(name)?;
        url.query_pairs_mut().append_pair("alt", "media");
        tracing::debug!("GET {}", url);

        match self.fetch(url).await? {
            Some(response) => Ok(Some(response.bytes().await?.to_vec())),
            None => Ok(None),
        }
    }
}
