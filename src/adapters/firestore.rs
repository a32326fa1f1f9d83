use crate::adapters::credentials::Authorizer;
use crate::config::toml_config::CollectionsConfig;
use crate::domain::model::{Entity, EntityId, UseCase};
use crate::domain::ports::EntityRepository;
use crate::utils::error::{PageError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use url::Url;

/// A document as returned by the Firestore REST API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub name: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
    pub create_time: Option<String>,
    pub update_time: Option<String>,
}

impl Document {
    /// Last path segment of the resource name.
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    /// Fields with Firestore's typed wrappers removed.
    pub fn plain_fields(&self) -> Map<String, Value> {
        decode_fields(&self.fields)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RunQueryItem {
    document: Option<Document>,
}

/// Document-store handle.
#[derive(Debug, Clone)]
pub struct FirestoreClient {
    http: Client,
    base_url: String,
    project_id: String,
    database: String,
    collections: CollectionsConfig,
    authorizer: Authorizer,
}

impl FirestoreClient {
    pub fn new(
        http: Client,
        base_url: impl Into<String>,
        project_id: impl Into<String>,
        database: impl Into<String>,
        collections: CollectionsConfig,
        authorizer: Authorizer,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            project_id: project_id.into(),
            database: database.into(),
            collections,
            authorizer,
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    fn documents_url(&self, extra: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| PageError::ConfigError {
            message: format!("invalid Firestore base URL '{}': {}", self.base_url, e),
        })?;
        {
            let mut segments = url.path_segments_mut().map_err(|_| PageError::ConfigError {
                message: format!("Firestore base URL '{}' cannot be a base", self.base_url),
            })?;
            segments
                .pop_if_empty()
                .extend([
                    "v1",
                    "projects",
                    self.project_id.as_str(),
                    "databases",
                    self.database.as_str(),
                ])
                .extend(extra);
        }
        Ok(url)
    }

    /// `Ok(None)` on 404.
    pub async fn get_document(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let url = self.documents_url(&["documents", collection, id])?;
        tracing::debug!("GET {}", url);

        let request = self.authorizer.authorize(self.http.get(url)).await?;
        let response = request.send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = ensure_success(response).await?;
        Ok(Some(response.json().await?))
    }

    /// Documents in `collection` whose `field` equals `value`.
    pub async fn query_equal(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>> {
        let url = self.documents_url(&["documents:runQuery"])?;
        let body = json!({
            "structuredQuery": {
                "from": [{ "collectionId": collection }],
                "where": {
                    "fieldFilter": {
                        "field": { "fieldPath": field },
                        "op": "EQUAL",
                        "value": { "stringValue": value }
                    }
                }
            }
        });
        tracing::debug!("POST {} ({} == {})", url, field, value);

        let request = self.authorizer.authorize(self.http.post(url)).await?;
        let response = ensure_success(request.json(&body).send().await?).await?;

        let items: Vec<RunQueryItem> = response.json().await?;
        Ok(items.into_iter().filter_map(|item| item.document).collect())
    }
}

#[async_trait]
impl EntityRepository for FirestoreClient {
    async fn get_entity(&self, id: &EntityId) -> Result<Option<Entity>> {
        let document = self
            .get_document(&self.collections.entities, id.as_str())
            .await?;

        Ok(document.map(|doc| Entity {
            id: doc.id().to_string(),
            fields: doc.plain_fields(),
        }))
    }

    async fn get_use_cases(&self, id: &EntityId) -> Result<Vec<UseCase>> {
        let documents = self
            .query_equal(
                &self.collections.use_cases,
                &self.collections.entity_field,
                id.as_str(),
            )
            .await?;

        Ok(documents
            .iter()
            .map(|doc| UseCase {
                id: doc.id().to_string(),
                entity_id: id.to_string(),
                fields: doc.plain_fields(),
            })
            .collect())
    }
}

pub(crate) async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    // Google APIs wrap failures as {"error": {"message": ...}}
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or(body);

    Err(PageError::BackendError {
        status: status.as_u16(),
        message,
    })
}

pub fn decode_fields(fields: &Map<String, Value>) -> Map<String, Value> {
    fields
        .iter()
        .map(|(key, value)| (key.clone(), decode_value(value)))
        .collect()
}

/// Converts one typed Firestore value into plain JSON.
pub fn decode_value(value: &Value) -> Value {
    let Some(obj) = value.as_object() else {
        return value.clone();
    };
    let Some((kind, inner)) = obj.iter().next() else {
        return Value::Null;
    };

    match kind.as_str() {
        "nullValue" => Value::Null,
        "booleanValue" | "doubleValue" => inner.clone(),
        // int64 arrives as a string
        "integerValue" => inner
            .as_str()
            .and_then(|s| s.parse::<i64>().ok())
            .map(Value::from)
            .unwrap_or_else(|| inner.clone()),
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => inner.clone(),
        "geoPointValue" => json!({
            "latitude": inner.get("latitude").cloned().unwrap_or(Value::from(0.0)),
            "longitude": inner.get("longitude").cloned().unwrap_or(Value::from(0.0)),
        }),
        "arrayValue" => Value::Array(
            inner
                .get("values")
                .and_then(Value::as_array)
                .map(|values| values.iter().map(decode_value).collect())
                .unwrap_or_default(),
        ),
        "mapValue" => Value::Object(
            inner
                .get("fields")
                .and_then(Value::as_object)
                .map(decode_fields)
                .unwrap_or_default(),
        ),
        _ => inner.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_scalars_and_nested_values() {
        let fields = json!({
            "name": { "stringValue": "Acme" },
            "employees": { "integerValue": "42" },
            "rating": { "doubleValue": 4.5 },
            "active": { "booleanValue": true },
            "deleted": { "nullValue": null },
            "tags": { "arrayValue": { "values": [
                { "stringValue": "b2b" },
                { "integerValue": "7" }
            ]}},
            "empty": { "arrayValue": {} },
            "address": { "mapValue": { "fields": {
                "city": { "stringValue": "Oslo" }
            }}},
            "hq": { "geoPointValue": { "latitude": 59.9, "longitude": 10.7 } }
        });

        let decoded = decode_fields(fields.as_object().unwrap());

        assert_eq!(decoded["name"], json!("Acme"));
        assert_eq!(decoded["employees"], json!(42));
        assert_eq!(decoded["rating"], json!(4.5));
        assert_eq!(decoded["active"], json!(true));
        assert_eq!(decoded["deleted"], Value::Null);
        assert_eq!(decoded["tags"], json!(["b2b", 7]));
        assert_eq!(decoded["empty"], json!([]));
        assert_eq!(decoded["address"], json!({"city": "Oslo"}));
        assert_eq!(decoded["hq"]["latitude"], json!(59.9));
    }

    #[test]
    fn test_document_id_from_name() {
        let doc: Document = serde_json::from_value(json!({
            "name": "projects/p/databases/(default)/documents/entities/e123"
        }))
        .unwrap();
        assert_eq!(doc.id(), "e123");
        assert!(doc.fields.is_empty());
    }

    #[test]
    fn test_documents_url_keeps_database_segment() {
        let client = FirestoreClient::new(
            Client::new(),
            "http://localhost:8080/",
            "demo-project",
            "(default)",
            CollectionsConfig::default(),
            Authorizer::Anonymous,
        );

        let url = client.documents_url(&["documents", "entities", "e 1"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/v1/projects/demo-project/databases/(default)/documents/entities/e%201"
        );
    }
}
