//! Firestore REST v1 client for the `news` collection.
//!
//! Whole-collection reads only: no server-side filtering, no pagination.
//! That is acceptable here because the corpus is small and the query layer
//! filters in memory. Cancellation comes for free: callers race these futures
//! against a timer, and dropping the future aborts the in-flight request.
use futures::StreamExt;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::config::FirestoreConfig;
use crate::model::{Article, ArticleUpdate};

use super::value::{self, Document, Value};
use super::{ArticleStore, Counter, StoreError};

const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com/v1";

/// Upper bound on any response body. The collection is expected to stay in
/// the low hundreds of documents; anything past this is a misbehaving server.
const MAX_RESPONSE_SIZE: usize = 8 * 1024 * 1024; // 8MB

/// Single-request page size for whole-collection reads.
const LIST_PAGE_SIZE: &str = "300";

/// Client over the Firestore REST API, scoped to one collection.
///
/// Holds a caller-provided [`reqwest::Client`] so connection pooling is shared
/// with the rest of the process. Construct once and pass by reference.
pub struct FirestoreClient {
    client: reqwest::Client,
    base_url: String,
    /// `projects/<project>/databases/(default)/documents`
    parent: String,
    collection: String,
    api_key: Option<SecretString>,
}

#[derive(Deserialize)]
struct ListResponse {
    #[serde(default)]
    documents: Vec<Document>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommitResponse {
    #[serde(default)]
    write_results: Vec<WriteResult>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WriteResult {
    #[serde(default)]
    transform_results: Vec<Value>,
}

impl FirestoreClient {
    pub fn new(client: reqwest::Client, config: &FirestoreConfig) -> Self {
        let base_url = config
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();
        Self {
            client,
            base_url,
            parent: format!("projects/{}/databases/(default)/documents", config.project_id),
            collection: config.collection.clone(),
            api_key: config.api_key.clone().map(SecretString::from),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/{}/{}", self.base_url, self.parent, self.collection)
    }

    fn document_url(&self, id: &str) -> String {
        format!("{}/{}/{}/{}", self.base_url, self.parent, self.collection, id)
    }

    /// Full resource name, as required by transform writes.
    fn document_name(&self, id: &str) -> String {
        format!("{}/{}/{}", self.parent, self.collection, id)
    }

    /// Attach the API key (when configured) and send.
    async fn execute(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, StoreError> {
        let request = match &self.api_key {
            Some(key) => request.query(&[("key", key.expose_secret())]),
            None => request,
        };
        Ok(request.send().await?)
    }

    /// Read a success body with a size cap, then decode it.
    async fn read_json<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, StoreError> {
        let body = read_limited_text(response, MAX_RESPONSE_SIZE).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl ArticleStore for FirestoreClient {
    async fn fetch_all(&self) -> Result<Vec<Article>, StoreError> {
        let request = self
            .client
            .get(self.collection_url())
            .query(&[("pageSize", LIST_PAGE_SIZE)]);
        let response = self.execute(request).await?;
        if !response.status().is_success() {
            return Err(StoreError::HttpStatus(response.status().as_u16()));
        }

        let list: ListResponse = self.read_json(response).await?;
        let articles: Vec<Article> = list.documents.iter().map(value::decode_article).collect();
        tracing::debug!(count = articles.len(), collection = %self.collection, "Fetched collection");
        Ok(articles)
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<Article>, StoreError> {
        let response = self.execute(self.client.get(self.document_url(id))).await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(StoreError::HttpStatus(response.status().as_u16()));
        }

        let doc: Document = self.read_json(response).await?;
        Ok(Some(value::decode_article(&doc)))
    }

    async fn create(&self, article: &Article) -> Result<String, StoreError> {
        let body = serde_json::json!({ "fields": value::encode_article(article) });
        let request = self.client.post(self.collection_url()).json(&body);
        let response = self.execute(request).await?;
        if !response.status().is_success() {
            return Err(StoreError::HttpStatus(response.status().as_u16()));
        }

        let doc: Document = self.read_json(response).await?;
        let id = doc.id().to_string();
        tracing::debug!(%id, "Created document");
        Ok(id)
    }

    async fn update(&self, id: &str, update: &ArticleUpdate) -> Result<(), StoreError> {
        let (fields, mask) = value::encode_update(update);
        if mask.is_empty() {
            tracing::debug!(id, "Empty update, skipping write");
            return Ok(());
        }

        // Repeated updateMask.fieldPaths params scope the write to exactly
        // the fields present in the update.
        let mask_params: Vec<(&str, &str)> = mask
            .iter()
            .map(|path| ("updateMask.fieldPaths", path.as_str()))
            .collect();
        let body = serde_json::json!({ "fields": fields });
        let request = self
            .client
            .patch(self.document_url(id))
            .query(&mask_params)
            .json(&body);
        let response = self.execute(request).await?;
        if !response.status().is_success() {
            return Err(StoreError::HttpStatus(response.status().as_u16()));
        }
        tracing::debug!(id, fields = mask.len(), "Updated document");
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let response = self.execute(self.client.delete(self.document_url(id))).await?;
        if !response.status().is_success() {
            return Err(StoreError::HttpStatus(response.status().as_u16()));
        }
        tracing::debug!(id, "Deleted document");
        Ok(())
    }

    async fn increment(&self, id: &str, counter: Counter, delta: i64) -> Result<i64, StoreError> {
        let body = serde_json::json!({
            "writes": [{
                "transform": {
                    "document": self.document_name(id),
                    "fieldTransforms": [{
                        "fieldPath": counter.field_path(),
                        "increment": { "integerValue": delta.to_string() }
                    }]
                }
            }]
        });
        let url = format!("{}/{}:commit", self.base_url, self.parent);
        let response = self.execute(self.client.post(url).json(&body)).await?;
        if !response.status().is_success() {
            return Err(StoreError::HttpStatus(response.status().as_u16()));
        }

        // The commit response carries the post-transform value, so the
        // returned count is authoritative without a separate re-read.
        let commit: CommitResponse = self.read_json(response).await?;
        commit
            .write_results
            .first()
            .and_then(|w| w.transform_results.first())
            .map(Value::as_i64)
            .ok_or_else(|| StoreError::Unexpected("commit response without transform result".to_string()))
    }

    async fn probe(&self) -> Result<(), StoreError> {
        let body = serde_json::json!({
            "structuredQuery": {
                "from": [{ "collectionId": self.collection }],
                "limit": 1
            }
        });
        let url = format!("{}/{}:runQuery", self.base_url, self.parent);
        let response = self.execute(self.client.post(url).json(&body)).await?;
        if !response.status().is_success() {
            return Err(StoreError::HttpStatus(response.status().as_u16()));
        }
        // Body content is irrelevant; reachability is the only question.
        read_limited_text(response, MAX_RESPONSE_SIZE).await?;
        Ok(())
    }
}

async fn read_limited_text(
    response: reqwest::Response,
    limit: usize,
) -> Result<String, StoreError> {
    // Fast path: check Content-Length header
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(StoreError::ResponseTooLarge(limit));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(StoreError::Network)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(StoreError::ResponseTooLarge(limit));
        }
        bytes.extend_from_slice(&chunk);
    }

    String::from_utf8(bytes)
        .map_err(|_| StoreError::Unexpected("response body is not valid UTF-8".to_string()))
}
