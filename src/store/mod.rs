//! Store boundary: the [`ArticleStore`] trait and its Firestore REST client.
//!
//! The trait exists so the query/mutation layers take the store as an
//! explicit dependency instead of a process-wide handle; tests substitute an
//! in-memory fake without touching the network.
mod firestore;
pub(crate) mod value;

pub use firestore::FirestoreClient;

use thiserror::Error;

use crate::model::{Article, ArticleUpdate};

/// Errors surfaced by store operations.
///
/// Read paths in the service layer catch these and degrade to the fallback
/// dataset; write paths propagate them to the caller.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("Store error: status {0}")]
    HttpStatus(u16),
    /// Response body exceeded the size limit
    #[error("Response too large (exceeds {0} bytes)")]
    ResponseTooLarge(usize),
    /// Response body was not the JSON shape the store API documents
    #[error("Malformed store response: {0}")]
    Malformed(#[from] serde_json::Error),
    /// Response was structurally valid JSON but missing a required element
    #[error("Unexpected store response: {0}")]
    Unexpected(String),
}

/// Counter fields that support relative increments at the store.
///
/// Increments are expressed as signed deltas applied server-side, so
/// concurrent updates from different readers converge without coordination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    Likes,
    Views,
}

impl Counter {
    pub(crate) fn field_path(self) -> &'static str {
        match self {
            Counter::Likes => "likes",
            Counter::Views => "views",
        }
    }
}

/// Operations the content layer needs from a document store.
///
/// One collection, whole-collection reads, point lookups, partial writes and
/// commutative counter deltas. No pagination: the corpus is single-digit to
/// low-hundreds of articles and fits in memory.
#[allow(async_fn_in_trait)]
pub trait ArticleStore {
    /// Fetch every document in the collection, unconditionally.
    async fn fetch_all(&self) -> Result<Vec<Article>, StoreError>;

    /// Point lookup by document id. Not-found is `Ok(None)`, not an error.
    async fn fetch_by_id(&self, id: &str) -> Result<Option<Article>, StoreError>;

    /// Create a new document and return the store-assigned id. The caller's
    /// `id` field, if any, is ignored.
    async fn create(&self, article: &Article) -> Result<String, StoreError>;

    /// Partial update; only fields present in `update` are written.
    async fn update(&self, id: &str, update: &ArticleUpdate) -> Result<(), StoreError>;

    /// Hard delete by id.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// Apply a relative delta to a counter field and return the post-write
    /// value as reported by the store itself (no separate re-read).
    async fn increment(&self, id: &str, counter: Counter, delta: i64) -> Result<i64, StoreError>;

    /// Lightweight reachability probe: one bounded (limit = 1) query.
    async fn probe(&self) -> Result<(), StoreError>;
}
