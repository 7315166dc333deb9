//! Document store client implementation.
//!
//! One `StoreClient` is shared per process (cheaply cloneable via `Arc`).
//! Generic document plumbing lives here; the per-collection methods are
//! grouped by domain in the sibling modules.

mod account;
mod cache;
mod carts;
mod catalog;
mod orders;
mod users;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::config::StoreConfig;
use crate::documents::{Document, Validate};
use crate::error::StoreError;
use crate::query::Query;

use cache::CacheValue;

/// Catalog cache TTL.
const CACHE_TTL: Duration = Duration::from_secs(300);

/// Client for the remote document store.
///
/// Provides typed access to every collection plus transactional commits.
/// Catalog reads are cached for 5 minutes.
#[derive(Clone)]
pub struct StoreClient {
    inner: Arc<StoreClientInner>,
}

struct StoreClientInner {
    client: reqwest::Client,
    base_url: String,
    project: String,
    api_key: String,
    cache: Cache<String, CacheValue>,
}

/// Body of a `POST /v1/commit` or `POST /v1/batch` request.
#[derive(Debug, Serialize)]
struct WriteRequest {
    writes: Vec<WriteOp>,
}

/// A single write inside a batch or commit.
#[derive(Debug, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub(crate) enum WriteOp {
    Create {
        collection: &'static str,
        fields: serde_json::Value,
    },
    Patch {
        collection: &'static str,
        id: String,
        fields: serde_json::Value,
    },
    Delete {
        collection: &'static str,
        id: String,
    },
}

/// Response of a successful create.
#[derive(Debug, Deserialize)]
struct CreatedResponse {
    id: String,
}

/// Response of a successful transactional commit.
#[derive(Debug, Deserialize)]
pub(crate) struct CommitOutcome {
    /// Ids of documents the commit created, in write order.
    #[serde(default)]
    pub created_ids: Vec<String>,
}

/// Response envelope of a query.
#[derive(Debug, Deserialize)]
struct QueryResponse<T> {
    documents: Vec<Document<T>>,
}

impl StoreClient {
    /// Create a new document store client.
    #[must_use]
    pub fn new(config: &StoreConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(StoreClientInner {
                client: reqwest::Client::new(),
                base_url: format!("{}/v1", config.api_url.trim_end_matches('/')),
                project: config.project.clone(),
                api_key: config.api_key.expose_secret().to_string(),
                cache,
            }),
        }
    }

    /// Readiness probe against the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable or unhealthy.
    pub async fn ping(&self) -> Result<(), StoreError> {
        let response = self
            .request(reqwest::Method::GET, "ping")
            .send()
            .await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::api_error(response).await)
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{path}", self.inner.base_url);
        self.inner
            .client
            .request(method, url)
            .bearer_auth(&self.inner.api_key)
            .header("X-Store-Project", &self.inner.project)
    }

    /// Turn a non-success response into a `StoreError::Api`.
    async fn api_error(response: reqwest::Response) -> StoreError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message: String = body.chars().take(200).collect();
        tracing::error!(status, body = %message, "store API returned non-success status");
        StoreError::Api { status, message }
    }

    /// Fetch one document, `Ok(None)` on 404.
    pub(crate) async fn get_doc<T: DeserializeOwned>(
        &self,
        collection: &'static str,
        id: &str,
    ) -> Result<Option<Document<T>>, StoreError> {
        let response = self
            .request(
                reqwest::Method::GET,
                &format!("collections/{collection}/docs/{id}"),
            )
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let text = response.text().await?;
        match serde_json::from_str(&text) {
            Ok(doc) => Ok(Some(doc)),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    collection,
                    id,
                    body = %text.chars().take(500).collect::<String>(),
                    "failed to decode store document"
                );
                Err(StoreError::Parse(e))
            }
        }
    }

    /// Run a query against one collection.
    pub(crate) async fn query_docs<T: DeserializeOwned>(
        &self,
        collection: &'static str,
        query: &Query,
    ) -> Result<Vec<Document<T>>, StoreError> {
        let response = self
            .request(
                reqwest::Method::POST,
                &format!("collections/{collection}/query"),
            )
            .json(query)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let text = response.text().await?;
        let parsed: QueryResponse<T> = match serde_json::from_str(&text) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    collection,
                    body = %text.chars().take(500).collect::<String>(),
                    "failed to decode store query response"
                );
                return Err(StoreError::Parse(e));
            }
        };
        Ok(parsed.documents)
    }

    /// Create a document; the store assigns and returns the id.
    pub(crate) async fn create_doc<T: Serialize>(
        &self,
        collection: &'static str,
        fields: &T,
    ) -> Result<String, StoreError> {
        let response = self
            .request(
                reqwest::Method::POST,
                &format!("collections/{collection}/docs"),
            )
            .json(fields)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let created: CreatedResponse = response.json().await?;
        Ok(created.id)
    }

    /// Merge fields into a document, creating it when missing.
    pub(crate) async fn patch_doc<T: Serialize>(
        &self,
        collection: &'static str,
        id: &str,
        fields: &T,
    ) -> Result<(), StoreError> {
        let response = self
            .request(
                reqwest::Method::PATCH,
                &format!("collections/{collection}/docs/{id}"),
            )
            .json(fields)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        Ok(())
    }

    /// Delete a document. Deleting a missing document is not an error.
    pub(crate) async fn delete_doc(
        &self,
        collection: &'static str,
        id: &str,
    ) -> Result<(), StoreError> {
        let response = self
            .request(
                reqwest::Method::DELETE,
                &format!("collections/{collection}/docs/{id}"),
            )
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        Ok(())
    }

    /// Best-effort batched write. Patch/delete only; the store rejects
    /// batched creates, so this guards against them client-side.
    pub(crate) async fn batch_write(&self, writes: Vec<WriteOp>) -> Result<(), StoreError> {
        if writes.iter().any(|w| matches!(w, WriteOp::Create { .. })) {
            return Err(StoreError::BatchCreateUnsupported);
        }

        let response = self
            .request(reqwest::Method::POST, "batch")
            .json(&WriteRequest { writes })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        Ok(())
    }

    /// Transactional write: every operation succeeds or none does.
    pub(crate) async fn commit(&self, writes: Vec<WriteOp>) -> Result<CommitOutcome, StoreError> {
        let response = self
            .request(reqwest::Method::POST, "commit")
            .json(&WriteRequest { writes })
            .send()
            .await?;

        if response.status() == StatusCode::CONFLICT {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::CommitRejected(
                body.chars().take(200).collect(),
            ));
        }
        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let outcome: CommitOutcome = response.json().await?;
        Ok(outcome)
    }

    /// Serialize write fields, mapping the (practically unreachable)
    /// serialization failure into a store error.
    pub(crate) fn fields<T: Serialize>(value: &T) -> Result<serde_json::Value, StoreError> {
        Ok(serde_json::to_value(value)?)
    }
}

/// Run decode-time validation, attributing failures to the document.
///
/// Borrows the value so the id may be read out of it at the call site.
pub(crate) fn validated<T: Validate>(
    collection: &'static str,
    id: &str,
    value: &T,
) -> Result<(), StoreError> {
    match value.validate() {
        Ok(()) => Ok(()),
        Err(reason) => {
            tracing::error!(collection, id, %reason, "document failed validation");
            Err(StoreError::Invalid {
                collection,
                id: id.to_string(),
                reason,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::CartLine;
    use chrono::Utc;
    use monngon_core::{CartLineId, FoodId, Price, UserId};

    fn line(quantity: u32) -> CartLine {
        CartLine {
            id: CartLineId::new("line-1"),
            owner_id: UserId::new("u-1"),
            food_id: FoodId::new("pho"),
            name: "Pho bo".to_string(),
            unit_price: Price::vnd(45_000_i64),
            image_url: None,
            quantity,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_validated_passes_through_good_documents() {
        let line = line(2);
        // The id is read out of the document being checked
        assert!(validated(crate::collections::CARTS, line.id.as_str(), &line).is_ok());
    }

    #[test]
    fn test_validated_attributes_failures_to_the_document() {
        let line = line(0);
        let err = validated(crate::collections::CARTS, line.id.as_str(), &line)
            .expect_err("zero quantity must fail");
        match err {
            StoreError::Invalid { collection, id, .. } => {
                assert_eq!(collection, crate::collections::CARTS);
                assert_eq!(id, "line-1");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
