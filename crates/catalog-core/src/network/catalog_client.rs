//! HTTP implementation of [`CatalogApi`] for the catalog REST API.
//!
//! Provides:
//! - `GET /v2/catalog/list` paging by kind and cursor
//! - `POST /v2/catalog/batch-upsert` with a single batch per call
//! - Retries with backoff for transient failures (408/429/5xx, resets)
//!
//! Structured error bodies on 4xx responses are decoded and returned like any
//! other response, so the engine sees them through the `errors` list.

use super::catalog_api::CatalogApi;
use super::client::HttpClient;
use super::retry::{with_retries, RetryConfig};
use crate::config::NetworkConfig;
use crate::models::{
    BatchUpsertCatalogObjectsRequest, BatchUpsertCatalogObjectsResponse, CatalogObject,
    CatalogObjectType, ListCatalogResponse,
};
use crate::{CatalogError, Result};
use async_trait::async_trait;
use reqwest::Response;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Catalog client for one account.
#[derive(Debug)]
pub struct SquareCatalogClient {
    label: String,
    http: HttpClient,
    retry: RetryConfig,
}

impl SquareCatalogClient {
    /// Create a client against the production API.
    pub fn new(label: impl Into<String>, access_token: impl Into<String>) -> Result<Self> {
        Self::with_base_url(label, NetworkConfig::API_BASE, access_token)
    }

    /// Create a client against a custom base URL (sandbox, mock server).
    pub fn with_base_url(
        label: impl Into<String>,
        base_url: &str,
        access_token: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            label: label.into(),
            http: HttpClient::new(base_url, access_token)?,
            retry: RetryConfig::default(),
        })
    }

    /// Replace the retry policy.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    async fn decode<T: DeserializeOwned>(response: Response, operation: &str) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| CatalogError::Json {
            message: format!("Failed to parse {} response (HTTP {}): {}", operation, status, e),
            source: Some(e),
        })
    }
}

#[async_trait]
impl CatalogApi for SquareCatalogClient {
    fn label(&self) -> &str {
        &self.label
    }

    async fn list_catalog(
        &self,
        kind: CatalogObjectType,
        cursor: Option<&str>,
    ) -> Result<ListCatalogResponse> {
        let mut query = vec![("types", kind.as_str())];
        if let Some(cursor) = cursor {
            query.push(("cursor", cursor));
        }

        let response = with_retries(&self.retry, "ListCatalog", || {
            self.http.get_with_query(NetworkConfig::LIST_PATH, &query)
        })
        .await?;

        let page: ListCatalogResponse = Self::decode(response, "ListCatalog").await?;
        debug!(
            "{}: listed {} {} (cursor: {})",
            self.label,
            page.objects.len(),
            kind,
            page.next_cursor().unwrap_or("none")
        );
        Ok(page)
    }

    async fn batch_upsert(
        &self,
        idempotency_key: &str,
        objects: Vec<CatalogObject>,
    ) -> Result<BatchUpsertCatalogObjectsResponse> {
        let count = objects.len();
        let request = BatchUpsertCatalogObjectsRequest::single_batch(idempotency_key, objects);

        // The idempotency key makes a retried upsert safe to replay.
        let response = with_retries(&self.retry, "BatchUpsertCatalogObjects", || {
            self.http.post_json(NetworkConfig::BATCH_UPSERT_PATH, &request)
        })
        .await?;

        let body: BatchUpsertCatalogObjectsResponse =
            Self::decode(response, "BatchUpsertCatalogObjects").await?;
        debug!(
            "{}: upserted {} objects, {} returned, {} id mappings",
            self.label,
            count,
            body.objects.len(),
            body.id_mappings.len()
        );
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = SquareCatalogClient::new("source", "token").unwrap();
        assert_eq!(client.label(), "source");
        assert_eq!(client.retry.max_attempts, NetworkConfig::MAX_RETRIES);
    }

    #[test]
    fn test_custom_retry() {
        let client = SquareCatalogClient::with_base_url("target", "http://127.0.0.1:1", "token")
            .unwrap()
            .with_retry(RetryConfig::disabled());
        assert_eq!(client.retry.max_attempts, 1);
    }
}
