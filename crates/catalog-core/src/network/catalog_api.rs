//! The collaborator seam between the clone engine and a catalog account.
//!
//! The engine only ever lists one kind at a time and upserts one batch per
//! page. Anything that can do those two things for an account (the HTTP
//! client, an in-memory fake in tests) can be cloned from or into.

use crate::models::{BatchUpsertCatalogObjectsResponse, CatalogObject, CatalogObjectType, ListCatalogResponse};
use crate::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Access to one account's catalog.
///
/// Implementations return the response body as-is, including its `errors`
/// list. Turning a non-empty list into a failure is the caller's job.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Short label used in log lines (e.g. "source", "target").
    fn label(&self) -> &str;

    /// Fetch one page of objects of `kind`. `cursor` is `None` for the first
    /// page.
    async fn list_catalog(
        &self,
        kind: CatalogObjectType,
        cursor: Option<&str>,
    ) -> Result<ListCatalogResponse>;

    /// Insert or update `objects` in a single batch.
    async fn batch_upsert(
        &self,
        idempotency_key: &str,
        objects: Vec<CatalogObject>,
    ) -> Result<BatchUpsertCatalogObjectsResponse>;
}

/// Shared handle to a catalog account.
pub type DynCatalogApi = Arc<dyn CatalogApi>;
