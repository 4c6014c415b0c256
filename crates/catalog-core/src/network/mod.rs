//! Catalog account access.
//!
//! This module provides:
//! - The [`CatalogApi`] trait the clone engine is written against
//! - An authenticated HTTP client for the catalog REST API
//! - Backoff and retries for transient API failures

mod catalog_api;
mod catalog_client;
mod client;
mod retry;

pub use catalog_api::{CatalogApi, DynCatalogApi};
pub use catalog_client::SquareCatalogClient;
pub use client::{extract_domain, HttpClient};
pub use retry::{with_retries, RetryConfig};
