//! Builder for configuring CatalogCloner initialization.

use std::sync::Arc;

use crate::config::NetworkConfig;
use crate::error::{CatalogError, Result};
use crate::network::{DynCatalogApi, RetryConfig, SquareCatalogClient};
use crate::CatalogCloner;

/// Builder for configuring CatalogCloner initialization.
///
/// Either supply access tokens, in which case HTTP clients are created for
/// both accounts, or plug in ready-made [`CatalogApi`](crate::network::CatalogApi)
/// implementations.
///
/// # Example
///
/// ```rust,ignore
/// use catalog_core::CatalogCloner;
///
/// let cloner = CatalogCloner::builder()
///     .sandbox(true)
///     .source_access_token(source_token)
///     .target_access_token(target_token)
///     .build()?;
/// ```
pub struct CatalogClonerBuilder {
    base_url: String,
    source_access_token: Option<String>,
    target_access_token: Option<String>,
    retry: RetryConfig,
    source_api: Option<DynCatalogApi>,
    target_api: Option<DynCatalogApi>,
}

impl Default for CatalogClonerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogClonerBuilder {
    /// Create a new builder targeting the production API.
    pub fn new() -> Self {
        Self {
            base_url: NetworkConfig::API_BASE.to_string(),
            source_access_token: None,
            target_access_token: None,
            retry: RetryConfig::default(),
            source_api: None,
            target_api: None,
        }
    }

    /// API base URL for both accounts.
    ///
    /// Default: [`NetworkConfig::API_BASE`]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Switch between the sandbox and production base URLs.
    pub fn sandbox(mut self, enable: bool) -> Self {
        self.base_url = if enable {
            NetworkConfig::SANDBOX_API_BASE
        } else {
            NetworkConfig::API_BASE
        }
        .to_string();
        self
    }

    pub fn source_access_token(mut self, token: impl Into<String>) -> Self {
        self.source_access_token = Some(token.into());
        self
    }

    pub fn target_access_token(mut self, token: impl Into<String>) -> Self {
        self.target_access_token = Some(token.into());
        self
    }

    /// Retry policy for the HTTP clients the builder creates.
    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Use `api` for the source account instead of an HTTP client.
    pub fn with_source_api(mut self, api: DynCatalogApi) -> Self {
        self.source_api = Some(api);
        self
    }

    /// Use `api` for the target account instead of an HTTP client.
    pub fn with_target_api(mut self, api: DynCatalogApi) -> Self {
        self.target_api = Some(api);
        self
    }

    fn http_account(
        &self,
        label: &str,
        token: Option<&String>,
    ) -> Result<DynCatalogApi> {
        let token = token.ok_or_else(|| CatalogError::Config {
            message: format!("No access token configured for the {} account", label),
        })?;
        let client = SquareCatalogClient::with_base_url(label, &self.base_url, token.as_str())?
            .with_retry(self.retry.clone());
        Ok(Arc::new(client))
    }

    /// Build the CatalogCloner instance.
    pub fn build(self) -> Result<CatalogCloner> {
        let source = match &self.source_api {
            Some(api) => api.clone(),
            None => self.http_account("source", self.source_access_token.as_ref())?,
        };
        let target = match &self.target_api {
            Some(api) => api.clone(),
            None => self.http_account("target", self.target_access_token.as_ref())?,
        };
        Ok(CatalogCloner::new(source, target))
    }
}
