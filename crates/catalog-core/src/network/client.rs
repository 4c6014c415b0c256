//! Authenticated HTTP client for one catalog account.
//!
//! Provides a wrapper around reqwest with:
//! - Bearer token authentication and the API version header
//! - Configurable timeouts
//! - Rate limit detection from 429 responses
//! - User-agent management

use crate::config::{AppConfig, NetworkConfig};
use crate::{CatalogError, Result};
use reqwest::{header, Client, RequestBuilder, Response, StatusCode};
use std::time::Duration;
use tracing::debug;

/// HTTP client bound to one API base URL and one access token.
pub struct HttpClient {
    client: Client,
    base_url: String,
    access_token: String,
    /// Default timeout for requests.
    default_timeout: Duration,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("default_timeout", &self.default_timeout)
            .finish()
    }
}

impl HttpClient {
    /// Create a new HTTP client with default configuration.
    pub fn new(base_url: &str, access_token: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, access_token, NetworkConfig::REQUEST_TIMEOUT)
    }

    /// Create a new HTTP client with a custom default timeout.
    pub fn with_timeout(
        base_url: &str,
        access_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let access_token = access_token.into();
        if access_token.trim().is_empty() {
            return Err(CatalogError::Config {
                message: "access token must not be empty".to_string(),
            });
        }

        url::Url::parse(base_url).map_err(|e| CatalogError::Config {
            message: format!("Invalid API base URL {}: {}", base_url, e),
        })?;

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(AppConfig::USER_AGENT)
            .build()
            .map_err(|e| CatalogError::Network {
                message: format!("Failed to create HTTP client: {}", e),
                cause: None,
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.trim().to_string(),
            default_timeout: timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Make a GET request with query parameters.
    pub async fn get_with_query(&self, path: &str, query: &[(&str, &str)]) -> Result<Response> {
        let url = self.url(path);
        let request = self.authorized(self.client.get(&url)).query(query);
        self.send(request, "GET", &url).await
    }

    /// Make a POST request with JSON body.
    pub async fn post_json<T: serde::Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        let url = self.url(path);
        let request = self.authorized(self.client.post(&url)).json(body);
        self.send(request, "POST", &url).await
    }

    /// Check if an HTTP status code indicates a retryable error.
    pub fn is_retryable_status(status: StatusCode) -> bool {
        matches!(status.as_u16(), 408 | 429 | 500 | 502 | 503 | 504)
    }

    /// Client errors whose body still carries a structured `errors` list.
    pub fn has_error_body(status: StatusCode) -> bool {
        status.is_client_error() && !Self::is_retryable_status(status)
    }

    // Internal methods

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.access_token)
            .header("Square-Version", NetworkConfig::API_VERSION)
            .header(header::ACCEPT, "application/json")
    }

    async fn send(&self, request: RequestBuilder, method: &str, url: &str) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                CatalogError::Timeout(self.default_timeout)
            } else {
                CatalogError::Network {
                    message: format!("{} {} failed: {}", method, url, e),
                    cause: std::error::Error::source(&e).map(|s| s.to_string()),
                }
            }
        })?;
        debug!("{} {} -> {}", method, url, response.status());
        self.check_response_status(response, url)
    }

    fn check_response_status(&self, response: Response, url: &str) -> Result<Response> {
        let status = response.status();

        if status.is_success() || Self::has_error_body(status) {
            return Ok(response);
        }

        // Handle rate limiting specifically
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok());

            return Err(CatalogError::RateLimited {
                service: extract_domain(url),
                retry_after_secs: retry_after,
            });
        }

        Err(CatalogError::Http {
            status: status.as_u16(),
            url: url.to_string(),
        })
    }
}

/// Extract domain from a URL.
pub fn extract_domain(url: &str) -> String {
    url::Url::parse(url)
        .map(|u| u.host_str().unwrap_or("unknown").to_string())
        .unwrap_or_else(|_| "unknown".to_string())
}
