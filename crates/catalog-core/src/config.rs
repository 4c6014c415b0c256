//! Centralized configuration for the catalog clone engine.
//!
//! This module provides configuration constants for the HTTP transport and the
//! clone engine, plus the runtime [`CloneOptions`] a caller passes per run.

use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Application-level configuration.
pub struct AppConfig;

impl AppConfig {
    pub const APP_NAME: &'static str = "Catalog Clone";
    pub const USER_AGENT: &'static str = "catalog-clone/0.1";
    pub const SOURCE_TOKEN_ENV: &'static str = "CATALOG_SOURCE_ACCESS_TOKEN";
    pub const TARGET_TOKEN_ENV: &'static str = "CATALOG_TARGET_ACCESS_TOKEN";
}

/// Network-related configuration.
pub struct NetworkConfig;

impl NetworkConfig {
    pub const API_BASE: &'static str = "https://connect.squareup.com";
    pub const SANDBOX_API_BASE: &'static str = "https://connect.squareupsandbox.com";
    /// Value sent in the `Square-Version` header.
    pub const API_VERSION: &'static str = "2024-01-18";
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
    pub const MAX_RETRIES: u32 = 3;
    pub const RETRY_BASE_DELAY: Duration = Duration::from_secs(1);
    pub const RETRY_MAX_DELAY: Duration = Duration::from_secs(30);
    pub const LIST_PATH: &'static str = "/v2/catalog/list";
    pub const BATCH_UPSERT_PATH: &'static str = "/v2/catalog/batch-upsert";
}

/// Constants shared by the fingerprint and sanitize steps.
pub struct CloneConfig;

impl CloneConfig {
    /// Prefix the server uses to recognise client-generated ids.
    pub const CLIENT_ID_PREFIX: &'static str = "#";
    /// Separator between fingerprint fields.
    pub const FINGERPRINT_DELIMITER: &'static str = ":::";
    /// Encoding of an absent fingerprint field.
    pub const NULL_FIELD: &'static str = "null";
}

/// Options for cloning discounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscountOptions {
    /// Make cloned discounts available at all locations.
    pub present_at_all_locations: bool,
}

/// Options for cloning items (and the categories they reference).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemOptions {
    /// Make cloned items available at all locations.
    pub present_at_all_locations: bool,
    /// Keep tax references on cloned items. Requires taxes to be cloned.
    pub include_applied_taxes: bool,
    /// Keep modifier list references on cloned items. Requires modifier lists
    /// to be cloned.
    pub include_applied_modifier_lists: bool,
}

/// Which record kinds to clone in one run.
///
/// A kind set to `None` (or `false`) is skipped entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloneOptions {
    pub discounts: Option<DiscountOptions>,
    /// Modifier lists are always made available at all locations.
    pub modifier_lists: bool,
    pub taxes: bool,
    /// Items are cloned together with categories.
    pub items: Option<ItemOptions>,
}

impl CloneOptions {
    /// Clone every supported kind with default sub-options.
    pub fn all() -> Self {
        Self {
            discounts: Some(DiscountOptions::default()),
            modifier_lists: true,
            taxes: true,
            items: Some(ItemOptions::default()),
        }
    }

    /// True when nothing would be cloned.
    pub fn is_empty(&self) -> bool {
        self.discounts.is_none() && !self.modifier_lists && !self.taxes && self.items.is_none()
    }

    /// Reject combinations whose reference maps would never be built.
    pub fn validate(&self) -> Result<()> {
        if let Some(items) = &self.items {
            if items.include_applied_taxes && !self.taxes {
                return Err(CatalogError::Config {
                    message: "including applied taxes requires cloning taxes".to_string(),
                });
            }
            if items.include_applied_modifier_lists && !self.modifier_lists {
                return Err(CatalogError::Config {
                    message: "including applied modifier lists requires cloning modifier lists"
                        .to_string(),
                });
            }
        }
        Ok(())
    }

    /// Load options from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }
}
