//! Catalog Core - Headless library for cloning catalog data between accounts.
//!
//! This crate copies discounts, modifier lists, taxes, categories and items
//! from a source account into a target account. Objects that already exist
//! in the target (by fingerprint) are reused, and existing items and modifier
//! lists absorb variations and modifiers they lack, so a run can be repeated
//! without creating duplicates.
//!
//! # Example
//!
//! ```rust,ignore
//! use catalog_core::{CatalogCloner, CloneOptions};
//!
//! #[tokio::main]
//! async fn main() -> catalog_core::Result<()> {
//!     let cloner = CatalogCloner::builder()
//!         .source_access_token("SOURCE_TOKEN")
//!         .target_access_token("TARGET_TOKEN")
//!         .build()?;
//!
//!     match cloner.clone_account_data(&CloneOptions::all()).await {
//!         Ok(summary) => println!("Cloned {} objects", summary.total_cloned()),
//!         Err(aborted) => eprintln!("{}", aborted),
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cloning;
pub mod config;
pub mod error;
pub mod models;
pub mod network;

mod api;

// Re-export commonly used types
pub use cloning::{CloneStrategy, Fingerprint, SourceToTargetMap, TypeCloneStats};
pub use config::{CloneOptions, DiscountOptions, ItemOptions};
pub use error::{CatalogError, Result};
pub use models::{CatalogObject, CatalogObjectType};
pub use network::{CatalogApi, DynCatalogApi, RetryConfig, SquareCatalogClient};

// Re-export builder and run types from api module
pub use api::{clone_plan, CatalogClonerBuilder, CloneAborted, CloneStep, CloneSummary};

/// Main API struct for catalog cloning.
///
/// Holds one [`CatalogApi`] per account. The source account is only read;
/// the target account is read and written.
#[derive(Clone)]
pub struct CatalogCloner {
    source: DynCatalogApi,
    target: DynCatalogApi,
}

impl std::fmt::Debug for CatalogCloner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogCloner")
            .field("source", &self.source.label())
            .field("target", &self.target.label())
            .finish()
    }
}

impl CatalogCloner {
    /// Create a builder for CatalogCloner.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cloner = CatalogCloner::builder()
    ///     .base_url("https://connect.squareupsandbox.com")
    ///     .source_access_token(source)
    ///     .target_access_token(target)
    ///     .build()?;
    /// ```
    pub fn builder() -> CatalogClonerBuilder {
        CatalogClonerBuilder::new()
    }

    /// Create a cloner over two existing account clients.
    pub fn new(source: DynCatalogApi, target: DynCatalogApi) -> Self {
        Self { source, target }
    }

    /// Client for the account being copied from.
    pub fn source(&self) -> &DynCatalogApi {
        &self.source
    }

    /// Client for the account being copied into.
    pub fn target(&self) -> &DynCatalogApi {
        &self.target
    }
}
