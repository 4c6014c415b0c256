//! Per-kind clone behaviour.
//!
//! The shared clone algorithm lives in [`TypeCloner`](super::TypeCloner);
//! a [`CloneStrategy`] supplies the parts that vary by kind: how objects are
//! compared, how they are prepared for the target account, and whether an
//! existing target object can absorb new nested children.

mod category;
mod discount;
mod item;
mod modifier_list;
mod tax;

pub use category::CategoryStrategy;
pub use discount::DiscountStrategy;
pub use item::ItemStrategy;
pub use modifier_list::ModifierListStrategy;
pub use tax::TaxStrategy;

use super::fingerprint::Fingerprint;
use super::sanitize::{strip_metadata, SanitizedObject};
use crate::error::{CatalogError, Result};
use crate::models::{CatalogObject, CatalogObjectType};

/// Kind-specific hooks for the shared clone algorithm.
pub trait CloneStrategy: Send + Sync {
    /// The kind this strategy lists and writes.
    fn object_type(&self) -> CatalogObjectType;

    /// Whether sanitized objects are forced to be present at all locations.
    fn present_at_all_locations_by_default(&self) -> bool;

    /// Comparison key for `object`.
    ///
    /// When `from_source` is true, references inside the object are first
    /// translated to their target-account ids so that source and target
    /// fingerprints are comparable.
    fn fingerprint(&self, object: &CatalogObject, from_source: bool) -> Result<Fingerprint>;

    /// Whether the object takes part in cloning at all. Ineligible objects
    /// are neither indexed nor cloned.
    fn is_eligible(&self, _object: &CatalogObject) -> bool {
        true
    }

    /// Copy of a source object ready for insertion into the target account.
    fn sanitize(&self, object: &CatalogObject) -> Result<SanitizedObject> {
        Ok(strip_metadata(
            object,
            self.present_at_all_locations_by_default(),
        ))
    }

    /// Mutated copy of `target` carrying any nested children of `source` it
    /// lacks, or `None` when there is nothing to add.
    fn merge(&self, _source: &CatalogObject, _target: &CatalogObject) -> Result<Option<CatalogObject>> {
        Ok(None)
    }
}

/// Payload of `object`, or an error naming the unexpected kind.
pub(crate) fn expect_payload<'a, T>(
    payload: Option<&'a T>,
    expected: CatalogObjectType,
    object: &CatalogObject,
) -> Result<&'a T> {
    payload.ok_or_else(|| {
        let actual = object
            .object_type()
            .map(|t| t.as_str())
            .unwrap_or("UNKNOWN");
        CatalogError::Other(format!(
            "Expected {} payload on catalog object {}, found {}",
            expected, object.id, actual
        ))
    })
}
