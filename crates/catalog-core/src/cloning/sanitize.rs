//! Stripping source-account metadata before an object is written to the
//! target account.
//!
//! Both functions return a new object and leave their input untouched.

use crate::config::CloneConfig;
use crate::models::CatalogObject;
use uuid::Uuid;

/// A sanitized copy plus the client id it was given.
#[derive(Debug, Clone, PartialEq)]
pub struct SanitizedObject {
    pub object: CatalogObject,
    pub correlation_id: String,
}

/// A fresh client-generated id (`#` + UUID v4).
pub fn new_correlation_id() -> String {
    format!("{}{}", CloneConfig::CLIENT_ID_PREFIX, Uuid::new_v4())
}

fn clear_account_metadata(object: &mut CatalogObject) {
    object.id = new_correlation_id();
    // Server-assigned.
    object.version = None;
    object.updated_at = None;
    // Only meaningful in the source account.
    object.catalog_v1_ids.clear();
    object.present_at_location_ids.clear();
    object.absent_at_location_ids.clear();
}

/// Copy of a top-level object ready for insertion into the target account.
pub fn strip_metadata(
    object: &CatalogObject,
    present_at_all_locations_by_default: bool,
) -> SanitizedObject {
    let mut sanitized = object.clone();
    clear_account_metadata(&mut sanitized);
    if present_at_all_locations_by_default {
        sanitized.present_at_all_locations = Some(true);
    }
    let correlation_id = sanitized.id.clone();
    SanitizedObject {
        object: sanitized,
        correlation_id,
    }
}

/// Copy of a nested object (variation, modifier) ready to live under
/// `parent` in the target account. Location presence always follows the
/// parent.
pub fn strip_nested_metadata(parent: &CatalogObject, child: &CatalogObject) -> CatalogObject {
    let mut sanitized = child.clone();
    clear_account_metadata(&mut sanitized);
    sanitized.set_location_presence(parent.location_presence());
    sanitized
}
