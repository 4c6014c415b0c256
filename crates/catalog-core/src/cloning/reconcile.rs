//! Pairing freshly inserted objects with the server-assigned objects a batch
//! upsert returned.

use crate::error::{CatalogError, Result};
use crate::models::{BatchUpsertCatalogObjectsResponse, CatalogObject};
use std::collections::HashMap;
use tracing::debug;

/// A source object sent for insertion under a client id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingInsert {
    pub source_id: String,
    pub correlation_id: String,
}

impl PendingInsert {
    pub fn new(source_id: impl Into<String>, correlation_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            correlation_id: correlation_id.into(),
        }
    }
}

/// Returned objects keyed by their server id.
pub fn returned_by_id(response: &BatchUpsertCatalogObjectsResponse) -> HashMap<&str, &CatalogObject> {
    response
        .objects
        .iter()
        .map(|o| (o.id.as_str(), o))
        .collect()
}

/// Resolve each pending insert to the object the server created for it.
///
/// Returns `(source_id, created_object)` pairs in `pending` order. Fails on
/// the first pending insert that has no id mapping or whose mapped object is
/// missing from the response.
pub fn reconcile(
    response: &BatchUpsertCatalogObjectsResponse,
    pending: &[PendingInsert],
) -> Result<Vec<(String, CatalogObject)>> {
    let by_id = returned_by_id(response);
    let by_client_id: HashMap<&str, &CatalogObject> = response
        .id_mappings
        .iter()
        .filter_map(|mapping| {
            let client_id = mapping.client_object_id.as_deref()?;
            let object_id = mapping.object_id.as_deref()?;
            let object = by_id.get(object_id);
            if object.is_none() {
                // Nested objects (variations, modifiers) are mapped but not
                // returned at the top level.
                debug!("Ignoring id mapping {} -> {}", client_id, object_id);
            }
            object.map(|object| (client_id, *object))
        })
        .collect();

    pending
        .iter()
        .map(|insert| {
            by_client_id
                .get(insert.correlation_id.as_str())
                .map(|object| (insert.source_id.clone(), (*object).clone()))
                .ok_or_else(|| CatalogError::Reconciliation {
                    source_id: insert.source_id.clone(),
                })
        })
        .collect()
}
