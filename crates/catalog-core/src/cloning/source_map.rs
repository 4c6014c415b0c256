//! Source id → target object maps produced by each type-clone.

use crate::error::{CatalogError, Result};
use crate::models::{CatalogObject, CatalogObjectType};
use std::collections::HashMap;

/// Maps a source-account object id to the equivalent object in the target
/// account.
///
/// Built by one type-clone and only read afterwards, by the type-clones that
/// rewrite references to that kind.
#[derive(Debug, Clone)]
pub struct SourceToTargetMap {
    object_type: CatalogObjectType,
    entries: HashMap<String, CatalogObject>,
}

impl SourceToTargetMap {
    pub fn new(object_type: CatalogObjectType) -> Self {
        Self {
            object_type,
            entries: HashMap::new(),
        }
    }

    pub fn object_type(&self) -> CatalogObjectType {
        self.object_type
    }

    /// Record (or replace) the target object for a source id.
    pub fn insert(&mut self, source_id: impl Into<String>, target: CatalogObject) {
        self.entries.insert(source_id.into(), target);
    }

    pub fn get(&self, source_id: &str) -> Option<&CatalogObject> {
        self.entries.get(source_id)
    }

    /// Target id for a source id, if one was mapped.
    pub fn target_id(&self, source_id: &str) -> Option<&str> {
        self.entries.get(source_id).map(|o| o.id.as_str())
    }

    /// Target id for a reference that must resolve.
    ///
    /// A miss means the referenced kind was not cloned before the kind that
    /// refers to it.
    pub fn require_target_id(&self, reference: &'static str, source_id: &str) -> Result<&str> {
        self.target_id(source_id)
            .ok_or_else(|| CatalogError::ReferenceIntegrity {
                reference,
                source_id: source_id.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CatalogObject)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
