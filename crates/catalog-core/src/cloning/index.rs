//! Fingerprint index over the target account's objects of one kind.

use super::fingerprint::Fingerprint;
use super::strategies::CloneStrategy;
use crate::error::Result;
use crate::models::CatalogObject;
use crate::network::CatalogApi;
use std::collections::HashMap;
use tracing::{debug, info};

/// Target objects keyed by fingerprint.
///
/// Built once per type-clone, before any source page is processed, and not
/// modified afterwards.
#[derive(Debug, Clone, Default)]
pub struct TargetIndex {
    entries: HashMap<Fingerprint, CatalogObject>,
    retrieved: usize,
}

impl TargetIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index already-listed objects. Ineligible objects are skipped and, on
    /// fingerprint collisions, the last object wins.
    pub fn from_objects(
        strategy: &dyn CloneStrategy,
        objects: impl IntoIterator<Item = CatalogObject>,
    ) -> Result<Self> {
        let mut index = Self::new();
        index.extend(strategy, objects)?;
        Ok(index)
    }

    fn extend(
        &mut self,
        strategy: &dyn CloneStrategy,
        objects: impl IntoIterator<Item = CatalogObject>,
    ) -> Result<()> {
        for object in objects {
            if !strategy.is_eligible(&object) {
                continue;
            }
            let fingerprint = strategy.fingerprint(&object, false)?;
            self.retrieved += 1;
            if let Some(previous) = self.entries.insert(fingerprint.clone(), object) {
                debug!(
                    "Target {} {} shares fingerprint '{}', keeping the later one",
                    strategy.object_type(),
                    previous.id,
                    fingerprint
                );
            }
        }
        Ok(())
    }

    pub fn get(&self, fingerprint: &Fingerprint) -> Option<&CatalogObject> {
        self.entries.get(fingerprint)
    }

    /// Distinct fingerprints.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Eligible objects seen while building, collisions included.
    pub fn retrieved(&self) -> usize {
        self.retrieved
    }
}

/// List every object of the strategy's kind in the target account and index
/// it by fingerprint.
pub async fn build_target_index(
    target: &dyn CatalogApi,
    strategy: &dyn CloneStrategy,
) -> Result<TargetIndex> {
    let kind = strategy.object_type();
    let mut index = TargetIndex::new();
    let mut cursor: Option<String> = None;

    loop {
        let page = target
            .list_catalog(kind, cursor.as_deref())
            .await?
            .into_result()?;
        let next = page.next_cursor().map(str::to_string);
        index.extend(strategy, page.objects)?;
        info!(
            "  Retrieved {} {} from {} account",
            index.retrieved(),
            kind.plural_label(),
            target.label()
        );

        match next {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    Ok(index)
}
