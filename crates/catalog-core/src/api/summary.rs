//! Run results.

use crate::cloning::TypeCloneStats;
use crate::error::CatalogError;
use crate::models::CatalogObjectType;
use serde::Serialize;

/// Per-kind counters for one run, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CloneSummary {
    pub types: Vec<TypeCloneStats>,
}

impl CloneSummary {
    /// Counters for one kind, if it ran.
    pub fn get(&self, object_type: CatalogObjectType) -> Option<&TypeCloneStats> {
        self.types.iter().find(|s| s.object_type == object_type)
    }

    pub fn total_cloned(&self) -> usize {
        self.types.iter().map(|s| s.cloned).sum()
    }

    pub fn total_merged(&self) -> usize {
        self.types.iter().map(|s| s.merged).sum()
    }
}

/// A run that stopped on an error. Kinds that completed before the failure
/// stay written to the target account; `summary` says how far it got.
#[derive(Debug, thiserror::Error)]
#[error("Catalog clone aborted: {error}")]
pub struct CloneAborted {
    #[source]
    pub error: CatalogError,
    pub summary: CloneSummary,
}
