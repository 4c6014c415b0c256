//! Account-to-account catalog cloning.
//!
//! For each kind the engine:
//! 1. Lists every target object of that kind and indexes it by fingerprint
//! 2. Pages through the source objects of that kind
//! 3. Queues unmatched objects for insertion and matched objects for merging
//! 4. Writes each page with one batch upsert and records source → target ids
//!
//! The per-kind differences live in [`CloneStrategy`] implementations.

mod fingerprint;
mod index;
mod orchestrator;
mod reconcile;
mod sanitize;
mod source_map;
mod strategies;

pub use fingerprint::{modifier_fingerprint, variation_fingerprint, Fingerprint, FingerprintBuilder};
pub use index::{build_target_index, TargetIndex};
pub use orchestrator::{TypeCloneStats, TypeCloner};
pub use reconcile::{reconcile, PendingInsert};
pub use sanitize::{new_correlation_id, strip_metadata, strip_nested_metadata, SanitizedObject};
pub use source_map::SourceToTargetMap;
pub use strategies::{
    CategoryStrategy, CloneStrategy, DiscountStrategy, ItemStrategy, ModifierListStrategy,
    TaxStrategy,
};
