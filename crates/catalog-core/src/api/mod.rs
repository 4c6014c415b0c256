//! API implementation submodules.
//!
//! Each submodule contains `impl CatalogCloner` blocks or the types those
//! methods return. The struct definition remains in `lib.rs`.

mod builder;
mod clone;
mod plan;
mod summary;

pub use builder::CatalogClonerBuilder;
pub use plan::{clone_plan, CloneStep};
pub use summary::{CloneAborted, CloneSummary};
