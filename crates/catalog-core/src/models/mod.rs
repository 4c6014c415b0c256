//! Data models for the catalog clone engine.
//!
//! These models map directly to the catalog REST API's JSON bodies so the
//! transport can hand them to the engine without a translation layer.

mod catalog;
mod responses;

pub use catalog::*;
pub use responses::*;
