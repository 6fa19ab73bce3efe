//! Data models for the Autotask REST API.
//!
//! Vendor records are handled as `serde_json::Value`; this module holds the
//! typed pieces around them: query filters, call outcomes and the per-entity
//! field projections used for rendering.

mod entity;
mod query;
mod result;

pub use entity::*;
pub use query::*;
pub use result::*;
