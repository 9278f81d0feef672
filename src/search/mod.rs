//! Search orchestration module
//!
//! Turns search criteria into provider queries, one per target month, and
//! aggregates the parsed, deduplicated candidates into a report.

mod executor;
mod models;

pub use executor::SearchPipeline;
pub use models::*;
