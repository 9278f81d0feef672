//! PM-Searcher: find people who recently started a role through public
//! LinkedIn profile snippets
//!
//! A search run issues one provider query per target month, parses the
//! organic results into candidates, deduplicates them by profile link and
//! optionally attaches extracted contact details and a connection note.

pub mod cache;
pub mod config;
pub mod engines;
pub mod export;
pub mod network;
pub mod outreach;
pub mod query;
pub mod results;
pub mod search;
pub mod web;

pub use config::Settings;
pub use engines::{Engine, Provider};
pub use results::{Candidate, RawResult};
pub use search::{SearchCriteria, SearchError, SearchPipeline, SearchReport};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
