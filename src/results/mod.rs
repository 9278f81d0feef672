//! Result types, parsing and deduplication
//!
//! Provider results come in as [`RawResult`]s and leave as deduplicated
//! [`Candidate`]s.

mod contacts;
mod container;
mod parse;
mod types;

pub use contacts::{extract_emails, extract_phones};
pub use container::{deduplicate, ResultContainer};
pub use parse::{display_name, parse_candidate};
pub use types::*;
