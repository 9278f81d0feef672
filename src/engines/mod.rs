//! Search engine module
//!
//! Defines the Engine and Provider traits and the SerpApi engine.

mod provider;
mod traits;

pub mod serpapi;

pub use provider::EngineProvider;
pub use serpapi::SerpApi;
pub use traits::*;
