//! Web server module
//!
//! Provides the search form, results pages and CSV download.

mod handlers;
mod routes;
mod state;
mod templates;

pub use handlers::SearchForm;
pub use routes::create_router;
pub use state::AppState;
pub use templates::Templates;
