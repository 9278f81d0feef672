//! Query construction module
//!
//! Builds the provider query for one target month:
//!
//! ```text
//! site:linkedin.com/in/ "<title>" "<company>" "Started <month> <year>"
//! ```
//!
//! Title and company are quoted literally. Quote characters inside them are
//! passed through untouched, which can break the phrase grouping on the
//! provider side.

/// Restricts results to public LinkedIn profile pages
pub const SITE_FILTER: &str = "site:linkedin.com/in/";

/// Terms appended when contact extraction is requested, to favour snippets
/// that mention a way to get in touch
pub const CONTACT_HINTS: &str = r#"("email" OR "contact" OR "gmail.com" OR "phone")"#;

/// The `Started <month> <year>` phrase a profile snippet must contain
pub fn started_phrase(month: &str, year: i32) -> String {
    format!("Started {} {}", month, year)
}

/// Build the provider query string for one month
pub fn build_query(
    title: &str,
    company: &str,
    month: &str,
    year: i32,
    include_contact_hints: bool,
) -> String {
    let mut query = format!(
        "{} \"{}\" \"{}\" \"{}\"",
        SITE_FILTER,
        title,
        company,
        started_phrase(month, year)
    );

    if include_contact_hints {
        query.push(' ');
        query.push_str(CONTACT_HINTS);
    }

    query
}
