//! Turning provider results into candidates

use super::types::{Candidate, RawResult, NOT_AVAILABLE};

/// Characters that separate a person's name from the rest of a profile title
const NAME_SEPARATORS: [char; 3] = ['-', ',', '|'];

/// Extract the display name from a profile title
///
/// Takes everything before the first separator. A title with nothing in
/// front of the separator yields `N/A`.
pub fn display_name(title: &str) -> String {
    let name = title
        .split(&NAME_SEPARATORS[..])
        .next()
        .unwrap_or_default()
        .trim();

    if name.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        name.to_string()
    }
}

/// Build a candidate from a raw result found for `month_label`
pub fn parse_candidate(raw: &RawResult, month_label: &str) -> Candidate {
    Candidate {
        name: display_name(raw.title()),
        started: month_label.to_string(),
        link: raw.link().to_string(),
        snippet: raw.snippet().to_string(),
        emails: None,
        phones: None,
        note: None,
    }
}
