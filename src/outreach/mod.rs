//! Personalized connection notes
//!
//! Templates use literal `{Name}`, `{Company}`, `{Month}` and `{Year}`
//! placeholders. Rendered notes are capped at the LinkedIn connection-note
//! limit.

/// Maximum length of a connection note, in characters
pub const MAX_NOTE_CHARS: usize = 300;

/// Template offered when the user has not written one
pub const DEFAULT_TEMPLATE: &str = "Hi {Name}, congrats on starting at {Company} in {Month} {Year}! \
I'm also working in product and would love to connect and hear how your first months are going.";

/// Fill a note template and truncate it to [`MAX_NOTE_CHARS`]
pub fn render_note(template: &str, name: &str, company: &str, month: &str, year: i32) -> String {
    let note = template
        .replace("{Name}", name)
        .replace("{Company}", company)
        .replace("{Month}", month)
        .replace("{Year}", &year.to_string());

    truncate_chars(note, MAX_NOTE_CHARS)
}

fn truncate_chars(mut text: String, max: usize) -> String {
    if let Some((idx, _)) = text.char_indices().nth(max) {
        text.truncate(idx);
    }
    text
}
