//! CSV export of search candidates

use crate::results::Candidate;
use anyhow::Result;
use chrono::NaiveDateTime;
use std::collections::BTreeSet;
use std::io::Write;

/// Header row of the exported file
pub const CSV_HEADER: [&str; 6] = ["Name", "Started", "LinkedIn URL", "Emails", "Phones", "Note"];

/// Write candidates as CSV, header first, one row per candidate
pub fn write_csv<W: Write>(writer: W, candidates: &[Candidate]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;

    for candidate in candidates {
        let emails = join_set(candidate.emails.as_ref());
        let phones = join_set(candidate.phones.as_ref());
        csv_writer.write_record([
            candidate.name.as_str(),
            candidate.started.as_str(),
            candidate.link.as_str(),
            emails.as_str(),
            phones.as_str(),
            candidate.note.as_deref().unwrap_or_default(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Render candidates as a CSV string
pub fn to_csv_string(candidates: &[Candidate]) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, candidates)?;
    Ok(String::from_utf8(buffer)?)
}

/// Download filename stamped with `at`
pub fn export_filename(at: NaiveDateTime) -> String {
    format!("pm_profiles_{}.csv", at.format("%Y%m%d_%H%M%S"))
}

fn join_set(values: Option<&BTreeSet<String>>) -> String {
    values
        .map(|set| set.iter().map(String::as_str).collect::<Vec<_>>().join("; "))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn candidate() -> Candidate {
        Candidate {
            name: "Jane Doe".to_string(),
            started: "August 2025".to_string(),
            link: "https://www.linkedin.com/in/janedoe".to_string(),
            snippet: "ignored".to_string(),
            emails: Some(BTreeSet::from(["b@x.com".to_string(), "a@x.com".to_string()])),
            phones: None,
            note: Some("Hi Jane, congrats, and welcome!".to_string()),
        }
    }

    #[test]
    fn test_header_only_when_empty() {
        let csv = to_csv_string(&[]).unwrap();
        assert_eq!(csv, "Name,Started,LinkedIn URL,Emails,Phones,Note\n");
    }

    #[test]
    fn test_row_layout() {
        let csv = to_csv_string(&[candidate()]).unwrap();
        let mut lines = csv.lines();
        lines.next();
        assert_eq!(
            lines.next(),
            Some(
                "Jane Doe,August 2025,https://www.linkedin.com/in/janedoe,a@x.com; b@x.com,,\"Hi Jane, congrats, and welcome!\""
            )
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_roundtrip_through_reader() {
        let csv = to_csv_string(&[candidate(), candidate()]).unwrap();
        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let rows: Vec<csv::StringRecord> = reader.records().collect::<Result<_, _>>().unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][5], "Hi Jane, congrats, and welcome!");
    }

    #[test]
    fn test_export_filename() {
        let at = NaiveDate::from_ymd_opt(2025, 10, 19)
            .unwrap()
            .and_hms_opt(14, 5, 9)
            .unwrap();
        assert_eq!(export_filename(at), "pm_profiles_20251019_140509.csv");
    }
}
