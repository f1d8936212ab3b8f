//! CSV serialisation of submissions for the admin export.
//!
//! Layout: one header line, one line per submission, `\n` separated. The date
//! column is rendered as `YYYY-MM-DD` in the configured offset; every other
//! column is a double-quoted string with embedded quotes doubled.

use chrono::{DateTime, FixedOffset, Offset, Utc};

use crate::model::submission::Submission;

pub const CSV_HEADERS: [&str; 8] = [
    "Date",
    "Prénom",
    "Nom",
    "Email",
    "Téléphone",
    "Service",
    "Type",
    "Message",
];

pub const CSV_CONTENT_TYPE: &str = "text/csv;charset=utf-8";

/// A rendered export, ready to be offered as a download.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
}

#[derive(Debug, Clone, Copy)]
pub struct CsvExporter {
    offset: FixedOffset,
}

impl Default for CsvExporter {
    fn default() -> Self {
        CsvExporter { offset: Utc.fix() }
    }
}

impl CsvExporter {
    pub fn new(offset: FixedOffset) -> Self {
        CsvExporter { offset }
    }

    pub fn export(&self, submissions: &[Submission], now: DateTime<Utc>) -> CsvExport {
        CsvExport {
            filename: export_filename(now),
            content: self.render(submissions),
        }
    }

    pub fn render(&self, submissions: &[Submission]) -> String {
        let mut lines = Vec::with_capacity(submissions.len() + 1);
        lines.push(CSV_HEADERS.join(","));
        for s in submissions {
            let date = s.created_at.with_timezone(&self.offset).format("%Y-%m-%d").to_string();
            let fields = [
                date,
                quote(&s.first_name),
                quote(&s.last_name),
                quote(&s.email),
                quote(s.phone.as_deref().unwrap_or("")),
                quote(&s.service_type),
                quote(s.submission_type.as_str()),
                quote(s.message.as_deref().unwrap_or("")),
            ];
            lines.push(fields.join(","));
        }
        lines.join("\n")
    }
}

/// `comparadise-submissions-YYYY-MM-DD.csv`, dated in UTC.
pub fn export_filename(now: DateTime<Utc>) -> String {
    format!("comparadise-submissions-{}.csv", now.format("%Y-%m-%d"))
}

// line breaks become spaces so each record stays on one line
fn quote(value: &str) -> String {
    let flattened: String = value
        .chars()
        .map(|c| if c == '\r' || c == '\n' { ' ' } else { c })
        .collect();
    format!("\"{}\"", flattened.replace('"', "\"\""))
}
