use crate::analysis::types::{Extraction, LineIssue, LogLineFields};
use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;

// Each field has its own pattern. Nothing is shared between them so a line
// that breaks one token family still yields the others.
static CLIENT_ADDRESS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}").expect("valid regex"));
static TIMESTAMP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{2}/\w{3}/\d{4}:\d{2}:\d{2}:\d{2}").expect("valid regex"));
static REQUEST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""(GET|POST|PUT|DELETE|HEAD|OPTIONS|PATCH) ([^"]*)""#).expect("valid regex")
});
static STATUS_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"" (\d{3})(?:\s|$)"#).expect("valid regex"));

const TIMESTAMP_FORMAT: &str = "%d/%b/%Y:%H:%M:%S";

/// Stateless field extractor for access-log lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct FieldExtractor;

impl FieldExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract every field that can be found. Never fails.
    pub fn extract(&self, line: &str) -> LogLineFields {
        self.inspect(line).fields
    }

    /// Like [`extract`](Self::extract), but also reports what went wrong on
    /// the way so the caller can log it.
    pub fn inspect(&self, line: &str) -> Extraction {
        let mut out = Extraction::default();

        out.fields.client_address = CLIENT_ADDRESS.find(line).map(|m| m.as_str().to_string());

        if let Some(m) = TIMESTAMP.find(line) {
            match hour_of(m.as_str()) {
                Ok(hour) => out.fields.hour_bucket = Some(hour),
                Err(source) => out.issues.push(LineIssue::InvalidTimestamp {
                    raw: m.as_str().to_string(),
                    source,
                }),
            }
        }

        // Path only; a trailing protocol token is not part of the key.
        out.fields.request_path = REQUEST
            .captures(line)
            .and_then(|caps| caps.get(2))
            .and_then(|target| target.as_str().split_whitespace().next())
            .map(str::to_string);

        out.fields.status_code = STATUS_CODE
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string());

        out
    }
}

// Offsets such as "+0200" are never part of the match, so the hour stays in
// whatever zone the log was written in.
fn hour_of(raw: &str) -> Result<String, chrono::ParseError> {
    let ts = NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)?;
    Ok(ts.format("%H").to_string())
}
