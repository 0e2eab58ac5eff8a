use smallvec::SmallVec;
use thiserror::Error;

/// Fields harvested from a single access-log line.
///
/// Each field is extracted on its own; a missing field says nothing about the
/// others.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogLineFields {
    pub client_address: Option<String>,
    /// Two-digit hour ("00".."23") in the timestamp's own zone.
    pub hour_bucket: Option<String>,
    pub request_path: Option<String>,
    /// status is kept as the 3-digit token found in the line
    pub status_code: Option<String>,
}

/// Non-fatal problem noticed while reading or extracting one line.
#[derive(Debug, Error)]
pub enum LineIssue {
    #[error("timestamp '{raw}' does not parse as a calendar date: {source}")]
    InvalidTimestamp {
        raw: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("line is not valid UTF-8; decoded lossily")]
    InvalidUtf8,
}

/// Result of inspecting a line: the fields plus anything worth a warning.
#[derive(Debug, Default)]
pub struct Extraction {
    pub fields: LogLineFields,
    pub issues: SmallVec<[LineIssue; 1]>,
}

/// A captured 404 line and its 1-based position in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorSample {
    pub position: u64,
    pub line: String,
}
