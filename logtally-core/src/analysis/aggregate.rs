use crate::analysis::counter::FrequencyCounter;
use crate::analysis::types::{ErrorSample, LogLineFields};

/// Status code whose lines are kept verbatim for the report.
pub const CAPTURED_STATUS: &str = "404";

/// Running statistics for one analysis run.
///
/// Append-only: every counter only ever grows. A state has a single writer;
/// parallel runs give each worker its own state and [`merge`](Self::merge)
/// them afterwards.
#[derive(Debug, Clone, Default)]
pub struct AggregateState {
    client_counts: FrequencyCounter,
    status_counts: FrequencyCounter,
    path_counts: FrequencyCounter,
    hourly_traffic: FrequencyCounter,
    // Kept whole; trimming to the most recent samples happens in the report.
    recent_errors: Vec<ErrorSample>,
    total_requests: u64,
    // Lines that precede this state's first line in the overall source.
    offset: u64,
}

impl AggregateState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A state whose first line sits at `offset + 1` in the overall source.
    pub fn with_offset(offset: u64) -> Self {
        Self {
            offset,
            ..Self::default()
        }
    }

    pub fn apply(&mut self, fields: LogLineFields, raw_line: &str) {
        self.total_requests += 1;

        if let Some(client) = &fields.client_address {
            self.client_counts.increment(client);
        }

        if let Some(hour) = &fields.hour_bucket {
            self.hourly_traffic.increment(hour);
        }

        if let Some(path) = &fields.request_path {
            self.path_counts.increment(path);
        }

        if let Some(status) = &fields.status_code {
            self.status_counts.increment(status);

            if status == CAPTURED_STATUS {
                self.recent_errors.push(ErrorSample {
                    position: self.offset + self.total_requests,
                    line: raw_line.to_string(),
                });
            }
        }
    }

    /// Fold another state into this one.
    ///
    /// Counters are summed. Samples are ordered by source position, so merging
    /// shards in any order reproduces the sequential sample list. First-seen
    /// ordering of keys follows merge order: merge shards front to back to
    /// reproduce a sequential run.
    pub fn merge(&mut self, other: AggregateState) {
        self.client_counts.merge(&other.client_counts);
        self.status_counts.merge(&other.status_counts);
        self.path_counts.merge(&other.path_counts);
        self.hourly_traffic.merge(&other.hourly_traffic);
        self.total_requests += other.total_requests;

        self.recent_errors.extend(other.recent_errors);
        self.recent_errors.sort_by_key(|sample| sample.position);
    }

    pub fn total_requests(&self) -> u64 {
        self.total_requests
    }

    pub fn client_counts(&self) -> &FrequencyCounter {
        &self.client_counts
    }

    pub fn status_counts(&self) -> &FrequencyCounter {
        &self.status_counts
    }

    pub fn path_counts(&self) -> &FrequencyCounter {
        &self.path_counts
    }

    pub fn hourly_traffic(&self) -> &FrequencyCounter {
        &self.hourly_traffic
    }

    pub fn recent_errors(&self) -> &[ErrorSample] {
        &self.recent_errors
    }

    pub fn total_404_errors(&self) -> u64 {
        self.recent_errors.len() as u64
    }
}
