use crate::analysis::aggregate::AggregateState;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

pub const DEFAULT_TOP_N: usize = 10;
pub const DEFAULT_RECENT_ERRORS: usize = 10;

/// How much of the state ends up in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub top_n: usize,
    pub recent_errors: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            recent_errors: DEFAULT_RECENT_ERRORS,
        }
    }
}

/// Immutable result of one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub summary: Summary,
    #[serde(rename = "top_ips")]
    pub top_clients: RankedCounts,
    #[serde(rename = "status_code_distribution")]
    pub status_codes: RankedCounts,
    #[serde(rename = "most_requested_paths")]
    pub top_paths: RankedCounts,
    pub hourly_traffic: RankedCounts,
    #[serde(rename = "recent_404_errors")]
    pub recent_errors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_requests: u64,
    #[serde(rename = "unique_ips")]
    pub unique_clients: u64,
    pub total_404_errors: u64,
}

/// Key/count pairs in a meaningful order.
///
/// Serializes as a map whose key order is the pair order, so rankings survive
/// the trip through JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedCounts(pub Vec<(String, u64)>);

impl RankedCounts {
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, c)| *c)
    }

    pub fn total(&self) -> u64 {
        self.0.iter().map(|(_, c)| *c).sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for RankedCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, count) in &self.0 {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RankedCounts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RankedVisitor;

        impl<'de> Visitor<'de> for RankedVisitor {
            type Value = RankedCounts;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of keys to counts")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut pairs = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, count)) = access.next_entry::<String, u64>()? {
                    pairs.push((key, count));
                }
                Ok(RankedCounts(pairs))
            }
        }

        deserializer.deserialize_map(RankedVisitor)
    }
}

/// Turns an [`AggregateState`] into a [`Report`]. Pure; the state is only read.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReportBuilder {
    options: ReportOptions,
}

impl ReportBuilder {
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ReportOptions {
        self.options
    }

    pub fn build(&self, state: &AggregateState) -> Report {
        let errors = state.recent_errors();
        let keep_from = errors.len().saturating_sub(self.options.recent_errors);

        Report {
            summary: Summary {
                total_requests: state.total_requests(),
                unique_clients: state.client_counts().len() as u64,
                total_404_errors: state.total_404_errors(),
            },
            top_clients: RankedCounts(state.client_counts().top(self.options.top_n)),
            status_codes: RankedCounts(
                state
                    .status_counts()
                    .iter()
                    .map(|(code, count)| (code.to_string(), count))
                    .collect(),
            ),
            top_paths: RankedCounts(state.path_counts().top(self.options.top_n)),
            // "00".."23" sort the same lexically and numerically
            hourly_traffic: RankedCounts(state.hourly_traffic().sorted_by_key()),
            recent_errors: errors[keep_from..]
                .iter()
                .map(|sample| sample.line.clone())
                .collect(),
        }
    }
}
