use crate::analysis::{AnalysisOptions, DEFAULT_RECENT_ERRORS, DEFAULT_TOP_N, ReportOptions};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_LOG_FILE: &str = "logtally.log";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogtallyConfig {
    pub report: ReportConfig,
    pub analysis: AnalysisConfig,
    pub logging: LoggingConfig,
}

impl LogtallyConfig {
    pub fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions {
            report: ReportOptions {
                top_n: self.report.top_n,
                recent_errors: self.report.recent_errors,
            },
            jobs: self.analysis.jobs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Entries kept in each ranking.
    pub top_n: usize,
    /// Most recent 404 lines kept in the report.
    pub recent_errors: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            recent_errors: DEFAULT_RECENT_ERRORS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    pub jobs: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self { jobs: 1 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set.
    pub level: String,
    /// Log file; `None` logs to stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            file: Some(PathBuf::from(DEFAULT_LOG_FILE)),
        }
    }
}
