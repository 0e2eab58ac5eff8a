//! Access-log analysis pipeline
//!
//! Raw access-log lines go in, a small deterministic report comes out. Every
//! line is looked at once: the extractor pulls out whatever fields it can
//! find, the aggregate state counts them, and at the end of the stream the
//! report builder ranks and trims the counts into a [`Report`].
//!
//! A bad line never ends a run. If a timestamp does not parse or the bytes are
//! not UTF-8, the driver logs a warning and the line still counts as a request.
//!
//! The overall data processing architecture is:
//!
//! LineSource
//! FieldExtractor
//! LogLineFields
//! AggregateState
//! ReportBuilder
//! Report
//! write_report
//!

mod aggregate;
mod counter;
mod driver;
mod error;
mod extract;
mod render;
mod report;
mod sink;
mod source;
#[cfg(test)]
mod tests;
mod types;

pub use aggregate::*;
pub use counter::*;
pub use driver::*;
pub use error::*;
pub use extract::*;
pub use render::*;
pub use report::*;
pub use sink::*;
pub use source::*;
pub use types::*;

use std::path::Path;

/// Settings for one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
    pub report: ReportOptions,
    /// Worker threads; 1 keeps everything on the calling thread.
    pub jobs: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            report: ReportOptions::default(),
            jobs: 1,
        }
    }
}

/// Opens a source, runs it through the pipeline, and optionally saves the
/// report.
#[derive(Debug, Default, Clone, Copy)]
pub struct Analyzer {
    driver: StreamDriver,
    builder: ReportBuilder,
    jobs: usize,
}

impl Analyzer {
    pub fn new(options: AnalysisOptions) -> Self {
        Self {
            driver: StreamDriver::new(),
            builder: ReportBuilder::new(options.report),
            jobs: options.jobs.max(1),
        }
    }

    pub fn analyze_path(&self, input: &Path) -> Result<Report, SourceError> {
        let source = LineSource::open(input)?;
        self.analyze_source(source)
    }

    pub fn analyze_source(&self, source: LineSource) -> Result<Report, SourceError> {
        let state = if self.jobs > 1 {
            let lines = source.collect_lines()?;
            self.driver.run_sharded(&lines, self.jobs)
        } else {
            self.driver.run_source(source)?
        };

        Ok(self.builder.build(&state))
    }

    /// Analyze `input` and write the report to `output`. On failure nothing is
    /// written to `output`.
    pub fn analyze_and_save(&self, input: &Path, output: &Path) -> Result<Report, AnalysisError> {
        let report = self.analyze_path(input)?;
        write_report(&report, output)?;
        Ok(report)
    }
}
