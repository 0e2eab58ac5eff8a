use crate::analysis::aggregate::AggregateState;
use crate::analysis::error::SourceError;
use crate::analysis::extract::FieldExtractor;
use crate::analysis::source::{LineSource, RawLine};
use crate::analysis::types::LineIssue;
use std::thread;
use tracing::{debug, info, warn};

/// Feeds lines through the extractor into a fresh [`AggregateState`].
///
/// Lines are handled strictly in source order, one at a time. Anything that
/// goes wrong with a single line is logged and skipped over; it never aborts
/// the run and never keeps the line out of the request total.
#[derive(Debug, Default, Clone, Copy)]
pub struct StreamDriver {
    extractor: FieldExtractor,
}

impl StreamDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn run<I, S>(&self, lines: I) -> AggregateState
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut run = Run::start(self.extractor);
        for line in lines {
            run.process(line.as_ref(), None);
        }

        run.finish()
    }

    /// Drive a [`LineSource`]. Lines that had to be decoded lossily are warned
    /// about; a failed read stops the run and no state is returned.
    pub fn run_source(&self, source: LineSource) -> Result<AggregateState, SourceError> {
        debug!(source = %source.path().display(), "reading lines");

        let mut run = Run::start(self.extractor);
        for line in source {
            run.process_raw(&line?);
        }

        Ok(run.finish())
    }

    /// Split `lines` into `jobs` contiguous shards, aggregate each on its own
    /// thread, and merge the shards back in order.
    ///
    /// The result matches [`run`](Self::run) over the same lines.
    pub fn run_sharded(&self, lines: &[RawLine], jobs: usize) -> AggregateState {
        if jobs <= 1 || lines.len() < 2 {
            let mut run = Run::start(self.extractor);
            for line in lines {
                run.process_raw(line);
            }
            return run.finish();
        }

        info!(jobs, lines = lines.len(), "sharded analysis started");

        let chunk_size = lines.len().div_ceil(jobs);
        let extractor = self.extractor;

        let shards: Vec<AggregateState> = thread::scope(|scope| {
            let handles: Vec<_> = lines
                .chunks(chunk_size)
                .enumerate()
                .map(|(i, chunk)| {
                    let offset = (i * chunk_size) as u64;
                    scope.spawn(move || {
                        let mut run = Run::new(extractor, offset);
                        for line in chunk {
                            run.process_raw(line);
                        }
                        run.state
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|h| match h.join() {
                    Ok(state) => state,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        });

        let mut shards = shards.into_iter();
        let mut merged = shards.next().unwrap_or_default();
        for shard in shards {
            merged.merge(shard);
        }

        info!(
            total_requests = merged.total_requests(),
            unique_clients = merged.client_counts().len(),
            "sharded analysis finished"
        );

        merged
    }
}

struct Run {
    extractor: FieldExtractor,
    state: AggregateState,
    line_no: u64,
    warnings: u64,
}

impl Run {
    fn new(extractor: FieldExtractor, offset: u64) -> Self {
        Self {
            extractor,
            state: AggregateState::with_offset(offset),
            line_no: offset,
            warnings: 0,
        }
    }

    /// A whole-input run. Only these emit the start and finish notices;
    /// shards stay quiet and are summarized once merged.
    fn start(extractor: FieldExtractor) -> Self {
        info!("analysis started");
        Self::new(extractor, 0)
    }

    fn process_raw(&mut self, line: &RawLine) {
        let issue = line.lossy.then_some(LineIssue::InvalidUtf8);
        self.process(&line.text, issue);
    }

    fn process(&mut self, line: &str, read_issue: Option<LineIssue>) {
        self.line_no += 1;

        let extraction = self.extractor.inspect(line);
        for issue in read_issue.iter().chain(extraction.issues.iter()) {
            self.warnings += 1;
            warn!(line = self.line_no, reason = %issue, "skipping unreadable field");
        }

        self.state.apply(extraction.fields, line);
    }

    fn finish(self) -> AggregateState {
        info!(
            lines = self.line_no,
            total_requests = self.state.total_requests(),
            unique_clients = self.state.client_counts().len(),
            warnings = self.warnings,
            "analysis finished"
        );
        self.state
    }
}
