use crate::analysis::{AnalysisError, Analyzer, Report, render_summary};
use crate::conf::{ConfigError, LogtallyConfig, load_config, validate_config};
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::error;

pub const SUCCESS_MESSAGE: &str = "Analysis complete. Report saved to";
pub const FAILURE_MESSAGE: &str = "Analysis failed. Check the log file for details.";
pub const SAVE_FAILURE_MESSAGE: &str =
    "Analysis complete but the report could not be saved. Check the log file for details.";

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Access log to analyze ("-" reads standard input)
    pub input: PathBuf,

    /// Where to write the JSON report
    pub output: PathBuf,

    /// Path to an HCL config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Entries kept in each ranking
    #[arg(long)]
    pub top: Option<usize>,

    /// Most recent 404 lines kept in the report
    #[arg(long)]
    pub recent: Option<usize>,

    /// Worker threads used for aggregation
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Print a human-readable summary after saving
    #[arg(long, default_value = "false")]
    pub summary: bool,

    /// Disable colors in the summary
    #[arg(long, default_value = "false")]
    pub no_color: bool,
}

impl AnalyzeArgs {
    /// Load the config file (if any) and apply command-line overrides.
    pub fn resolve_config(&self) -> Result<LogtallyConfig, ConfigError> {
        let mut cfg = match &self.config {
            Some(path) => load_config(path)?,
            None => LogtallyConfig::default(),
        };

        if let Some(top) = self.top {
            cfg.report.top_n = top;
        }
        if let Some(recent) = self.recent {
            cfg.report.recent_errors = recent;
        }
        if let Some(jobs) = self.jobs {
            cfg.analysis.jobs = jobs;
        }

        validate_config(&cfg)?;
        Ok(cfg)
    }
}

/// Run one analysis and report the outcome on stdout.
///
/// Returns the process exit code.
pub fn run_analyze(args: &AnalyzeArgs, cfg: &LogtallyConfig, color: bool) -> i32 {
    match analyze(&args.input, &args.output, cfg) {
        Ok(report) => {
            println!("{SUCCESS_MESSAGE} {}", args.output.display());
            if args.summary {
                println!();
                print!("{}", render_summary(&report, color && !args.no_color));
            }
            0
        }
        Err(AnalysisError::Source(e)) => {
            error!(error = %e, "error analyzing log file");
            println!("{FAILURE_MESSAGE}");
            1
        }
        Err(AnalysisError::Sink(e)) => {
            error!(error = %e, "error saving report");
            println!("{SAVE_FAILURE_MESSAGE}");
            1
        }
    }
}

pub fn analyze(input: &Path, output: &Path, cfg: &LogtallyConfig) -> Result<Report, AnalysisError> {
    Analyzer::new(cfg.analysis_options()).analyze_and_save(input, output)
}
