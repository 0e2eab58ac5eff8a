use crate::cli::{
    AnalyzeArgs, FAILURE_MESSAGE, SAVE_FAILURE_MESSAGE, analyze, config_error_hint, run_analyze,
};
use crate::conf::{ConfigError, LogtallyConfig};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn args(config: Option<PathBuf>) -> AnalyzeArgs {
    AnalyzeArgs {
        input: PathBuf::from("access.log"),
        output: PathBuf::from("report.json"),
        config,
        top: None,
        recent: None,
        jobs: None,
        summary: false,
        no_color: false,
    }
}

#[test]
fn flags_override_config_file() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("logtally.hcl");
    fs::write(&path, "report {\n  top_n = 4\n  recent_errors = 4\n}\n").unwrap();
    let mut args = args(Some(path));
    args.top = Some(2);
    args.jobs = Some(3);

    // Act
    let cfg = args.resolve_config().unwrap();

    // Assert
    assert_eq!(cfg.report.top_n, 2);
    assert_eq!(cfg.report.recent_errors, 4);
    assert_eq!(cfg.analysis.jobs, 3);
}

#[test]
fn no_config_gives_defaults() {
    let cfg = args(None).resolve_config().unwrap();

    assert_eq!(cfg, LogtallyConfig::default());
}

#[test]
fn zero_override_is_rejected_with_hint() {
    let mut args = args(None);
    args.top = Some(0);

    let err = args.resolve_config().unwrap_err();

    assert!(matches!(err, ConfigError::Invalid { field: "report.top_n", .. }));
    assert!(config_error_hint(&err).is_some());
}

#[test]
fn analyze_writes_report_and_returns_it() {
    // Arrange
    let dir = tempdir().unwrap();
    let input = dir.path().join("access.log");
    let output = dir.path().join("report.json");
    fs::write(&input, "1.2.3.4 - - [10/Oct/2023:13:55:36] \"GET /\" 404\n").unwrap();

    // Act
    let report = analyze(&input, &output, &LogtallyConfig::default()).unwrap();

    // Assert
    assert_eq!(report.summary.total_404_errors, 1);
    assert!(output.exists());
}

fn run_args(input: PathBuf, output: PathBuf) -> AnalyzeArgs {
    AnalyzeArgs {
        input,
        output,
        ..args(None)
    }
}

#[test]
fn run_analyze_returns_zero_and_saves_report() {
    // Arrange
    let dir = tempdir().unwrap();
    let input = dir.path().join("access.log");
    fs::write(&input, "1.2.3.4 - - [10/Oct/2023:13:55:36] \"GET /\" 200\n").unwrap();
    let args = run_args(input, dir.path().join("report.json"));

    // Act
    let code = run_analyze(&args, &LogtallyConfig::default(), false);

    // Assert
    assert_eq!(code, 0);
    let saved = fs::read_to_string(&args.output).unwrap();
    assert!(saved.contains("\"total_requests\": 1"));
}

#[test]
fn run_analyze_fails_on_missing_input_without_writing_report() {
    // Arrange
    let dir = tempdir().unwrap();
    let args = run_args(dir.path().join("missing.log"), dir.path().join("report.json"));

    // Act
    let code = run_analyze(&args, &LogtallyConfig::default(), false);

    // Assert
    assert_eq!(code, 1);
    assert!(!args.output.exists());
}

#[test]
fn run_analyze_fails_when_report_cannot_be_saved() {
    // Arrange
    let dir = tempdir().unwrap();
    let input = dir.path().join("access.log");
    fs::write(&input, "1.2.3.4 - - [10/Oct/2023:13:55:36] \"GET /\" 404\n").unwrap();
    let args = run_args(input, dir.path().join("no-such-dir").join("report.json"));

    // Act
    let code = run_analyze(&args, &LogtallyConfig::default(), false);

    // Assert
    assert_eq!(code, 1);
    assert!(!args.output.exists());
    assert!(!dir.path().join("no-such-dir").exists());
}

#[test]
fn failure_messages_are_distinct() {
    assert_ne!(FAILURE_MESSAGE, SAVE_FAILURE_MESSAGE);
    assert!(FAILURE_MESSAGE.starts_with("Analysis failed."));
    assert!(SAVE_FAILURE_MESSAGE.starts_with("Analysis complete but"));
}
