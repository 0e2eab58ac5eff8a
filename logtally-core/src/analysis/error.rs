use std::path::PathBuf;
use thiserror::Error;

/// The input could not be opened or read. Nothing was analyzed.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to open log source {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read log source {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SourceError {
    pub fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }

    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}

/// The report was built but could not be saved. The in-memory report is still
/// valid.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write report to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to move report into place at {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SinkError {
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("nothing to analyze: {0}")]
    Source(#[from] SourceError),

    #[error("analyzed but could not save: {0}")]
    Sink(#[from] SinkError),
}
