use crate::analysis::error::SinkError;
use crate::analysis::report::Report;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

/// Serialize `report` as pretty JSON and put it at `path`.
///
/// The bytes go to a temporary file next to `path` which is then renamed over
/// it, so `path` either holds a complete report or is left untouched.
pub fn write_report(report: &Report, path: &Path) -> Result<(), SinkError> {
    let mut bytes = serde_json::to_vec_pretty(report)?;
    bytes.push(b'\n');

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| SinkError::write(path, e))?;
    tmp.write_all(&bytes).map_err(|e| SinkError::write(path, e))?;
    tmp.as_file().sync_all().map_err(|e| SinkError::write(path, e))?;

    tmp.persist(path).map_err(|e| SinkError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    info!(output = %path.display(), "report saved");
    Ok(())
}
