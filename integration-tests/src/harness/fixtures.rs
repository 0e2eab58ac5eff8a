use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

/// A temporary directory holding an access log and a place for the report.
pub struct LogFixture {
    dir: TempDir,
    input: PathBuf,
}

impl LogFixture {
    pub fn with_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut body = String::new();
        for line in lines {
            body.push_str(line.as_ref());
            body.push('\n');
        }
        Self::with_bytes(body.as_bytes())
    }

    pub fn with_bytes(bytes: &[u8]) -> Self {
        let dir = tempdir().expect("failed to create temp dir");
        let input = dir.path().join("access.log");
        fs::write(&input, bytes).expect("failed to write access log");
        Self { dir, input }
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> PathBuf {
        self.dir.path().join("report.json")
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

/// A combined-format access log line.
pub fn combined_line(client: &str, day_hour: &str, method: &str, path: &str, status: u16) -> String {
    format!(
        r#"{client} - - [{day_hour}:15:00 +0000] "{method} {path} HTTP/1.1" {status} 1024 "-" "Mozilla/5.0""#
    )
}
