use crate::analysis::error::SourceError;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Path that selects standard input.
pub const STDIN_PATH: &str = "-";

/// One line as read from the source, without its terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    pub text: String,
    /// The bytes were not valid UTF-8 and were decoded lossily.
    pub lossy: bool,
}

impl From<&str> for RawLine {
    fn from(text: &str) -> Self {
        Self {
            text: text.to_string(),
            lossy: false,
        }
    }
}

/// Finite, ordered, single-pass producer of log lines.
pub struct LineSource {
    path: PathBuf,
    reader: Box<dyn BufRead + Send>,
    buf: Vec<u8>,
    done: bool,
}

impl LineSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        if path.as_os_str() == STDIN_PATH {
            return Ok(Self::from_reader(path, BufReader::new(io::stdin())));
        }

        let file = File::open(path).map_err(|e| SourceError::open(path, e))?;
        Ok(Self::from_reader(path, BufReader::new(file)))
    }

    pub fn from_reader(path: impl Into<PathBuf>, reader: impl BufRead + Send + 'static) -> Self {
        Self {
            path: path.into(),
            reader: Box::new(reader),
            buf: Vec::new(),
            done: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Drain the remaining lines into memory.
    pub fn collect_lines(self) -> Result<Vec<RawLine>, SourceError> {
        self.collect()
    }

    fn read_line(&mut self) -> Result<Option<RawLine>, SourceError> {
        self.buf.clear();

        let n = self
            .reader
            .read_until(b'\n', &mut self.buf)
            .map_err(|e| SourceError::read(&self.path, e))?;
        if n == 0 {
            return Ok(None);
        }

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }

        let line = match String::from_utf8(std::mem::take(&mut self.buf)) {
            Ok(text) => RawLine { text, lossy: false },
            Err(e) => RawLine {
                text: String::from_utf8_lossy(e.as_bytes()).into_owned(),
                lossy: true,
            },
        };

        Ok(Some(line))
    }
}

impl Iterator for LineSource {
    type Item = Result<RawLine, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.read_line() {
            Ok(Some(line)) => Some(Ok(line)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                // A failed read ends the stream; the caller decides what to do.
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
