mod formatters;
mod logger;
mod sinks;

use std::{io::Write, path::Path};

use crate::Severity;

pub use formatters::{DefaultFormatter, Record, Step};
pub use logger::{Builder, Logger, Status};
pub use sinks::{AppendFile, MemoryConsole, StdConsole};

/// Console stream a line is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl Stream {
    /// `Error` and `Fatal` go to stderr, everything else to stdout.
    pub fn for_severity(severity: Severity) -> Self {
        match severity {
            Severity::Error | Severity::Fatal => Stream::Stderr,
            _ => Stream::Stdout,
        }
    }
}

pub trait ConsoleSink: Sync + Send {
    /// Writes `line` and a trailing newline, returning the bytes written.
    fn write_line(&self, stream: Stream, line: &str) -> eyre::Result<usize>;
}

pub trait FileSink: Sync + Send {
    /// Opens `path` for appending, creating it if needed. The file is closed
    /// when the returned handle is dropped.
    fn open_append(&self, path: &Path) -> eyre::Result<Box<dyn Write + Send>>;
}
