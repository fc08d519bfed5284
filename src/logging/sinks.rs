use std::{
    fs::OpenOptions,
    io::{LineWriter, Write},
    path::Path,
    sync::{Arc, Mutex, PoisonError},
};

use eyre::Context;

use super::{ConsoleSink, FileSink, Stream};

/// Writes to the process' stdout and stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdConsole;

impl StdConsole {
    pub fn new() -> Self {
        Self
    }
}

impl ConsoleSink for StdConsole {
    fn write_line(&self, stream: Stream, line: &str) -> eyre::Result<usize> {
        match stream {
            Stream::Stdout => write_line_to(std::io::stdout().lock(), line),
            Stream::Stderr => write_line_to(std::io::stderr().lock(), line),
        }
    }
}

fn write_line_to(mut writer: impl Write, line: &str) -> eyre::Result<usize> {
    writeln!(writer, "{}", line)?;
    writer.flush().context("Can't flush console")?;
    Ok(line.len() + 1)
}

/// Keeps every line in memory. Clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct MemoryConsole {
    lines: Arc<Mutex<Vec<(Stream, String)>>>,
}

impl MemoryConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(Stream, String)> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn stdout(&self) -> Vec<String> {
        self.on(Stream::Stdout)
    }

    pub fn stderr(&self) -> Vec<String> {
        self.on(Stream::Stderr)
    }

    pub fn is_empty(&self) -> bool {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    fn on(&self, stream: Stream) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(s, _)| *s == stream)
            .map(|(_, line)| line)
            .collect()
    }
}

impl ConsoleSink for MemoryConsole {
    fn write_line(&self, stream: Stream, line: &str) -> eyre::Result<usize> {
        self.lines
            .lock()
            .map_err(|e| eyre::eyre!(e.to_string()))?
            .push((stream, line.to_string()));
        Ok(line.len() + 1)
    }
}

/// Opens log files with `std::fs`, one handle per call.
#[derive(Debug, Default, Clone, Copy)]
pub struct AppendFile;

impl AppendFile {
    pub fn new() -> Self {
        Self
    }
}

impl FileSink for AppendFile {
    fn open_append(&self, path: &Path) -> eyre::Result<Box<dyn Write + Send>> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed opening or creating log file {}", path.display()))?;

        Ok(Box::new(LineWriter::new(file)))
    }
}
