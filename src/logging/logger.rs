use std::{
    any::type_name,
    fmt,
    io::Write,
    path::{Path, PathBuf},
    sync::Arc,
};

use eyre::Context;
use log::{LevelFilter, Log};

use super::{
    formatters::{DefaultFormatter, Record, Step},
    sinks::{AppendFile, StdConsole},
    ConsoleSink, FileSink, Stream,
};
use crate::{config::Settings, policy, Severity};

/// Outcome of an emission call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Below the instance or the global threshold. Nothing was written.
    Suppressed,
    /// The log file could not be opened for appending.
    FileUnavailable,
    /// Bytes written to the last sink reached: the file when file logging is on,
    /// the console otherwise.
    Written(usize),
    /// The last sink reached accepted no bytes.
    WriteFailed,
}

impl Status {
    /// Integer form: `-1` suppressed, `-2` file unavailable, otherwise bytes written.
    pub fn code(self) -> isize {
        match self {
            Status::Suppressed => -1,
            Status::FileUnavailable => -2,
            Status::Written(written) => isize::try_from(written).unwrap_or(isize::MAX),
            Status::WriteFailed => 0,
        }
    }
}

pub struct Logger {
    print_item_name: bool,
    item_name: String,
    level: Severity,
    file_path: PathBuf,
    self_diagnostics: bool,
    use_ansi: bool,
    settings: Arc<Settings>,
    console: Box<dyn ConsoleSink>,
    file_sink: Box<dyn FileSink>,
}

impl Logger {
    /// Logger without an item name, bound to the process-wide settings.
    pub fn new(level: Severity, file_path: impl Into<PathBuf>, self_diagnostics: bool) -> Self {
        Builder::new()
            .with_level(level)
            .with_file_path(file_path)
            .with_self_diagnostics(self_diagnostics)
            .build()
    }

    /// Logger printing `name` as its first segment, writing to the current
    /// process-wide log file.
    pub fn for_name(name: impl Into<String>, level: Severity) -> Self {
        Builder::new().with_item_name(name).with_level(level).build()
    }

    /// Same as [`Logger::for_name`] with the type's path as the name.
    pub fn for_type<T: ?Sized>(level: Severity) -> Self {
        let logger = Self::for_name(type_name::<T>(), level);
        if logger.settings.self_diagnostics() {
            logger.selflog(format_args!(
                "Logger::for_type: type: {}; log level: {}",
                logger.item_name, level
            ));
        }
        logger
    }

    /// Installs this logger behind the `log` facade.
    pub fn init(self) -> eyre::Result<()> {
        // Thresholds can change at runtime, so filtering happens per record.
        log::set_max_level(LevelFilter::Trace);
        log::set_boxed_logger(Box::new(self)).context("Failed registering boxed logger")?;

        Ok(())
    }

    pub fn fatal(&self, prefixes: &[&str], args: fmt::Arguments<'_>) -> Status {
        self.log_at(Severity::Fatal, prefixes, args)
    }

    pub fn error(&self, prefixes: &[&str], args: fmt::Arguments<'_>) -> Status {
        self.log_at(Severity::Error, prefixes, args)
    }

    pub fn warn(&self, prefixes: &[&str], args: fmt::Arguments<'_>) -> Status {
        self.log_at(Severity::Warning, prefixes, args)
    }

    pub fn info(&self, prefixes: &[&str], args: fmt::Arguments<'_>) -> Status {
        self.log_at(Severity::Info, prefixes, args)
    }

    pub fn debug(&self, prefixes: &[&str], args: fmt::Arguments<'_>) -> Status {
        self.log_at(Severity::Debug, prefixes, args)
    }

    pub fn is_enabled(&self, severity: Severity) -> bool {
        policy::should_emit(severity, self.level, self.settings.level())
    }

    fn log_at(&self, severity: Severity, prefixes: &[&str], args: fmt::Arguments<'_>) -> Status {
        if !self.is_enabled(severity) {
            return Status::Suppressed;
        }

        let item_name = self.print_item_name.then_some(self.item_name.as_str());
        let record = Record::new(severity, item_name, prefixes, args);

        let plain = DefaultFormatter::plain();
        let line = if self.diagnostics_enabled() {
            plain.format_traced(&record, &mut |step| self.trace_step(step))
        } else {
            plain.format(&record)
        };
        let styled = self
            .use_ansi
            .then(|| DefaultFormatter::new(true).format(&record));

        self.dispatch(severity, styled.as_deref().unwrap_or(line.as_str()), &line)
    }

    fn dispatch(&self, severity: Severity, console_line: &str, file_line: &str) -> Status {
        let mut status = match self
            .console
            .write_line(Stream::for_severity(severity), console_line)
        {
            Ok(written) => Status::Written(written),
            Err(_) => Status::WriteFailed,
        };

        if self.settings.file_logging() {
            status = self.append_to_file(file_line);
        }

        status
    }

    fn append_to_file(&self, line: &str) -> Status {
        let mut file = match self.file_sink.open_append(&self.file_path) {
            Ok(file) => file,
            Err(err) => {
                self.report_failure(format_args!(
                    "Failed to open '{}' (error: {})",
                    self.file_path.display(),
                    err.root_cause()
                ));
                return Status::FileUnavailable;
            }
        };

        match write_line(&mut file, line) {
            Ok(written) => Status::Written(written),
            Err(err) => {
                self.report_failure(format_args!(
                    "Failed to write to '{}' (error: {})",
                    self.file_path.display(),
                    err.root_cause()
                ));
                Status::WriteFailed
            }
        }
    }

    fn diagnostics_enabled(&self) -> bool {
        self.self_diagnostics || self.settings.self_diagnostics()
    }

    fn diagnostic_name(&self) -> &str {
        if self.item_name.is_empty() {
            "-"
        } else {
            &self.item_name
        }
    }

    fn trace_step(&self, step: Step<'_>) {
        match step {
            Step::Label { line } => self.selflog(format_args!("Message: {}", line)),
            Step::ItemName { name, line } => {
                self.selflog(format_args!("Item name: {}", name));
                self.selflog(format_args!("Message: {}", line));
            }
            Step::Prefix { prefix, line } => {
                self.selflog(format_args!("Found prefix: {}", prefix));
                self.selflog(format_args!("Message: {}", line));
            }
        }
    }

    fn selflog(&self, args: fmt::Arguments<'_>) {
        let line = format!("[selflog] [ {} ] {}", self.diagnostic_name(), args);
        let _ = self.console.write_line(Stream::Stdout, &line);
    }

    fn report_failure(&self, args: fmt::Arguments<'_>) {
        let line = format!(
            "[ fatal ] [selflog] [ {} ] {}",
            self.diagnostic_name(),
            args
        );
        let _ = self.console.write_line(Stream::Stdout, &line);
    }

    pub fn print_item_name(&self) -> bool {
        self.print_item_name
    }

    pub fn set_print_item_name(&mut self, print_item_name: bool) {
        self.print_item_name = print_item_name;
    }

    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    pub fn set_item_name(&mut self, item_name: impl Into<String>) {
        self.item_name = item_name.into();
    }

    pub fn level(&self) -> Severity {
        self.level
    }

    pub fn set_level(&mut self, level: Severity) {
        self.level = level;
    }

    pub fn self_diagnostics(&self) -> bool {
        self.self_diagnostics
    }

    pub fn set_self_diagnostics(&mut self, enabled: bool) {
        self.self_diagnostics = enabled;
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn set_file_path(&mut self, path: impl Into<PathBuf>) {
        self.file_path = path.into();
    }

    pub fn use_ansi(&self) -> bool {
        self.use_ansi
    }

    /// Colours the level label on the console copy. The file copy stays plain.
    pub fn set_use_ansi(&mut self, use_ansi: bool) {
        self.use_ansi = use_ansi;
    }

    pub fn settings(&self) -> &Arc<Settings> {
        &self.settings
    }

    pub fn global_level() -> Severity {
        Settings::global().level()
    }

    pub fn set_global_level(level: Severity) {
        Settings::global().set_level(level)
    }

    pub fn global_self_diagnostics() -> bool {
        Settings::global().self_diagnostics()
    }

    pub fn set_global_self_diagnostics(enabled: bool) {
        Settings::global().set_self_diagnostics(enabled)
    }

    pub fn global_file_logging() -> bool {
        Settings::global().file_logging()
    }

    pub fn set_global_file_logging(enabled: bool) {
        Settings::global().set_file_logging(enabled)
    }

    pub fn global_file_path() -> PathBuf {
        Settings::global().file_path()
    }

    pub fn set_global_file_path(path: impl AsRef<Path>) {
        Settings::global().set_file_path(path)
    }
}

fn write_line(file: &mut dyn Write, line: &str) -> eyre::Result<usize> {
    writeln!(file, "{}", line).context("Can't write log line")?;
    file.flush().context("Can't flush log file")?;
    Ok(line.len() + 1)
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("print_item_name", &self.print_item_name)
            .field("item_name", &self.item_name)
            .field("level", &self.level)
            .field("file_path", &self.file_path)
            .field("self_diagnostics", &self.self_diagnostics)
            .field("use_ansi", &self.use_ansi)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.is_enabled(metadata.level().into())
    }

    fn log(&self, record: &log::Record) {
        let target = [record.target()];
        let prefixes = if target[0].is_empty() {
            &target[..0]
        } else {
            &target[..]
        };

        self.log_at(record.level().into(), prefixes, *record.args());
    }

    fn flush(&self) {}
}

#[derive(Default)]
pub struct Builder {
    item_name: Option<String>,
    print_item_name: Option<bool>,
    level: Option<Severity>,
    file_path: Option<PathBuf>,
    self_diagnostics: bool,
    use_ansi: bool,
    settings: Option<Arc<Settings>>,
    console: Option<Box<dyn ConsoleSink>>,
    file_sink: Option<Box<dyn FileSink>>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also turns on printing of the name unless overridden with
    /// [`Builder::with_print_item_name`].
    pub fn with_item_name(self, name: impl Into<String>) -> Self {
        Self {
            item_name: Some(name.into()),
            ..self
        }
    }

    pub fn with_print_item_name(self, print_item_name: bool) -> Self {
        Self {
            print_item_name: Some(print_item_name),
            ..self
        }
    }

    pub fn with_level(self, level: Severity) -> Self {
        Self {
            level: Some(level),
            ..self
        }
    }

    pub fn with_file_path(self, path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: Some(path.into()),
            ..self
        }
    }

    pub fn with_self_diagnostics(self, self_diagnostics: bool) -> Self {
        Self {
            self_diagnostics,
            ..self
        }
    }

    pub fn with_ansi(self, use_ansi: bool) -> Self {
        Self { use_ansi, ..self }
    }

    /// Binds the logger to `settings` instead of the process-wide ones.
    pub fn with_settings(self, settings: Arc<Settings>) -> Self {
        Self {
            settings: Some(settings),
            ..self
        }
    }

    pub fn with_console(self, console: impl ConsoleSink + 'static) -> Self {
        Self {
            console: Some(Box::new(console)),
            ..self
        }
    }

    pub fn with_file_sink(self, file_sink: impl FileSink + 'static) -> Self {
        Self {
            file_sink: Some(Box::new(file_sink)),
            ..self
        }
    }

    /// Unset fields fall back to the settings: the level to the global
    /// threshold, the file path to the global log file.
    pub fn build(self) -> Logger {
        let settings = self.settings.unwrap_or_else(Settings::global);
        let print_item_name = self.print_item_name.unwrap_or(self.item_name.is_some());

        Logger {
            print_item_name,
            item_name: self.item_name.unwrap_or_default(),
            level: self.level.unwrap_or_else(|| settings.level()),
            file_path: self.file_path.unwrap_or_else(|| settings.file_path()),
            self_diagnostics: self.self_diagnostics,
            use_ansi: self.use_ansi,
            console: self.console.unwrap_or_else(|| Box::new(StdConsole::new())),
            file_sink: self.file_sink.unwrap_or_else(|| Box::new(AppendFile::new())),
            settings,
        }
    }
}
