//! Leveled, prefix-annotated line logging.
//!
//! A [`Logger`] renders each statement as
//! `[ label ] [ item name ] [ prefix ]... message` and writes it to the
//! console (stderr for `error`/`fatal`, stdout otherwise) and, when file
//! logging is on, appends it to a log file. Records below either the
//! logger's own threshold or the process-wide one in [`Settings`] are
//! dropped before any formatting happens.

pub mod config;
pub mod logging;
pub mod policy;

mod macros;
mod severity;

pub use config::Settings;
pub use logging::{
    AppendFile, Builder, ConsoleSink, DefaultFormatter, FileSink, Logger, MemoryConsole, Record,
    Status, StdConsole, Step, Stream,
};
pub use policy::should_emit;
pub use severity::Severity;
