use std::fmt::Display;

/// Ordered log severity. Variants compare by their rank.
///
/// `All` is only meaningful as a threshold; no emission operation carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Severity {
    Debug = 0,
    Info = 1,
    Warning = 2,
    Error = 3,
    Fatal = 4,
    All = 9,
}

impl Severity {
    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn from_rank(rank: u8) -> Option<Self> {
        match rank {
            0 => Some(Severity::Debug),
            1 => Some(Severity::Info),
            2 => Some(Severity::Warning),
            3 => Some(Severity::Error),
            4 => Some(Severity::Fatal),
            9 => Some(Severity::All),
            _ => None,
        }
    }

    /// Maps a label to a severity. Matching is exact and case-sensitive; anything
    /// unrecognised (including `"info"`) is `Info`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "fatal" => Severity::Fatal,
            "error" => Severity::Error,
            "warn" | "warning" => Severity::Warning,
            "debug" => Severity::Debug,
            _ => Severity::Info,
        }
    }

    /// Fixed-width label used in the opening segment of a rendered line.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => " info",
            Severity::Warning => " warn",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
            Severity::All => "",
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::All => write!(f, "all"),
            other => write!(f, "{}", other.label().trim_start()),
        }
    }
}

impl From<log::Level> for Severity {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Severity::Error,
            log::Level::Warn => Severity::Warning,
            log::Level::Info => Severity::Info,
            log::Level::Debug | log::Level::Trace => Severity::Debug,
        }
    }
}
