use std::{
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, AtomicU8, Ordering},
        Arc, OnceLock, PoisonError, RwLock,
    },
};

use crate::Severity;

pub const DEFAULT_FILE_PATH: &str = "output.log";

pub const LEVEL_VAR: &str = "PREFIX_LOGGER_LEVEL";
pub const FILE_VAR: &str = "PREFIX_LOGGER_FILE";
pub const FILE_LOGGING_VAR: &str = "PREFIX_LOGGER_FILE_LOGGING";
pub const SELFLOG_VAR: &str = "PREFIX_LOGGER_SELFLOG";

static GLOBAL: OnceLock<Arc<Settings>> = OnceLock::new();

/// Settings shared by every logger holding the same `Arc`.
///
/// Writes are visible to all holders from then on. Concurrent writers race and
/// the last one wins; nothing here orders them.
#[derive(Debug)]
pub struct Settings {
    level: AtomicU8,
    self_diagnostics: AtomicBool,
    file_logging: AtomicBool,
    file_path: RwLock<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings {
    pub fn new() -> Self {
        Self {
            level: AtomicU8::new(Severity::Info.rank()),
            self_diagnostics: AtomicBool::new(false),
            file_logging: AtomicBool::new(true),
            file_path: RwLock::new(PathBuf::from(DEFAULT_FILE_PATH)),
        }
    }

    /// Defaults, overridden by any `PREFIX_LOGGER_*` variables that are set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let settings = Self::new();

        if let Some(label) = lookup(LEVEL_VAR) {
            settings.set_level(Severity::from_label(label.trim()));
        }

        if let Some(path) = lookup(FILE_VAR).filter(|path| !path.is_empty()) {
            settings.set_file_path(path);
        }

        if let Some(enabled) = lookup(FILE_LOGGING_VAR).as_deref().and_then(parse_flag) {
            settings.set_file_logging(enabled);
        }

        if let Some(enabled) = lookup(SELFLOG_VAR).as_deref().and_then(parse_flag) {
            settings.set_self_diagnostics(enabled);
        }

        settings
    }

    /// The process-wide settings, read from the environment on first use.
    pub fn global() -> Arc<Settings> {
        GLOBAL
            .get_or_init(|| Arc::new(Settings::from_env()))
            .clone()
    }

    pub fn level(&self) -> Severity {
        Severity::from_rank(self.level.load(Ordering::Relaxed)).unwrap_or(Severity::Info)
    }

    pub fn set_level(&self, level: Severity) {
        self.level.store(level.rank(), Ordering::Relaxed);
    }

    pub fn self_diagnostics(&self) -> bool {
        self.self_diagnostics.load(Ordering::Relaxed)
    }

    pub fn set_self_diagnostics(&self, enabled: bool) {
        self.self_diagnostics.store(enabled, Ordering::Relaxed);
    }

    pub fn file_logging(&self) -> bool {
        self.file_logging.load(Ordering::Relaxed)
    }

    pub fn set_file_logging(&self, enabled: bool) {
        self.file_logging.store(enabled, Ordering::Relaxed);
    }

    pub fn file_path(&self) -> PathBuf {
        self.file_path
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_file_path(&self, path: impl AsRef<Path>) {
        *self
            .file_path
            .write()
            .unwrap_or_else(PoisonError::into_inner) = path.as_ref().to_path_buf();
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!(settings.level(), Severity::Info);
        assert!(!settings.self_diagnostics());
        assert!(settings.file_logging());
        assert_eq!(settings.file_path(), PathBuf::from("output.log"));
    }

    #[test]
    fn setters_round_trip_without_validation() {
        let settings = Settings::new();

        settings.set_level(Severity::All);
        assert_eq!(settings.level(), Severity::All);
        settings.set_level(Severity::Debug);
        assert_eq!(settings.level(), Severity::Debug);

        settings.set_self_diagnostics(true);
        assert!(settings.self_diagnostics());

        settings.set_file_logging(false);
        assert!(!settings.file_logging());

        settings.set_file_path("");
        assert_eq!(settings.file_path(), PathBuf::new());
        settings.set_file_path("/var/log/app.log");
        assert_eq!(settings.file_path(), PathBuf::from("/var/log/app.log"));
    }

    #[test]
    fn environment_overrides_defaults() {
        let settings = Settings::from_lookup(lookup_from(&[
            (LEVEL_VAR, "warning"),
            (FILE_VAR, "/tmp/app.log"),
            (FILE_LOGGING_VAR, "off"),
            (SELFLOG_VAR, "TRUE"),
        ]));

        assert_eq!(settings.level(), Severity::Warning);
        assert_eq!(settings.file_path(), PathBuf::from("/tmp/app.log"));
        assert!(!settings.file_logging());
        assert!(settings.self_diagnostics());
    }

    #[test]
    fn unparseable_flags_keep_defaults() {
        let settings = Settings::from_lookup(lookup_from(&[
            (FILE_LOGGING_VAR, "maybe"),
            (SELFLOG_VAR, ""),
            (FILE_VAR, ""),
        ]));

        assert!(settings.file_logging());
        assert!(!settings.self_diagnostics());
        assert_eq!(settings.file_path(), PathBuf::from(DEFAULT_FILE_PATH));
    }

    #[test]
    fn unknown_level_label_is_info() {
        let settings = Settings::from_lookup(lookup_from(&[(LEVEL_VAR, "ERROR")]));
        assert_eq!(settings.level(), Severity::Info);
    }
}
