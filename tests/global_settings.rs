//! Touches the process-wide settings, so it lives in its own test binary.

use std::path::PathBuf;

use prefix_logger::{Logger, Settings, Severity};

#[test]
fn global_settings_round_trip() {
    Logger::set_global_level(Severity::Fatal);
    assert_eq!(Logger::global_level(), Severity::Fatal);
    assert_eq!(Settings::global().level(), Severity::Fatal);

    Logger::set_global_self_diagnostics(true);
    assert!(Logger::global_self_diagnostics());
    Logger::set_global_self_diagnostics(false);
    assert!(!Logger::global_self_diagnostics());

    Logger::set_global_file_logging(false);
    assert!(!Logger::global_file_logging());

    Logger::set_global_file_path("/tmp/global-round-trip.log");
    assert_eq!(
        Logger::global_file_path(),
        PathBuf::from("/tmp/global-round-trip.log")
    );

    let named = Logger::for_name("late", Severity::Debug);
    assert_eq!(named.file_path(), Logger::global_file_path());

    // Global floor beats the instance threshold; nothing is written.
    assert_eq!(named.error(&[], format_args!("dropped")).code(), -1);
    assert!(named.fatal(&[], format_args!("kept")).code() >= 0);

    let plain = Logger::new(Severity::Debug, "/tmp/plain.log", false);
    assert_eq!(plain.level(), Severity::Debug);
    assert_eq!(plain.info(&[], format_args!("dropped")).code(), -1);
}
