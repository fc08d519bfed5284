//! Formatting front-ends for the emission methods on [`Logger`](crate::Logger).
//!
//! ```no_run
//! use prefix_logger::{Logger, Severity};
//!
//! let log = Logger::for_name("disk-monitor", Severity::Info);
//! prefix_logger::warn!(log, "disk {}", "full");
//! prefix_logger::fatal!(log, ["retry"]; "attempt {}", 3);
//! ```

#[doc(hidden)]
#[macro_export]
macro_rules! __emit {
    ($method:ident, $logger:expr, [$($prefix:expr),* $(,)?]; $($arg:tt)+) => {
        $logger.$method(&[$($prefix),*], ::std::format_args!($($arg)+))
    };
    ($method:ident, $logger:expr, $($arg:tt)+) => {
        $logger.$method(&[], ::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! fatal {
    ($($arg:tt)+) => { $crate::__emit!(fatal, $($arg)+) };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => { $crate::__emit!(error, $($arg)+) };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => { $crate::__emit!(warn, $($arg)+) };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => { $crate::__emit!(info, $($arg)+) };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => { $crate::__emit!(debug, $($arg)+) };
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{Builder, MemoryConsole, Settings, Severity, Status};

    #[test]
    fn macros_forward_prefixes_and_arguments() {
        let console = MemoryConsole::new();
        let settings = Arc::new(Settings::new());
        settings.set_file_logging(false);
        settings.set_level(Severity::Debug);

        let log = Builder::new()
            .with_settings(settings)
            .with_console(console.clone())
            .with_item_name("svc")
            .with_level(Severity::Debug)
            .build();

        let user = String::from("ada");
        crate::info!(log, "hello {}", user);
        crate::warn!(log, ["auth", user.as_str()]; "retry {} of {}", 1, 3);
        crate::debug!(log, []; "no prefixes");
        crate::error!(&log, "code={code}", code = 7);
        let status = crate::fatal!(log, ["retry"]; "attempt {}", 3);

        assert_eq!(status, Status::Written("[ fatal ] [ svc ] [ retry ] attempt 3".len() + 1));
        assert_eq!(
            console.stdout(),
            vec![
                "[  info ] [ svc ] hello ada".to_string(),
                "[  warn ] [ svc ] [ auth ] [ ada ] retry 1 of 3".to_string(),
                "[ debug ] [ svc ] no prefixes".to_string(),
            ]
        );
        assert_eq!(
            console.stderr(),
            vec![
                "[ error ] [ svc ] code=7".to_string(),
                "[ fatal ] [ svc ] [ retry ] attempt 3".to_string(),
            ]
        );
    }
}
